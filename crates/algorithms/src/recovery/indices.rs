//! Spectral vegetation indices

use crate::maybe_rayon::*;
use ndarray::Array2;
use regrowth_core::raster::Raster;
use regrowth_core::{Error, Result};

/// Compute the normalized difference between two bands:
///
/// `(band_a - band_b) / (band_a + band_b)`
///
/// Result is in [-1, 1]. Pixels where the band sum is zero become NaN
/// instead of dividing by zero.
pub fn normalized_difference(band_a: &Raster<f64>, band_b: &Raster<f64>) -> Result<Raster<f64>> {
    let (rows, cols) = band_a.shape();
    let (rows_b, cols_b) = band_b.shape();
    if rows != rows_b || cols != cols_b {
        return Err(Error::SizeMismatch {
            er: rows,
            ec: cols,
            ar: rows_b,
            ac: cols_b,
        });
    }

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            for col in 0..cols {
                let a = unsafe { band_a.get_unchecked(row, col) };
                let b = unsafe { band_b.get_unchecked(row, col) };

                let sum = a + b;
                if sum.abs() < 1e-10 {
                    continue;
                }
                row_data[col] = (a - b) / sum;
            }
            row_data
        })
        .collect();

    let mut output = band_a.with_same_meta::<f64>(rows, cols);
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red)`
///
/// Dense vegetation sits around 0.6-0.9, bare soil near 0.1-0.2, and
/// freshly burned ground drops toward 0.
///
/// # Arguments
/// * `nir` - Near-infrared band (Landsat band 4)
/// * `red` - Red band (Landsat band 3)
pub fn ndvi(nir: &Raster<f64>, red: &Raster<f64>) -> Result<Raster<f64>> {
    normalized_difference(nir, red)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ndvi_values() {
        let nir = Raster::from_vec(vec![80.0, 50.0, 10.0, 0.0], 2, 2).unwrap();
        let red = Raster::from_vec(vec![20.0, 50.0, 30.0, 0.0], 2, 2).unwrap();

        let result = ndvi(&nir, &red).unwrap();

        assert_relative_eq!(result.get(0, 0).unwrap(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(result.get(0, 1).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.get(1, 0).unwrap(), -0.5, epsilon = 1e-12);
        // Zero-sum pixel is NaN, not a division by zero
        assert!(result.get(1, 1).unwrap().is_nan());
    }

    #[test]
    fn test_shape_mismatch() {
        let nir: Raster<f64> = Raster::new(2, 2);
        let red: Raster<f64> = Raster::new(2, 3);
        assert!(ndvi(&nir, &red).is_err());
    }
}
