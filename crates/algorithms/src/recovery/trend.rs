//! Recovery trend (coefficient of recovery)
//!
//! Fits a least-squares line through each pixel's recovery ratio across
//! years and keeps the slope. A positive slope means the pixel is
//! recovering; the steeper, the faster.

use crate::maybe_rayon::*;
use ndarray::Array2;
use regrowth_core::raster::Raster;
use regrowth_core::{Error, Result};

/// Fit a per-pixel linear trend of recovery ratio against year.
///
/// `years[k]` labels `ratios[k]`; all ratio rasters must share one shape.
/// The output cell is the ordinary-least-squares slope
/// `sum((x - x_mean)(y - y_mean)) / sum((x - x_mean)^2)`.
///
/// # Errors
/// `InvalidParameter` if fewer than two years are supplied, the lengths
/// disagree, or all years are identical; `SizeMismatch` if any ratio grid
/// deviates from the first one's shape.
pub fn recovery_trend(years: &[i32], ratios: &[Raster<f64>]) -> Result<Raster<f64>> {
    if years.len() != ratios.len() {
        return Err(Error::InvalidParameter {
            name: "years",
            value: years.len().to_string(),
            reason: format!("expected one year per ratio grid ({})", ratios.len()),
        });
    }
    if years.len() < 2 {
        return Err(Error::InvalidParameter {
            name: "years",
            value: years.len().to_string(),
            reason: "a trend needs at least two years".to_string(),
        });
    }

    let (rows, cols) = ratios[0].shape();
    for r in &ratios[1..] {
        let (ar, ac) = r.shape();
        if ar != rows || ac != cols {
            return Err(Error::SizeMismatch {
                er: rows,
                ec: cols,
                ar,
                ac,
            });
        }
    }

    let n = years.len() as f64;
    let x_mean = years.iter().map(|&y| y as f64).sum::<f64>() / n;
    let x_dev: Vec<f64> = years.iter().map(|&y| y as f64 - x_mean).collect();
    let x_var: f64 = x_dev.iter().map(|d| d * d).sum();
    if x_var == 0.0 {
        return Err(Error::InvalidParameter {
            name: "years",
            value: format!("{:?}", years),
            reason: "all years are identical".to_string(),
        });
    }

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = Vec::with_capacity(cols);
            for col in 0..cols {
                let mut y_sum = 0.0;
                for r in ratios {
                    y_sum += unsafe { r.get_unchecked(row, col) };
                }
                let y_mean = y_sum / n;

                let mut covar = 0.0;
                for (r, dx) in ratios.iter().zip(&x_dev) {
                    let y = unsafe { r.get_unchecked(row, col) };
                    covar += dx * (y - y_mean);
                }

                row_data.push(covar / x_var);
            }
            row_data
        })
        .collect();

    let mut output = ratios[0].with_same_meta::<f64>(rows, cols);
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_linear_stack() {
        // Ratio rises by exactly 0.1 per year everywhere
        let years = [2002, 2003, 2004, 2005];
        let ratios: Vec<Raster<f64>> = (0..4)
            .map(|k| Raster::filled(3, 3, 0.5 + 0.1 * k as f64))
            .collect();

        let trend = recovery_trend(&years, &ratios).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(trend.get(row, col).unwrap(), 0.1, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_constant_stack_zero_trend() {
        let years = [2002, 2005, 2008];
        let ratios: Vec<Raster<f64>> = (0..3).map(|_| Raster::filled(2, 2, 0.7)).collect();

        let trend = recovery_trend(&years, &ratios).unwrap();
        assert_relative_eq!(trend.get(1, 1).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uneven_year_spacing() {
        // y = 0.05 * year + c sampled at irregular years still recovers 0.05
        let years = [2002, 2003, 2007];
        let ratios: Vec<Raster<f64>> = years
            .iter()
            .map(|&y| Raster::filled(2, 2, 0.05 * y as f64))
            .collect();

        let trend = recovery_trend(&years, &ratios).unwrap();
        assert_relative_eq!(trend.get(0, 0).unwrap(), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_input_validation() {
        let one = vec![Raster::<f64>::filled(2, 2, 1.0)];
        assert!(recovery_trend(&[2002], &one).is_err());

        let two = vec![
            Raster::<f64>::filled(2, 2, 1.0),
            Raster::<f64>::filled(2, 3, 1.0),
        ];
        assert!(recovery_trend(&[2002, 2003], &two).is_err());

        let same_year = vec![
            Raster::<f64>::filled(2, 2, 1.0),
            Raster::<f64>::filled(2, 2, 2.0),
        ];
        assert!(recovery_trend(&[2002, 2002], &same_year).is_err());

        assert!(recovery_trend(&[2002, 2003], &one).is_err());
    }
}
