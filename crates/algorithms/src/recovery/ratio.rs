//! Recovery ratio
//!
//! Compares burned-area NDVI against the mean NDVI of a healthy unburned
//! reference area from the same scene and year.

use ndarray::Array2;
use regrowth_core::raster::Raster;
use regrowth_core::{Error, Result};

/// Cell classes of the fire-perimeter raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FireClass {
    Burned = 1,
    Healthy = 2,
}

impl FireClass {
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Compute the per-pixel recovery ratio for one year.
///
/// The denominator is the mean NDVI over healthy-reference cells with a
/// nonzero NDVI. Burned cells get `ndvi / healthy_mean`; every other cell
/// is 0, so the output is zero outside the burn perimeter.
///
/// # Arguments
/// * `ndvi` - NDVI raster for the year
/// * `fire` - Fire-perimeter raster (1 = burned, 2 = healthy reference)
///
/// # Errors
/// `SizeMismatch` if the rasters differ in shape; `DegenerateInput` if the
/// healthy reference area is empty or has zero mean NDVI.
pub fn recovery_ratio(ndvi: &Raster<f64>, fire: &Raster<i32>) -> Result<Raster<f64>> {
    let (rows, cols) = ndvi.shape();
    let (rows_f, cols_f) = fire.shape();
    if rows != rows_f || cols != cols_f {
        return Err(Error::SizeMismatch {
            er: rows,
            ec: cols,
            ar: rows_f,
            ac: cols_f,
        });
    }

    let mut healthy_sum = 0.0;
    let mut healthy_count = 0usize;
    for (&f, &v) in fire.data().iter().zip(ndvi.data().iter()) {
        if f == FireClass::Healthy.value() && v != 0.0 && !v.is_nan() {
            healthy_sum += v;
            healthy_count += 1;
        }
    }

    if healthy_count == 0 {
        return Err(Error::DegenerateInput(
            "no healthy reference cells with nonzero NDVI".to_string(),
        ));
    }
    let healthy_mean = healthy_sum / healthy_count as f64;
    if healthy_mean == 0.0 {
        return Err(Error::DegenerateInput(
            "healthy reference area has zero mean NDVI".to_string(),
        ));
    }

    let data: Vec<f64> = fire
        .data()
        .iter()
        .zip(ndvi.data().iter())
        .map(|(&f, &v)| {
            if f == FireClass::Burned.value() {
                v / healthy_mean
            } else {
                0.0
            }
        })
        .collect();

    let mut output = ndvi.with_same_meta::<f64>(rows, cols);
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}
