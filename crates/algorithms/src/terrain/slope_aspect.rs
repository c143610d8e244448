//! Slope and aspect from directional gradients
//!
//! Combines the two Horn gradients into steepness (degrees from horizontal)
//! and facing direction (compass bearing, -1 for flat cells).

use crate::maybe_rayon::*;
use crate::terrain::gradient::{horn_gradients, GradientParams};
use ndarray::Array2;
use regrowth_core::raster::Raster;
use regrowth_core::{Error, Result};

/// Aspect value assigned to cells with no downslope direction
pub const FLAT_ASPECT: f64 = -1.0;

/// Compute slope and aspect from precomputed gradients.
///
/// Slope (degrees, [0, 90)):
/// `atan(sqrt(dz_dx^2 + dz_dy^2))`
///
/// Aspect (compass degrees, 0 = North, clockwise; -1 for flat cells) uses
/// the standard DEM remap of the mathematical angle `atan2(dz_dy, -dz_dx)`:
/// negative angles map to `90 - raw`, angles past 90 wrap through
/// `360 - raw + 90`, the rest map to `90 - raw`. The downstream aspect
/// zoning assumes exactly these bearing semantics.
///
/// # Arguments
/// * `dz_dx` - Eastward gradient (already scaled by cell size)
/// * `dz_dy` - Southward gradient (already scaled by cell size)
///
/// # Returns
/// `(slope, aspect)` rasters; aspect carries -1 as its nodata value
pub fn slope_aspect(
    dz_dx: &Raster<f64>,
    dz_dy: &Raster<f64>,
) -> Result<(Raster<f64>, Raster<f64>)> {
    let (rows, cols) = dz_dx.shape();
    let (rows_y, cols_y) = dz_dy.shape();
    if rows != rows_y || cols != cols_y {
        return Err(Error::SizeMismatch {
            er: rows,
            ec: cols,
            ar: rows_y,
            ac: cols_y,
        });
    }

    let pairs: Vec<(f64, f64)> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = Vec::with_capacity(cols);

            for col in 0..cols {
                let dx = unsafe { dz_dx.get_unchecked(row, col) };
                let dy = unsafe { dz_dy.get_unchecked(row, col) };

                let slope = (dx * dx + dy * dy).sqrt().atan().to_degrees();
                let aspect = if dx == 0.0 && dy == 0.0 {
                    FLAT_ASPECT
                } else {
                    let raw = dy.atan2(-dx).to_degrees();
                    if raw < 0.0 {
                        90.0 - raw
                    } else if raw > 90.0 {
                        360.0 - raw + 90.0
                    } else {
                        90.0 - raw
                    }
                };

                row_data.push((slope, aspect));
            }

            row_data
        })
        .collect();

    let (slope_data, aspect_data): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();

    let mut slope = dz_dx.with_same_meta::<f64>(rows, cols);
    *slope.data_mut() = Array2::from_shape_vec((rows, cols), slope_data)
        .map_err(|e| Error::Other(e.to_string()))?;

    let mut aspect = dz_dx.with_same_meta::<f64>(rows, cols);
    aspect.set_nodata(Some(FLAT_ASPECT));
    *aspect.data_mut() = Array2::from_shape_vec((rows, cols), aspect_data)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok((slope, aspect))
}

/// Convenience: slope and aspect straight from a DEM.
///
/// Chains [`horn_gradients`] and [`slope_aspect`].
pub fn slope_aspect_of_dem(
    dem: &Raster<f64>,
    params: GradientParams,
) -> Result<(Raster<f64>, Raster<f64>)> {
    let (dz_dx, dz_dy) = horn_gradients(dem, params)?;
    slope_aspect(&dz_dx, &dz_dy)
}
