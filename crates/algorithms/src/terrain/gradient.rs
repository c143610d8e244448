//! Directional elevation gradients from DEMs
//!
//! Estimates partial derivatives of elevation using the Horn (1981) method,
//! which weights the 3x3 neighborhood around each cell.

use crate::maybe_rayon::*;
use ndarray::Array2;
use regrowth_core::raster::Raster;
use regrowth_core::{Algorithm, Error, Result};

/// Parameters for gradient estimation
#[derive(Debug, Clone)]
pub struct GradientParams {
    /// Linear cell spacing in the DEM's planar units. Must be positive.
    pub cell_size: f64,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self { cell_size: 1.0 }
    }
}

/// Horn gradient algorithm
#[derive(Debug, Clone, Default)]
pub struct HornGradients;

impl Algorithm for HornGradients {
    type Input = Raster<f64>;
    type Output = (Raster<f64>, Raster<f64>);
    type Params = GradientParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "HornGradients"
    }

    fn description(&self) -> &'static str {
        "Estimate dz/dx and dz/dy from a DEM using Horn's 3x3 weighted differences"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        horn_gradients(&input, params)
    }
}

/// Estimate directional elevation gradients from a DEM.
///
/// Uses Horn's (1981) method with a 3x3 neighborhood:
/// ```text
/// a b c
/// d e f
/// g h i
/// ```
///
/// dz/dx = ((c + 2f + i) - (a + 2d + g)) / (8 * cell_size)
/// dz/dy = ((g + 2h + i) - (a + 2b + c)) / (8 * cell_size)
///
/// The border ring is padded by edge replication (out-of-grid neighbors
/// reuse the nearest in-grid cell), so both outputs keep the input shape.
/// NaN elevations propagate into the gradients of the cells that read them.
///
/// # Arguments
/// * `dem` - Input elevation raster
/// * `params` - Cell spacing used to scale the differences
///
/// # Returns
/// `(dz_dx, dz_dy)` rasters in elevation units per planar distance unit
pub fn horn_gradients(
    dem: &Raster<f64>,
    params: GradientParams,
) -> Result<(Raster<f64>, Raster<f64>)> {
    if !(params.cell_size > 0.0) {
        return Err(Error::InvalidParameter {
            name: "cell_size",
            value: params.cell_size.to_string(),
            reason: "cell size must be positive".to_string(),
        });
    }

    let (rows, cols) = dem.shape();
    let eight_cell_size = 8.0 * params.cell_size;

    // Process rows in parallel; each cell yields its (dz/dx, dz/dy) pair
    let pairs: Vec<(f64, f64)> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = Vec::with_capacity(cols);

            // Replicate the edge: out-of-grid rows fold back onto the border
            let up = row.saturating_sub(1);
            let down = (row + 1).min(rows - 1);

            for col in 0..cols {
                let left = col.saturating_sub(1);
                let right = (col + 1).min(cols - 1);

                let a = unsafe { dem.get_unchecked(up, left) };
                let b = unsafe { dem.get_unchecked(up, col) };
                let c = unsafe { dem.get_unchecked(up, right) };
                let d = unsafe { dem.get_unchecked(row, left) };
                let f = unsafe { dem.get_unchecked(row, right) };
                let g = unsafe { dem.get_unchecked(down, left) };
                let h = unsafe { dem.get_unchecked(down, col) };
                let i = unsafe { dem.get_unchecked(down, right) };

                let dz_dx = ((c + 2.0 * f + i) - (a + 2.0 * d + g)) / eight_cell_size;
                let dz_dy = ((g + 2.0 * h + i) - (a + 2.0 * b + c)) / eight_cell_size;

                row_data.push((dz_dx, dz_dy));
            }

            row_data
        })
        .collect();

    let (dx_data, dy_data): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();

    let mut dz_dx = dem.with_same_meta::<f64>(rows, cols);
    *dz_dx.data_mut() =
        Array2::from_shape_vec((rows, cols), dx_data).map_err(|e| Error::Other(e.to_string()))?;

    let mut dz_dy = dem.with_same_meta::<f64>(rows, cols);
    *dz_dy.data_mut() =
        Array2::from_shape_vec((rows, cols), dy_data).map_err(|e| Error::Other(e.to_string()))?;

    Ok((dz_dx, dz_dy))
}
