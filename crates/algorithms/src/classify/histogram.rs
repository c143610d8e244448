//! Equal-interval reclassification
//!
//! Bins a continuous raster into N classes of equal value range between the
//! grid's minimum and maximum.

use crate::maybe_rayon::*;
use ndarray::Array2;
use regrowth_core::raster::Raster;
use regrowth_core::{Algorithm, Error, Result};

/// Parameters for histogram reclassification
#[derive(Debug, Clone)]
pub struct HistogramParams {
    /// Number of output classes, at least 1
    pub num_classes: usize,
}

impl Default for HistogramParams {
    fn default() -> Self {
        Self { num_classes: 10 }
    }
}

/// Histogram reclassification algorithm
#[derive(Debug, Clone, Default)]
pub struct HistogramReclassify;

impl Algorithm for HistogramReclassify {
    type Input = Raster<f64>;
    type Output = Raster<i32>;
    type Params = HistogramParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "HistogramReclassify"
    }

    fn description(&self) -> &'static str {
        "Bin a continuous raster into N equal-interval classes labeled 1..N"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        reclass_by_histogram(&input, params.num_classes)
    }
}

/// Reclassify a raster into `num_classes` equal-interval bins.
///
/// The closed interval [min, max] of the finite cells is split into bins of
/// width `(max - min) / num_classes`; each cell gets the 1-based index of
/// its bin. Values exactly at the maximum land in the last bin rather than
/// overflowing past it. A constant raster collapses to a single class: all
/// cells get label 1. Non-finite cells get label 0 (unclassified).
///
/// # Arguments
/// * `grid` - Input raster
/// * `num_classes` - Number of bins, must be >= 1
pub fn reclass_by_histogram(grid: &Raster<f64>, num_classes: usize) -> Result<Raster<i32>> {
    if num_classes < 1 {
        return Err(Error::InvalidParameter {
            name: "num_classes",
            value: num_classes.to_string(),
            reason: "at least one class is required".to_string(),
        });
    }

    let (rows, cols) = grid.shape();

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in grid.data().iter() {
        if !v.is_finite() {
            continue;
        }
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    // No finite cells (or an empty grid): everything stays unclassified
    if min > max {
        return Ok(grid.with_same_meta::<i32>(rows, cols));
    }

    let bin_width = (max - min) / num_classes as f64;

    let data: Vec<i32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0_i32; cols];
            for col in 0..cols {
                let v = unsafe { grid.get_unchecked(row, col) };
                if !v.is_finite() {
                    continue;
                }
                row_data[col] = if bin_width == 0.0 {
                    // Constant grid: single degenerate bin
                    1
                } else {
                    let bin = ((v - min) / bin_width).floor() as i64 + 1;
                    bin.min(num_classes as i64) as i32
                };
            }
            row_data
        })
        .collect();

    let mut output = grid.with_same_meta::<i32>(rows, cols);
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_values_ten_classes() {
        // Values 0..=9 with 10 classes: value i gets label i + 1,
        // the maximum folds into the last bin
        let grid = Raster::from_vec((0..10).map(|v| v as f64).collect(), 2, 5).unwrap();
        let labels = reclass_by_histogram(&grid, 10).unwrap();

        for row in 0..2 {
            for col in 0..5 {
                let v = grid.get(row, col).unwrap() as i32;
                assert_eq!(labels.get(row, col).unwrap(), v + 1);
            }
        }
    }

    #[test]
    fn test_labels_in_range() {
        let grid =
            Raster::from_vec(vec![-3.2, 0.0, 1.5, 7.7, 12.0, 99.9, 4.4, 8.8, 0.1], 3, 3).unwrap();
        let labels = reclass_by_histogram(&grid, 4).unwrap();

        for &label in labels.data().iter() {
            assert!((1..=4).contains(&label), "label {} out of range", label);
        }
    }

    #[test]
    fn test_single_class() {
        let grid = Raster::from_vec(vec![1.0, 5.0, 9.0, 2.0], 2, 2).unwrap();
        let labels = reclass_by_histogram(&grid, 1).unwrap();
        assert!(labels.data().iter().all(|&l| l == 1));
    }

    #[test]
    fn test_constant_grid() {
        let grid: Raster<f64> = Raster::filled(4, 4, 42.0);
        let labels = reclass_by_histogram(&grid, 10).unwrap();
        assert!(labels.data().iter().all(|&l| l == 1));
    }

    #[test]
    fn test_zero_classes_rejected() {
        let grid: Raster<f64> = Raster::new(2, 2);
        assert!(reclass_by_histogram(&grid, 0).is_err());
    }

    #[test]
    fn test_nan_cells_unclassified() {
        let grid = Raster::from_vec(vec![1.0, f64::NAN, 3.0, 4.0], 2, 2).unwrap();
        let labels = reclass_by_histogram(&grid, 3).unwrap();
        assert_eq!(labels.get(0, 1).unwrap(), 0);
        assert_eq!(labels.get(0, 0).unwrap(), 1);
        assert_eq!(labels.get(1, 1).unwrap(), 3);
    }

    #[test]
    fn test_all_nan_grid() {
        let grid: Raster<f64> = Raster::filled(2, 2, f64::NAN);
        let labels = reclass_by_histogram(&grid, 5).unwrap();
        assert!(labels.data().iter().all(|&l| l == 0));
    }
}
