//! Statistical aggregation of rasters
//!
//! - **zonal**: descriptive statistics of a value raster per zone label

mod zonal;

pub use zonal::{zonal_statistics, ZonalMode, ZoneStatistics};
