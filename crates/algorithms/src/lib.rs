//! # Regrowth Algorithms
//!
//! Raster analysis for post-fire vegetation recovery studies.
//!
//! ## Algorithm categories
//!
//! - **terrain**: Horn gradients, slope and aspect from DEMs
//! - **classify**: equal-interval and compass-octant zone reclassification
//! - **statistics**: zonal aggregation of a value raster by zone membership
//! - **recovery**: NDVI, recovery ratio and per-pixel recovery trend

pub mod classify;
pub mod recovery;
pub mod statistics;
pub mod terrain;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classify::{
        reclass_aspect, reclass_by_histogram, AspectZone, HistogramReclassify,
    };
    pub use crate::recovery::{ndvi, recovery_ratio, recovery_trend, FireClass};
    pub use crate::statistics::{zonal_statistics, ZonalMode, ZoneStatistics};
    pub use crate::terrain::{
        horn_gradients, slope_aspect, slope_aspect_of_dem, GradientParams, HornGradients,
    };
    pub use regrowth_core::prelude::*;
}
