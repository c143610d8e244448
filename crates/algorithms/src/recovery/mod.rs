//! Post-fire vegetation recovery math
//!
//! - **indices**: NDVI from red and near-infrared bands
//! - **ratio**: per-pixel recovery ratio of burned cells against the mean
//!   NDVI of an unburned healthy reference area
//! - **trend**: per-pixel linear trend of recovery ratio across years
//!   (the coefficient of recovery)

mod indices;
mod ratio;
mod trend;

pub use indices::{ndvi, normalized_difference};
pub use ratio::{recovery_ratio, FireClass};
pub use trend::recovery_trend;
