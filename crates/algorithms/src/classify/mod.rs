//! Zone reclassification
//!
//! Turns continuous surfaces into small-integer zone labels:
//! - histogram: equal-interval binning into N classes
//! - aspect_zones: fixed 9-zone compass scheme (flat + 8 octants)
//!
//! Label 0 marks unclassified cells and is skipped by zonal aggregation.

mod aspect_zones;
mod histogram;

pub use aspect_zones::{reclass_aspect, AspectZone};
pub use histogram::{reclass_by_histogram, HistogramParams, HistogramReclassify};
