//! Terrain analysis
//!
//! Derivatives of a Digital Elevation Model:
//! - Horn gradients: per-cell rate of elevation change in x and y
//! - Slope: steepness in degrees
//! - Aspect: compass bearing of the facing direction, -1 for flat cells

mod gradient;
mod slope_aspect;

pub use gradient::{horn_gradients, GradientParams, HornGradients};
pub use slope_aspect::{slope_aspect, slope_aspect_of_dem, FLAT_ASPECT};
