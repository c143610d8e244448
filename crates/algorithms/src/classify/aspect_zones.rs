//! Compass-octant aspect zoning
//!
//! Maps compass-bearing aspect values into a fixed 9-zone scheme: one zone
//! for flat cells plus the eight compass octants. Boundaries are half-open
//! and lower-inclusive, so every bearing lands in exactly one zone.

use crate::maybe_rayon::*;
use crate::terrain::FLAT_ASPECT;
use ndarray::Array2;
use regrowth_core::raster::Raster;
use regrowth_core::{Error, Result};

/// The nine aspect zones. Discriminants double as zone labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum AspectZone {
    Flat = 1,
    North = 2,
    Northeast = 3,
    East = 4,
    Southeast = 5,
    South = 6,
    Southwest = 7,
    West = 8,
    Northwest = 9,
}

impl AspectZone {
    /// All zones in label order
    pub const ALL: [AspectZone; 9] = [
        AspectZone::Flat,
        AspectZone::North,
        AspectZone::Northeast,
        AspectZone::East,
        AspectZone::Southeast,
        AspectZone::South,
        AspectZone::Southwest,
        AspectZone::West,
        AspectZone::Northwest,
    ];

    /// Zone label (1..=9)
    pub fn label(self) -> i32 {
        self as i32
    }

    /// Human-readable zone name
    pub fn name(self) -> &'static str {
        match self {
            AspectZone::Flat => "Flat",
            AspectZone::North => "North",
            AspectZone::Northeast => "Northeast",
            AspectZone::East => "East",
            AspectZone::Southeast => "Southeast",
            AspectZone::South => "South",
            AspectZone::Southwest => "Southwest",
            AspectZone::West => "West",
            AspectZone::Northwest => "Northwest",
        }
    }

    /// Look up a zone by its label
    pub fn from_label(label: i32) -> Option<AspectZone> {
        Self::ALL.into_iter().find(|z| z.label() == label)
    }

    /// Classify a compass bearing in [-1, 360].
    ///
    /// Exactly -1 is flat; anything else outside [0, 360] (or NaN) is
    /// unclassifiable and returns `None`.
    pub fn of_bearing(aspect: f64) -> Option<AspectZone> {
        if aspect == FLAT_ASPECT {
            return Some(AspectZone::Flat);
        }
        if !(0.0..=360.0).contains(&aspect) {
            return None;
        }
        let zone = if aspect < 22.5 || aspect >= 337.5 {
            AspectZone::North
        } else if aspect < 67.5 {
            AspectZone::Northeast
        } else if aspect < 112.5 {
            AspectZone::East
        } else if aspect < 157.5 {
            AspectZone::Southeast
        } else if aspect < 202.5 {
            AspectZone::South
        } else if aspect < 247.5 {
            AspectZone::Southwest
        } else if aspect < 292.5 {
            AspectZone::West
        } else {
            AspectZone::Northwest
        };
        Some(zone)
    }
}

/// Reclassify an aspect raster into the 9 compass zones.
///
/// Input values are compass bearings as produced by
/// [`crate::terrain::slope_aspect`] (-1 for flat). Cells outside [-1, 360]
/// and NaN cells get label 0.
pub fn reclass_aspect(aspect: &Raster<f64>) -> Result<Raster<i32>> {
    let (rows, cols) = aspect.shape();

    let data: Vec<i32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0_i32; cols];
            for col in 0..cols {
                let v = unsafe { aspect.get_unchecked(row, col) };
                if let Some(zone) = AspectZone::of_bearing(v) {
                    row_data[col] = zone.label();
                }
            }
            row_data
        })
        .collect();

    let mut output = aspect.with_same_meta::<i32>(rows, cols);
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}
