//! Zonal statistics
//!
//! Aggregates a value raster by the labels of a zone raster. Zones are
//! densely numbered from 1; label 0 (or anything below 1) marks
//! unclassified cells and never forms a zone of its own.

use crate::maybe_rayon::*;
use regrowth_core::raster::Raster;
use regrowth_core::{Error, Result};

/// How zone membership feeds the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZonalMode {
    /// Historical behavior: non-member cells substitute the
    /// value 0 into the selection, so mean/std/min/max are computed over the
    /// full-size grid and `count` is the number of nonzero cells in the
    /// zone-filtered grid. Statistics are biased toward 0 by non-member
    /// cells, and a true zero-valued member is indistinguishable from a
    /// non-member.
    #[default]
    Legacy,
    /// Statistics over true member cells only. An empty zone reports zeros
    /// with count 0.
    Masked,
}

/// Descriptive statistics for one zone.
///
/// Produced fresh per aggregation, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneStatistics {
    /// Zone label
    pub zone: i32,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Legacy mode: nonzero cells in the zone-filtered grid.
    /// Masked mode: member cells.
    pub count: usize,
}

/// Compute per-zone statistics of a value raster.
///
/// One record is emitted for every zone label from 1 to the zone raster's
/// maximum, in ascending label order; zones with no members still produce a
/// record. Standard deviation is the population deviation in both modes.
/// A zone raster whose maximum label is below 1 yields an empty table.
///
/// # Arguments
/// * `zones` - Zone label raster
/// * `values` - Value raster, same shape
/// * `mode` - Membership handling, see [`ZonalMode`]
pub fn zonal_statistics(
    zones: &Raster<i32>,
    values: &Raster<f64>,
    mode: ZonalMode,
) -> Result<Vec<ZoneStatistics>> {
    let (rows_z, cols_z) = zones.shape();
    let (rows_v, cols_v) = values.shape();
    if rows_z != rows_v || cols_z != cols_v {
        return Err(Error::SizeMismatch {
            er: rows_z,
            ec: cols_z,
            ar: rows_v,
            ac: cols_v,
        });
    }

    let max_zone = zones.data().iter().copied().max().unwrap_or(0);
    if max_zone < 1 {
        return Ok(Vec::new());
    }

    let results: Vec<ZoneStatistics> = (1..=max_zone)
        .into_par_iter()
        .map(|zone| match mode {
            ZonalMode::Legacy => legacy_zone_statistics(zone, zones, values),
            ZonalMode::Masked => masked_zone_statistics(zone, zones, values),
        })
        .collect();

    Ok(results)
}

/// Reference semantics: every cell participates, non-members as value 0.
fn legacy_zone_statistics(zone: i32, zones: &Raster<i32>, values: &Raster<f64>) -> ZoneStatistics {
    let total = values.len();
    if total == 0 {
        return empty_zone(zone);
    }

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut count = 0usize;

    for (&z, &v) in zones.data().iter().zip(values.data().iter()) {
        let selected = if z == zone { v } else { 0.0 };
        sum += selected;
        if selected < min {
            min = selected;
        }
        if selected > max {
            max = selected;
        }
        if selected != 0.0 {
            count += 1;
        }
    }

    let mean = sum / total as f64;

    let mut sq_dev = 0.0;
    for (&z, &v) in zones.data().iter().zip(values.data().iter()) {
        let selected = if z == zone { v } else { 0.0 };
        let dev = selected - mean;
        sq_dev += dev * dev;
    }
    let std_dev = (sq_dev / total as f64).sqrt();

    // All cells NaN leaves the comparisons untouched
    if min > max {
        min = 0.0;
        max = 0.0;
    }

    ZoneStatistics {
        zone,
        mean,
        std_dev,
        min,
        max,
        count,
    }
}

/// Strict semantics: only true member cells contribute.
fn masked_zone_statistics(zone: i32, zones: &Raster<i32>, values: &Raster<f64>) -> ZoneStatistics {
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut count = 0usize;

    for (&z, &v) in zones.data().iter().zip(values.data().iter()) {
        if z != zone {
            continue;
        }
        sum += v;
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
        count += 1;
    }

    if count == 0 {
        return empty_zone(zone);
    }

    let mean = sum / count as f64;

    let mut sq_dev = 0.0;
    for (&z, &v) in zones.data().iter().zip(values.data().iter()) {
        if z != zone {
            continue;
        }
        let dev = v - mean;
        sq_dev += dev * dev;
    }
    let std_dev = (sq_dev / count as f64).sqrt();

    if min > max {
        min = 0.0;
        max = 0.0;
    }

    ZoneStatistics {
        zone,
        mean,
        std_dev,
        min,
        max,
        count,
    }
}

fn empty_zone(zone: i32) -> ZoneStatistics {
    ZoneStatistics {
        zone,
        mean: 0.0,
        std_dev: 0.0,
        min: 0.0,
        max: 0.0,
        count: 0,
    }
}
