//! End-to-end pipeline test on a synthetic burn scene.
//!
//! Builds a small DEM with distinct terrain facets, a fire perimeter, and a
//! stack of two-band images whose burned-area NDVI improves year over year,
//! then runs the whole chain: gradients -> slope/aspect -> zoning ->
//! recovery trend -> zonal statistics.

use approx::assert_relative_eq;
use regrowth_algorithms::classify::{reclass_aspect, reclass_by_histogram, AspectZone};
use regrowth_algorithms::recovery::{ndvi, recovery_ratio, recovery_trend};
use regrowth_algorithms::statistics::{zonal_statistics, ZonalMode};
use regrowth_algorithms::terrain::{slope_aspect_of_dem, GradientParams};
use regrowth_core::raster::Raster;

const ROWS: usize = 12;
const COLS: usize = 12;

/// DEM with a west-facing ramp on the left half and a flat bench on the
/// right half.
fn synthetic_dem() -> Raster<f64> {
    let mut dem = Raster::new(ROWS, COLS);
    for row in 0..ROWS {
        for col in 0..COLS {
            let z = if col < COLS / 2 {
                1000.0 + 25.0 * col as f64
            } else {
                1000.0 + 25.0 * (COLS / 2 - 1) as f64
            };
            dem.set(row, col, z).unwrap();
        }
    }
    dem
}

/// Left half burned, right half healthy reference.
fn fire_perimeter() -> Raster<i32> {
    let mut fire = Raster::new(ROWS, COLS);
    for row in 0..ROWS {
        for col in 0..COLS {
            fire.set(row, col, if col < COLS / 2 { 1 } else { 2 }).unwrap();
        }
    }
    fire
}

/// Band pair for one year: healthy cells stay green, burned cells green up
/// by `greenup` (0 = fresh burn, 1 = fully recovered).
fn year_bands(greenup: f64) -> (Raster<f64>, Raster<f64>) {
    let mut red = Raster::new(ROWS, COLS);
    let mut nir = Raster::new(ROWS, COLS);
    for row in 0..ROWS {
        for col in 0..COLS {
            let burned = col < COLS / 2;
            // Healthy NDVI 0.6; burned NDVI climbs from 0.0 toward 0.6
            let target_ndvi = if burned { 0.6 * greenup } else { 0.6 };
            // Choose band values with a fixed sum of 100
            let r = 50.0 * (1.0 - target_ndvi);
            let n = 100.0 - r;
            red.set(row, col, r).unwrap();
            nir.set(row, col, n).unwrap();
        }
    }
    (red, nir)
}

#[test]
fn terrain_zones_of_synthetic_dem() {
    let dem = synthetic_dem();
    let (slope, aspect) =
        slope_aspect_of_dem(&dem, GradientParams { cell_size: 30.0 }).unwrap();

    // The ramp faces west, the bench is flat
    assert_relative_eq!(aspect.get(5, 2).unwrap(), 270.0, epsilon = 1e-9);
    assert_eq!(aspect.get(5, COLS - 2).unwrap(), -1.0);
    assert!(slope.get(5, 2).unwrap() > 0.0);
    assert_eq!(slope.get(5, COLS - 2).unwrap(), 0.0);

    let aspect_zones = reclass_aspect(&aspect).unwrap();
    assert_eq!(aspect_zones.get(5, 2).unwrap(), AspectZone::West.label());
    assert_eq!(
        aspect_zones.get(5, COLS - 2).unwrap(),
        AspectZone::Flat.label()
    );

    // Slope splits into ramp and bench classes with nothing out of range
    let slope_zones = reclass_by_histogram(&slope, 10).unwrap();
    for &label in slope_zones.data().iter() {
        assert!((1..=10).contains(&label));
    }
    assert_eq!(slope_zones.get(5, COLS - 2).unwrap(), 1);
}

#[test]
fn recovery_trend_tracks_greenup() {
    let years = [2002, 2003, 2004, 2005, 2006];
    let fire = fire_perimeter();

    let mut ratios = Vec::new();
    for (k, _) in years.iter().enumerate() {
        let greenup = k as f64 / (years.len() - 1) as f64;
        let (red, nir) = year_bands(greenup);
        let index = ndvi(&nir, &red).unwrap();
        let rr = recovery_ratio(&index, &fire).unwrap();
        ratios.push(rr);
    }

    let trend = recovery_trend(&years, &ratios).unwrap();

    // Burned cells green up from ratio 0 to 1 over four year steps
    let expected = 1.0 / 4.0;
    assert_relative_eq!(trend.get(3, 2).unwrap(), expected, epsilon = 1e-9);
    // Outside the burn the ratio is identically zero, so no trend
    assert_relative_eq!(trend.get(3, COLS - 2).unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn zonal_statistics_by_terrain() {
    let dem = synthetic_dem();
    let (slope, aspect) =
        slope_aspect_of_dem(&dem, GradientParams { cell_size: 30.0 }).unwrap();
    let aspect_zones = reclass_aspect(&aspect).unwrap();
    let slope_zones = reclass_by_histogram(&slope, 10).unwrap();

    let years = [2002, 2004, 2006];
    let fire = fire_perimeter();
    let mut ratios = Vec::new();
    for (k, _) in years.iter().enumerate() {
        let greenup = k as f64 / (years.len() - 1) as f64;
        let (red, nir) = year_bands(greenup);
        let rr = recovery_ratio(&ndvi(&nir, &red).unwrap(), &fire).unwrap();
        ratios.push(rr);
    }
    let trend = recovery_trend(&years, &ratios).unwrap();

    for zones in [&slope_zones, &aspect_zones] {
        let stats = zonal_statistics(zones, &trend, ZonalMode::Legacy).unwrap();
        assert!(!stats.is_empty());

        // Records are densely numbered and ordered
        for (k, record) in stats.iter().enumerate() {
            assert_eq!(record.zone, k as i32 + 1);
        }

        let total: usize = stats.iter().map(|s| s.count).sum();
        assert!(total <= trend.len());
    }

    // The whole burn sits on the west-facing ramp, so the West zone carries
    // all of the positive trend
    let aspect_stats = zonal_statistics(&aspect_zones, &trend, ZonalMode::Masked).unwrap();
    let west = aspect_stats
        .iter()
        .find(|s| s.zone == AspectZone::West.label())
        .unwrap();
    let flat = aspect_stats
        .iter()
        .find(|s| s.zone == AspectZone::Flat.label())
        .unwrap();
    assert!(west.mean > 0.0);
    assert_relative_eq!(flat.mean, 0.0, epsilon = 1e-12);
}
