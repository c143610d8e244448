//! regrowth - post-fire vegetation recovery analysis
//!
//! Orchestrates the full pipeline of the toolkit: reads a DEM, a fire
//! perimeter and a multi-year stack of Landsat band-3/band-4 imagery,
//! computes the per-pixel coefficient of recovery, and summarizes it by
//! terrain slope and aspect zones.

mod discover;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use discover::discover_band_pairs;
use regrowth_algorithms::classify::{reclass_aspect, reclass_by_histogram, AspectZone};
use regrowth_algorithms::recovery::{ndvi, recovery_ratio, recovery_trend};
use regrowth_algorithms::statistics::{zonal_statistics, ZonalMode};
use regrowth_algorithms::terrain::{slope_aspect_of_dem, GradientParams};
use regrowth_core::io::{read_geotiff, write_geotiff};
use regrowth_core::raster::Raster;
use report::write_statistics_csv;

/// Nodata value written into the trend GeoTIFF
const TREND_NODATA: f64 = -99.0;

#[derive(Parser)]
#[command(name = "regrowth")]
#[command(author, version, about = "Post-fire vegetation recovery analysis", long_about = None)]
struct Cli {
    /// DEM GeoTIFF covering the study area
    #[arg(long)]
    dem: PathBuf,

    /// Fire perimeter GeoTIFF (1 = burned, 2 = healthy reference)
    #[arg(long)]
    fire_perimeter: PathBuf,

    /// Directory containing per-year band-3/band-4 GeoTIFFs
    #[arg(long)]
    imagery_dir: PathBuf,

    /// Directory for the trend GeoTIFF and statistics CSVs
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of equal-interval slope classes
    #[arg(long, default_value_t = 10)]
    slope_classes: usize,

    /// Use strict member-only zonal statistics instead of the legacy
    /// zero-substitution behavior
    #[arg(long)]
    masked: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("cannot create {}", cli.output_dir.display()))?;

    // Terrain zoning
    let dem: Raster<f64> = read_geotiff(&cli.dem)
        .with_context(|| format!("cannot read DEM {}", cli.dem.display()))?;
    let cell_size = dem.cell_size();
    info!(
        rows = dem.rows(),
        cols = dem.cols(),
        cell_size,
        "DEM loaded"
    );

    let (slope, aspect) = slope_aspect_of_dem(&dem, GradientParams { cell_size })?;
    let slope_zones = reclass_by_histogram(&slope, cli.slope_classes)?;
    let aspect_zones = reclass_aspect(&aspect)?;

    // Recovery ratio stack
    let fire: Raster<i32> = read_geotiff(&cli.fire_perimeter)
        .with_context(|| format!("cannot read fire perimeter {}", cli.fire_perimeter.display()))?;

    let pairs = discover_band_pairs(&cli.imagery_dir)?;
    info!(years = pairs.len(), "imagery discovered");

    let progress = ProgressBar::new(pairs.len() as u64).with_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
            .expect("static template")
            .progress_chars("=> "),
    );
    progress.set_message("recovery ratio");

    let mut years = Vec::with_capacity(pairs.len());
    let mut ratios = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        let red: Raster<f64> = read_geotiff(&pair.band3)
            .with_context(|| format!("cannot read {}", pair.band3.display()))?;
        let nir: Raster<f64> = read_geotiff(&pair.band4)
            .with_context(|| format!("cannot read {}", pair.band4.display()))?;

        let index = ndvi(&nir, &red)?;
        let ratio = recovery_ratio(&index, &fire)?;

        if let Some(mean) = ratio.statistics().mean {
            info!(year = pair.year, mean_recovery_ratio = mean, "year processed");
        }

        years.push(pair.year);
        ratios.push(ratio);
        progress.inc(1);
    }
    progress.finish_and_clear();

    // Coefficient of recovery
    let mut trend = recovery_trend(&years, &ratios)?;
    if let Some(mean) = trend.statistics().mean {
        info!(mean_coefficient_of_recovery = mean, "trend fitted");
    }

    trend.set_nodata(Some(TREND_NODATA));
    let trend_path = cli.output_dir.join("recovery_trend.tif");
    write_geotiff(&trend, &trend_path)?;
    info!(path = %trend_path.display(), "trend surface written");

    // Zonal summaries
    let mode = if cli.masked {
        ZonalMode::Masked
    } else {
        ZonalMode::Legacy
    };

    let slope_stats = zonal_statistics(&slope_zones, &trend, mode)?;
    let slope_path = cli.output_dir.join("statistics_slope.csv");
    write_statistics_csv(&slope_path, &slope_stats, |_| None)?;
    info!(path = %slope_path.display(), "slope statistics written");

    let aspect_stats = zonal_statistics(&aspect_zones, &trend, mode)?;
    let aspect_path = cli.output_dir.join("statistics_aspect.csv");
    write_statistics_csv(&aspect_path, &aspect_stats, |zone| {
        AspectZone::from_label(zone).map(|z| z.name())
    })?;
    info!(path = %aspect_path.display(), "aspect statistics written");

    Ok(())
}
