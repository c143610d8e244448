//! Imagery dataset discovery
//!
//! Finds Landsat band-3/band-4 GeoTIFF pairs in a directory and groups them
//! by acquisition year. Filenames are expected to carry a four-digit year
//! and a `B3`/`B4` token separated by underscores, e.g.
//! `L5034032_2002_B3.tif`.

use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One year's red/near-infrared image pair
#[derive(Debug, Clone)]
pub struct BandPair {
    pub year: i32,
    /// Red band (B3)
    pub band3: PathBuf,
    /// Near-infrared band (B4)
    pub band4: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    B3,
    B4,
}

/// Parse the year and band designator out of a filename.
///
/// Returns `None` when either token is missing or the file is not a TIFF.
fn parse_filename(name: &str) -> Option<(i32, Band)> {
    let lower = name.to_ascii_lowercase();
    if !lower.ends_with(".tif") && !lower.ends_with(".tiff") {
        return None;
    }

    let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);

    let mut year = None;
    let mut band = None;
    for token in stem.split(['_', '-']) {
        if token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
            let value: i32 = token.parse().ok()?;
            if (1900..2200).contains(&value) {
                year = Some(value);
            }
        } else if token.eq_ignore_ascii_case("B3") {
            band = Some(Band::B3);
        } else if token.eq_ignore_ascii_case("B4") {
            band = Some(Band::B4);
        }
    }

    Some((year?, band?))
}

/// Scan a directory for band pairs, returned in ascending year order.
///
/// Years with only one of the two bands are skipped with a warning.
pub fn discover_band_pairs(dir: &Path) -> Result<Vec<BandPair>> {
    let mut by_year: BTreeMap<i32, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some((year, band)) = parse_filename(name) else {
            continue;
        };

        let slot = by_year.entry(year).or_default();
        match band {
            Band::B3 => slot.0 = Some(path),
            Band::B4 => slot.1 = Some(path),
        }
    }

    let mut pairs = Vec::new();
    for (year, (band3, band4)) in by_year {
        match (band3, band4) {
            (Some(band3), Some(band4)) => pairs.push(BandPair { year, band3, band4 }),
            _ => warn!(year, "skipping year with an incomplete band pair"),
        }
    }

    if pairs.is_empty() {
        bail!("no band-3/band-4 image pairs found in {}", dir.display());
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_landsat_names() {
        assert_eq!(parse_filename("L5034032_2002_B3.tif"), Some((2002, Band::B3)));
        assert_eq!(parse_filename("L5034032_2011_B4.tif"), Some((2011, Band::B4)));
        assert_eq!(parse_filename("l7_1999_b4.TIF"), Some((1999, Band::B4)));
    }

    #[test]
    fn test_rejects_unrelated_files() {
        assert_eq!(parse_filename("bigElk_dem.tif"), None);
        assert_eq!(parse_filename("L5034032_2002_B3.txt"), None);
        assert_eq!(parse_filename("fire_perimeter.tif"), None);
        // 8-digit date strings are not years
        assert_eq!(parse_filename("20020714_B3.tif"), None);
    }

    #[test]
    fn test_discovery_pairs_and_sorts() {
        let dir = std::env::temp_dir().join("regrowth_discover_test");
        std::fs::create_dir_all(&dir).unwrap();
        for name in [
            "L5_2005_B3.tif",
            "L5_2005_B4.tif",
            "L5_2002_B3.tif",
            "L5_2002_B4.tif",
            "L5_2003_B3.tif", // no matching B4
            "notes.txt",
        ] {
            std::fs::write(dir.join(name), b"").unwrap();
        }

        let pairs = discover_band_pairs(&dir).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let years: Vec<i32> = pairs.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2002, 2005]);
    }
}
