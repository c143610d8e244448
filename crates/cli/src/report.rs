//! Statistics table export

use anyhow::{Context, Result};
use regrowth_algorithms::statistics::ZoneStatistics;
use std::path::Path;

/// Write a zonal statistics table as CSV.
///
/// Column order is fixed:
/// `Zone_number,Mean,Standard_deviation,Min,Max,Count`. When `zone_name`
/// yields a name for a zone, a trailing `Zone_name` column is added.
pub fn write_statistics_csv(
    path: &Path,
    stats: &[ZoneStatistics],
    zone_name: impl Fn(i32) -> Option<&'static str>,
) -> Result<()> {
    let named = stats.iter().any(|s| zone_name(s.zone).is_some());

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;

    let mut header = vec![
        "Zone_number",
        "Mean",
        "Standard_deviation",
        "Min",
        "Max",
        "Count",
    ];
    if named {
        header.push("Zone_name");
    }
    writer.write_record(&header)?;

    for s in stats {
        let mut record = vec![
            s.zone.to_string(),
            s.mean.to_string(),
            s.std_dev.to_string(),
            s.min.to_string(),
            s.max.to_string(),
            s.count.to_string(),
        ];
        if named {
            record.push(zone_name(s.zone).unwrap_or("").to_string());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> Vec<ZoneStatistics> {
        vec![
            ZoneStatistics {
                zone: 1,
                mean: 0.5,
                std_dev: 0.1,
                min: 0.0,
                max: 0.9,
                count: 42,
            },
            ZoneStatistics {
                zone: 2,
                mean: -0.25,
                std_dev: 0.0,
                min: -0.25,
                max: -0.25,
                count: 7,
            },
        ]
    }

    #[test]
    fn test_csv_column_order() {
        let path = std::env::temp_dir().join("regrowth_report_plain.csv");
        write_statistics_csv(&path, &sample_stats(), |_| None).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Zone_number,Mean,Standard_deviation,Min,Max,Count"
        );
        assert!(lines.next().unwrap().starts_with("1,0.5,0.1,0,0.9,42"));
    }

    #[test]
    fn test_csv_with_zone_names() {
        let path = std::env::temp_dir().join("regrowth_report_named.csv");
        write_statistics_csv(&path, &sample_stats(), |zone| match zone {
            1 => Some("Flat"),
            2 => Some("North"),
            _ => None,
        })
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.starts_with("Zone_number,Mean,Standard_deviation,Min,Max,Count,Zone_name"));
        assert!(text.contains("2,-0.25,0,-0.25,-0.25,7,North"));
    }
}
