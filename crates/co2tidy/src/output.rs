//! Writers for the tidy table and other CSV artifacts.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Result, TidyError};
use crate::schema::{TidyRecord, TIDY_COLUMNS};

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| TidyError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Open a CSV writer at `path`, creating parent directories.
pub fn csv_writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    ensure_parent_dir(path)?;
    let file = fs::File::create(path).map_err(|e| TidyError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(csv::Writer::from_writer(file))
}

/// Render an emissions value. Whole numbers keep one decimal (`8.0`).
pub fn format_emissions(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Sort records into output order: country, sector, year, then region.
pub fn sort_records(records: &mut [TidyRecord]) {
    records.sort_by(|a, b| {
        a.country
            .cmp(&b.country)
            .then_with(|| a.sector.cmp(&b.sector))
            .then_with(|| a.year.cmp(&b.year))
            .then_with(|| a.region.cmp(&b.region))
    });
}

/// Write records as `country,region,sector,year,emissions`.
pub fn write_tidy_csv(path: impl AsRef<Path>, records: &[TidyRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv_writer(path)?;

    writer.write_record(TIDY_COLUMNS)?;
    for record in records {
        let year = record.year.to_string();
        let emissions = format_emissions(record.emissions);
        writer.write_record([
            record.country.as_str(),
            record.region.as_str(),
            record.sector.as_str(),
            year.as_str(),
            emissions.as_str(),
        ])?;
    }
    writer.flush().map_err(|e| TidyError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), rows = records.len(), "wrote tidy table");
    Ok(())
}
