//! Generate/extend workflow for the region mapping file.
//!
//! Each run reports codes the map cannot resolve, writes a preview of the
//! mapping, folds in corrections a human typed into the previous report, and
//! rewrites the mapping file in full.
//!
//! ```text
//! co2_tidy.csv ──► region_unmapped.csv   (ISO3,count,region  ← fill region)
//!              ──► region_mapped_preview.csv
//!              ──► region_fallback.json  (seed + persisted + corrections)
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, TidyError};
use crate::input::{DataTable, Parser, ParserConfig};
use crate::output::csv_writer;

use super::continent::{normalize_iso3, Continent};
use super::store::{MappingStats, RegionMap};

/// Rows written to the preview file.
pub const PREVIEW_ROW_LIMIT: usize = 10_000;

/// Header of the unmapped-codes report.
pub const UNMAPPED_COLUMNS: [&str; 3] = ["ISO3", "count", "region"];

/// File locations and the code column for one generate run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Dataset whose codes are checked.
    pub input: PathBuf,
    /// Column holding ISO3 codes.
    pub iso3_column: String,
    /// Persisted mapping (read, then rewritten).
    pub out_json: PathBuf,
    /// Unmapped-codes report (read back for corrections, then rewritten).
    pub out_unmapped: PathBuf,
    /// Mapping preview.
    pub out_preview: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("co2_tidy.csv"),
            iso3_column: "country".to_string(),
            out_json: PathBuf::from("region_fallback.json"),
            out_unmapped: PathBuf::from("region_unmapped.csv"),
            out_preview: PathBuf::from("region_mapped_preview.csv"),
        }
    }
}

/// A code the map could not resolve and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmappedCode {
    pub code: String,
    pub count: usize,
}

/// Human corrections read back from a filled-in report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corrections {
    /// Rows with a code and a valid continent label.
    pub accepted: Vec<(String, Continent)>,
    /// Rows whose region was filled with something outside the enumeration.
    pub rejected: Vec<(String, String)>,
}

/// Outcome of a generate run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    /// Data rows in the input.
    pub total_rows: usize,
    /// Distinct non-null normalized codes.
    pub unique_codes: usize,
    /// Row-level match counts against seed + persisted entries.
    pub mapping: MappingStats,
    /// Codes missing from the map, most frequent first.
    pub unmapped: Vec<UnmappedCode>,
    /// Rows written to the preview.
    pub preview_rows: usize,
    /// Corrections merged from the previous report.
    pub corrections_merged: usize,
    /// Corrections refused because of an invalid region label.
    pub corrections_rejected: usize,
    /// Why the merge-back step was skipped, if it was.
    pub merge_skipped: Option<String>,
    /// Entries in the persisted map after this run.
    pub map_size: usize,
}

/// Runs the generate/extend workflow.
pub struct RegionMapGenerator {
    options: GenerateOptions,
}

impl RegionMapGenerator {
    /// Create a generator for the given options.
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Load the input file and run the workflow.
    pub fn run(&self) -> Result<GenerateReport> {
        let (table, source) = Parser::new().parse_file(&self.options.input)?;
        self.run_on_table(&table, &source.file)
    }

    /// Run the workflow on an already-loaded table.
    pub fn run_on_table(&self, table: &DataTable, file_label: &str) -> Result<GenerateReport> {
        let opts = &self.options;
        let column = table
            .column_index(&opts.iso3_column)
            .ok_or_else(|| TidyError::MissingColumn {
                column: opts.iso3_column.clone(),
                file: file_label.to_string(),
            })?;

        // Snapshot corrections before the report is rewritten below
        let corrections = opts
            .out_unmapped
            .exists()
            .then(|| read_corrections(&opts.out_unmapped));

        let mut merged = RegionMap::seed();
        merged.merge(&RegionMap::load_or_empty(&opts.out_json)?);

        let codes: Vec<Option<String>> = (0..table.row_count())
            .map(|row| table.cell(row, column).map(normalize_iso3))
            .collect();

        let mut mapping = MappingStats::default();
        let mut missing: HashMap<&str, usize> = HashMap::new();
        let mut unique: HashSet<&str> = HashSet::new();
        let mut mapped_regions = Vec::with_capacity(codes.len());

        for code in &codes {
            let region = code.as_deref().and_then(|c| merged.get(c));
            match (code.as_deref(), region) {
                (_, Some(_)) => mapping.mapped += 1,
                (Some(c), None) => {
                    mapping.unmapped += 1;
                    *missing.entry(c).or_insert(0) += 1;
                }
                (None, None) => mapping.unmapped += 1,
            }
            if let Some(c) = code.as_deref() {
                unique.insert(c);
            }
            mapped_regions.push(region);
        }

        info!(
            unique_codes = unique.len(),
            match_rate = mapping.match_rate(),
            "applied region mapping"
        );

        let mut unmapped: Vec<UnmappedCode> = missing
            .into_iter()
            .map(|(code, count)| UnmappedCode {
                code: code.to_string(),
                count,
            })
            .collect();
        unmapped.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));

        write_unmapped_report(&opts.out_unmapped, &unmapped)?;

        let preview_rows = write_preview(
            &opts.out_preview,
            &opts.iso3_column,
            (0..table.row_count()).map(|row| (table.get(row, column).unwrap_or(""), mapped_regions[row])),
        )?;

        let mut corrections_merged = 0;
        let mut corrections_rejected = 0;
        let mut merge_skipped = None;
        match corrections {
            Some(Ok(found)) => {
                for (code, continent) in &found.accepted {
                    merged.insert(code, *continent);
                }
                for (code, label) in &found.rejected {
                    warn!(code = %code, region = %label, "ignored correction with unknown region");
                }
                corrections_merged = found.accepted.len();
                corrections_rejected = found.rejected.len();
                if corrections_merged > 0 {
                    info!(
                        pairs = corrections_merged,
                        path = %opts.out_unmapped.display(),
                        "merged corrections"
                    );
                }
            }
            Some(Err(e)) => {
                warn!(path = %opts.out_unmapped.display(), error = %e, "failed to read corrections");
                merge_skipped = Some(e.to_string());
            }
            None => {}
        }

        merged.save(&opts.out_json)?;

        Ok(GenerateReport {
            total_rows: table.row_count(),
            unique_codes: unique.len(),
            mapping,
            unmapped,
            preview_rows,
            corrections_merged,
            corrections_rejected,
            merge_skipped,
            map_size: merged.len(),
        })
    }
}

/// Read a filled-in unmapped report.
///
/// Rows need a non-empty code and a region equal to one of the continent
/// labels. Blank regions are skipped silently; other labels are returned as
/// rejected.
pub fn read_corrections(path: impl AsRef<Path>) -> Result<Corrections> {
    let path = path.as_ref();
    let parser = Parser::with_config(ParserConfig {
        delimiter: Some(b','),
    });
    let (table, source) = parser.parse_file(path)?;

    let missing_column = |column: &str| TidyError::MissingColumn {
        column: column.to_string(),
        file: source.file.clone(),
    };
    let code_col = table.column_index("ISO3").ok_or_else(|| missing_column("ISO3"))?;
    let region_col = table.column_index("region").ok_or_else(|| missing_column("region"))?;

    let mut corrections = Corrections::default();
    for row in 0..table.row_count() {
        let Some(code) = table.cell(row, code_col).map(normalize_iso3) else {
            continue;
        };
        let label = table.get(row, region_col).unwrap_or("");
        if label.is_empty() {
            continue;
        }
        match Continent::from_label(label) {
            Some(continent) => corrections.accepted.push((code, continent)),
            None => corrections.rejected.push((code, label.to_string())),
        }
    }

    Ok(corrections)
}

/// Write `ISO3,count,region` with the region column left blank.
pub fn write_unmapped_report(path: impl AsRef<Path>, codes: &[UnmappedCode]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv_writer(path)?;

    writer.write_record(UNMAPPED_COLUMNS)?;
    for entry in codes {
        let count = entry.count.to_string();
        writer.write_record([entry.code.as_str(), count.as_str(), ""])?;
    }
    writer.flush().map_err(|e| TidyError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), rows = codes.len(), "wrote unmapped report");
    Ok(())
}

/// Write `<column>,region_mapped` for at most [`PREVIEW_ROW_LIMIT`] rows.
/// Returns the number of rows written.
pub fn write_preview<'a>(
    path: impl AsRef<Path>,
    column_name: &str,
    rows: impl Iterator<Item = (&'a str, Option<Continent>)>,
) -> Result<usize> {
    let path = path.as_ref();
    let mut writer = csv_writer(path)?;

    writer.write_record([column_name, "region_mapped"])?;
    let mut written = 0;
    for (code, region) in rows.take(PREVIEW_ROW_LIMIT) {
        writer.write_record([code, region.map_or("", |c| c.label())])?;
        written += 1;
    }
    writer.flush().map_err(|e| TidyError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), rows = written, "wrote mapping preview");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_corrections_filters_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("region_unmapped.csv");
        std::fs::write(
            &path,
            "ISO3,count,region\nxkx,3,Europe\nATL,2,Atlantis\nSXM,1,\n,1,Asia\nPSE,1,asia\n",
        )
        .unwrap();

        let corrections = read_corrections(&path).unwrap();
        assert_eq!(corrections.accepted, vec![("XKX".to_string(), Continent::Europe)]);
        assert_eq!(
            corrections.rejected,
            vec![
                ("ATL".to_string(), "Atlantis".to_string()),
                ("PSE".to_string(), "asia".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_corrections_missing_region_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("region_unmapped.csv");
        std::fs::write(&path, "ISO3,count\nXKX,3\n").unwrap();

        let err = read_corrections(&path).unwrap_err();
        assert!(matches!(err, TidyError::MissingColumn { .. }));
    }

    #[test]
    fn test_preview_is_capped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preview.csv");
        let rows = std::iter::repeat(("KOR", Some(Continent::Asia))).take(PREVIEW_ROW_LIMIT + 5);

        let written = write_preview(&path, "country", rows).unwrap();
        assert_eq!(written, PREVIEW_ROW_LIMIT);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("country,region_mapped\nKOR,Asia\n"));
        assert_eq!(text.lines().count(), PREVIEW_ROW_LIMIT + 1);
    }

    #[test]
    fn test_unmapped_report_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("region_unmapped.csv");
        let codes = vec![
            UnmappedCode { code: "XKX".into(), count: 4 },
            UnmappedCode { code: "SXM".into(), count: 1 },
        ];
        write_unmapped_report(&path, &codes).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "ISO3,count,region\nXKX,4,\nSXM,1,\n");
    }
}
