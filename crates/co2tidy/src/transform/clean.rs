//! Validation, defaulting and duplicate-key aggregation.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{AggregatePolicy, PipelineConfig, YearBounds};
use crate::schema::{TidyDraft, TidyKey, TidyRecord, DEFAULT_SECTOR, UNMAPPED_REGION};

/// Row accounting for one cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanStats {
    /// Drafts handed to the cleaner.
    pub input_rows: usize,
    /// Rows dropped for a missing or out-of-range year.
    pub dropped_year: usize,
    /// Rows dropped for a missing emissions value.
    pub dropped_emissions: usize,
    /// Rows that survived validation, before aggregation.
    pub valid_rows: usize,
    /// Keys that had more than one row.
    pub duplicate_groups: usize,
    /// Keys dropped because their collapsed value was not finite.
    #[serde(default)]
    pub dropped_non_finite: usize,
    /// Rows after aggregation.
    pub output_rows: usize,
}

impl CleanStats {
    /// Share of valid rows that were folded into another row.
    pub fn duplicate_rate(&self) -> f64 {
        if self.valid_rows == 0 {
            0.0
        } else {
            (self.valid_rows - self.output_rows) as f64 / self.valid_rows as f64
        }
    }
}

/// Cleans drafts into unique, validated tidy records.
pub struct Cleaner {
    bounds: YearBounds,
    policy: AggregatePolicy,
}

impl Cleaner {
    /// Create a cleaner from the pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            bounds: config.year_bounds(),
            policy: config.aggregate_policy,
        }
    }

    /// Create a cleaner with explicit settings.
    pub fn with_settings(bounds: YearBounds, policy: AggregatePolicy) -> Self {
        Self { bounds, policy }
    }

    /// Run every cleaning step in order and return records plus stats.
    pub fn clean(&self, drafts: Vec<TidyDraft>) -> (Vec<TidyRecord>, CleanStats) {
        let (aggregation, stats) = self.clean_grouped(drafts);
        (aggregation.records, stats)
    }

    /// Like [`Cleaner::clean`], keeping the source row count behind each key
    /// so a later re-collapse can weight partial groups.
    pub fn clean_grouped(&self, drafts: Vec<TidyDraft>) -> (Aggregation, CleanStats) {
        let mut stats = CleanStats {
            input_rows: drafts.len(),
            ..Default::default()
        };

        let mut valid = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let country = trim_field(draft.country);
            let region = trim_field(draft.region);
            let sector = trim_field(draft.sector);

            let Some(year) = draft.year.filter(|&y| self.bounds.contains(y)) else {
                stats.dropped_year += 1;
                continue;
            };
            let Some(emissions) = draft.emissions.filter(|e| e.is_finite()) else {
                stats.dropped_emissions += 1;
                continue;
            };

            valid.push(TidyRecord {
                country: country.unwrap_or_default(),
                region: region.unwrap_or_else(|| UNMAPPED_REGION.to_string()),
                sector: sector.unwrap_or_else(|| DEFAULT_SECTOR.to_string()),
                year,
                emissions,
            });
        }
        stats.valid_rows = valid.len();

        let aggregation = aggregate(valid, self.policy);
        stats.duplicate_groups = aggregation.duplicate_groups;
        stats.dropped_non_finite = aggregation.dropped_non_finite;
        stats.output_rows = aggregation.records.len();

        (aggregation, stats)
    }
}

/// Trim a string field; blank after trimming counts as absent.
fn trim_field(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Records collapsed to one per key.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Collapsed records in first-seen key order.
    pub records: Vec<TidyRecord>,
    /// Source rows folded into each surviving key.
    pub row_counts: HashMap<TidyKey, usize>,
    /// Keys that had more than one member.
    pub duplicate_groups: usize,
    /// Keys whose collapsed value overflowed and were dropped.
    pub dropped_non_finite: usize,
}

#[derive(Default)]
struct Group {
    sum: f64,
    mean: f64,
    rows: usize,
    members: usize,
}

impl Group {
    fn add(&mut self, value: f64, rows: usize, policy: AggregatePolicy) {
        self.members += 1;
        self.rows += rows;
        match policy {
            AggregatePolicy::Sum => self.sum += value,
            // running weighted mean, never a raw sum
            AggregatePolicy::Mean => self.mean += (value - self.mean) * rows as f64 / self.rows as f64,
        }
    }

    fn value(&self, policy: AggregatePolicy) -> f64 {
        match policy {
            AggregatePolicy::Sum => self.sum,
            AggregatePolicy::Mean => self.mean,
        }
    }
}

/// Collapse records sharing a key, each record counting as one source row.
pub fn aggregate(records: Vec<TidyRecord>, policy: AggregatePolicy) -> Aggregation {
    aggregate_weighted(records.into_iter().map(|r| (r, 1)), policy)
}

/// Collapse `(record, rows)` pairs sharing a key.
///
/// `rows` is the number of source rows already folded into the record. Under
/// [`AggregatePolicy::Mean`] the result is the mean over all source rows, not
/// a mean of means. Keys whose collapsed value is not finite are dropped.
pub fn aggregate_weighted(
    records: impl IntoIterator<Item = (TidyRecord, usize)>,
    policy: AggregatePolicy,
) -> Aggregation {
    let mut groups: IndexMap<TidyKey, Group> = IndexMap::new();
    for (record, rows) in records {
        groups
            .entry(record.key())
            .or_default()
            .add(record.emissions, rows.max(1), policy);
    }

    let mut aggregation = Aggregation {
        duplicate_groups: groups.values().filter(|g| g.members > 1).count(),
        ..Default::default()
    };
    for (key, group) in groups {
        let emissions = group.value(policy);
        if !emissions.is_finite() {
            aggregation.dropped_non_finite += 1;
            continue;
        }
        aggregation.row_counts.insert(key.clone(), group.rows);
        aggregation.records.push(TidyRecord {
            country: key.country,
            region: key.region,
            sector: key.sector,
            year: key.year,
            emissions,
        });
    }

    aggregation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(country: &str, region: Option<&str>, year: Option<i32>, emissions: Option<f64>) -> TidyDraft {
        TidyDraft {
            country: Some(country.to_string()),
            region: region.map(str::to_string),
            sector: None,
            year,
            emissions,
        }
    }

    fn cleaner(policy: AggregatePolicy) -> Cleaner {
        Cleaner::with_settings(YearBounds::default(), policy)
    }

    #[test]
    fn test_duplicates_sum() {
        let drafts = vec![
            draft("USA", Some("North America"), Some(2020), Some(5.0)),
            draft("USA", Some("North America"), Some(2020), Some(3.0)),
        ];
        let (records, stats) = cleaner(AggregatePolicy::Sum).clean(drafts);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].emissions, 8.0);
        assert_eq!(records[0].sector, "Total");
        assert_eq!(stats.duplicate_groups, 1);
        assert_eq!(stats.duplicate_rate(), 0.5);
    }

    #[test]
    fn test_duplicates_mean() {
        let drafts = vec![
            draft("USA", Some("North America"), Some(2020), Some(5.0)),
            draft("USA", Some("North America"), Some(2020), Some(3.0)),
        ];
        let (records, _) = cleaner(AggregatePolicy::Mean).clean(drafts);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].emissions, 4.0);
    }

    #[test]
    fn test_trim_makes_keys_collide() {
        let drafts = vec![
            draft(" KOR", Some("Asia "), Some(2020), Some(1.0)),
            draft("KOR", Some("Asia"), Some(2020), Some(2.0)),
        ];
        let (records, _) = cleaner(AggregatePolicy::Sum).clean(drafts);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "KOR");
        assert_eq!(records[0].emissions, 3.0);
    }

    #[test]
    fn test_drops_missing_year_and_emissions() {
        let drafts = vec![
            draft("KOR", None, None, Some(1.0)),
            draft("KOR", None, Some(1700), Some(1.0)),
            draft("KOR", None, Some(2020), None),
            draft("KOR", None, Some(2020), Some(f64::NAN)),
            draft("KOR", None, Some(2020), Some(1.0)),
        ];
        let (records, stats) = cleaner(AggregatePolicy::Sum).clean(drafts);

        assert_eq!(records.len(), 1);
        assert_eq!(stats.input_rows, 5);
        assert_eq!(stats.dropped_year, 2);
        assert_eq!(stats.dropped_emissions, 2);
        assert_eq!(stats.valid_rows, 1);
    }

    #[test]
    fn test_defaults_region_and_sector() {
        let drafts = vec![TidyDraft {
            country: Some("KOR".into()),
            region: Some("   ".into()),
            sector: None,
            year: Some(2020),
            emissions: Some(1.0),
        }];
        let (records, _) = cleaner(AggregatePolicy::Sum).clean(drafts);

        assert_eq!(records[0].region, "Unmapped");
        assert_eq!(records[0].sector, "Total");
    }

    #[test]
    fn test_missing_country_is_kept_empty() {
        let drafts = vec![TidyDraft {
            year: Some(2020),
            emissions: Some(1.0),
            ..Default::default()
        }];
        let (records, _) = cleaner(AggregatePolicy::Sum).clean(drafts);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "");
    }

    #[test]
    fn test_overflowing_sum_is_dropped() {
        let drafts = vec![
            draft("KOR", None, Some(2020), Some(1e308)),
            draft("KOR", None, Some(2020), Some(1e308)),
            draft("KOR", None, Some(2021), Some(1.0)),
        ];
        let (records, stats) = cleaner(AggregatePolicy::Sum).clean(drafts);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 2021);
        assert_eq!(stats.dropped_non_finite, 1);
        assert_eq!(stats.output_rows, 1);
        assert!(records.iter().all(|r| r.emissions.is_finite()));
    }

    #[test]
    fn test_mean_of_large_values_stays_finite() {
        let drafts = vec![
            draft("KOR", None, Some(2020), Some(1e308)),
            draft("KOR", None, Some(2020), Some(1e308)),
        ];
        let (records, stats) = cleaner(AggregatePolicy::Mean).clean(drafts);

        assert_eq!(stats.dropped_non_finite, 0);
        assert_eq!(records[0].emissions, 1e308);
    }

    #[test]
    fn test_weighted_mean_uses_source_rows() {
        let drafts = vec![
            draft("USA", Some("A"), Some(2020), Some(5.0)),
            draft("USA", Some("A"), Some(2020), Some(3.0)),
            draft("USA", Some("B"), Some(2020), Some(10.0)),
        ];
        let (first, _) = cleaner(AggregatePolicy::Mean).clean_grouped(drafts);
        assert_eq!(first.row_counts.values().sum::<usize>(), 3);

        let remapped = first.records.into_iter().map(|mut r| {
            let rows = first.row_counts[&r.key()];
            r.region = "North America".to_string();
            (r, rows)
        });
        let second = aggregate_weighted(remapped, AggregatePolicy::Mean);

        assert_eq!(second.records.len(), 1);
        assert_eq!(second.records[0].emissions, 6.0);
        assert_eq!(second.duplicate_groups, 1);
        assert_eq!(second.row_counts[&second.records[0].key()], 3);
    }

    #[test]
    fn test_no_duplicates_rate_zero() {
        let drafts = vec![
            draft("KOR", None, Some(2020), Some(1.0)),
            draft("KOR", None, Some(2021), Some(1.0)),
        ];
        let (_, stats) = cleaner(AggregatePolicy::Mean).clean(drafts);
        assert_eq!(stats.duplicate_groups, 0);
        assert_eq!(stats.duplicate_rate(), 0.0);
    }
}
