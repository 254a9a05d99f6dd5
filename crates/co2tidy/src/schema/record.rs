//! Tidy records and the builder's intermediate draft.

use serde::{Deserialize, Serialize};

/// Output columns, in order.
pub const TIDY_COLUMNS: [&str; 5] = ["country", "region", "sector", "year", "emissions"];

/// Sector used when the source has none.
pub const DEFAULT_SECTOR: &str = "Total";

/// Region used when no continent could be resolved.
pub const UNMAPPED_REGION: &str = "Unmapped";

/// One validated observation in megatonnes CO2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRecord {
    pub country: String,
    pub region: String,
    pub sector: String,
    pub year: i32,
    pub emissions: f64,
}

/// Grouping key; unique across a cleaned record set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TidyKey {
    pub country: String,
    pub region: String,
    pub sector: String,
    pub year: i32,
}

impl TidyRecord {
    /// The record's grouping key.
    pub fn key(&self) -> TidyKey {
        TidyKey {
            country: self.country.clone(),
            region: self.region.clone(),
            sector: self.sector.clone(),
            year: self.year,
        }
    }
}

/// A row produced by the tidy builder before cleaning.
///
/// Every field may be absent; the cleaner decides which absences drop the row
/// and which are defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TidyDraft {
    pub country: Option<String>,
    pub region: Option<String>,
    pub sector: Option<String>,
    pub year: Option<i32>,
    pub emissions: Option<f64>,
}
