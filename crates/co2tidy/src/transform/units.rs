//! Emissions unit normalization to megatonnes CO2.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::InputUnit;
use crate::schema::TidyRecord;

static STANDALONE_MT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmt\b").unwrap());

const KT_TO_MT: f64 = 0.001;

/// Where the chosen factor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSource {
    /// Explicit `input_unit` setting.
    Config,
    /// Inferred from the emissions column name.
    ColumnName,
    /// Nothing to go on; values assumed to be MtCO2 already.
    Assumed,
}

/// Multiplicative factor to MtCO2 and its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitResolution {
    pub factor: f64,
    pub source: UnitSource,
    /// Human-readable audit note.
    pub note: String,
}

impl UnitResolution {
    fn new(factor: f64, source: UnitSource, note: &str) -> Self {
        Self {
            factor,
            source,
            note: note.to_string(),
        }
    }

    /// Rescale every record in place.
    pub fn apply(&self, records: &mut [TidyRecord]) {
        if self.factor == 1.0 {
            return;
        }
        for record in records {
            record.emissions *= self.factor;
        }
    }
}

/// Resolve the unit factor: config override, then column name, then 1.0.
pub fn resolve_unit(input_unit: Option<InputUnit>, emissions_column: Option<&str>) -> UnitResolution {
    match input_unit {
        Some(InputUnit::Kt) => {
            return UnitResolution::new(KT_TO_MT, UnitSource::Config, "ktCO2 -> MtCO2 (configured)");
        }
        Some(InputUnit::Mt) => {
            return UnitResolution::new(1.0, UnitSource::Config, "MtCO2 (configured)");
        }
        None => {}
    }

    if let Some(name) = emissions_column {
        let name = name.to_lowercase();
        if name.contains("kt") {
            return UnitResolution::new(
                KT_TO_MT,
                UnitSource::ColumnName,
                "ktCO2 -> MtCO2 (inferred from column name)",
            );
        }
        if name.contains("mtco2") || STANDALONE_MT.is_match(&name) {
            return UnitResolution::new(1.0, UnitSource::ColumnName, "MtCO2 (inferred from column name)");
        }
    }

    UnitResolution::new(1.0, UnitSource::Assumed, "MtCO2 (assumed)")
}
