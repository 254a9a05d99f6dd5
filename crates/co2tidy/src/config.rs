//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is built once (defaults, optionally a JSON file, then
//! caller overrides), validated, and passed by reference into each stage.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TidyError};

/// Unit of the emissions values in the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputUnit {
    /// Kilotonnes CO2.
    Kt,
    /// Megatonnes CO2.
    Mt,
}

impl std::str::FromStr for InputUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kt" => Ok(InputUnit::Kt),
            "mt" => Ok(InputUnit::Mt),
            _ => Err(format!("Unknown unit: {}. Use kt or mt.", s)),
        }
    }
}

impl std::fmt::Display for InputUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputUnit::Kt => write!(f, "kt"),
            InputUnit::Mt => write!(f, "mt"),
        }
    }
}

/// How rows sharing a `(country, region, sector, year)` key are collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregatePolicy {
    #[default]
    Sum,
    Mean,
}

impl std::str::FromStr for AggregatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(AggregatePolicy::Sum),
            "mean" => Ok(AggregatePolicy::Mean),
            _ => Err(format!("Unknown aggregate policy: {}. Use sum or mean.", s)),
        }
    }
}

impl std::fmt::Display for AggregatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregatePolicy::Sum => write!(f, "sum"),
            AggregatePolicy::Mean => write!(f, "mean"),
        }
    }
}

/// Inclusive year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    /// Whether `year` lies within the bounds.
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    /// Float variant used before truncation to an integer year.
    pub fn contains_f64(&self, value: f64) -> bool {
        f64::from(self.min) <= value && value <= f64::from(self.max)
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self { min: 1800, max: 2100 }
    }
}

/// Configuration for a tidy conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Explicit unit of the input emissions (None = infer from column name).
    pub input_unit: Option<InputUnit>,
    /// Policy for collapsing duplicate keys.
    pub aggregate_policy: AggregatePolicy,
    /// Smallest accepted year (inclusive).
    pub year_min: i32,
    /// Largest accepted year (inclusive).
    pub year_max: i32,
    /// Raw input table.
    pub input_path: PathBuf,
    /// Tidy output table.
    pub output_path: PathBuf,
    /// Whether regions are filled from the mapping file.
    pub enable_region_mapping: bool,
    /// Persisted ISO3 → continent mapping consumed when region mapping is on.
    pub mapping_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let bounds = YearBounds::default();
        Self {
            input_unit: None,
            aggregate_policy: AggregatePolicy::Sum,
            year_min: bounds.min,
            year_max: bounds.max,
            input_path: PathBuf::from("data_raw/Data.csv"),
            output_path: PathBuf::from("data_processed/co2_tidy.csv"),
            enable_region_mapping: true,
            mapping_path: PathBuf::from("mappings/region_fallback.json"),
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TidyError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: PipelineConfig = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Set the input unit override.
    pub fn with_input_unit(mut self, unit: InputUnit) -> Self {
        self.input_unit = Some(unit);
        self
    }

    /// Set the aggregation policy.
    pub fn with_aggregate_policy(mut self, policy: AggregatePolicy) -> Self {
        self.aggregate_policy = policy;
        self
    }

    /// Set the inclusive year bounds.
    pub fn with_year_bounds(mut self, min: i32, max: i32) -> Self {
        self.year_min = min;
        self.year_max = max;
        self
    }

    /// Set the input path.
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Set the output path.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set the mapping file path.
    pub fn with_mapping_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_path = path.into();
        self
    }

    /// Enable or disable the region mapping stage.
    pub fn with_region_mapping(mut self, enabled: bool) -> Self {
        self.enable_region_mapping = enabled;
        self
    }

    /// Year bounds as a value type.
    pub fn year_bounds(&self) -> YearBounds {
        YearBounds {
            min: self.year_min,
            max: self.year_max,
        }
    }

    /// Check the configuration before any stage runs.
    ///
    /// Swapped bounds are rejected here: every between-check downstream
    /// assumes `year_min <= year_max` and would otherwise match nothing.
    pub fn validate(&self) -> Result<()> {
        if self.year_min > self.year_max {
            return Err(TidyError::Config(format!(
                "year_min ({}) must not exceed year_max ({})",
                self.year_min, self.year_max
            )));
        }
        if self.input_path.as_os_str().is_empty() {
            return Err(TidyError::Config("input_path is empty".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(TidyError::Config("output_path is empty".to_string()));
        }
        Ok(())
    }
}
