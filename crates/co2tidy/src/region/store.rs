//! Persistent ISO3 → continent dictionary.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{Result, TidyError};
use crate::output::ensure_parent_dir;
use crate::schema::{TidyRecord, UNMAPPED_REGION};

use super::continent::{normalize_iso3, Continent};
use super::seed::SEED_MAP;

/// Counts from applying a map to a set of codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MappingStats {
    pub mapped: usize,
    pub unmapped: usize,
}

impl MappingStats {
    /// Share of rows that found a continent.
    pub fn match_rate(&self) -> f64 {
        let total = self.mapped + self.unmapped;
        if total == 0 {
            0.0
        } else {
            self.mapped as f64 / total as f64
        }
    }
}

/// ISO3 → continent table, keyed by normalized code and kept in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    entries: BTreeMap<String, Continent>,
}

impl RegionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in baseline.
    pub fn seed() -> Self {
        let mut map = Self::new();
        for (code, continent) in SEED_MAP {
            map.insert(code, *continent);
        }
        map
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite an entry; the code is normalized first.
    pub fn insert(&mut self, code: &str, continent: Continent) -> Option<Continent> {
        self.entries.insert(normalize_iso3(code), continent)
    }

    /// Look up a code after normalizing it.
    pub fn get(&self, code: &str) -> Option<Continent> {
        self.entries.get(&normalize_iso3(code)).copied()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Continent)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Merge `other` into `self`; entries from `other` win conflicts.
    /// Returns how many entries were added or changed.
    pub fn merge(&mut self, other: &RegionMap) -> usize {
        let mut changed = 0;
        for (code, continent) in other.iter() {
            if self.entries.insert(code.to_string(), continent) != Some(continent) {
                changed += 1;
            }
        }
        changed
    }

    /// Region label for a code, or `"Unmapped"` on a miss.
    pub fn region_for(&self, code: &str) -> &'static str {
        self.get(code).map_or(UNMAPPED_REGION, |c| c.label())
    }

    /// Overwrite each record's region from its country code.
    pub fn apply(&self, records: &mut [TidyRecord]) -> MappingStats {
        let mut stats = MappingStats::default();
        for record in records {
            match self.get(&record.country) {
                Some(continent) => {
                    record.region = continent.label().to_string();
                    stats.mapped += 1;
                }
                None => {
                    record.region = UNMAPPED_REGION.to_string();
                    stats.unmapped += 1;
                }
            }
        }
        stats
    }

    /// Load a persisted map. Keys are normalized on the way in.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            TidyError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        let raw: BTreeMap<String, Continent> =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                TidyError::Persistence(format!(
                    "Failed to parse region mapping '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        let mut map = Self::new();
        for (code, continent) in raw {
            map.insert(&code, continent);
        }
        Ok(map)
    }

    /// Load a persisted map, or an empty one if the file does not exist.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Load a map that must exist; absence is a configuration error.
    pub fn load_required(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TidyError::MappingNotFound(path.to_path_buf()));
        }
        Self::load(path)
    }

    /// Write the whole map as pretty JSON with sorted keys.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let file = File::create(path).map_err(|e| {
            TidyError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.entries).map_err(|e| {
            TidyError::Persistence(format!("Failed to serialize region mapping: {}", e))
        })?;
        writer.flush().map_err(|e| TidyError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(path = %path.display(), entries = self.len(), "saved region mapping");
        Ok(())
    }
}

impl FromIterator<(String, Continent)> for RegionMap {
    fn from_iter<I: IntoIterator<Item = (String, Continent)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (code, continent) in iter {
            map.insert(&code, continent);
        }
        map
    }
}
