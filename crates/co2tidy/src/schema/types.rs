//! Core type definitions for table layout.

use serde::{Deserialize, Serialize};

/// Semantic role a raw column can play in the tidy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Country name or ISO3 code.
    Country,
    /// Continent or other regional grouping.
    Region,
    /// Emitting sector (energy, transport, ...).
    Sector,
    /// Explicit year column (long layout).
    Year,
    /// Emissions value column.
    Emissions,
}

impl ColumnRole {
    /// All roles in resolution order.
    pub const ALL: [ColumnRole; 5] = [
        ColumnRole::Country,
        ColumnRole::Region,
        ColumnRole::Sector,
        ColumnRole::Year,
        ColumnRole::Emissions,
    ];
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Country => write!(f, "country"),
            ColumnRole::Region => write!(f, "region"),
            ColumnRole::Sector => write!(f, "sector"),
            ColumnRole::Year => write!(f, "year"),
            ColumnRole::Emissions => write!(f, "emissions"),
        }
    }
}

/// Detected layout of the raw table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableShape {
    /// One column per year. Indices are sorted by numeric year ascending.
    Wide { year_columns: Vec<usize> },
    /// One row per observation with a single year column.
    Long {
        /// Explicit year column found by name, if any.
        year_column: Option<usize>,
    },
}

impl TableShape {
    /// Whether the table is in wide layout.
    pub fn is_wide(&self) -> bool {
        matches!(self, TableShape::Wide { .. })
    }
}
