//! Wide/long layout detection.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::TableShape;

static YEAR_COLUMN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[Yy]?([0-9]{4})$").unwrap());

/// Parse a year-like column name (`2020`, `Y2021`, `y1990`).
pub fn year_column_token(name: &str) -> Option<i32> {
    YEAR_COLUMN
        .captures(name.trim())
        .and_then(|caps| caps[1].parse().ok())
}

/// Classify the table layout.
///
/// An explicit year column always means long layout. Otherwise every
/// year-like column name becomes a melt column, ordered by numeric year.
pub fn detect_shape(headers: &[String], explicit_year: Option<usize>) -> TableShape {
    if explicit_year.is_some() {
        return TableShape::Long {
            year_column: explicit_year,
        };
    }

    let mut year_columns: Vec<(i32, usize)> = Vec::new();
    for (index, name) in headers.iter().enumerate() {
        let Some(year) = year_column_token(name) else {
            continue;
        };
        // Duplicate names melt once
        if year_columns.iter().any(|&(_, i)| headers[i].trim() == name.trim()) {
            continue;
        }
        year_columns.push((year, index));
    }

    if year_columns.is_empty() {
        return TableShape::Long { year_column: None };
    }

    year_columns.sort_by_key(|&(year, _)| year);
    TableShape::Wide {
        year_columns: year_columns.into_iter().map(|(_, i)| i).collect(),
    }
}
