//! Reshape a raw table into tidy drafts.
//!
//! Wide tables are melted (one draft per row × year column); long tables are
//! projected row by row. Missing roles become `None` and never fail the build.

use serde::Serialize;
use tracing::debug;

use crate::config::{PipelineConfig, YearBounds};
use crate::inference::ColumnRoles;
use crate::input::DataTable;
use crate::schema::{TableShape, TidyDraft, DEFAULT_SECTOR};

use super::coerce::{coerce_emissions, coerce_year, parse_number};

/// Share of cells that must parse as numbers for a year-column guess.
const YEAR_NUMERIC_SHARE: f64 = 0.6;

/// Share of parsed values that must fall within the year bounds.
const YEAR_IN_BOUNDS_SHARE: f64 = 0.8;

/// Drafts plus the columns the builder settled on.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
    #[serde(skip)]
    pub drafts: Vec<TidyDraft>,
    /// Year column used for long tables (explicit or inferred).
    pub year_column: Option<usize>,
    /// Emissions column used for long tables (explicit or inferred).
    pub emissions_column: Option<usize>,
    /// Identifier columns carried through a melt.
    pub id_columns: Vec<usize>,
}

/// Builds tidy drafts from a raw table.
pub struct TidyBuilder {
    bounds: YearBounds,
}

impl TidyBuilder {
    /// Create a builder using the configuration's year bounds.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            bounds: config.year_bounds(),
        }
    }

    /// Create a builder with explicit bounds.
    pub fn with_bounds(bounds: YearBounds) -> Self {
        Self { bounds }
    }

    /// Build drafts for `table` given its resolved roles and shape.
    pub fn build(&self, table: &DataTable, roles: &ColumnRoles, shape: &TableShape) -> BuildResult {
        match shape {
            TableShape::Wide { year_columns } => self.build_wide(table, roles, year_columns),
            TableShape::Long { year_column } => self.build_long(table, roles, *year_column),
        }
    }

    fn build_wide(&self, table: &DataTable, roles: &ColumnRoles, year_columns: &[usize]) -> BuildResult {
        let mut id_columns: Vec<usize> = [roles.country, roles.region, roles.sector]
            .into_iter()
            .flatten()
            .collect();
        if id_columns.is_empty() && table.column_count() > 0 {
            id_columns.push(0);
        }

        let country_column = roles.country.or_else(|| id_columns.first().copied());
        let years: Vec<(usize, Option<i32>)> = year_columns
            .iter()
            .map(|&c| (c, coerce_year(&table.headers[c], self.bounds)))
            .collect();

        let mut drafts = Vec::with_capacity(table.row_count() * years.len());
        for row in 0..table.row_count() {
            let country = country_column.and_then(|c| owned(table.cell(row, c)));
            let region = roles.region.and_then(|c| owned(table.cell(row, c)));
            let sector = match roles.sector {
                Some(c) => owned(table.cell(row, c)),
                None => Some(DEFAULT_SECTOR.to_string()),
            };

            for &(column, year) in &years {
                drafts.push(TidyDraft {
                    country: country.clone(),
                    region: region.clone(),
                    sector: sector.clone(),
                    year,
                    emissions: table.cell(row, column).and_then(coerce_emissions),
                });
            }
        }

        debug!(
            rows = table.row_count(),
            year_columns = years.len(),
            drafts = drafts.len(),
            "melted wide table"
        );

        BuildResult {
            drafts,
            year_column: None,
            emissions_column: None,
            id_columns,
        }
    }

    fn build_long(&self, table: &DataTable, roles: &ColumnRoles, explicit_year: Option<usize>) -> BuildResult {
        let year_column = explicit_year.or_else(|| infer_year_column(table, roles, self.bounds));
        let emissions_column = roles
            .emissions
            .or_else(|| infer_emissions_column(table, year_column));

        debug!(?year_column, ?emissions_column, "projected long table");

        let drafts = (0..table.row_count())
            .map(|row| TidyDraft {
                country: roles.country.and_then(|c| owned(table.cell(row, c))),
                region: roles.region.and_then(|c| owned(table.cell(row, c))),
                sector: match roles.sector {
                    Some(c) => owned(table.cell(row, c)),
                    None => Some(DEFAULT_SECTOR.to_string()),
                },
                year: year_column
                    .and_then(|c| table.cell(row, c))
                    .and_then(|v| coerce_year(v, self.bounds)),
                emissions: emissions_column
                    .and_then(|c| table.cell(row, c))
                    .and_then(coerce_emissions),
            })
            .collect();

        BuildResult {
            drafts,
            year_column,
            emissions_column,
            id_columns: Vec::new(),
        }
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

/// Guess a year column for a long table that has none by name.
///
/// Takes the first column not claimed by another role where more than 60% of
/// cells are numeric and more than 80% of those lie within `bounds`.
pub fn infer_year_column(table: &DataTable, roles: &ColumnRoles, bounds: YearBounds) -> Option<usize> {
    let total = table.row_count();
    if total == 0 {
        return None;
    }

    (0..table.column_count()).find(|&column| {
        if roles.claims(column) {
            return false;
        }
        let parsed: Vec<f64> = table.column_values(column).filter_map(parse_number).collect();
        if parsed.is_empty() {
            return false;
        }
        let numeric_share = parsed.len() as f64 / total as f64;
        let in_bounds = parsed.iter().filter(|&&v| bounds.contains_f64(v)).count();
        let in_bounds_share = in_bounds as f64 / parsed.len() as f64;
        numeric_share > YEAR_NUMERIC_SHARE && in_bounds_share > YEAR_IN_BOUNDS_SHARE
    })
}

/// First column other than `year_column` whose non-null cells are all numeric.
pub fn infer_emissions_column(table: &DataTable, year_column: Option<usize>) -> Option<usize> {
    (0..table.column_count())
        .filter(|&c| Some(c) != year_column)
        .find(|&column| {
            let mut non_null = table
                .column_values(column)
                .filter(|v| !DataTable::is_null_value(v))
                .peekable();
            non_null.peek().is_some() && non_null.all(|v| parse_number(v).is_some())
        })
}
