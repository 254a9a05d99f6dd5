//! Tidy conversion: reshaping, coercion, cleaning and unit normalization.

mod builder;
mod clean;
mod coerce;
mod units;

pub use builder::{infer_emissions_column, infer_year_column, BuildResult, TidyBuilder};
pub use clean::{aggregate, aggregate_weighted, Aggregation, CleanStats, Cleaner};
pub use coerce::{coerce_emissions, coerce_year, parse_number};
pub use units::{resolve_unit, UnitResolution, UnitSource};
