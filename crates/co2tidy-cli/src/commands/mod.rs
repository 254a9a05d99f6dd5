//! CLI command implementations.

pub mod inspect;
pub mod regions;
pub mod tidy;

use colored::Colorize;
use co2tidy::{ColumnRole, TableShape, TidyOutcome};

/// Print resolved roles, layout and unit for a processed table.
pub(crate) fn print_layout(outcome: &TidyOutcome) {
    println!("{}", "Columns:".yellow().bold());
    for role in ColumnRole::ALL {
        let name = outcome
            .roles
            .get(role)
            .and_then(|c| outcome.column_name(c))
            .map(|n| n.white().to_string())
            .unwrap_or_else(|| "-".dimmed().to_string());
        println!("  {:10} {}", role.to_string(), name);
    }

    match &outcome.shape {
        TableShape::Wide { year_columns } => {
            let names: Vec<&str> = year_columns
                .iter()
                .filter_map(|&c| outcome.column_name(c))
                .collect();
            println!(
                "Layout: {} ({} year columns: {})",
                "wide".cyan(),
                year_columns.len(),
                names.join(", ")
            );
        }
        TableShape::Long { .. } => {
            let year = outcome
                .build
                .year_column
                .and_then(|c| outcome.column_name(c))
                .unwrap_or("-");
            let emissions = outcome
                .build
                .emissions_column
                .and_then(|c| outcome.column_name(c))
                .unwrap_or("-");
            println!(
                "Layout: {} (year: {}, emissions: {})",
                "long".cyan(),
                year,
                emissions
            );
        }
    }

    println!("Unit: {}", outcome.unit.note);
}
