//! Inspect command - show how a table would be read, without writing output.

use std::path::PathBuf;

use colored::Colorize;
use co2tidy::{InputUnit, PipelineConfig, TidyPipeline};

use super::print_layout;

pub fn run(
    file: PathBuf,
    unit: Option<InputUnit>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = PipelineConfig::new().with_input_path(&file);
    if let Some(unit) = unit {
        config = config.with_input_unit(unit);
    }

    let pipeline = TidyPipeline::new(config)?;
    let (table, source) = pipeline.load_input()?;
    let mut outcome = pipeline.process_table(&table);
    outcome.source = Some(source);

    if json_output {
        let preview: Vec<_> = outcome.records.iter().take(5).collect();
        let report = serde_json::json!({
            "outcome": &outcome,
            "output_rows": outcome.records.len(),
            "preview": preview,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    if let Some(source) = &outcome.source {
        println!(
            "{} rows x {} columns, {} ({})",
            source.row_count, source.column_count, source.format, source.encoding
        );
    }
    println!();
    print_layout(&outcome);

    println!();
    println!(
        "Would write {} rows ({} dropped for year, {} for emissions)",
        outcome.records.len().to_string().white().bold(),
        outcome.clean.dropped_year.to_string().red(),
        outcome.clean.dropped_emissions.to_string().red()
    );

    if !outcome.records.is_empty() {
        println!();
        println!("{}", "Preview:".yellow().bold());
        for record in outcome.records.iter().take(5) {
            println!(
                "  {:8} {:14} {:10} {} {}",
                record.country, record.region, record.sector, record.year, record.emissions
            );
        }
    }

    Ok(())
}
