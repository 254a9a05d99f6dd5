//! Tidy command - convert a raw table into the tidy output.

use std::path::PathBuf;

use colored::Colorize;
use co2tidy::{AggregatePolicy, InputUnit, PipelineConfig, TidyPipeline};

use super::print_layout;

/// Flags for the tidy command; each one overrides the config file.
pub struct TidyArgs {
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub unit: Option<InputUnit>,
    pub aggregate: Option<AggregatePolicy>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub mapping: Option<PathBuf>,
    pub no_region_mapping: bool,
}

impl TidyArgs {
    fn into_config(self) -> co2tidy::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::new(),
        };

        if let Some(input) = self.input {
            config = config.with_input_path(input);
        }
        if let Some(output) = self.output {
            config = config.with_output_path(output);
        }
        if let Some(unit) = self.unit {
            config = config.with_input_unit(unit);
        }
        if let Some(policy) = self.aggregate {
            config = config.with_aggregate_policy(policy);
        }
        let min = self.year_min.unwrap_or(config.year_min);
        let max = self.year_max.unwrap_or(config.year_max);
        config = config.with_year_bounds(min, max);
        if let Some(mapping) = self.mapping {
            config = config.with_mapping_path(mapping);
        }
        if self.no_region_mapping {
            config = config.with_region_mapping(false);
        }
        Ok(config)
    }
}

pub fn run(args: TidyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.into_config()?;

    println!(
        "{} {}",
        "Converting".cyan().bold(),
        config.input_path.display().to_string().white()
    );

    let pipeline = TidyPipeline::new(config)?;
    let outcome = pipeline.run()?;

    if let Some(source) = &outcome.source {
        println!(
            "Read {} rows x {} columns ({}, {})",
            source.row_count.to_string().white().bold(),
            source.column_count,
            source.format,
            source.encoding
        );
    }
    println!();
    print_layout(&outcome);

    let clean = &outcome.clean;
    println!();
    println!("{}", "Rows:".yellow().bold());
    println!("  Candidate:          {}", clean.input_rows.to_string().white());
    println!("  Dropped (year):     {}", clean.dropped_year.to_string().red());
    println!("  Dropped (emission): {}", clean.dropped_emissions.to_string().red());
    if clean.dropped_non_finite > 0 {
        println!("  Dropped (overflow): {}", clean.dropped_non_finite.to_string().red());
    }
    println!(
        "  Duplicate keys:     {} ({:.1}%)",
        clean.duplicate_groups.to_string().yellow(),
        clean.duplicate_rate() * 100.0
    );
    println!("  Written:            {}", outcome.records.len().to_string().green().bold());

    match outcome.mapping {
        Some(stats) => println!(
            "Regions: {} mapped, {} unmapped ({:.1}% match)",
            stats.mapped.to_string().green(),
            stats.unmapped.to_string().yellow(),
            stats.match_rate() * 100.0
        ),
        None => println!("Regions: {}", "mapping disabled".dimmed()),
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        pipeline.config().output_path.display().to_string().white()
    );

    if outcome.records.is_empty() {
        println!(
            "{} No rows survived cleaning. Run {} to see how the table was read.",
            "Warning:".yellow().bold(),
            format!("co2tidy inspect {}", pipeline.config().input_path.display()).cyan()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TidyArgs {
        TidyArgs {
            config: None,
            input: None,
            output: None,
            unit: None,
            aggregate: None,
            year_min: None,
            year_max: None,
            mapping: None,
            no_region_mapping: false,
        }
    }

    #[test]
    fn test_defaults_without_flags() {
        assert_eq!(args().into_config().unwrap(), PipelineConfig::new());
    }

    #[test]
    fn test_flags_override() {
        let config = TidyArgs {
            unit: Some(InputUnit::Kt),
            year_max: Some(2020),
            no_region_mapping: true,
            ..args()
        }
        .into_config()
        .unwrap();

        assert_eq!(config.input_unit, Some(InputUnit::Kt));
        assert_eq!(config.year_min, 1800);
        assert_eq!(config.year_max, 2020);
        assert!(!config.enable_region_mapping);
    }
}
