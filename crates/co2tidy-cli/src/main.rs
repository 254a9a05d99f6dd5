//! co2tidy CLI - CO2 emissions table normalizer.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Tidy {
            config,
            input,
            output,
            unit,
            aggregate,
            year_min,
            year_max,
            mapping,
            no_region_mapping,
        } => commands::tidy::run(commands::tidy::TidyArgs {
            config,
            input,
            output,
            unit,
            aggregate,
            year_min,
            year_max,
            mapping,
            no_region_mapping,
        }),

        Commands::Regions {
            input,
            iso3_col,
            out_json,
            out_unmapped,
            out_preview,
            json,
        } => commands::regions::run(
            co2tidy::GenerateOptions {
                input,
                iso3_column: iso3_col,
                out_json,
                out_unmapped,
                out_preview,
            },
            json,
        ),

        Commands::Inspect { file, unit, json } => commands::inspect::run(file, unit, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
