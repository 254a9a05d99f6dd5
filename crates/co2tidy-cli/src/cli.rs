//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use co2tidy::{AggregatePolicy, InputUnit};
use std::path::PathBuf;

/// co2tidy: normalize CO2 emissions tables into a tidy schema
#[derive(Parser)]
#[command(name = "co2tidy")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a raw emissions table into the tidy output
    Tidy {
        /// JSON configuration file; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Raw input table (default: data_raw/Data.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Tidy output table (default: data_processed/co2_tidy.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Unit of the input emissions (kt or mt); inferred when omitted
        #[arg(short, long)]
        unit: Option<InputUnit>,

        /// How duplicate keys are collapsed (sum or mean)
        #[arg(short, long)]
        aggregate: Option<AggregatePolicy>,

        /// Smallest accepted year
        #[arg(long)]
        year_min: Option<i32>,

        /// Largest accepted year
        #[arg(long)]
        year_max: Option<i32>,

        /// Region mapping file (default: mappings/region_fallback.json)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Skip the region mapping stage
        #[arg(long)]
        no_region_mapping: bool,
    },

    /// Build or extend the ISO3 to continent mapping from a dataset
    Regions {
        /// Dataset whose country codes are checked
        #[arg(long, default_value = "co2_tidy.csv")]
        input: PathBuf,

        /// Column holding ISO3 codes
        #[arg(long, default_value = "country")]
        iso3_col: String,

        /// Persisted mapping file
        #[arg(long, default_value = "region_fallback.json")]
        out_json: PathBuf,

        /// Unmapped-codes report, read back for corrections on the next run
        #[arg(long, default_value = "region_unmapped.csv")]
        out_unmapped: PathBuf,

        /// Mapping preview file
        #[arg(long, default_value = "region_mapped_preview.csv")]
        out_preview: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a table would be interpreted without writing anything
    Inspect {
        /// Path to the raw table
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Unit of the input emissions (kt or mt)
        #[arg(short, long)]
        unit: Option<InputUnit>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
