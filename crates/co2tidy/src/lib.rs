//! co2tidy: normalize heterogeneous CO2 emissions tables into one tidy schema.
//!
//! Input tables arrive in unknown layouts, either one row per observation or
//! one column per year, with inconsistent column names, units and encodings.
//! co2tidy infers the layout, reshapes it into
//! `country,region,sector,year,emissions` (emissions in MtCO2), and attaches
//! a continent to every country code from a persistent region mapping.
//!
//! # Core Principles
//!
//! - **Inference over configuration**: column roles and layout come from the data
//! - **Deterministic output**: re-running on the same input gives identical bytes
//! - **Curated mapping**: unknown country codes are reported for human review
//!   and merged back on the next run
//!
//! # Example
//!
//! ```no_run
//! use co2tidy::{PipelineConfig, TidyPipeline};
//!
//! let pipeline = TidyPipeline::new(PipelineConfig::new()).unwrap();
//! let outcome = pipeline.run().unwrap();
//!
//! println!("Rows: {}", outcome.records.len());
//! println!("Unit: {}", outcome.unit.note);
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod output;
pub mod region;
pub mod schema;
pub mod transform;

mod pipeline;

pub use crate::pipeline::{TidyOutcome, TidyPipeline};
pub use config::{AggregatePolicy, InputUnit, PipelineConfig, YearBounds};
pub use error::{Result, TidyError};
pub use input::{DataTable, SourceMetadata};
pub use region::{Continent, GenerateOptions, GenerateReport, MappingStats, RegionMap, RegionMapGenerator};
pub use schema::{ColumnRole, TableShape, TidyRecord};
