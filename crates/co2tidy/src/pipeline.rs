//! Tidy conversion pipeline and public entry point.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::inference::{detect_shape, resolve_default_roles, ColumnRoles};
use crate::input::{DataTable, Parser, SourceMetadata};
use crate::output::{sort_records, write_tidy_csv};
use crate::region::{MappingStats, RegionMap};
use crate::schema::{TableShape, TidyKey, TidyRecord};
use crate::transform::{aggregate_weighted, resolve_unit, BuildResult, CleanStats, Cleaner, TidyBuilder, UnitResolution};

/// Everything a run decided, plus the resulting records.
#[derive(Debug, Clone, Serialize)]
pub struct TidyOutcome {
    /// Metadata of the input file, when loaded from disk.
    pub source: Option<SourceMetadata>,
    /// Raw column names, for reporting role and year columns by name.
    pub headers: Vec<String>,
    /// Columns resolved by name for each role.
    pub roles: ColumnRoles,
    /// Detected layout.
    pub shape: TableShape,
    /// Columns the builder actually used.
    pub build: BuildResult,
    /// Unit factor and its provenance.
    pub unit: UnitResolution,
    /// Row accounting from the cleaner.
    pub clean: CleanStats,
    /// Region mapping counts, when the mapping stage ran.
    pub mapping: Option<MappingStats>,
    /// Output records in final order.
    #[serde(skip)]
    pub records: Vec<TidyRecord>,
    /// Source rows behind each record's key.
    #[serde(skip)]
    pub row_counts: HashMap<TidyKey, usize>,
}

impl TidyOutcome {
    /// Name of a column by index.
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.headers.get(index).map(String::as_str)
    }
}

/// The tidy conversion pipeline.
///
/// ```no_run
/// use co2tidy::{PipelineConfig, TidyPipeline};
///
/// let config = PipelineConfig::new().with_input_path("data_raw/Data.csv");
/// let pipeline = TidyPipeline::new(config).unwrap();
/// let outcome = pipeline.run().unwrap();
/// println!("{} rows", outcome.records.len());
/// ```
pub struct TidyPipeline {
    config: PipelineConfig,
    parser: Parser,
    builder: TidyBuilder,
    cleaner: Cleaner,
}

impl TidyPipeline {
    /// Validate `config` and build the pipeline stages from it.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let builder = TidyBuilder::new(&config);
        let cleaner = Cleaner::new(&config);

        Ok(Self {
            config,
            parser: Parser::new(),
            builder,
            cleaner,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured input file.
    pub fn load_input(&self) -> Result<(DataTable, SourceMetadata)> {
        self.parser.parse_file(&self.config.input_path)
    }

    /// Run end to end: load, convert, map regions if enabled, write output.
    ///
    /// A missing mapping file is fatal when region mapping is enabled, and is
    /// checked before any output is written.
    pub fn run(&self) -> Result<TidyOutcome> {
        let (table, source) = self.load_input()?;

        let region_map = if self.config.enable_region_mapping {
            Some(RegionMap::load_required(&self.config.mapping_path)?)
        } else {
            None
        };

        let mut outcome = self.process_table(&table);
        outcome.source = Some(source);

        if let Some(map) = region_map {
            self.apply_regions(&mut outcome, &map);
        }

        write_tidy_csv(&self.config.output_path, &outcome.records)?;
        Ok(outcome)
    }

    /// Convert an in-memory table. Never fails: unresolved roles and bad
    /// cells only reduce the number of output rows.
    pub fn process_table(&self, table: &DataTable) -> TidyOutcome {
        let roles = resolve_default_roles(&table.headers);
        let shape = detect_shape(&table.headers, roles.year);
        debug!(?roles, "resolved column roles");
        info!(wide = shape.is_wide(), "detected table shape");

        let mut build = self.builder.build(table, &roles, &shape);
        let drafts = std::mem::take(&mut build.drafts);

        let (aggregation, clean) = self.cleaner.clean_grouped(drafts);
        let mut records = aggregation.records;
        info!(
            input = clean.input_rows,
            dropped_year = clean.dropped_year,
            dropped_emissions = clean.dropped_emissions,
            duplicate_groups = clean.duplicate_groups,
            dropped_non_finite = clean.dropped_non_finite,
            output = clean.output_rows,
            "cleaned rows"
        );

        let emissions_name = roles.emissions.map(|c| table.headers[c].as_str());
        let unit = resolve_unit(self.config.input_unit, emissions_name);
        unit.apply(&mut records);
        info!(factor = unit.factor, note = %unit.note, "normalized units");

        sort_records(&mut records);

        TidyOutcome {
            source: None,
            headers: table.headers.clone(),
            roles,
            shape,
            build,
            unit,
            clean,
            mapping: None,
            records,
            row_counts: aggregation.row_counts,
        }
    }

    /// Overwrite regions from `map` and re-collapse keys that now coincide.
    ///
    /// Each record is weighted by its source rows, so `mean` stays the mean of
    /// the original rows after regions merge.
    pub fn apply_regions(&self, outcome: &mut TidyOutcome, map: &RegionMap) {
        let rows: Vec<usize> = outcome
            .records
            .iter()
            .map(|r| outcome.row_counts.get(&r.key()).copied().unwrap_or(1))
            .collect();

        let stats = map.apply(&mut outcome.records);
        info!(
            mapped = stats.mapped,
            unmapped = stats.unmapped,
            "applied region mapping"
        );

        let records = std::mem::take(&mut outcome.records);
        let aggregation = aggregate_weighted(records.into_iter().zip(rows), self.config.aggregate_policy);
        let mut records = aggregation.records;
        sort_records(&mut records);

        outcome.clean.duplicate_groups += aggregation.duplicate_groups;
        outcome.clean.dropped_non_finite += aggregation.dropped_non_finite;
        outcome.clean.output_rows = records.len();
        outcome.records = records;
        outcome.row_counts = aggregation.row_counts;
        outcome.mapping = Some(stats);
    }
}
