//! ISO3 → continent mapping: the persisted store, its seed, and the
//! generate/extend workflow that grows it from human corrections.

mod continent;
mod generate;
mod seed;
mod store;

pub use continent::{normalize_iso3, Continent};
pub use generate::{
    read_corrections, write_preview, write_unmapped_report, Corrections, GenerateOptions,
    GenerateReport, RegionMapGenerator, UnmappedCode, PREVIEW_ROW_LIMIT, UNMAPPED_COLUMNS,
};
pub use seed::SEED_MAP;
pub use store::{MappingStats, RegionMap};
