//! Canonical record and layout types.

mod record;
mod types;

pub use record::{TidyDraft, TidyKey, TidyRecord, DEFAULT_SECTOR, TIDY_COLUMNS, UNMAPPED_REGION};
pub use types::{ColumnRole, TableShape};
