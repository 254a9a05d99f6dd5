//! Input loading and data source handling.

mod parser;
mod source;

pub use parser::{InputEncoding, Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
