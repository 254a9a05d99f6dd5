//! Column role and table layout inference.

mod roles;
mod shape;

pub use roles::{find_column, resolve_default_roles, resolve_roles, ColumnRoles, DEFAULT_CANDIDATES};
pub use shape::{detect_shape, year_column_token};
