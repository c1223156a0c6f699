// ABOUTME: SQLite access module
// ABOUTME: Exports read-only connection handling and schema introspection

pub mod connection;
pub mod introspect;
pub mod version;

pub use connection::open;
pub use introspect::{list_tables, normalize_type, read_schema, table_columns, table_exists};
pub use version::read_version_info;
