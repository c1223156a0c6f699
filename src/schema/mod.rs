// ABOUTME: Schema data model and diff computation
// ABOUTME: Exports the snapshot types and the pure schema differ

pub mod diff;
pub mod model;

pub use diff::{diff_schemas, ColumnChange, SchemaDiff, TableChange};
pub use model::{Column, Schema, VersionInfo};
