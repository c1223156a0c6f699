// ABOUTME: Diff report exporters
// ABOUTME: Dispatches rendering to text, CSV, XML, or YAML by format

pub mod csv;
pub mod text;
pub mod xml;
pub mod yaml;

use crate::schema::{Column, Schema, SchemaDiff, VersionInfo};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::Path;

/// Output format for a diff report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Text,
    Csv,
    Xml,
    Yaml,
}

impl ExportFormat {
    /// Infer the format from an output path's extension
    ///
    /// Returns `None` for a missing or unrecognized extension so the
    /// caller can decide (and log) the fallback.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(ExportFormat::Text),
            "csv" => Some(ExportFormat::Csv),
            "xml" => Some(ExportFormat::Xml),
            "yml" | "yaml" => Some(ExportFormat::Yaml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Yaml => "yaml",
        }
    }
}

/// Everything a renderer needs to produce a report
///
/// Renderers are pure: they turn this context into a `String` and never
/// touch the filesystem themselves.
pub struct ExportContext<'a> {
    pub diff: &'a SchemaDiff,
    pub schema_a: &'a Schema,
    pub schema_b: &'a Schema,
    pub version_a: &'a VersionInfo,
    pub version_b: &'a VersionInfo,
    /// When false, per-column type annotations are suppressed; the
    /// reported name sets and before/after type pairs are kept
    pub show_types: bool,
}

impl<'a> ExportContext<'a> {
    pub(crate) fn type_in_a(&self, table: &str, column: &str) -> &'a str {
        lookup_type(self.schema_a, table, column)
    }

    pub(crate) fn type_in_b(&self, table: &str, column: &str) -> &'a str {
        lookup_type(self.schema_b, table, column)
    }
}

/// Render the report in the given format
pub fn render(format: ExportFormat, ctx: &ExportContext) -> String {
    match format {
        ExportFormat::Text => text::render(ctx),
        ExportFormat::Csv => csv::render(ctx),
        ExportFormat::Xml => xml::render(ctx),
        ExportFormat::Yaml => yaml::render(ctx),
    }
}

/// Render the report and write it to `path`
pub fn export_diff(path: &Path, format: ExportFormat, ctx: &ExportContext) -> Result<()> {
    let rendered = render(format, ctx);

    std::fs::write(path, rendered).with_context(|| {
        format!(
            "Failed to write {} report to {}",
            format.name(),
            path.display()
        )
    })?;

    Ok(())
}

pub(crate) fn columns_of<'s>(schema: &'s Schema, table: &str) -> &'s [Column] {
    schema.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
}

// The differ keeps the last occurrence when a column name repeats, so
// the renderers resolve types the same way
fn lookup_type<'s>(schema: &'s Schema, table: &str, column: &str) -> &'s str {
    schema
        .tables
        .get(table)
        .and_then(|cols| cols.iter().rev().find(|c| c.name == column))
        .map(|c| c.data_type.as_str())
        .unwrap_or("UNKNOWN")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::schema::diff_schemas;

    pub(crate) struct Fixture {
        pub diff: SchemaDiff,
        pub schema_a: Schema,
        pub schema_b: Schema,
        pub version_a: VersionInfo,
        pub version_b: VersionInfo,
    }

    impl Fixture {
        /// One added table, one removed table, and one table with an
        /// added, a removed, and a retyped column
        pub(crate) fn sample() -> Self {
            let mut schema_a = Schema::default();
            schema_a.tables.insert(
                "Customers".to_string(),
                vec![
                    Column::new("id", "INTEGER"),
                    Column::new("name", "TEXT"),
                    Column::new("balance", "DECIMAL"),
                ],
            );
            schema_a.tables.insert(
                "Legacy".to_string(),
                vec![Column::new("old_id", "INTEGER")],
            );

            let mut schema_b = Schema::default();
            schema_b.tables.insert(
                "Customers".to_string(),
                vec![
                    Column::new("id", "TEXT"),
                    Column::new("name", "TEXT"),
                    Column::new("email", "TEXT"),
                ],
            );
            schema_b.tables.insert(
                "Reports".to_string(),
                vec![Column::new("id", "INTEGER"), Column::new("body", "TEXT")],
            );

            let diff = diff_schemas(&schema_a, &schema_b);

            Fixture {
                diff,
                schema_a,
                schema_b,
                version_a: VersionInfo::new("2.0.1", "12", "3/5/2023"),
                version_b: VersionInfo::new("2.1.0", "15", "21/11/2023"),
            }
        }

        pub(crate) fn identical() -> Self {
            let mut schema = Schema::default();
            schema
                .tables
                .insert("Users".to_string(), vec![Column::new("id", "INTEGER")]);

            Fixture {
                diff: diff_schemas(&schema, &schema),
                schema_a: schema.clone(),
                schema_b: schema,
                version_a: VersionInfo::unknown(),
                version_b: VersionInfo::unknown(),
            }
        }

        pub(crate) fn context(&self, show_types: bool) -> ExportContext<'_> {
            ExportContext {
                diff: &self.diff,
                schema_a: &self.schema_a,
                schema_b: &self.schema_b,
                version_a: &self.version_a,
                version_b: &self.version_b,
                show_types,
            }
        }
    }
}
