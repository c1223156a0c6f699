// ABOUTME: Diff command implementation - Compare two database schemas
// ABOUTME: Extracts both schemas, diffs them, and writes the report file

use crate::export::{self, ExportContext, ExportFormat};
use crate::filter::TableFilter;
use crate::schema::{diff_schemas, Schema, VersionInfo};
use crate::sqlite;
use crate::utils;
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Resolved arguments for the diff command
pub struct DiffOptions {
    pub database_a: PathBuf,
    pub database_b: PathBuf,
    pub output: PathBuf,
    /// Explicit format override; None = infer from the output extension
    pub format: Option<ExportFormat>,
    pub show_types: bool,
    pub filter: TableFilter,
    /// Skip the confirmation prompt when the schemas are identical
    pub assume_yes: bool,
}

/// Compare the schemas of two database files and export the differences
///
/// Steps:
/// 1. Validates the input and output paths
/// 2. Opens both databases read-only
/// 3. Reads version metadata (falling back to "Unknown" when absent)
/// 4. Extracts both schemas, honoring the table filter
/// 5. Computes the diff
/// 6. If the schemas are identical, asks whether to still write a file
///    (unless `assume_yes` is set)
/// 7. Renders and writes the report in the selected format
///
/// # Arguments
///
/// * `options` - Paths, format selection, filter, and prompt behavior
///
/// # Returns
///
/// Returns `Ok(())` after the report is written, or after the user
/// declines to write one for identical schemas.
///
/// # Errors
///
/// This function will return an error if:
/// - Either database path is missing or not a SQLite database
/// - The output location is not writable
/// - Schema extraction fails mid-read
///
/// # Examples
///
/// ```no_run
/// # use anyhow::Result;
/// # use std::path::PathBuf;
/// # use sqlite_schema_diff::commands::{diff, DiffOptions};
/// # use sqlite_schema_diff::filter::TableFilter;
/// # fn example() -> Result<()> {
/// diff(&DiffOptions {
///     database_a: PathBuf::from("release-2.0.db"),
///     database_b: PathBuf::from("release-2.1.db"),
///     output: PathBuf::from("schema-diff.txt"),
///     format: None,
///     show_types: true,
///     filter: TableFilter::empty(),
///     assume_yes: false,
/// })?;
/// # Ok(())
/// # }
/// ```
pub fn diff(options: &DiffOptions) -> Result<()> {
    tracing::info!("Starting schema comparison...");
    tracing::info!("");

    utils::validate_database_path(&options.database_a)
        .context("Database A path is not usable")?;
    utils::validate_database_path(&options.database_b)
        .context("Database B path is not usable")?;
    utils::validate_output_path(&options.output)?;

    tracing::info!("Opening database A: {}", options.database_a.display());
    let conn_a = sqlite::open(&options.database_a).context("Failed to open database A")?;

    tracing::info!("Opening database B: {}", options.database_b.display());
    let conn_b = sqlite::open(&options.database_b).context("Failed to open database B")?;

    let version_a = resolve_version(&conn_a, "A")?;
    let version_b = resolve_version(&conn_b, "B")?;
    tracing::info!("Database A version: {}", version_a);
    tracing::info!("Database B version: {}", version_b);
    tracing::info!("");

    let schema_a = extract_schema(&conn_a, &options.filter, "A")?;
    let schema_b = extract_schema(&conn_b, &options.filter, "B")?;
    tracing::info!("");

    let diff = diff_schemas(&schema_a, &schema_b);

    tracing::info!("========================================");
    tracing::info!("Schema Diff Summary");
    tracing::info!("========================================");
    tracing::info!("Tables in A: {}", schema_a.table_count());
    tracing::info!("Tables in B: {}", schema_b.table_count());
    tracing::info!("+ Tables added: {}", diff.tables_added.len());
    tracing::info!("- Tables removed: {}", diff.tables_removed.len());
    tracing::info!("~ Tables modified: {}", diff.tables_modified.len());
    tracing::info!("========================================");
    tracing::info!("");

    if diff.is_empty() {
        tracing::info!("✓ No schema differences found");

        if !options.assume_yes {
            let proceed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("The schemas are identical. Still write an output file?")
                .default(true)
                .interact()
                .context("Failed to get confirmation")?;

            if !proceed {
                tracing::warn!("⚠ No output file written");
                return Ok(());
            }
        }
    }

    let format = resolve_format(&options.output, options.format);
    tracing::info!(
        "Writing {} report to {}...",
        format.name(),
        options.output.display()
    );

    let ctx = ExportContext {
        diff: &diff,
        schema_a: &schema_a,
        schema_b: &schema_b,
        version_a: &version_a,
        version_b: &version_b,
        show_types: options.show_types,
    };
    export::export_diff(&options.output, format, &ctx)?;

    tracing::info!("✅ Schema diff saved to {}", options.output.display());
    Ok(())
}

/// Read version metadata, mapping "unavailable" to the Unknown sentinel
fn resolve_version(conn: &Connection, label: &str) -> Result<VersionInfo> {
    let info = sqlite::read_version_info(conn)
        .with_context(|| format!("Failed to read version metadata from database {}", label))?;

    match info {
        Some(info) => Ok(info),
        None => {
            tracing::warn!(
                "⚠ Database {} has no usable DATABASE_INFO table; version reported as Unknown",
                label
            );
            Ok(VersionInfo::unknown())
        }
    }
}

/// Read all filtered tables of one database into a Schema snapshot
fn extract_schema(conn: &Connection, filter: &TableFilter, label: &str) -> Result<Schema> {
    tracing::info!("Discovering tables in database {}...", label);
    let all_tables = sqlite::list_tables(conn)
        .with_context(|| format!("Failed to list tables in database {}", label))?;
    let total = all_tables.len();

    let tables: Vec<String> = all_tables
        .into_iter()
        .filter(|table| filter.should_compare(table))
        .collect();

    if !filter.is_empty() {
        tracing::info!(
            "Filter keeps {} of {} table(s) in database {}",
            tables.len(),
            total,
            label
        );
    }

    if tables.is_empty() {
        tracing::warn!("⚠ No tables to compare in database {}", label);
        return Ok(Schema::default());
    }

    tracing::info!("Reading {} table(s) from database {}", tables.len(), label);

    let progress = ProgressBar::new(tables.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut schema = Schema::default();
    for table in tables {
        let columns = sqlite::table_columns(conn, &table)?;
        progress.inc(1);
        progress.set_message(format!("Read {}", utils::sanitize_identifier(&table)));
        schema.tables.insert(table, columns);
    }

    progress.finish_with_message(format!("Database {} extracted", label));
    Ok(schema)
}

/// Pick the output format: explicit flag first, then the extension
fn resolve_format(output: &Path, explicit: Option<ExportFormat>) -> ExportFormat {
    if let Some(format) = explicit {
        return format;
    }

    match ExportFormat::from_path(output) {
        Some(format) => format,
        None => {
            tracing::warn!(
                "⚠ Unrecognized output extension for {}; defaulting to text",
                output.display()
            );
            ExportFormat::Text
        }
    }
}
