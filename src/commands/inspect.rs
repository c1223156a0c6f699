// ABOUTME: Inspect command implementation - Report one database's schema
// ABOUTME: Prints a human-readable report or machine-readable JSON

use crate::schema::{Column, Schema, VersionInfo};
use crate::sqlite;
use crate::utils;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Arguments for the inspect command
pub struct InspectOptions {
    pub database: PathBuf,
    /// Emit pretty-printed JSON on stdout instead of the log report
    pub json: bool,
}

#[derive(Serialize)]
struct InspectReport<'a> {
    path: String,
    version: Option<&'a VersionInfo>,
    table_count: usize,
    column_count: usize,
    tables: &'a BTreeMap<String, Vec<Column>>,
}

/// Report the schema and version metadata of a single database
///
/// With `json` set, the report goes to stdout as JSON (version is
/// `null` when metadata is unavailable). Otherwise a log report is
/// produced in the same style as the diff summary.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or read.
pub fn inspect(options: &InspectOptions) -> Result<()> {
    utils::validate_database_path(&options.database)?;

    let conn = sqlite::open(&options.database)?;
    let version = sqlite::read_version_info(&conn)
        .context("Failed to read version metadata")?;
    let schema = sqlite::read_schema(&conn).context("Failed to read schema")?;

    if options.json {
        println!("{}", render_json(&options.database, version.as_ref(), &schema)?);
        return Ok(());
    }

    let display_version = match version {
        Some(info) => info,
        None => {
            tracing::warn!("⚠ No usable DATABASE_INFO table; version reported as Unknown");
            VersionInfo::unknown()
        }
    };

    tracing::info!("");
    tracing::info!("========================================");
    tracing::info!("Database Schema Report");
    tracing::info!("========================================");
    tracing::info!("File: {}", options.database.display());
    tracing::info!("Version: {}", display_version);
    tracing::info!("Tables: {}", schema.table_count());
    tracing::info!("Columns: {}", schema.column_count());
    tracing::info!("");

    if schema.is_empty() {
        tracing::warn!("⚠ No user tables found");
    }

    for (table, columns) in &schema.tables {
        tracing::info!(
            "{} ({} column(s))",
            utils::sanitize_identifier(table),
            columns.len()
        );
        for col in columns {
            tracing::info!(
                "  {} {}",
                utils::sanitize_identifier(&col.name),
                col.data_type
            );
        }
        tracing::info!("");
    }

    tracing::info!("========================================");
    Ok(())
}

fn render_json(path: &Path, version: Option<&VersionInfo>, schema: &Schema) -> Result<String> {
    let report = InspectReport {
        path: path.display().to_string(),
        version,
        table_count: schema.table_count(),
        column_count: schema.column_count(),
        tables: &schema.tables,
    };

    serde_json::to_string_pretty(&report).context("Failed to serialize inspection report")
}
