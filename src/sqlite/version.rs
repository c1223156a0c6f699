// ABOUTME: Revision metadata reader for the DATABASE_INFO convention
// ABOUTME: Returns the newest update row or None when metadata is absent

use super::introspect::table_exists;
use crate::schema::VersionInfo;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

const METADATA_TABLE: &str = "DATABASE_INFO";

const REQUIRED_COLUMNS: [&str; 5] = [
    "UPDATE_VERSION",
    "UPDATE_NUM",
    "UPDATE_DAY",
    "UPDATE_MONTH",
    "UPDATE_YEAR",
];

/// Read revision metadata from the DATABASE_INFO table
///
/// Databases following this convention record each schema revision as a
/// row; the one with the highest UPDATE_NUM describes the current state.
///
/// Returns `Ok(None)` when metadata is unavailable (no DATABASE_INFO
/// table, a table with a different shape, or no rows) so that callers
/// can fall back to "Unknown" and still compare the databases. An `Err`
/// means the database itself could not be queried.
///
/// # Arguments
/// * `conn` - Open database connection
///
/// # Returns
/// * `Result<Option<VersionInfo>>` - Newest revision, or None
pub fn read_version_info(conn: &Connection) -> Result<Option<VersionInfo>> {
    if !table_exists(conn, METADATA_TABLE)? {
        tracing::debug!("No {} table; version metadata unavailable", METADATA_TABLE);
        return Ok(None);
    }

    if !has_required_columns(conn)? {
        tracing::debug!(
            "{} table lacks the expected columns; version metadata unavailable",
            METADATA_TABLE
        );
        return Ok(None);
    }

    // CAST tolerates numeric storage, COALESCE tolerates NULL fields
    let info = conn
        .query_row(
            "SELECT CAST(COALESCE(UPDATE_VERSION, 'Unknown') AS TEXT), \
                    CAST(COALESCE(UPDATE_NUM, 'Unknown') AS TEXT), \
                    CAST(COALESCE(UPDATE_DAY, '?') AS TEXT), \
                    CAST(COALESCE(UPDATE_MONTH, '?') AS TEXT), \
                    CAST(COALESCE(UPDATE_YEAR, '?') AS TEXT) \
             FROM DATABASE_INFO \
             ORDER BY UPDATE_NUM DESC \
             LIMIT 1",
            [],
            |row| {
                let day: String = row.get(2)?;
                let month: String = row.get(3)?;
                let year: String = row.get(4)?;
                Ok(VersionInfo::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    format!("{}/{}/{}", day, month, year),
                ))
            },
        )
        .optional()
        .context("Failed to read version metadata from DATABASE_INFO")?;

    Ok(info)
}

fn has_required_columns(conn: &Connection) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT upper(name) FROM pragma_table_info(?1)")
        .context("Failed to prepare metadata column query")?;

    let present: std::collections::BTreeSet<String> = stmt
        .query_map([METADATA_TABLE], |row| row.get(0))?
        .collect::<std::result::Result<_, _>>()
        .context("Failed to inspect DATABASE_INFO columns")?;

    Ok(REQUIRED_COLUMNS.iter().all(|c| present.contains(*c)))
}
