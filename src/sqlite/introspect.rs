// ABOUTME: Schema introspection over sqlite_master and pragma_table_info
// ABOUTME: Produces Schema snapshots with normalized column types

use crate::schema::{Column, Schema};
use anyhow::{Context, Result};
use rusqlite::Connection;

/// List user table names in ascending order
///
/// SQLite's own bookkeeping tables (`sqlite_sequence` and friends) are
/// excluded since they are not part of the application schema.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )
        .context("Failed to prepare table listing query")?;

    let tables = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()
        .context("Failed to list tables")?;

    Ok(tables)
}

/// Check whether a table exists, matching names the way SQLite does
/// (case-insensitively)
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT count(*) FROM sqlite_master \
             WHERE type = 'table' AND lower(name) = lower(?1)",
            [table],
            |row| row.get(0),
        )
        .context("Failed to query sqlite_master")?;

    Ok(count > 0)
}

/// Read one table's columns in declaration order
///
/// Declared types are normalized with [`normalize_type`] so that two
/// databases spelling the same type differently ("INT" vs "INTEGER")
/// do not produce spurious differences.
///
/// # Arguments
/// * `conn` - Open database connection
/// * `table` - Table name as listed by [`list_tables`]
///
/// # Returns
/// * `Result<Vec<Column>>` - Columns in cid order with normalized types
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<Column>> {
    let mut stmt = conn
        .prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")
        .context("Failed to prepare column info query")?;

    let columns = stmt
        .query_map([table], |row| {
            let name: String = row.get(0)?;
            let declared: String = row.get(1)?;
            Ok(Column::new(name, normalize_type(&declared)))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read columns for table '{}'", table))?;

    Ok(columns)
}

/// Extract the complete schema snapshot of a database
pub fn read_schema(conn: &Connection) -> Result<Schema> {
    let mut schema = Schema::default();

    for table in list_tables(conn)? {
        let columns = table_columns(conn, &table)?;
        schema.tables.insert(table, columns);
    }

    Ok(schema)
}

/// Normalize a declared column type to a canonical tag
///
/// SQLite accepts free-form type declarations ("VARCHAR(50)", "int",
/// "Double Precision"). The rules below follow SQLite's own affinity
/// keyword matching, extended with the date/time and decimal tags the
/// reports use. Matching is by substring on the upper-cased declaration
/// and rule order matters: INT must come first (so BIGINT lands on
/// INTEGER) and DATETIME before DATE and TIME. Unrecognized declarations
/// pass through upper-cased.
pub fn normalize_type(declared: &str) -> String {
    let upper = declared.trim().to_ascii_uppercase();

    // An omitted type gets BLOB affinity in SQLite
    if upper.is_empty() {
        return "BINARY".to_string();
    }

    const RULES: &[(&[&str], &str)] = &[
        (&["INT"], "INTEGER"),
        (&["CHAR", "CLOB", "TEXT", "STRING"], "TEXT"),
        (&["BLOB", "BINARY"], "BINARY"),
        (&["REAL", "FLOA", "DOUB"], "FLOAT"),
        (&["BOOL"], "BOOLEAN"),
        (&["DATETIME", "TIMESTAMP"], "DATETIME"),
        (&["DATE"], "DATE"),
        (&["TIME"], "TIME"),
        (&["DECIMAL", "NUMERIC"], "DECIMAL"),
    ];

    for (needles, tag) in RULES {
        if needles.iter().any(|needle| upper.contains(needle)) {
            return (*tag).to_string();
        }
    }

    upper
}
