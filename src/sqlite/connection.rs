// ABOUTME: SQLite database file access
// ABOUTME: Handles read-only opening, catalog probing, and error classification

use anyhow::Result;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Open a SQLite database file for schema extraction
///
/// The file is opened read-only so a comparison can never mutate its
/// inputs. SQLite defers most validation until the first query, so the
/// catalog is probed immediately and open failures are reported here
/// with actionable messages instead of surfacing mid-extraction.
///
/// # Arguments
/// * `path` - Path to the database file
///
/// # Returns
/// * `Result<Connection>` - Read-only connection, or error with diagnosis
///
/// # Errors
/// Returns an error if the file is missing, unreadable, locked, or not
/// a SQLite database.
pub fn open(path: &Path) -> Result<Connection> {
    if !path.exists() {
        anyhow::bail!(
            "Database file not found: {}\n\
             Please check the path and try again.",
            path.display()
        );
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| classify_open_error(path, &e))?;

    // Probe the catalog so corrupt or non-SQLite files fail here
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(|e| classify_open_error(path, &e))?;

    Ok(conn)
}

/// Map a rusqlite error to a message that tells the user what to fix
fn classify_open_error(path: &Path, error: &rusqlite::Error) -> anyhow::Error {
    let error_msg = error.to_string();

    if error_msg.contains("not a database") {
        anyhow::anyhow!(
            "Not a SQLite database: {}\n\
             The file exists but does not have a valid SQLite header.\n\
             Please check that you selected the right file.",
            path.display()
        )
    } else if error_msg.contains("unable to open database") {
        anyhow::anyhow!(
            "Unable to open database: {}\n\
             Please check:\n\
             - The file is readable by the current user\n\
             - The containing directory is accessible\n\
             Error: {}",
            path.display(),
            error_msg
        )
    } else if error_msg.contains("database is locked") || error_msg.contains("database table is locked")
    {
        anyhow::anyhow!(
            "Database is locked: {}\n\
             Another process is holding an exclusive lock on this file.\n\
             Close the other application and try again.\n\
             Error: {}",
            path.display(),
            error_msg
        )
    } else if error_msg.contains("disk image is malformed") {
        anyhow::anyhow!(
            "Database is corrupted: {}\n\
             The file has a valid header but its contents are damaged.\n\
             Error: {}",
            path.display(),
            error_msg
        )
    } else {
        anyhow::anyhow!("Failed to open database {}: {}", path.display(), error_msg)
    }
}
