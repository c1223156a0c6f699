// ABOUTME: Utility functions for input validation and log hygiene
// ABOUTME: Validates database/output paths and sanitizes identifiers for display

use anyhow::{bail, Result};
use std::path::Path;

/// Validate a database file path before opening it
///
/// Checks that the path points at an existing regular file. The SQLite
/// layer performs the deeper "is this actually a database" probe; this
/// check exists so argument mistakes fail fast with a clear message.
///
/// # Arguments
///
/// * `path` - Database file path to validate
///
/// # Returns
///
/// Returns `Ok(())` if the path is usable.
///
/// # Errors
///
/// Returns an error with a helpful message if the path is:
/// - Empty
/// - Nonexistent
/// - A directory instead of a file
///
/// # Examples
///
/// ```
/// # use sqlite_schema_diff::utils::validate_database_path;
/// # use std::path::Path;
/// assert!(validate_database_path(Path::new("")).is_err());
/// assert!(validate_database_path(Path::new("/no/such/file.db")).is_err());
/// assert!(validate_database_path(Path::new("/tmp")).is_err());
/// ```
pub fn validate_database_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("Database path cannot be empty");
    }

    if !path.exists() {
        bail!(
            "Database file not found: {}\n\
             Please check the path and try again.",
            path.display()
        );
    }

    if path.is_dir() {
        bail!(
            "Expected a database file but found a directory: {}",
            path.display()
        );
    }

    Ok(())
}

/// Validate an output path before running a comparison
///
/// Ensures the report can actually be written once the comparison is
/// done: the path must not be a directory and its parent directory must
/// exist.
///
/// # Errors
///
/// Returns an error if the path is empty, is a directory, or its parent
/// directory does not exist.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("Output path cannot be empty");
    }

    if path.is_dir() {
        bail!(
            "Output path is a directory: {}\n\
             Please provide a file path, e.g.: {}/schema-diff.txt",
            path.display(),
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            bail!(
                "Output directory does not exist: {}\n\
                 Please create it first or choose another location.",
                parent.display()
            );
        }
    }

    Ok(())
}

/// Sanitize an identifier (table name, column name, etc.) for display
///
/// Removes control characters and limits length to prevent log injection
/// and keep messages readable. Database files are arbitrary input, so
/// names read from them are not trusted in log output.
///
/// **Note**: This is for display purposes only. Queries bind identifiers
/// through parameters.
///
/// # Examples
///
/// ```
/// # use sqlite_schema_diff::utils::sanitize_identifier;
/// assert_eq!(sanitize_identifier("normal_table"), "normal_table");
/// assert_eq!(sanitize_identifier("table\x00name"), "tablename");
/// assert_eq!(sanitize_identifier("table\nname"), "tablename");
///
/// // Length limit
/// let long_name = "a".repeat(200);
/// assert_eq!(sanitize_identifier(&long_name).len(), 100);
/// ```
pub fn sanitize_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| !c.is_control())
        .take(100)
        .collect()
}
