// ABOUTME: Snapshot types describing one database's structure
// ABOUTME: Defines Column, Schema, and VersionInfo used by the differ and exporters

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single column: its name and normalized type tag (e.g. "TEXT", "INTEGER").
///
/// Type equality is case-sensitive string equality; normalization happens
/// in the extractor, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// One database's schema snapshot: table name → ordered column list.
///
/// Column order reflects extraction order and carries no semantic weight
/// for diffing; column identity is by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub tables: BTreeMap<String, Vec<Column>>,
}

impl Schema {
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Revision metadata read from a database's DATABASE_INFO table.
///
/// Each field falls back to "Unknown" when the metadata is unavailable;
/// see `sqlite::read_version_info` for how availability is determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub version: String,
    pub build: String,
    pub date: String,
}

impl VersionInfo {
    pub fn new(
        version: impl Into<String>,
        build: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            build: build.into(),
            date: date.into(),
        }
    }

    /// Sentinel value used when no version metadata could be read.
    pub fn unknown() -> Self {
        Self::new("Unknown", "Unknown", "Unknown")
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Build {}) - {}", self.version, self.build, self.date)
    }
}
