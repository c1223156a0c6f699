// ABOUTME: Table filtering for schema comparison
// ABOUTME: Applies include/exclude lists before extraction so the differ stays pure

use anyhow::{bail, Result};
use std::collections::BTreeSet;

/// Filter deciding which tables take part in a comparison
///
/// A table is compared when it matches the include list (or no include
/// list was given) and does not appear in the exclude list. Names are
/// matched exactly and case-sensitively.
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    include: Option<BTreeSet<String>>,
    exclude: BTreeSet<String>,
}

impl TableFilter {
    /// Build a filter from CLI-style include/exclude lists
    ///
    /// # Arguments
    /// * `include` - Only compare these tables (None = no restriction)
    /// * `exclude` - Never compare these tables
    ///
    /// # Errors
    /// Returns an error if any provided name is empty after trimming.
    pub fn new(include: Option<Vec<String>>, exclude: Option<Vec<String>>) -> Result<TableFilter> {
        let include = match include {
            Some(entries) => Some(normalize_names(entries, "--include-tables")?),
            None => None,
        };
        let exclude = match exclude {
            Some(entries) => normalize_names(entries, "--exclude-tables")?,
            None => BTreeSet::new(),
        };

        Ok(TableFilter { include, exclude })
    }

    /// A filter that compares every table
    pub fn empty() -> TableFilter {
        TableFilter::default()
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_empty()
    }

    pub fn should_compare(&self, table: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.contains(table) {
                return false;
            }
        }

        !self.exclude.contains(table)
    }
}

fn normalize_names(entries: Vec<String>, flag: &str) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    for entry in entries {
        let name = entry.trim();
        if name.is_empty() {
            bail!(
                "Empty table name in {}.\n\
                 Expected a comma-separated list of table names, e.g.: customers,orders",
                flag
            );
        }
        names.insert(name.to_string());
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_no_filter_compares_everything() {
        let filter = TableFilter::empty();
        assert!(filter.is_empty());
        assert!(filter.should_compare("anything"));
    }

    #[test]
    fn test_include_list_restricts() {
        let filter = TableFilter::new(names(&["customers", "orders"]), None).unwrap();
        assert!(!filter.is_empty());
        assert!(filter.should_compare("customers"));
        assert!(filter.should_compare("orders"));
        assert!(!filter.should_compare("audit_log"));
    }

    #[test]
    fn test_exclude_list_removes() {
        let filter = TableFilter::new(None, names(&["audit_log"])).unwrap();
        assert!(filter.should_compare("customers"));
        assert!(!filter.should_compare("audit_log"));
    }

    #[test]
    fn test_exclude_wins_within_include() {
        let filter =
            TableFilter::new(names(&["customers", "orders"]), names(&["orders"])).unwrap();
        assert!(filter.should_compare("customers"));
        assert!(!filter.should_compare("orders"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = TableFilter::new(names(&["Customers"]), None).unwrap();
        assert!(filter.should_compare("Customers"));
        assert!(!filter.should_compare("customers"));
    }

    #[test]
    fn test_names_are_trimmed() {
        let filter = TableFilter::new(names(&[" customers ", "orders"]), None).unwrap();
        assert!(filter.should_compare("customers"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let result = TableFilter::new(names(&["customers", "  "]), None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("--include-tables"));
    }
}
