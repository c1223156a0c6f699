// ABOUTME: Pure schema comparison between two database snapshots
// ABOUTME: Computes added/removed tables and per-table column changes

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::model::{Column, Schema};

/// Structural difference between two schema snapshots.
///
/// A table name appears in at most one of `tables_added`,
/// `tables_removed`, or `tables_modified`; unchanged tables are omitted
/// entirely. All collections iterate in ascending name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiff {
    pub tables_added: BTreeSet<String>,
    pub tables_removed: BTreeSet<String>,
    pub tables_modified: BTreeMap<String, TableChange>,
}

impl SchemaDiff {
    /// Returns true when the two schemas were structurally identical.
    pub fn is_empty(&self) -> bool {
        self.tables_added.is_empty()
            && self.tables_removed.is_empty()
            && self.tables_modified.is_empty()
    }
}

/// Column-level changes for one table present in both schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableChange {
    pub columns_added: BTreeSet<String>,
    pub columns_removed: BTreeSet<String>,
    pub columns_changed: Vec<ColumnChange>,
}

impl TableChange {
    pub fn is_empty(&self) -> bool {
        self.columns_added.is_empty()
            && self.columns_removed.is_empty()
            && self.columns_changed.is_empty()
    }
}

/// A column whose name exists on both sides with differing type tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnChange {
    pub column: String,
    pub type_a: String,
    pub type_b: String,
}

/// Compute the structural difference between two schema snapshots.
///
/// Total, deterministic, and side-effect free: empty schemas are valid
/// input and produce an empty diff. Tables are matched by name, columns
/// by name within each matched table; a type-tag mismatch on a matched
/// column is the sole trigger for a [`ColumnChange`]. Runs in time
/// linear in the total table and column counts.
///
/// # Examples
///
/// ```
/// use sqlite_schema_diff::schema::{diff_schemas, Column, Schema};
///
/// let mut before = Schema::default();
/// before
///     .tables
///     .insert("users".to_string(), vec![Column::new("id", "INTEGER")]);
///
/// let mut after = before.clone();
/// after
///     .tables
///     .insert("sessions".to_string(), vec![Column::new("token", "TEXT")]);
///
/// let diff = diff_schemas(&before, &after);
/// assert!(diff.tables_added.contains("sessions"));
/// assert!(diff.tables_removed.is_empty());
/// assert!(diff.tables_modified.is_empty());
/// ```
pub fn diff_schemas(schema_a: &Schema, schema_b: &Schema) -> SchemaDiff {
    let tables_a: BTreeSet<&str> = schema_a.tables.keys().map(String::as_str).collect();
    let tables_b: BTreeSet<&str> = schema_b.tables.keys().map(String::as_str).collect();

    let tables_added = tables_b
        .difference(&tables_a)
        .map(|t| (*t).to_string())
        .collect();
    let tables_removed = tables_a
        .difference(&tables_b)
        .map(|t| (*t).to_string())
        .collect();

    let mut tables_modified = BTreeMap::new();
    for table in tables_a.intersection(&tables_b) {
        let change = diff_table(&schema_a.tables[*table], &schema_b.tables[*table]);
        if !change.is_empty() {
            tables_modified.insert((*table).to_string(), change);
        }
    }

    SchemaDiff {
        tables_added,
        tables_removed,
        tables_modified,
    }
}

fn diff_table(columns_a: &[Column], columns_b: &[Column]) -> TableChange {
    let types_a = column_types(columns_a);
    let types_b = column_types(columns_b);

    let names_a: BTreeSet<&str> = types_a.keys().copied().collect();
    let names_b: BTreeSet<&str> = types_b.keys().copied().collect();

    let columns_added = names_b
        .difference(&names_a)
        .map(|n| (*n).to_string())
        .collect();
    let columns_removed = names_a
        .difference(&names_b)
        .map(|n| (*n).to_string())
        .collect();

    // Intersection iterates ascending, so columns_changed stays sorted.
    let mut columns_changed = Vec::new();
    for name in names_a.intersection(&names_b) {
        let type_a = types_a[name];
        let type_b = types_b[name];
        if type_a != type_b {
            columns_changed.push(ColumnChange {
                column: (*name).to_string(),
                type_a: type_a.to_string(),
                type_b: type_b.to_string(),
            });
        }
    }

    TableChange {
        columns_added,
        columns_removed,
        columns_changed,
    }
}

/// Name → type lookup for one side's column list. A repeated name keeps
/// the last occurrence.
fn column_types(columns: &[Column]) -> BTreeMap<&str, &str> {
    columns
        .iter()
        .map(|c| (c.name.as_str(), c.data_type.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a schema from `(table, [(column, type)])` literals.
    fn schema(tables: &[(&str, &[(&str, &str)])]) -> Schema {
        let mut result = Schema::default();
        for (table, columns) in tables {
            result.tables.insert(
                (*table).to_string(),
                columns
                    .iter()
                    .map(|(name, data_type)| Column::new(*name, *data_type))
                    .collect(),
            );
        }
        result
    }

    #[test]
    fn test_diff_identical_schemas_is_empty() {
        let a = schema(&[
            ("customers", &[("id", "INTEGER"), ("name", "TEXT")]),
            ("orders", &[("id", "INTEGER"), ("total", "FLOAT")]),
        ]);

        let diff = diff_schemas(&a, &a);

        assert!(diff.is_empty());
        assert!(diff.tables_added.is_empty());
        assert!(diff.tables_removed.is_empty());
        assert!(diff.tables_modified.is_empty());
    }

    #[test]
    fn test_diff_empty_schemas_is_empty() {
        let diff = diff_schemas(&Schema::default(), &Schema::default());
        assert!(diff.is_empty());
    }

    #[test]
    fn test_diff_against_empty_schema_reports_all_tables() {
        let a = schema(&[("customers", &[("id", "INTEGER")])]);
        let empty = Schema::default();

        let removed = diff_schemas(&a, &empty);
        assert_eq!(
            removed.tables_removed.iter().collect::<Vec<_>>(),
            vec!["customers"]
        );
        assert!(removed.tables_added.is_empty());
        assert!(removed.tables_modified.is_empty());

        let added = diff_schemas(&empty, &a);
        assert_eq!(
            added.tables_added.iter().collect::<Vec<_>>(),
            vec!["customers"]
        );
        assert!(added.tables_removed.is_empty());
    }

    #[test]
    fn test_diff_added_equals_reversed_removed() {
        let a = schema(&[
            ("alpha", &[("id", "INTEGER")]),
            ("shared", &[("id", "INTEGER")]),
        ]);
        let b = schema(&[
            ("shared", &[("id", "INTEGER")]),
            ("zeta", &[("id", "INTEGER")]),
        ]);

        let forward = diff_schemas(&a, &b);
        let backward = diff_schemas(&b, &a);

        assert_eq!(forward.tables_added, backward.tables_removed);
        assert_eq!(forward.tables_removed, backward.tables_added);
    }

    #[test]
    fn test_column_order_does_not_mark_table_modified() {
        let a = schema(&[("t", &[("a", "INTEGER"), ("b", "TEXT"), ("c", "FLOAT")])]);
        let b = schema(&[("t", &[("c", "FLOAT"), ("a", "INTEGER"), ("b", "TEXT")])]);

        let diff = diff_schemas(&a, &b);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_type_change_and_table_addition() {
        let a = schema(&[("T", &[("id", "INTEGER")])]);
        let b = schema(&[("T", &[("id", "TEXT")]), ("U", &[("x", "INTEGER")])]);

        let diff = diff_schemas(&a, &b);

        assert_eq!(diff.tables_added.iter().collect::<Vec<_>>(), vec!["U"]);
        assert!(diff.tables_removed.is_empty());
        assert_eq!(diff.tables_modified.len(), 1);

        let change = &diff.tables_modified["T"];
        assert!(change.columns_added.is_empty());
        assert!(change.columns_removed.is_empty());
        assert_eq!(
            change.columns_changed,
            vec![ColumnChange {
                column: "id".to_string(),
                type_a: "INTEGER".to_string(),
                type_b: "TEXT".to_string(),
            }]
        );
    }

    #[test]
    fn test_column_removal() {
        let a = schema(&[("T", &[("a", "INTEGER"), ("b", "TEXT")])]);
        let b = schema(&[("T", &[("a", "INTEGER")])]);

        let diff = diff_schemas(&a, &b);

        assert!(diff.tables_added.is_empty());
        assert!(diff.tables_removed.is_empty());

        let change = &diff.tables_modified["T"];
        assert!(change.columns_added.is_empty());
        assert_eq!(
            change.columns_removed.iter().collect::<Vec<_>>(),
            vec!["b"]
        );
        assert!(change.columns_changed.is_empty());
    }

    #[test]
    fn test_output_collections_sorted_regardless_of_input_order() {
        let a = schema(&[(
            "t",
            &[("zulu", "INTEGER"), ("mike", "TEXT"), ("alfa", "FLOAT")],
        )]);
        let b = schema(&[(
            "t",
            &[
                ("yankee", "TEXT"),
                ("alfa", "FLOAT"),
                ("bravo", "INTEGER"),
                ("mike", "INTEGER"),
            ],
        )]);

        let diff = diff_schemas(&a, &b);
        let change = &diff.tables_modified["t"];

        assert_eq!(
            change.columns_added.iter().collect::<Vec<_>>(),
            vec!["bravo", "yankee"]
        );
        assert_eq!(
            change.columns_removed.iter().collect::<Vec<_>>(),
            vec!["zulu"]
        );
        assert_eq!(
            change
                .columns_changed
                .iter()
                .map(|c| c.column.as_str())
                .collect::<Vec<_>>(),
            vec!["mike"]
        );
    }

    #[test]
    fn test_mixed_additions_removals_and_changes_in_one_table() {
        let a = schema(&[(
            "inventory",
            &[
                ("sku", "TEXT"),
                ("count", "INTEGER"),
                ("price", "INTEGER"),
                ("obsolete", "BOOLEAN"),
            ],
        )]);
        let b = schema(&[(
            "inventory",
            &[
                ("sku", "TEXT"),
                ("count", "INTEGER"),
                ("price", "DECIMAL"),
                ("location", "TEXT"),
            ],
        )]);

        let diff = diff_schemas(&a, &b);
        let change = &diff.tables_modified["inventory"];

        assert_eq!(
            change.columns_added.iter().collect::<Vec<_>>(),
            vec!["location"]
        );
        assert_eq!(
            change.columns_removed.iter().collect::<Vec<_>>(),
            vec!["obsolete"]
        );
        assert_eq!(change.columns_changed.len(), 1);
        assert_eq!(change.columns_changed[0].column, "price");
        assert_eq!(change.columns_changed[0].type_a, "INTEGER");
        assert_eq!(change.columns_changed[0].type_b, "DECIMAL");
    }

    // Duplicate column names within one side are degenerate input; the
    // contract is only that one occurrence wins deterministically.
    #[test]
    fn test_duplicate_column_names_last_wins() {
        let a = schema(&[("t", &[("id", "INTEGER"), ("id", "TEXT")])]);
        let b = schema(&[("t", &[("id", "TEXT")])]);

        // Last occurrence of "id" in A is TEXT, so nothing changed.
        let diff = diff_schemas(&a, &b);
        assert!(diff.is_empty());

        let c = schema(&[("t", &[("id", "INTEGER")])]);
        let diff = diff_schemas(&a, &c);
        let change = &diff.tables_modified["t"];
        assert_eq!(change.columns_changed.len(), 1);
        assert_eq!(change.columns_changed[0].type_a, "TEXT");
        assert_eq!(change.columns_changed[0].type_b, "INTEGER");
    }

    #[test]
    fn test_tables_with_no_columns_compare_equal() {
        let a = schema(&[("empty", &[])]);
        let b = schema(&[("empty", &[])]);

        let diff = diff_schemas(&a, &b);
        assert!(diff.is_empty());
    }
}
