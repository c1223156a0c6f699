// ABOUTME: YAML diff report renderer
// ABOUTME: Block-style document with version, optional schema, and diff keys

use super::ExportContext;
use crate::schema::{Schema, VersionInfo};
use std::collections::BTreeSet;

/// Render the diff as a block-style YAML document
///
/// Key order is fixed: schema_versions, schemas (only with types), then
/// the three diff keys. Empty collections render inline as `[]` / `{}`.
pub fn render(ctx: &ExportContext) -> String {
    let mut out = String::new();

    push_line(&mut out, 0, "schema_versions:");
    push_version(&mut out, "database_a", ctx.version_a);
    push_version(&mut out, "database_b", ctx.version_b);

    if ctx.show_types {
        push_line(&mut out, 0, "schemas:");
        push_schema(&mut out, "database_a", ctx.schema_a);
        push_schema(&mut out, "database_b", ctx.schema_b);
    }

    push_name_list(&mut out, 0, "tables_added", &ctx.diff.tables_added);
    push_name_list(&mut out, 0, "tables_removed", &ctx.diff.tables_removed);

    if ctx.diff.tables_modified.is_empty() {
        push_line(&mut out, 0, "tables_modified: {}");
    } else {
        push_line(&mut out, 0, "tables_modified:");
        for (table, change) in &ctx.diff.tables_modified {
            push_line(&mut out, 1, &format!("{}:", scalar(table)));
            push_name_list(&mut out, 2, "columns_added", &change.columns_added);
            push_name_list(&mut out, 2, "columns_removed", &change.columns_removed);
            if change.columns_changed.is_empty() {
                push_line(&mut out, 2, "columns_changed: []");
            } else {
                push_line(&mut out, 2, "columns_changed:");
                for col in &change.columns_changed {
                    push_line(&mut out, 2, &format!("- column: {}", scalar(&col.column)));
                    push_line(&mut out, 3, &format!("type_a: {}", scalar(&col.type_a)));
                    push_line(&mut out, 3, &format!("type_b: {}", scalar(&col.type_b)));
                }
            }
        }
    }

    out
}

fn push_version(out: &mut String, key: &str, version: &VersionInfo) {
    push_line(out, 1, &format!("{}:", key));
    push_line(out, 2, &format!("version: {}", scalar(&version.version)));
    push_line(out, 2, &format!("build: {}", scalar(&version.build)));
    push_line(out, 2, &format!("date: {}", scalar(&version.date)));
}

fn push_schema(out: &mut String, key: &str, schema: &Schema) {
    if schema.tables.is_empty() {
        push_line(out, 1, &format!("{}: {{}}", key));
        return;
    }

    push_line(out, 1, &format!("{}:", key));
    for (table, columns) in &schema.tables {
        if columns.is_empty() {
            push_line(out, 2, &format!("{}: []", scalar(table)));
            continue;
        }
        push_line(out, 2, &format!("{}:", scalar(table)));
        for col in columns {
            push_line(out, 2, &format!("- name: {}", scalar(&col.name)));
            push_line(out, 3, &format!("type: {}", scalar(&col.data_type)));
        }
    }
}

fn push_name_list(out: &mut String, indent: usize, key: &str, names: &BTreeSet<String>) {
    if names.is_empty() {
        push_line(out, indent, &format!("{}: []", key));
        return;
    }

    push_line(out, indent, &format!("{}:", key));
    for name in names {
        push_line(out, indent, &format!("- {}", scalar(name)));
    }
}

fn push_line(out: &mut String, indent: usize, text: &str) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

/// Quote a scalar when a YAML parser would otherwise read it as a
/// number, boolean, or null, or when it carries syntax characters
fn scalar(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }

    let keyword = matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "~"
    );
    let numeric = value.parse::<f64>().is_ok();
    let unsafe_start = value.starts_with([
        ' ', '-', '?', ':', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    ]);
    let unsafe_body = value.ends_with(' ')
        || value.ends_with(':')
        || value.contains(": ")
        || value.contains(" #")
        || value.contains('\n');

    if keyword || numeric || unsafe_start || unsafe_body {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::Fixture;

    #[test]
    fn test_render_without_types() {
        let fixture = Fixture::sample();
        let expected = "schema_versions:
  database_a:
    version: 2.0.1
    build: '12'
    date: 3/5/2023
  database_b:
    version: 2.1.0
    build: '15'
    date: 21/11/2023
tables_added:
- Reports
tables_removed:
- Legacy
tables_modified:
  Customers:
    columns_added:
    - email
    columns_removed:
    - balance
    columns_changed:
    - column: id
      type_a: INTEGER
      type_b: TEXT
";

        assert_eq!(render(&fixture.context(false)), expected);
    }

    #[test]
    fn test_render_with_types_includes_schemas() {
        let fixture = Fixture::sample();
        let report = render(&fixture.context(true));

        assert!(report.contains("schemas:\n  database_a:\n"));
        assert!(report.contains("    Customers:\n    - name: id\n      type: INTEGER\n"));
        assert!(report.contains("    Legacy:\n    - name: old_id\n      type: INTEGER\n"));
        // The diff keys still follow the schemas section
        assert!(report.contains("\ntables_added:\n- Reports\n"));
    }

    #[test]
    fn test_render_identical_schemas_uses_empty_collections() {
        let fixture = Fixture::identical();
        let report = render(&fixture.context(false));

        assert!(report.contains("tables_added: []\n"));
        assert!(report.contains("tables_removed: []\n"));
        assert!(report.contains("tables_modified: {}\n"));
    }

    #[test]
    fn test_scalar_quoting() {
        assert_eq!(scalar("INTEGER"), "INTEGER");
        assert_eq!(scalar("2.1.0"), "2.1.0");
        assert_eq!(scalar("21/11/2023"), "21/11/2023");
        assert_eq!(scalar("15"), "'15'");
        assert_eq!(scalar("3.5"), "'3.5'");
        assert_eq!(scalar("true"), "'true'");
        assert_eq!(scalar("null"), "'null'");
        assert_eq!(scalar(""), "''");
        assert_eq!(scalar("- leading dash"), "'- leading dash'");
        assert_eq!(scalar("it's"), "it's");
        assert_eq!(scalar("'quoted'"), "'''quoted'''");
        assert_eq!(scalar("key: value"), "'key: value'");
    }
}
