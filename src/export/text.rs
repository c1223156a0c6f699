// ABOUTME: Plain-text diff report renderer
// ABOUTME: Sectioned layout with +/-/*/~ markers per change kind

use super::{columns_of, ExportContext};

/// Render the diff as a sectioned plain-text report
pub fn render(ctx: &ExportContext) -> String {
    let mut out = String::new();

    out.push_str(&format!("Database A Version: {}\n", ctx.version_a));
    out.push_str(&format!("Database B Version: {}\n", ctx.version_b));

    out.push_str("\nTables Added:\n");
    for table in &ctx.diff.tables_added {
        out.push_str(&format!("  + {}\n", table));
        for col in columns_of(ctx.schema_b, table) {
            if ctx.show_types {
                out.push_str(&format!("    Column: {} (Type: {})\n", col.name, col.data_type));
            } else {
                out.push_str(&format!("    Column: {}\n", col.name));
            }
        }
    }

    out.push_str("\nTables Removed:\n");
    for table in &ctx.diff.tables_removed {
        out.push_str(&format!("  - {}\n", table));
        for col in columns_of(ctx.schema_a, table) {
            if ctx.show_types {
                out.push_str(&format!("    Column: {} (Type: {})\n", col.name, col.data_type));
            } else {
                out.push_str(&format!("    Column: {}\n", col.name));
            }
        }
    }

    out.push_str("\nTables Modified:\n");
    for (table, change) in &ctx.diff.tables_modified {
        out.push_str(&format!("  * {}:\n", table));
        for col in &change.columns_added {
            if ctx.show_types {
                out.push_str(&format!(
                    "    + Column Added: {} (Type: {})\n",
                    col,
                    ctx.type_in_b(table, col)
                ));
            } else {
                out.push_str(&format!("    + Column Added: {}\n", col));
            }
        }
        for col in &change.columns_removed {
            if ctx.show_types {
                out.push_str(&format!(
                    "    - Column Removed: {} (Type: {})\n",
                    col,
                    ctx.type_in_a(table, col)
                ));
            } else {
                out.push_str(&format!("    - Column Removed: {}\n", col));
            }
        }
        for col in &change.columns_changed {
            out.push_str(&format!(
                "    ~ Column Changed: {} (Type: {} -> {})\n",
                col.column, col.type_a, col.type_b
            ));
        }
    }

    out
}
