// ABOUTME: CSV diff report renderer
// ABOUTME: One row per change with a version preamble and RFC 4180 quoting

use super::{columns_of, ExportContext};

/// Render the diff as CSV
///
/// Every row has exactly as many cells as the header: five with types,
/// four without. Fields containing commas, quotes, or line breaks are
/// quoted with doubled inner quotes.
pub fn render(ctx: &ExportContext) -> String {
    let mut out = String::new();

    push_row(&mut out, &["Schema Information"]);
    push_row(
        &mut out,
        &["Database A Version", &ctx.version_a.to_string()],
    );
    push_row(
        &mut out,
        &["Database B Version", &ctx.version_b.to_string()],
    );
    push_row(&mut out, &[]);

    if ctx.show_types {
        push_row(&mut out, &["Change Type", "Table", "Column", "Data Type", "Detail"]);
    } else {
        push_row(&mut out, &["Change Type", "Table", "Column", "Detail"]);
    }

    for table in &ctx.diff.tables_added {
        push_change(&mut out, ctx, "Table Added", table, "", "", "");
        for col in columns_of(ctx.schema_b, table) {
            push_change(&mut out, ctx, "", "", &col.name, &col.data_type, "(New)");
        }
    }

    for table in &ctx.diff.tables_removed {
        push_change(&mut out, ctx, "Table Removed", table, "", "", "");
        for col in columns_of(ctx.schema_a, table) {
            push_change(&mut out, ctx, "", "", &col.name, &col.data_type, "(Removed)");
        }
    }

    for (table, change) in &ctx.diff.tables_modified {
        for col in &change.columns_added {
            push_change(&mut out, ctx, "Column Added", table, col, ctx.type_in_b(table, col), "");
        }
        for col in &change.columns_removed {
            push_change(&mut out, ctx, "Column Removed", table, col, ctx.type_in_a(table, col), "");
        }
        for col in &change.columns_changed {
            let detail = format!("{} -> {}", col.type_a, col.type_b);
            push_change(&mut out, ctx, "Column Changed", table, &col.column, "", &detail);
        }
    }

    out
}

fn push_change(
    out: &mut String,
    ctx: &ExportContext,
    change_type: &str,
    table: &str,
    column: &str,
    data_type: &str,
    detail: &str,
) {
    if ctx.show_types {
        push_row(out, &[change_type, table, column, data_type, detail]);
    } else {
        push_row(out, &[change_type, table, column, detail]);
    }
}

fn push_row(out: &mut String, cells: &[&str]) {
    let row = cells
        .iter()
        .map(|cell| escape_field(cell))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&row);
    out.push('\n');
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
