// ABOUTME: XML diff report renderer
// ABOUTME: Pretty-printed SchemaDiff document with four-space indentation

use super::{columns_of, ExportContext};
use crate::schema::VersionInfo;

/// Render the diff as a pretty-printed XML document
pub fn render(ctx: &ExportContext) -> String {
    let mut out = String::new();

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<SchemaDiff>\n");

    out.push_str("    <SchemaVersions>\n");
    push_version(&mut out, "DatabaseA", ctx.version_a);
    push_version(&mut out, "DatabaseB", ctx.version_b);
    out.push_str("    </SchemaVersions>\n");

    if ctx.diff.tables_added.is_empty() {
        out.push_str("    <TablesAdded/>\n");
    } else {
        out.push_str("    <TablesAdded>\n");
        for table in &ctx.diff.tables_added {
            push_table_listing(&mut out, ctx, table, ctx.schema_b);
        }
        out.push_str("    </TablesAdded>\n");
    }

    if ctx.diff.tables_removed.is_empty() {
        out.push_str("    <TablesRemoved/>\n");
    } else {
        out.push_str("    <TablesRemoved>\n");
        for table in &ctx.diff.tables_removed {
            push_table_listing(&mut out, ctx, table, ctx.schema_a);
        }
        out.push_str("    </TablesRemoved>\n");
    }

    if ctx.diff.tables_modified.is_empty() {
        out.push_str("    <TablesModified/>\n");
    } else {
        out.push_str("    <TablesModified>\n");
        for (table, change) in &ctx.diff.tables_modified {
            out.push_str(&format!(
                "        <Table name=\"{}\">\n",
                escape_attr(table)
            ));
            for col in &change.columns_added {
                if ctx.show_types {
                    out.push_str(&format!(
                        "            <ColumnAdded name=\"{}\" type=\"{}\"/>\n",
                        escape_attr(col),
                        escape_attr(ctx.type_in_b(table, col))
                    ));
                } else {
                    out.push_str(&format!(
                        "            <ColumnAdded name=\"{}\"/>\n",
                        escape_attr(col)
                    ));
                }
            }
            for col in &change.columns_removed {
                if ctx.show_types {
                    out.push_str(&format!(
                        "            <ColumnRemoved name=\"{}\" type=\"{}\"/>\n",
                        escape_attr(col),
                        escape_attr(ctx.type_in_a(table, col))
                    ));
                } else {
                    out.push_str(&format!(
                        "            <ColumnRemoved name=\"{}\"/>\n",
                        escape_attr(col)
                    ));
                }
            }
            for col in &change.columns_changed {
                out.push_str(&format!(
                    "            <ColumnChanged name=\"{}\" from=\"{}\" to=\"{}\"/>\n",
                    escape_attr(&col.column),
                    escape_attr(&col.type_a),
                    escape_attr(&col.type_b)
                ));
            }
            out.push_str("        </Table>\n");
        }
        out.push_str("    </TablesModified>\n");
    }

    out.push_str("</SchemaDiff>\n");
    out
}

fn push_version(out: &mut String, element: &str, version: &VersionInfo) {
    out.push_str(&format!("        <{}>\n", element));
    out.push_str(&format!(
        "            <Version>{}</Version>\n",
        escape_text(&version.version)
    ));
    out.push_str(&format!(
        "            <Build>{}</Build>\n",
        escape_text(&version.build)
    ));
    out.push_str(&format!(
        "            <Date>{}</Date>\n",
        escape_text(&version.date)
    ));
    out.push_str(&format!("        </{}>\n", element));
}

fn push_table_listing(out: &mut String, ctx: &ExportContext, table: &str, schema: &crate::schema::Schema) {
    let columns = columns_of(schema, table);

    if columns.is_empty() {
        out.push_str(&format!("        <Table name=\"{}\"/>\n", escape_attr(table)));
        return;
    }

    out.push_str(&format!("        <Table name=\"{}\">\n", escape_attr(table)));
    for col in columns {
        if ctx.show_types {
            out.push_str(&format!(
                "            <Column name=\"{}\" type=\"{}\"/>\n",
                escape_attr(&col.name),
                escape_attr(&col.data_type)
            ));
        } else {
            out.push_str(&format!(
                "            <Column name=\"{}\"/>\n",
                escape_attr(&col.name)
            ));
        }
    }
    out.push_str("        </Table>\n");
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
