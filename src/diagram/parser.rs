//! Two-pass best-effort parser for `erDiagram` text.

use super::line::{classify, Line, RelationshipLine};
use super::{Column, Diagram, Join, TableId};

/// Parse diagram text into tables and joins.
///
/// Two independent passes over the classified lines: relationships first,
/// then table bodies. No line is ever rejected; anything that fits no
/// shape is skipped, so the worst-case result is an empty diagram.
pub fn parse(text: &str) -> Diagram {
    let lines: Vec<Line> = text.lines().map(classify).collect();

    let mut diagram = Diagram::new();

    // Relationship pass
    for line in &lines {
        if let Line::Relationship(rel) = line {
            diagram.joins.push(normalize_join(rel));
        }
    }

    // Table-body pass
    let mut current: Option<TableId> = None;
    for line in &lines {
        match line {
            Line::TableOpen(name) => {
                current = Some(diagram.add_table(name.clone()));
            }
            Line::TableClose => {
                current = None;
            }
            Line::ColumnDef(col) => {
                if let Some(id) = current {
                    if let Some(table) = diagram.table_mut(id) {
                        table.columns.push(Column {
                            name: col.name.clone(),
                            declared_type: col.declared_type.clone(),
                            is_primary_key: col.is_primary_key,
                            is_foreign_key: col.is_foreign_key,
                        });
                    }
                }
            }
            Line::Relationship(_) | Line::Ignored => {}
        }
    }

    diagram.attach_joins();
    diagram
}

/// Build the internal join from a relationship line, normalizing direction.
///
/// For the many form (`||--o{`) the declared destination owns the foreign
/// key, so source and destination (and their columns) are swapped: the
/// many side becomes the traversal source. Downstream graph and document
/// logic depend on this convention.
fn normalize_join(rel: &RelationshipLine) -> Join {
    if rel.is_reversed() {
        Join {
            source: rel.destination.clone(),
            destination: rel.source.clone(),
            source_column: rel.destination_column.clone(),
            destination_column: rel.source_column.clone(),
            is_one_to_one: rel.is_one_to_one(),
        }
    } else {
        Join {
            source: rel.source.clone(),
            destination: rel.destination.clone(),
            source_column: rel.source_column.clone(),
            destination_column: rel.destination_column.clone(),
            is_one_to_one: rel.is_one_to_one(),
        }
    }
}
