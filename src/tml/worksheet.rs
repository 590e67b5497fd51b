//! Worksheet TML document synthesis.

use super::{
    column_role, composite_name, join_name, Aggregation, ColumnRole, GeneratorOptions, JoinType,
    ObjectRef,
};
use crate::diagram::Diagram;
use crate::graph::Path;
use ahash::AHashMap;
use serde::Serialize;

/// The cross-table worksheet TML document.
#[derive(Debug, Clone, Serialize)]
pub struct WorksheetTml {
    pub name: String,
    pub tables: Vec<ObjectRef>,
    pub joins: Vec<WorksheetJoinTml>,
    pub table_paths: Vec<TablePathTml>,
    pub worksheet_columns: Vec<WorksheetColumnTml>,
    pub properties: WorksheetProperties,
}

/// One join descriptor at the worksheet level. Unlike table documents,
/// every parsed join is listed here, attached or not.
#[derive(Debug, Clone, Serialize)]
pub struct WorksheetJoinTml {
    pub name: String,
    pub source: String,
    pub destination: String,
    #[serde(rename = "type")]
    pub join_type: JoinType,
    pub is_one_to_one: bool,
}

/// Positional table entry with its enumerated join paths.
#[derive(Debug, Clone, Serialize)]
pub struct TablePathTml {
    /// Positional identifier: `<table>_<suffix>_<1-based index>`
    pub id: String,
    pub table: String,
    /// Present only when the table has at least one non-trivial path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_path: Option<Vec<JoinPathTml>>,
}

/// One path rendered as its ordered join display names.
#[derive(Debug, Clone, Serialize)]
pub struct JoinPathTml {
    pub join: Vec<String>,
}

/// One column projection at the worksheet level.
#[derive(Debug, Clone, Serialize)]
pub struct WorksheetColumnTml {
    pub name: String,
    /// Fully qualified identifier: `<table path id>::<composite name>`
    pub column_id: String,
    pub properties: WorksheetColumnProperties,
}

/// Logical properties of a worksheet column.
#[derive(Debug, Clone, Serialize)]
pub struct WorksheetColumnProperties {
    pub column_type: ColumnRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
}

/// Fixed worksheet-level properties.
#[derive(Debug, Clone, Serialize)]
pub struct WorksheetProperties {
    pub is_bypass_rls: bool,
    pub join_progressive: bool,
}

/// Build the worksheet document from the parsed diagram and the resolved
/// join paths.
pub fn worksheet_document(
    diagram: &Diagram,
    paths: &AHashMap<String, Vec<Path>>,
    name: &str,
    options: &GeneratorOptions,
) -> WorksheetTml {
    let tables = diagram
        .iter()
        .map(|table| ObjectRef {
            name: options.object_name(&table.name),
        })
        .collect();

    let joins = diagram
        .joins
        .iter()
        .map(|join| WorksheetJoinTml {
            name: join_name(join),
            source: options.object_name(&join.source),
            destination: options.object_name(&join.destination),
            join_type: JoinType::Inner,
            is_one_to_one: join.is_one_to_one,
        })
        .collect();

    let mut table_paths = Vec::with_capacity(diagram.len());
    let mut worksheet_columns = Vec::new();

    for (i, table) in diagram.iter().enumerate() {
        let path_id = options.path_id(&table.name, i + 1);

        // Only tables reached through at least one join get a join_path;
        // a lone empty path marks the table as a root.
        let join_path = paths
            .get(&table.name)
            .filter(|table_paths| !table_paths.is_empty() && !table_paths[0].is_empty())
            .map(|table_paths| {
                table_paths
                    .iter()
                    .map(|path| JoinPathTml {
                        join: path.iter().map(join_name).collect(),
                    })
                    .collect()
            });

        table_paths.push(TablePathTml {
            id: path_id.clone(),
            table: options.object_name(&table.name),
            join_path,
        });

        for column in &table.columns {
            let composite = composite_name(&table.name, &column.name);
            let role = column_role(column);
            worksheet_columns.push(WorksheetColumnTml {
                name: composite.clone(),
                column_id: format!("{}::{}", path_id, composite),
                properties: WorksheetColumnProperties {
                    column_type: role,
                    aggregation: (role == ColumnRole::Measure).then_some(Aggregation::Sum),
                },
            });
        }
    }

    WorksheetTml {
        name: name.to_string(),
        tables,
        joins,
        table_paths,
        worksheet_columns,
        properties: WorksheetProperties {
            is_bypass_rls: false,
            join_progressive: true,
        },
    }
}
