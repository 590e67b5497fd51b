//! Per-table TML document synthesis.

use super::{
    column_role, composite_name, join_name, physical_type, Aggregation, ColumnRole, DataType,
    GeneratorOptions, JoinType,
};
use crate::diagram::Table;
use serde::Serialize;

/// A table TML document.
#[derive(Debug, Clone, Serialize)]
pub struct TableTml {
    pub name: String,
    pub db: String,
    pub schema: String,
    pub db_table: String,
    pub columns: Vec<TableColumnTml>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub joins_with: Vec<TableJoinTml>,
}

/// One column descriptor in a table document.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumnTml {
    /// Composite display name: `<table> <column>`
    pub name: String,
    /// Upper-cased physical column name
    pub db_column_name: String,
    pub properties: ColumnProperties,
    pub db_column_properties: DbColumnProperties,
}

/// Logical column properties.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnProperties {
    pub column_type: ColumnRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
}

/// Physical column properties.
#[derive(Debug, Clone, Serialize)]
pub struct DbColumnProperties {
    pub data_type: DataType,
}

/// Reference to another TML object by name.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectRef {
    pub name: String,
}

/// One outgoing join descriptor in a table document.
#[derive(Debug, Clone, Serialize)]
pub struct TableJoinTml {
    pub name: String,
    pub destination: ObjectRef,
    /// Equality condition over composite column identifiers
    pub on: String,
    #[serde(rename = "type")]
    pub join_type: JoinType,
    /// Present only for one-to-one joins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_one_to_one: Option<bool>,
}

/// Build the TML document for one table.
pub fn table_document(table: &Table, options: &GeneratorOptions) -> TableTml {
    let object_name = options.object_name(&table.name);

    let columns = table
        .columns
        .iter()
        .map(|column| TableColumnTml {
            name: composite_name(&table.name, &column.name),
            db_column_name: column.name.to_uppercase(),
            properties: ColumnProperties {
                column_type: column_role(column),
                aggregation: None,
            },
            db_column_properties: DbColumnProperties {
                data_type: physical_type(&column.declared_type),
            },
        })
        .collect();

    let joins_with = table
        .outgoing_joins
        .iter()
        .map(|join| TableJoinTml {
            name: join_name(join),
            destination: ObjectRef {
                name: options.object_name(&join.destination),
            },
            on: format!(
                "[{}::{}] = [{}::{}]",
                object_name,
                composite_name(&table.name, &join.source_column),
                options.object_name(&join.destination),
                composite_name(&join.destination, &join.destination_column),
            ),
            join_type: JoinType::Inner,
            is_one_to_one: join.is_one_to_one.then_some(true),
        })
        .collect();

    TableTml {
        name: object_name.clone(),
        db: options.db.clone(),
        schema: options.schema.clone(),
        db_table: object_name,
        columns,
        joins_with,
    }
}
