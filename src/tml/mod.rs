//! TML document synthesis.
//!
//! This module provides:
//! - Serde-serializable document models for table and worksheet TML
//! - Column role and physical data type mapping from declared types
//! - The top-level `generate` operation producing one table document per
//!   parsed table plus a single worksheet document
//!
//! The synthesizer performs no I/O and no serialization; callers receive
//! structured values and decide how to render and package them.

mod table;
mod worksheet;

pub use table::*;
pub use worksheet::*;

use crate::diagram::{parse, Column, Join};
use crate::graph::{find_paths, find_roots, JoinGraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default physical database binding.
pub const DEFAULT_DB: &str = "TPCH5K";
/// Default schema binding.
pub const DEFAULT_SCHEMA: &str = "falcon_default_schema";
/// Default tag suffixed onto table names to form TML object names.
pub const DEFAULT_SUFFIX: &str = "TML";

/// Fixed configuration for document synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Physical database name bound into every table document
    pub db: String,
    /// Schema name bound into every table document
    pub schema: String,
    /// Tag appended to table names to form object identifiers
    pub suffix: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            db: DEFAULT_DB.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Load options from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let options: Self = serde_yaml::from_str(&content)?;
        Ok(options)
    }

    /// TML object name for a table: `<table>_<suffix>`.
    pub fn object_name(&self, table: &str) -> String {
        format!("{}_{}", table, self.suffix)
    }

    /// Positional table-path id: `<table>_<suffix>_<1-based index>`.
    pub fn path_id(&self, table: &str, position: usize) -> String {
        format!("{}_{}_{}", table, self.suffix, position)
    }
}

/// Logical role of a column in the analytical model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    #[serde(rename = "MEASURE")]
    Measure,
    #[serde(rename = "ATTRIBUTE")]
    Attribute,
}

/// Normalized physical data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "INT64")]
    Int64,
    #[serde(rename = "FLOAT")]
    Float,
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "VARCHAR")]
    Varchar,
}

/// Join type emitted for every relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    #[serde(rename = "INNER")]
    Inner,
}

/// Default aggregation attached to measure worksheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregation {
    #[serde(rename = "SUM")]
    Sum,
}

/// Map a declared type token to its normalized physical type.
pub fn physical_type(declared: &str) -> DataType {
    match declared.to_lowercase().as_str() {
        "int" | "integer" | "bigint" => DataType::Int64,
        "float" | "double" | "decimal" => DataType::Float,
        "date" => DataType::Date,
        _ => DataType::Varchar,
    }
}

/// Classify a column: measures are numeric and not part of any key.
pub fn column_role(column: &Column) -> ColumnRole {
    let numeric = matches!(
        column.declared_type.to_lowercase().as_str(),
        "int" | "float" | "decimal"
    );
    if numeric && !column.is_primary_key && !column.is_foreign_key {
        ColumnRole::Measure
    } else {
        ColumnRole::Attribute
    }
}

/// Composite display name for a column: `<table> <column>`.
pub fn composite_name(table: &str, column: &str) -> String {
    format!("{} {}", table, column)
}

/// Display name for a join:
/// `<source> <source_column> - <destination> <destination_column>`.
pub fn join_name(join: &Join) -> String {
    format!(
        "{} {} - {} {}",
        join.source, join.source_column, join.destination, join.destination_column
    )
}

/// One generated document. The wrapper structs put the `table:` /
/// `worksheet:` key at the top level of the serialized output.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TmlDocument {
    Table(TableDocument),
    Worksheet(WorksheetDocument),
}

/// A table document under its top-level `table` key.
#[derive(Debug, Clone, Serialize)]
pub struct TableDocument {
    pub table: TableTml,
}

/// A worksheet document under its top-level `worksheet` key.
#[derive(Debug, Clone, Serialize)]
pub struct WorksheetDocument {
    pub worksheet: WorksheetTml,
}

/// Generate all documents for a diagram with default options.
///
/// Keys are `<table>_table` for each parsed table plus `<name>_worksheet`
/// for the single worksheet. An empty diagram yields exactly one
/// worksheet document with empty lists.
pub fn generate(diagram_text: &str, name: &str) -> BTreeMap<String, TmlDocument> {
    generate_with(diagram_text, name, &GeneratorOptions::default())
}

/// Generate all documents for a diagram with explicit options.
pub fn generate_with(
    diagram_text: &str,
    name: &str,
    options: &GeneratorOptions,
) -> BTreeMap<String, TmlDocument> {
    let diagram = parse(diagram_text);
    let graph = JoinGraph::from_joins(&diagram.joins);
    let roots = find_roots(&graph);
    let paths = find_paths(&graph, &roots);

    let mut documents = BTreeMap::new();

    for table in diagram.iter() {
        documents.insert(
            format!("{}_table", table.name),
            TmlDocument::Table(TableDocument {
                table: table_document(table, options),
            }),
        );
    }

    documents.insert(
        format!("{}_worksheet", name),
        TmlDocument::Worksheet(WorksheetDocument {
            worksheet: worksheet_document(&diagram, &paths, name, options),
        }),
    );

    documents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(declared_type: &str, pk: bool, fk: bool) -> Column {
        Column {
            name: "c".to_string(),
            declared_type: declared_type.to_string(),
            is_primary_key: pk,
            is_foreign_key: fk,
        }
    }

    #[test]
    fn test_physical_type_mapping() {
        assert_eq!(physical_type("int"), DataType::Int64);
        assert_eq!(physical_type("INTEGER"), DataType::Int64);
        assert_eq!(physical_type("bigint"), DataType::Int64);
        assert_eq!(physical_type("float"), DataType::Float);
        assert_eq!(physical_type("double"), DataType::Float);
        assert_eq!(physical_type("decimal"), DataType::Float);
        assert_eq!(physical_type("date"), DataType::Date);
        assert_eq!(physical_type("varchar"), DataType::Varchar);
        assert_eq!(physical_type("text"), DataType::Varchar);
    }

    #[test]
    fn test_column_role() {
        assert_eq!(column_role(&column("int", false, false)), ColumnRole::Measure);
        assert_eq!(column_role(&column("decimal", false, false)), ColumnRole::Measure);
        // Keys are never measures, whatever their type.
        assert_eq!(column_role(&column("int", true, false)), ColumnRole::Attribute);
        assert_eq!(column_role(&column("int", false, true)), ColumnRole::Attribute);
        // Only the short numeric tokens qualify.
        assert_eq!(column_role(&column("bigint", false, false)), ColumnRole::Attribute);
        assert_eq!(column_role(&column("varchar", false, false)), ColumnRole::Attribute);
    }

    #[test]
    fn test_object_naming() {
        let options = GeneratorOptions::default();
        assert_eq!(options.object_name("CUSTOMER"), "CUSTOMER_TML");
        assert_eq!(options.path_id("CUSTOMER", 3), "CUSTOMER_TML_3");
    }

    #[test]
    fn test_generate_keys() {
        let docs = generate("A {\nint id PK\n}\nB {\nint a_id FK\n}\n", "demo");
        let keys: Vec<_> = docs.keys().cloned().collect();
        assert!(keys.contains(&"A_table".to_string()));
        assert!(keys.contains(&"B_table".to_string()));
        assert!(keys.contains(&"demo_worksheet".to_string()));
        assert_eq!(docs.len(), 3);
    }

    #[test]
    fn test_generate_empty_diagram() {
        let docs = generate("", "empty");
        assert_eq!(docs.len(), 1);
        match &docs["empty_worksheet"] {
            TmlDocument::Worksheet(doc) => {
                let ws = &doc.worksheet;
                assert!(ws.tables.is_empty());
                assert!(ws.joins.is_empty());
                assert!(ws.table_paths.is_empty());
                assert!(ws.worksheet_columns.is_empty());
            }
            other => panic!("expected worksheet, got {:?}", other),
        }
    }
}
