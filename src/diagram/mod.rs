//! ER diagram model and parsing.
//!
//! This module provides:
//! - Data models for tables, columns, and join relationships
//! - A line classifier for the mermaid-style `erDiagram` notation
//! - A best-effort two-pass parser that never rejects input

mod line;
mod parser;

pub use line::*;
pub use parser::*;

use ahash::AHashMap;
use std::fmt;

/// Unique identifier for a table within a diagram.
///
/// Also the table's 0-indexed declaration position, which is significant:
/// worksheet table paths are numbered by 1-based declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

/// Column definition within a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (unique within its table)
    pub name: String,
    /// Declared type token from the source, e.g. "int", "varchar"
    pub declared_type: String,
    /// Whether the declaration carried the PK flag
    pub is_primary_key: bool,
    /// Whether the declaration carried the FK flag
    pub is_foreign_key: bool,
}

/// A relationship edge between two tables.
///
/// Direction is already normalized at parse time: for one-to-many
/// relationships the table owning the foreign key is stored as `source`,
/// so graph traversal always walks from the many side toward the one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Source table name (traversal origin after normalization)
    pub source: String,
    /// Destination table name
    pub destination: String,
    /// Column on the source side of the equality condition
    pub source_column: String,
    /// Column on the destination side of the equality condition
    pub destination_column: String,
    /// One-to-one cardinality; false means one-to-many
    pub is_one_to_one: bool,
}

/// A table parsed from the diagram.
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name (unique across the diagram, join-graph node id)
    pub name: String,
    /// Table ID within the diagram
    pub id: TableId,
    /// Column definitions in declaration order
    pub columns: Vec<Column>,
    /// Joins where this table is the normalized source
    pub outgoing_joins: Vec<Join>,
}

impl Table {
    /// Create a new empty table.
    pub fn new(name: String, id: TableId) -> Self {
        Self {
            name,
            id,
            columns: Vec::new(),
            outgoing_joins: Vec::new(),
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Complete parsed diagram: tables in declaration order plus the flat
/// join list (including joins whose source table was never declared).
#[derive(Debug, Default)]
pub struct Diagram {
    /// Map from table name to table ID
    index: AHashMap<String, TableId>,
    /// Tables indexed by TableId, in declaration order
    tables: Vec<Table>,
    /// All parsed joins, in declaration order
    pub joins: Vec<Join>,
}

impl Diagram {
    /// Create a new empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get table ID by name.
    pub fn get_table_id(&self, name: &str) -> Option<TableId> {
        self.index.get(name).copied()
    }

    /// Get table by ID.
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.0 as usize)
    }

    /// Get mutable table by ID.
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.get_mut(id.0 as usize)
    }

    /// Get table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.get_table_id(name).and_then(|id| self.table(id))
    }

    /// Add a new table, returning its ID. A redeclared name keeps the
    /// first declaration's slot.
    pub fn add_table(&mut self, name: String) -> TableId {
        if let Some(&id) = self.index.get(&name) {
            return id;
        }
        let id = TableId(self.tables.len() as u32);
        self.index.insert(name.clone(), id);
        self.tables.push(Table::new(name, id));
        id
    }

    /// Attach each join to its source table's outgoing list when that
    /// table exists. Joins with unknown sources stay flat-only.
    pub fn attach_joins(&mut self) {
        let joins = self.joins.clone();
        for join in joins {
            if let Some(id) = self.get_table_id(&join.source) {
                if let Some(table) = self.table_mut(id) {
                    table.outgoing_joins.push(join);
                }
            }
        }
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the diagram has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over tables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }
}
