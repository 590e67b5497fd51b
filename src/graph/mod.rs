//! Join graph construction and path resolution.
//!
//! This module provides:
//! - Directed adjacency structure built from normalized joins
//! - Root detection with a deterministic fallback for fully cyclic graphs
//! - Enumeration of all simple paths from every root to every reachable
//!   table

mod paths;

pub use paths::*;

use crate::diagram::Join;
use ahash::AHashMap;
use std::collections::BTreeSet;

/// Directed join graph over table names.
///
/// One-to-one joins are traversable in both directions; one-to-many
/// joins only from the normalized source (the many side) toward the
/// destination. Ephemeral: rebuilt per invocation, never persisted.
#[derive(Debug, Default)]
pub struct JoinGraph {
    adjacency: AHashMap<String, Vec<(String, Join)>>,
    /// Participating table names. Ordered so that root selection and the
    /// cyclic-graph fallback are deterministic across runs.
    nodes: BTreeSet<String>,
}

impl JoinGraph {
    /// Build the graph from a join sequence.
    pub fn from_joins(joins: &[Join]) -> Self {
        let mut graph = Self::default();

        for join in joins {
            graph.nodes.insert(join.source.clone());
            graph.nodes.insert(join.destination.clone());

            graph.add_edge(&join.source, &join.destination, join);
            if join.is_one_to_one {
                graph.add_edge(&join.destination, &join.source, join);
            }
        }

        graph
    }

    fn add_edge(&mut self, from: &str, to: &str, join: &Join) {
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push((to.to_string(), join.clone()));
    }

    /// Neighbors of a node with the join connecting them, in edge
    /// insertion order.
    pub fn neighbors(&self, node: &str) -> &[(String, Join)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All participating table names, lexicographically ordered.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Number of participating tables.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges (a one-to-one join counts twice).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
