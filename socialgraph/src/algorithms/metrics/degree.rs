//! Degree calculations for the whole graph.
//!
//! The graph is treated as undirected: every edge adds one to the degree of its source and one
//! to the degree of its target, so a self-loop adds two to its node and the degrees always sum
//! to twice the number of edges. Parallel edges are counted individually.
//!
//! This module provides:
//! - [`compute_degrees`] - a pure pass from nodes and edges to a [`DegreeIndex`].
//! - [`assign_degrees`] - the same pass written back onto the nodes, resetting stale values first.
//! - [`max_degree`], [`min_degree`], [`average_degree`] over the stored node degrees.
//! - [`degree_distribution`] and [`sorted_by_degree`].
//!
//! # Examples
//!
//! ```rust
//! use socialgraph::algorithms::metrics::degree::*;
//! use socialgraph::prelude::*;
//!
//! let nodes = vec![Node::new(0), Node::new(1), Node::new(2)];
//! let edges = vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(2, 2)];
//!
//! let index = compute_degrees(&nodes, &edges);
//! assert_eq!(index.degree(0), 2);
//! assert_eq!(index.degree(2), 3);
//! assert_eq!(index.total(), 2 * edges.len());
//! ```

use crate::core::entities::{Edge, Node, NodeId};
use rustc_hash::FxHashMap;
use std::{cmp::Reverse, collections::BTreeMap};

/// Degree per node id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DegreeIndex {
    degrees: FxHashMap<NodeId, usize>,
}

impl DegreeIndex {
    pub fn get(&self, id: NodeId) -> Option<usize> {
        self.degrees.get(&id).copied()
    }

    /// Degree of `id`, zero for unknown ids.
    pub fn degree(&self, id: NodeId) -> usize {
        self.get(id).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Sum of all degrees.
    pub fn total(&self) -> usize {
        self.degrees.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.degrees.iter().map(|(id, degree)| (*id, *degree))
    }

    /// Writes the index onto `nodes`. Every node is reset first, so nodes the index does not know
    /// end up with degree zero.
    pub fn apply(&self, nodes: &mut [Node]) {
        for node in nodes.iter_mut() {
            node.degree = self.degree(node.id);
        }
    }
}

/// Counts the degree of every node in `nodes` from `edges`.
///
/// Runs in O(N + E). Endpoints that are not in `nodes` are ignored.
pub fn compute_degrees(nodes: &[Node], edges: &[Edge]) -> DegreeIndex {
    let mut degrees: FxHashMap<NodeId, usize> = FxHashMap::default();
    degrees.reserve(nodes.len());
    for node in nodes {
        degrees.insert(node.id, 0);
    }
    for edge in edges {
        for id in [edge.source, edge.target] {
            if let Some(degree) = degrees.get_mut(&id) {
                *degree += 1;
            }
        }
    }
    DegreeIndex { degrees }
}

/// Recomputes the degree field of every node from `edges`. Idempotent.
pub fn assign_degrees(nodes: &mut [Node], edges: &[Edge]) -> DegreeIndex {
    let index = compute_degrees(nodes, edges);
    index.apply(nodes);
    index
}

/// The maximum degree of any node, 0 for an empty graph
pub fn max_degree(nodes: &[Node]) -> usize {
    nodes.iter().map(|n| n.degree).max().unwrap_or(0)
}

/// The minimum degree of any node, 0 for an empty graph
pub fn min_degree(nodes: &[Node]) -> usize {
    nodes.iter().map(|n| n.degree).min().unwrap_or(0)
}

/// The average degree of all nodes, 0 for an empty graph
pub fn average_degree(nodes: &[Node]) -> f64 {
    let (deg_sum, count) = nodes
        .iter()
        .fold((0usize, 0usize), |(deg_sum, count), node| {
            (deg_sum + node.degree, count + 1)
        });
    if count == 0 {
        0.0
    } else {
        deg_sum as f64 / count as f64
    }
}

/// Number of nodes per degree value.
pub fn degree_distribution(nodes: &[Node]) -> BTreeMap<usize, usize> {
    let mut distribution = BTreeMap::new();
    for node in nodes {
        *distribution.entry(node.degree).or_insert(0) += 1;
    }
    distribution
}

/// Nodes ordered by degree, highest first. Ties keep their original order.
pub fn sorted_by_degree(nodes: &[Node]) -> Vec<&Node> {
    let mut sorted: Vec<&Node> = nodes.iter().collect();
    sorted.sort_by_key(|node| Reverse(node.degree));
    sorted
}
