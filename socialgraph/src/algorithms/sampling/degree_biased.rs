//! Degree-biased node sampling with induced edges.
//!
//! Picks a bounded subset of nodes for display: the `ceil(target / 2)` highest-degree nodes are
//! always kept so hubs stay visible, and the rest of the budget is drawn uniformly at random
//! (without replacement) from the remaining nodes. Only edges with both endpoints in the chosen
//! subset are returned.
//!
//! The random draw is not seeded, so two calls with the same arguments can return different
//! nodes. Use [`degree_biased_sample_with_rng`] to supply a deterministic generator.
//!
//! # Examples
//!
//! ```rust
//! use socialgraph::algorithms::sampling::degree_biased::degree_biased_sample;
//! use socialgraph::prelude::*;
//!
//! let nodes: Vec<Node> = (0..10).map(Node::new).collect();
//! let edges: Vec<Edge> = (1..10).map(|i| Edge::new(0, i)).collect();
//! let degrees = compute_degrees(&nodes, &edges);
//!
//! let sample = degree_biased_sample(&nodes, &edges, &degrees, 4);
//! assert_eq!(sample.nodes.len(), 4);
//! assert_eq!(sample.nodes[0].id, 0);
//! assert_eq!(sample.edges.len(), 3);
//! ```

use crate::{
    algorithms::metrics::degree::DegreeIndex,
    core::entities::{Edge, Node, NodeId},
};
use rand::{seq::SliceRandom, Rng};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Size of the graph the sample was drawn from.
    pub total_nodes: usize,
    pub total_edges: usize,
}

impl SampleResult {
    /// `true` when nothing was left out.
    pub fn is_full(&self) -> bool {
        self.nodes.len() == self.total_nodes && self.edges.len() == self.total_edges
    }
}

/// The edges of `edges` with both endpoints in `selected`, in their original order.
pub fn induced_edges(edges: &[Edge], selected: &FxHashSet<NodeId>) -> Vec<Edge> {
    edges
        .iter()
        .filter(|e| selected.contains(&e.source) && selected.contains(&e.target))
        .cloned()
        .collect()
}

/// Degree-biased sample of at most `target_size` nodes using the thread-local generator.
///
/// Hubs are ranked by `degrees`, the `degree` field of `nodes` is not consulted. A `target_size`
/// of 0, or one at least as large as the graph, returns the whole graph.
pub fn degree_biased_sample(
    nodes: &[Node],
    edges: &[Edge],
    degrees: &DegreeIndex,
    target_size: usize,
) -> SampleResult {
    degree_biased_sample_with_rng(nodes, edges, degrees, target_size, &mut rand::thread_rng())
}

/// Degree-biased sample drawing the non-hub nodes from `rng`.
pub fn degree_biased_sample_with_rng<R: Rng + ?Sized>(
    nodes: &[Node],
    edges: &[Edge],
    degrees: &DegreeIndex,
    target_size: usize,
    rng: &mut R,
) -> SampleResult {
    let total_nodes = nodes.len();
    let total_edges = edges.len();
    if target_size == 0 || target_size >= total_nodes {
        return SampleResult {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
            total_nodes,
            total_edges,
        };
    }

    let mut sorted: Vec<&Node> = nodes.iter().collect();
    sorted.sort_by_key(|node| Reverse(degrees.degree(node.id)));
    let (hubs, rest) = sorted.split_at(target_size.div_ceil(2));
    let fill = target_size - hubs.len();

    let mut sampled: Vec<Node> = Vec::with_capacity(target_size);
    sampled.extend(hubs.iter().map(|node| (*node).clone()));
    sampled.extend(rest.choose_multiple(rng, fill).map(|node| (*node).clone()));

    let selected: FxHashSet<NodeId> = sampled.iter().map(|node| node.id).collect();
    let edges = induced_edges(edges, &selected);
    debug!(
        "Sampled {} of {total_nodes} nodes ({} hubs) and {} of {total_edges} edges",
        sampled.len(),
        hubs.len(),
        edges.len()
    );
    SampleResult {
        nodes: sampled,
        edges,
        total_nodes,
        total_edges,
    }
}
