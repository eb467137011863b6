//! Local clustering coefficient - the fraction of a node's neighbour pairs that are themselves
//! connected.
//!
//! The graph is treated as undirected. A node's neighbours are the distinct ids it shares an
//! edge with in either direction, not counting itself. Connections between neighbours are
//! counted per edge record, so parallel edges between two neighbours are counted more than once
//! and can push the coefficient above 1 on multigraphs.
//!
//! All lookups go through an [`Adjacency`] built once from the edge list, which keeps a single
//! node at O(k * average degree) instead of rescanning the edges for every neighbour.
//!
//! # Examples
//!
//! ```rust
//! use socialgraph::algorithms::metrics::clustering_coefficient::*;
//! use socialgraph::prelude::*;
//!
//! let edges = vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 2), Edge::new(3, 4)];
//! let adjacency = Adjacency::from_edges(&edges);
//!
//! assert_eq!(local_clustering(&adjacency, 0), 1.0);
//! assert_eq!(local_clustering(&adjacency, 3), 0.0);
//! ```

use crate::core::entities::{Edge, Node, NodeId};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Neighbour lists per node id, one entry per incident edge record.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    neighbours: FxHashMap<NodeId, Vec<NodeId>>,
}

impl Adjacency {
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut neighbours: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
        for edge in edges {
            neighbours.entry(edge.source).or_default().push(edge.target);
            if !edge.is_self_loop() {
                neighbours.entry(edge.target).or_default().push(edge.source);
            }
        }
        Self { neighbours }
    }

    /// Neighbour ids of `id` in edge order, repeated once per parallel edge.
    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        self.neighbours.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct neighbours of `id`, excluding `id` itself.
    pub fn neighbour_set(&self, id: NodeId) -> FxHashSet<NodeId> {
        self.neighbours(id)
            .iter()
            .copied()
            .filter(|n| *n != id)
            .collect()
    }
}

/// Clustering coefficient of `id`. Nodes with fewer than two neighbours (including unknown ids)
/// score 0.
pub fn local_clustering(adjacency: &Adjacency, id: NodeId) -> f64 {
    let nbors = adjacency.neighbour_set(id);
    let k = nbors.len();
    if k < 2 {
        return 0.0;
    }

    // every edge between two neighbours is seen once from each end
    let links: usize = nbors
        .iter()
        .map(|v| {
            adjacency
                .neighbours(*v)
                .iter()
                .filter(|w| *w != v && nbors.contains(*w))
                .count()
        })
        .sum();
    let triangles = links as f64 / 2.0;
    let possible_triangles = (k * (k - 1)) as f64 / 2.0;
    if possible_triangles == 0.0 {
        0.0
    } else {
        triangles / possible_triangles
    }
}

/// Clustering coefficient of `id` straight from an edge list. Builds a fresh [`Adjacency`], so
/// prefer [`local_clustering`] when scoring more than one node.
pub fn local_clustering_coefficient(edges: &[Edge], id: NodeId) -> f64 {
    local_clustering(&Adjacency::from_edges(edges), id)
}

/// Mean clustering coefficient over a prefix of the node list.
///
/// This is an estimate: only the first `sampled_nodes` nodes (in stored order, not at random)
/// contribute, and `approximate` is set whenever that is fewer than `total_nodes`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusteringEstimate {
    pub value: f64,
    pub sampled_nodes: usize,
    pub total_nodes: usize,
    pub approximate: bool,
}

/// Averages [`local_clustering`] over the first `sample_cap` nodes. A cap of 0 means every node.
pub fn average_clustering(
    nodes: &[Node],
    adjacency: &Adjacency,
    sample_cap: usize,
) -> ClusteringEstimate {
    let sampled = if sample_cap == 0 {
        nodes.len()
    } else {
        sample_cap.min(nodes.len())
    };
    // sequential sum in node order, reproducible across thread schedules
    let values: Vec<f64> = nodes[..sampled]
        .par_iter()
        .map(|node| local_clustering(adjacency, node.id))
        .collect();
    let total: f64 = values.iter().sum();
    ClusteringEstimate {
        value: if sampled == 0 {
            0.0
        } else {
            total / sampled as f64
        },
        sampled_nodes: sampled,
        total_nodes: nodes.len(),
        approximate: sampled < nodes.len(),
    }
}
