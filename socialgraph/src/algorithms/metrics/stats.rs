//! Global graph statistics: degree extrema, density, community breakdown and the clustering
//! estimate.
//!
//! None of these fail. An empty graph produces zeroed statistics.

use crate::{
    algorithms::metrics::{
        clustering_coefficient::{average_clustering, Adjacency, ClusteringEstimate},
        degree::{
            average_degree, degree_distribution, max_degree, min_degree, sorted_by_degree,
        },
    },
    config::AnalyticsConfig,
    core::entities::{Edge, Node},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityStats {
    pub count: usize,
    pub total_degree: usize,
    pub avg_degree: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub max_degree: usize,
    pub min_degree: usize,
    pub avg_degree: f64,
    pub density: f64,
    /// Averaged over a prefix of the node list only, see [`ClusteringEstimate`].
    pub avg_clustering: ClusteringEstimate,
    pub community_distribution: BTreeMap<u32, CommunityStats>,
    pub degree_distribution: BTreeMap<usize, usize>,
    pub top_nodes: Vec<Node>,
}

/// Edges over the number of node pairs of a simple undirected graph. 0 below two nodes.
///
/// Multigraphs can score above 1.
pub fn density(num_nodes: usize, num_edges: usize) -> f64 {
    if num_nodes < 2 {
        return 0.0;
    }
    let n = num_nodes as f64;
    let possible_edges = n * (n - 1.0) / 2.0;
    num_edges as f64 / possible_edges
}

/// Node count and degree totals per community tag.
pub fn community_stats(nodes: &[Node]) -> BTreeMap<u32, CommunityStats> {
    let mut communities: BTreeMap<u32, CommunityStats> = BTreeMap::new();
    for node in nodes {
        let stats = communities.entry(node.group).or_default();
        stats.count += 1;
        stats.total_degree += node.degree;
    }
    for stats in communities.values_mut() {
        stats.avg_degree = stats.total_degree as f64 / stats.count as f64;
    }
    communities
}

/// Aggregates the global statistics of a graph whose node degrees are already up to date.
pub fn aggregate_with_adjacency(
    nodes: &[Node],
    edges: &[Edge],
    adjacency: &Adjacency,
    config: &AnalyticsConfig,
) -> GlobalStats {
    GlobalStats {
        total_nodes: nodes.len(),
        total_edges: edges.len(),
        max_degree: max_degree(nodes),
        min_degree: min_degree(nodes),
        avg_degree: average_degree(nodes),
        density: density(nodes.len(), edges.len()),
        avg_clustering: average_clustering(nodes, adjacency, config.clustering_sample_cap),
        community_distribution: community_stats(nodes),
        degree_distribution: degree_distribution(nodes),
        top_nodes: sorted_by_degree(nodes)
            .into_iter()
            .take(config.top_nodes)
            .cloned()
            .collect(),
    }
}

/// Same as [`aggregate_with_adjacency`], building the adjacency from `edges`.
pub fn aggregate(nodes: &[Node], edges: &[Edge], config: &AnalyticsConfig) -> GlobalStats {
    aggregate_with_adjacency(nodes, edges, &Adjacency::from_edges(edges), config)
}
