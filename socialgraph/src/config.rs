use serde::{Deserialize, Serialize};

pub const DEFAULT_CLUSTERING_SAMPLE_CAP: usize = 1000;
pub const DEFAULT_SAMPLE_SIZE: usize = 500;
pub const DEFAULT_NEIGHBOR_LIST_CAP: usize = 50;
pub const DEFAULT_TOP_NODES: usize = 10;

/// Tuning knobs for the statistics and sampling calls.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Nodes (from the front of the node list) averaged for the clustering estimate. 0 = all.
    pub clustering_sample_cap: usize,
    /// Sample size used when the caller does not ask for one. 0 = the whole graph.
    pub default_sample_size: usize,
    /// Longest neighbour list returned by a node detail lookup.
    pub neighbor_list_cap: usize,
    /// Number of highest-degree nodes listed in the global statistics.
    pub top_nodes: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            clustering_sample_cap: DEFAULT_CLUSTERING_SAMPLE_CAP,
            default_sample_size: DEFAULT_SAMPLE_SIZE,
            neighbor_list_cap: DEFAULT_NEIGHBOR_LIST_CAP,
            top_nodes: DEFAULT_TOP_NODES,
        }
    }
}
