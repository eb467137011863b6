//! An immutable, fully indexed graph as served to readers.
//!
//! A [`GraphSnapshot`] is built once per load. Degrees are recomputed from the edges during
//! construction and never touched again; every query borrows the snapshot read-only, so a
//! snapshot can be shared behind an `Arc` by any number of concurrent readers. Replacing the
//! graph means building a new snapshot (see [`GraphStore`](crate::db::graph::store::GraphStore)).

use crate::{
    algorithms::{
        metrics::{
            clustering_coefficient::{local_clustering, Adjacency},
            degree::{assign_degrees, DegreeIndex},
            stats::{aggregate_with_adjacency, community_stats, CommunityStats, GlobalStats},
        },
        sampling::degree_biased::{
            degree_biased_sample, degree_biased_sample_with_rng, SampleResult,
        },
    },
    config::AnalyticsConfig,
    core::{
        entities::{Edge, Node, NodeId},
        utils::errors::{GraphError, GraphResult},
    },
    graph_loader::{parse_bytes, parse_file, GraphFormat, LoadReport, ParsedGraph},
};
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

/// Everything a client needs to show one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDetail {
    pub id: NodeId,
    pub name: String,
    pub group: u32,
    pub degree: usize,
    /// One entry per incident edge in edge order, cut at the configured neighbour cap.
    pub neighbors: Vec<NodeId>,
    pub total_neighbor_count: usize,
    pub local_clustering: f64,
}

/// On-disk layout of a persisted snapshot, readable back as `json-nodes-links`.
#[derive(Serialize)]
struct PersistedGraph<'a> {
    nodes: &'a [Node],
    links: &'a [Edge],
}

#[derive(Clone, Debug)]
pub struct GraphSnapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    positions: FxHashMap<NodeId, usize>,
    degrees: DegreeIndex,
    adjacency: Adjacency,
    report: LoadReport,
    config: AnalyticsConfig,
}

impl GraphSnapshot {
    /// Builds a snapshot from already validated parts.
    fn build(mut nodes: Vec<Node>, edges: Vec<Edge>, report: LoadReport) -> Self {
        let degrees = assign_degrees(&mut nodes, &edges);
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(pos, node)| (node.id, pos))
            .collect();
        let adjacency = Adjacency::from_edges(&edges);
        Self {
            nodes,
            edges,
            positions,
            degrees,
            adjacency,
            report,
            config: AnalyticsConfig::default(),
        }
    }

    /// Builds a snapshot from a node and an edge collection. Supplied degrees are discarded.
    ///
    /// Fails if two nodes share an id or an edge references a node that is not in `nodes`.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> GraphResult<Self> {
        let mut ids: FxHashSet<NodeId> = FxHashSet::default();
        for node in &nodes {
            if !ids.insert(node.id) {
                return Err(GraphError::Validation(format!(
                    "node {} is declared more than once",
                    node.id
                )));
            }
        }
        if let Some(edge) = edges
            .iter()
            .find(|e| !ids.contains(&e.source) || !ids.contains(&e.target))
        {
            return Err(GraphError::Validation(format!(
                "edge {} -> {} references a missing node",
                edge.source, edge.target
            )));
        }
        let report = LoadReport {
            data_lines: edges.len(),
            accepted: edges.len(),
            errors: 0,
        };
        Ok(Self::build(nodes, edges, report))
    }

    /// Parses raw input and builds a snapshot from it.
    pub fn load(raw: &[u8], format: GraphFormat) -> GraphResult<Self> {
        Ok(parse_bytes(raw, format)?.into())
    }

    /// Reads, parses and indexes a file (`.gz` files are decompressed).
    pub fn load_from_path<P: AsRef<Path>>(path: P, format: GraphFormat) -> GraphResult<Self> {
        let path = path.as_ref();
        let snapshot: Self = parse_file(path, format)?.into();
        info!(
            "Loaded graph from {}: {} nodes, {} edges",
            path.display(),
            snapshot.num_nodes(),
            snapshot.num_edges()
        );
        Ok(snapshot)
    }

    /// Reads a snapshot written by [`GraphSnapshot::save_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GraphResult<Self> {
        Self::load_from_path(path, GraphFormat::JsonNodesLinks)
    }

    /// Writes the nodes and edges as a `json-nodes-links` document.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GraphResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(
            &mut writer,
            &PersistedGraph {
                nodes: &self.nodes,
                links: &self.edges,
            },
        )?;
        writer.flush()?;
        Ok(())
    }

    pub fn with_config(mut self, config: AnalyticsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Nodes in first-seen order with up to date degrees.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn degrees(&self) -> &DegreeIndex {
        &self.degrees
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.positions.get(&id).map(|pos| &self.nodes[*pos])
    }

    /// Clustering coefficient of a single node.
    pub fn local_clustering(&self, id: NodeId) -> GraphResult<f64> {
        if !self.has_node(id) {
            return Err(GraphError::NodeNotFound(id));
        }
        Ok(local_clustering(&self.adjacency, id))
    }

    /// Degree, neighbours and clustering coefficient of `id`.
    pub fn node_detail(&self, id: NodeId) -> GraphResult<NodeDetail> {
        let node = self.node(id).ok_or(GraphError::NodeNotFound(id))?;
        let neighbours = self.adjacency.neighbours(id);
        Ok(NodeDetail {
            id: node.id,
            name: node.name.clone(),
            group: node.group,
            degree: node.degree,
            neighbors: neighbours
                .iter()
                .copied()
                .take(self.config.neighbor_list_cap)
                .collect(),
            total_neighbor_count: neighbours.len(),
            local_clustering: local_clustering(&self.adjacency, id),
        })
    }

    /// Degree statistics, density, clustering estimate and community breakdown.
    pub fn global_stats(&self) -> GlobalStats {
        aggregate_with_adjacency(&self.nodes, &self.edges, &self.adjacency, &self.config)
    }

    pub fn community_stats(&self) -> BTreeMap<u32, CommunityStats> {
        community_stats(&self.nodes)
    }

    /// Degree-biased sample of at most `target_size` nodes. 0 means the whole graph.
    pub fn sample(&self, target_size: usize) -> SampleResult {
        degree_biased_sample(&self.nodes, &self.edges, &self.degrees, target_size)
    }

    /// [`GraphSnapshot::sample`] with the configured default size.
    pub fn default_sample(&self) -> SampleResult {
        self.sample(self.config.default_sample_size)
    }

    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        target_size: usize,
        rng: &mut R,
    ) -> SampleResult {
        degree_biased_sample_with_rng(&self.nodes, &self.edges, &self.degrees, target_size, rng)
    }
}

impl From<ParsedGraph> for GraphSnapshot {
    fn from(parsed: ParsedGraph) -> Self {
        Self::build(parsed.nodes, parsed.edges, parsed.report)
    }
}
