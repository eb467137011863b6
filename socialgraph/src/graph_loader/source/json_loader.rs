//! Already structured graph documents.
//!
//! Two shapes are understood, each with its own normalisation into [`Node`]/[`Edge`]:
//!
//! - [`NodesLinksDocument`]: the d3 style `{"nodes": [..], "links": [..]}`, which is also the
//!   layout persisted snapshots are written in.
//! - [`VerticesEdgesDocument`]: `{"vertices": [..], "edges": [..]}` with labels, communities and
//!   weights.
//!
//! Edge endpoints may be plain ids or node objects (`{"id": 3, ..}`), as produced by layout
//! engines that resolve links in place; both are reduced to the id. Supplied degrees are
//! ignored, degree is always recomputed from the edges. Edges pointing at undeclared nodes are
//! skipped and counted as errors.

use crate::{
    core::{
        entities::{default_group, default_name, Edge, Node, NodeId},
        utils::errors::{GraphError, GraphResult},
    },
    graph_loader::{GraphBuilder, GraphFormat, ParsedGraph},
};
use serde::Deserialize;

/// An edge endpoint as found in the wild: either the id itself or the resolved node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Id(NodeId),
    Node { id: NodeId },
}

impl Endpoint {
    pub fn id(&self) -> NodeId {
        match self {
            Endpoint::Id(id) | Endpoint::Node { id } => *id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct JsonNode {
    pub id: NodeId,
    pub name: Option<String>,
    pub group: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct JsonLink {
    pub source: Endpoint,
    pub target: Endpoint,
    pub value: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodesLinksDocument {
    pub nodes: Option<Vec<JsonNode>>,
    #[serde(default)]
    pub links: Vec<JsonLink>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct JsonVertex {
    pub id: NodeId,
    #[serde(alias = "name")]
    pub label: Option<String>,
    #[serde(alias = "group")]
    pub community: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct JsonVertexEdge {
    #[serde(alias = "src", alias = "from")]
    pub source: Endpoint,
    #[serde(alias = "dst", alias = "to")]
    pub target: Endpoint,
    #[serde(alias = "value")]
    pub weight: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VerticesEdgesDocument {
    pub vertices: Option<Vec<JsonVertex>>,
    #[serde(default)]
    pub edges: Vec<JsonVertexEdge>,
}

/// A decoded structured document, tagged by the shape it was read as.
#[derive(Clone, Debug)]
pub enum StructuredGraph {
    NodesLinks(NodesLinksDocument),
    VerticesEdges(VerticesEdgesDocument),
}

impl StructuredGraph {
    /// Decodes `raw` as the shape named by `format`.
    pub fn from_json(raw: &str, format: GraphFormat) -> GraphResult<Self> {
        match format {
            GraphFormat::JsonNodesLinks => Ok(Self::NodesLinks(serde_json::from_str(raw)?)),
            GraphFormat::JsonVerticesEdges => Ok(Self::VerticesEdges(serde_json::from_str(raw)?)),
            other => Err(GraphError::Validation(format!(
                "{other} is not a structured JSON format"
            ))),
        }
    }

    pub fn format(&self) -> GraphFormat {
        match self {
            StructuredGraph::NodesLinks(_) => GraphFormat::JsonNodesLinks,
            StructuredGraph::VerticesEdges(_) => GraphFormat::JsonVerticesEdges,
        }
    }

    /// Converts the document into the canonical node and edge shape.
    pub fn normalize(self) -> GraphResult<ParsedGraph> {
        let format = self.format();
        let mut builder = GraphBuilder::new();
        match self {
            StructuredGraph::NodesLinks(doc) => {
                let nodes = doc.nodes.ok_or_else(|| {
                    GraphError::Validation("document has no 'nodes' array".to_string())
                })?;
                for node in nodes {
                    builder.declare_node(Node {
                        id: node.id,
                        name: node.name.unwrap_or_else(|| default_name(node.id)),
                        group: node.group.unwrap_or_else(|| default_group(node.id)),
                        degree: 0,
                    });
                }
                for (index, link) in doc.links.into_iter().enumerate() {
                    add_declared_edge(
                        &mut builder,
                        index + 1,
                        link.source,
                        link.target,
                        link.value,
                    );
                }
            }
            StructuredGraph::VerticesEdges(doc) => {
                let vertices = doc.vertices.ok_or_else(|| {
                    GraphError::Validation("document has no 'vertices' array".to_string())
                })?;
                for vertex in vertices {
                    builder.declare_node(Node {
                        id: vertex.id,
                        name: vertex.label.unwrap_or_else(|| default_name(vertex.id)),
                        group: vertex.community.unwrap_or_else(|| default_group(vertex.id)),
                        degree: 0,
                    });
                }
                for (index, edge) in doc.edges.into_iter().enumerate() {
                    add_declared_edge(
                        &mut builder,
                        index + 1,
                        edge.source,
                        edge.target,
                        edge.weight,
                    );
                }
            }
        }
        builder.finish(format)
    }
}

fn add_declared_edge(
    builder: &mut GraphBuilder,
    record: usize,
    source: Endpoint,
    target: Endpoint,
    value: Option<f64>,
) {
    let (source, target) = (source.id(), target.id());
    if builder.contains_node(source) && builder.contains_node(target) {
        builder.push_edge(Edge::with_value(source, target, value));
    } else {
        builder.skip(
            record,
            &format!("{source} -> {target}"),
            "endpoint is not a declared node",
        );
    }
}

#[cfg(test)]
mod json_loader_test {
    use super::*;
    use crate::graph_loader::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn nodes_links_with_defaults() {
        let raw = r#"{
            "nodes": [{"id": 1, "name": "alice", "group": 4, "degree": 99}, {"id": 2}],
            "links": [{"source": 1, "target": 2}]
        }"#;
        let parsed = parse(raw, GraphFormat::JsonNodesLinks).unwrap();
        assert_eq!(
            parsed.nodes,
            vec![Node::new(1).with_name("alice").with_group(4), Node::new(2)]
        );
        assert_eq!(parsed.edges, vec![Edge::new(1, 2)]);
    }

    #[test]
    fn resolved_endpoints_are_reduced_to_ids() {
        let raw = r#"{
            "nodes": [{"id": 1}, {"id": 2}],
            "links": [{"source": {"id": 1, "x": 0.5, "y": 1.5}, "target": 2, "value": 3}]
        }"#;
        let parsed = parse(raw, GraphFormat::JsonNodesLinks).unwrap();
        assert_eq!(parsed.edges, vec![Edge::with_value(1, 2, Some(3.0))]);
    }

    #[test]
    fn dangling_links_are_skipped() {
        let raw = r#"{"nodes": [{"id": 1}, {"id": 2}],
                      "links": [{"source": 1, "target": 2}, {"source": 1, "target": 9}]}"#;
        let parsed = parse(raw, GraphFormat::JsonNodesLinks).unwrap();
        assert_eq!(parsed.nodes.len(), 2);
        assert_eq!(parsed.edges.len(), 1);
        assert_eq!(parsed.report.errors, 1);
        assert_eq!(parsed.report.success_rate(), 50.0);
    }

    #[test]
    fn isolated_nodes_are_valid() {
        let parsed = parse(r#"{"nodes": [{"id": 3}]}"#, GraphFormat::JsonNodesLinks).unwrap();
        assert_eq!(parsed.nodes.len(), 1);
        assert!(parsed.edges.is_empty());
    }

    #[test]
    fn vertices_edges_with_aliases() {
        let raw = r#"{
            "vertices": [
                {"id": 10, "label": "hub", "community": 2},
                {"id": 11, "name": "leaf"},
                {"id": 12}
            ],
            "edges": [
                {"source": 10, "target": 11, "weight": 0.5},
                {"src": 10, "dst": 12},
                {"from": 11, "to": 12, "value": 4}
            ]
        }"#;
        let parsed = parse(raw, GraphFormat::JsonVerticesEdges).unwrap();
        assert_eq!(
            parsed.nodes,
            vec![
                Node::new(10).with_name("hub").with_group(2),
                Node::new(11).with_name("leaf"),
                Node::new(12)
            ]
        );
        assert_eq!(
            parsed.edges,
            vec![
                Edge::with_value(10, 11, Some(0.5)),
                Edge::new(10, 12),
                Edge::with_value(11, 12, Some(4.0))
            ]
        );
    }

    #[test]
    fn missing_node_array_fails_validation() {
        let err = parse(r#"{"links": []}"#, GraphFormat::JsonNodesLinks).unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
        let err = parse(r#"{"edges": []}"#, GraphFormat::JsonVerticesEdges).unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
    }

    #[test]
    fn empty_node_array_is_a_parse_error() {
        let err = parse(r#"{"nodes": [], "links": []}"#, GraphFormat::JsonNodesLinks).unwrap_err();
        assert!(matches!(err, GraphError::Parse(_)));
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let err = parse("{not json", GraphFormat::JsonNodesLinks).unwrap_err();
        assert!(matches!(err, GraphError::JsonError { .. }));
        assert!(err.is_input_error());
    }
}
