use pretty_assertions::assert_eq;
use proptest::proptest;
use socialgraph::{
    graph_loader::{parse, parse_file},
    prelude::*,
};
use std::{collections::BTreeMap, fs};
use test_utils::{build_edge_list, edge_list_text};

pub mod test_utils;

fn degrees(graph: &GraphSnapshot) -> BTreeMap<NodeId, usize> {
    graph.nodes().iter().map(|n| (n.id, n.degree)).collect()
}

#[test]
fn edge_list_with_comments() {
    let graph =
        GraphSnapshot::load(b"0 1\n0 2\n1 2\n# comment\n\n3 4", GraphFormat::EdgeList).unwrap();
    assert_eq!(graph.num_nodes(), 5);
    assert_eq!(graph.num_edges(), 4);
    assert_eq!(
        degrees(&graph),
        BTreeMap::from([(0, 2), (1, 2), (2, 2), (3, 1), (4, 1)])
    );
    assert_eq!(graph.local_clustering(0).unwrap(), 1.0);
    assert_eq!(graph.local_clustering(3).unwrap(), 0.0);
    assert_eq!(graph.load_report().errors, 0);
}

#[test]
fn csv_with_header() {
    let graph = GraphSnapshot::load(b"source,target\n10,20\n10,30", GraphFormat::Csv).unwrap();
    assert_eq!(degrees(&graph), BTreeMap::from([(10, 2), (20, 1), (30, 1)]));
    assert_eq!(graph.global_stats().density, 2.0 / 3.0);
}

#[test]
fn csv_without_endpoint_columns_is_rejected() {
    let err = GraphSnapshot::load(b"from_user,to_user\n1,2", GraphFormat::Csv).unwrap_err();
    assert!(matches!(err, GraphError::Validation(_)));
}

#[test]
fn malformed_lines_are_counted_not_fatal() {
    let parsed = parse("0 1\nabc xyz\n1 2\n2 0", GraphFormat::EdgeList).unwrap();
    assert_eq!(parsed.report.errors, 1);
    assert_eq!(parsed.report.accepted, 3);
    assert_eq!(parsed.edges.len(), 3);
    assert_eq!(parsed.report.success_rate(), 75.0);
}

#[test]
fn nothing_usable_is_a_parse_error() {
    let err = GraphSnapshot::load(b"abc xyz\n# only junk", GraphFormat::EdgeList).unwrap_err();
    assert!(matches!(err, GraphError::Parse(_)));
}

#[test]
fn json_formats_normalize_to_the_same_graph() {
    let nodes_links = r#"{
        "nodes": [{"id": 1, "name": "Ada"}, {"id": 2}, {"id": 3, "group": 5}],
        "links": [{"source": 1, "target": 2}, {"source": {"id": 2}, "target": 3, "value": 2.0}]
    }"#;
    let vertices_edges = r#"{
        "vertices": [{"id": 1, "label": "Ada"}, {"id": 2}, {"id": 3, "community": 5}],
        "edges": [{"src": 1, "dst": 2}, {"source": 2, "target": 3, "weight": 2.0}]
    }"#;
    let a = GraphSnapshot::load(nodes_links.as_bytes(), GraphFormat::JsonNodesLinks).unwrap();
    let b = GraphSnapshot::load(vertices_edges.as_bytes(), GraphFormat::JsonVerticesEdges)
        .unwrap();
    assert_eq!(a.nodes(), b.nodes());
    assert_eq!(a.edges(), b.edges());
    assert_eq!(a.node(1).unwrap().name, "Ada");
    assert_eq!(a.node(2).unwrap().name, "User 2");
    assert_eq!(a.node(3).unwrap().group, 5);
    assert_eq!(a.edges()[0].value, 1.0);
    assert_eq!(a.edges()[1].value, 2.0);
}

#[test]
fn saved_snapshot_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("facebook_combined.txt");
    fs::write(&input, "0 1\n0 2\n1 2\n3 4\n").unwrap();

    let graph = GraphSnapshot::load_from_path(&input, GraphFormat::EdgeList).unwrap();
    let output = dir.path().join("graph_data.json");
    graph.save_to_file(&output).unwrap();

    let reloaded = GraphSnapshot::load_from_file(&output).unwrap();
    assert_eq!(reloaded.nodes(), graph.nodes());
    assert_eq!(reloaded.edges(), graph.edges());

    let parsed = parse_file(&output, GraphFormat::JsonNodesLinks).unwrap();
    assert_eq!(parsed.report.errors, 0);
    assert_eq!(parsed.edges.len(), 4);
}

#[test]
fn degree_sum_is_twice_the_edge_count() {
    proptest!(|(edges in build_edge_list(100, 30))| {
        let raw = edge_list_text(&edges);
        match GraphSnapshot::load(raw.as_bytes(), GraphFormat::EdgeList) {
            Ok(graph) => {
                let total: usize = graph.nodes().iter().map(|n| n.degree).sum();
                assert_eq!(total, 2 * graph.num_edges());
                assert_eq!(graph.num_edges(), edges.len());
            }
            Err(err) => {
                assert!(edges.is_empty());
                assert!(matches!(err, GraphError::Parse(_)));
            }
        }
    });
}
