#![allow(dead_code)]
use proptest::prelude::*;
use socialgraph::prelude::*;
use std::collections::BTreeSet;

pub fn build_edge_list(len: usize, num_nodes: i64) -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((0..num_nodes, 0..num_nodes), 0..=len)
}

/// Edge lists without self loops or repeated pairs (in either direction).
pub fn build_simple_edge_list(
    len: usize,
    num_nodes: i64,
) -> impl Strategy<Value = Vec<(i64, i64)>> {
    build_edge_list(len, num_nodes).prop_map(|edges| {
        let mut seen = BTreeSet::new();
        edges
            .into_iter()
            .filter(|(src, dst)| src != dst && seen.insert((*src.min(dst), *src.max(dst))))
            .collect()
    })
}

pub fn edge_list_text(edges: &[(i64, i64)]) -> String {
    edges
        .iter()
        .map(|(src, dst)| format!("{src} {dst}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_snapshot(edges: &[(i64, i64)]) -> GraphSnapshot {
    let mut ids = BTreeSet::new();
    for (src, dst) in edges {
        ids.insert(*src);
        ids.insert(*dst);
    }
    let nodes = ids.into_iter().map(Node::new).collect();
    let edges = edges.iter().map(|(src, dst)| Edge::new(*src, *dst)).collect();
    GraphSnapshot::new(nodes, edges).unwrap()
}
