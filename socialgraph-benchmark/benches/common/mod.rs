#![allow(dead_code)]

use criterion::{measurement::WallTime, BenchmarkGroup, BenchmarkId, Bencher};
use rand::{rngs::StdRng, Rng, SeedableRng};
use socialgraph::prelude::*;
use tracing::info;

/// Random edge list over `num_nodes` ids with a handful of heavy hubs, as text.
pub fn social_edge_list(num_nodes: i64, num_edges: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let hubs = (num_nodes / 100).max(1);
    let mut out = String::with_capacity(num_edges * 12);
    for _ in 0..num_edges {
        let source = if rng.gen_bool(0.3) {
            rng.gen_range(0..hubs)
        } else {
            rng.gen_range(0..num_nodes)
        };
        let target = rng.gen_range(0..num_nodes);
        out.push_str(&format!("{source} {target}\n"));
    }
    out
}

pub fn bootstrap_graph(num_nodes: i64, num_edges: usize) -> GraphSnapshot {
    let raw = social_edge_list(num_nodes, num_edges, 42);
    let graph = GraphSnapshot::load(raw.as_bytes(), GraphFormat::EdgeList)
        .expect("generated edge list should parse");
    info!(
        "Bootstrapped graph with {} nodes and {} edges",
        graph.num_nodes(),
        graph.num_edges()
    );
    graph
}

pub fn bench<F>(
    group: &mut BenchmarkGroup<WallTime>,
    name: &str,
    parameter: Option<usize>,
    mut task: F,
) where
    F: FnMut(&mut Bencher<'_, WallTime>),
{
    match parameter {
        Some(parameter) => group.bench_with_input(
            BenchmarkId::new(name, parameter),
            &parameter,
            |b: &mut Bencher, _| task(b),
        ),
        None => group.bench_function(name, task),
    };
}
