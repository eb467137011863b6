//! Whitespace separated edge lists, e.g. the SNAP `facebook_combined.txt` dump.
//!
//! Each data line is `source target [weight]`. Anything after the weight is ignored.

use crate::{
    core::{
        entities::{Edge, NodeId},
        utils::errors::GraphResult,
    },
    graph_loader::{data_lines, GraphBuilder, GraphFormat, ParsedGraph},
};

pub fn parse_edge_list(raw: &str) -> GraphResult<ParsedGraph> {
    let mut builder = GraphBuilder::new();
    for (index, line) in data_lines(raw).enumerate() {
        let record = index + 1;
        let mut parts = line.split_whitespace();
        let (Some(source), Some(target)) = (parts.next(), parts.next()) else {
            builder.skip(record, line, "not enough columns");
            continue;
        };
        let (Ok(source), Ok(target)) = (source.parse::<NodeId>(), target.parse::<NodeId>())
        else {
            builder.skip(record, line, "ids are not integers");
            continue;
        };
        let value = parts.next().and_then(|w| w.parse::<f64>().ok());
        builder.add_edge(Edge::with_value(source, target, value));
    }
    builder.finish(GraphFormat::EdgeList)
}
