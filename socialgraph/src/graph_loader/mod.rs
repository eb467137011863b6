//! Turns raw input into a validated node/edge collection.
//!
//! Four input formats are supported, selected by the caller through a [`GraphFormat`] hint:
//!
//! - `edge-list`: one `source target [weight]` record per line, whitespace separated.
//! - `csv`: comma separated with a header row naming `source` and `target` (any case) and
//!   optionally `weight`/`value`.
//! - `json-nodes-links`: `{"nodes": [{"id": ..}], "links": [{"source": .., "target": ..}]}`.
//! - `json-vertices-edges`: `{"vertices": [{"id": .., "label": .., "community": ..}],
//!   "edges": [{"source": .., "target": .., "weight": ..}]}`.
//!
//! For the line based formats, empty lines and lines starting with `#` are dropped before
//! anything else happens. A line that cannot be turned into an edge is skipped and counted in
//! the [`LoadReport`]; the load only fails when not a single node could be extracted.
//!
//! # Example
//!
//! ```
//! use socialgraph::graph_loader::{parse, GraphFormat};
//!
//! let parsed = parse("0 1\n0 2\n# comment\n\nabc xyz\n1 2", GraphFormat::EdgeList).unwrap();
//! assert_eq!(parsed.nodes.len(), 3);
//! assert_eq!(parsed.edges.len(), 3);
//! assert_eq!(parsed.report.errors, 1);
//! assert_eq!(parsed.report.success_rate(), 75.0);
//! ```

pub mod source;

use crate::core::{
    entities::{Edge, Node, NodeId},
    utils::errors::{GraphError, GraphResult},
};
use flate2::read::GzDecoder;
use indexmap::{map::Entry, IndexMap};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphFormat {
    EdgeList,
    JsonNodesLinks,
    JsonVerticesEdges,
    Csv,
}

impl GraphFormat {
    pub const ALL: [GraphFormat; 4] = [
        GraphFormat::EdgeList,
        GraphFormat::JsonNodesLinks,
        GraphFormat::JsonVerticesEdges,
        GraphFormat::Csv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphFormat::EdgeList => "edge-list",
            GraphFormat::JsonNodesLinks => "json-nodes-links",
            GraphFormat::JsonVerticesEdges => "json-vertices-edges",
            GraphFormat::Csv => "csv",
        }
    }
}

impl Display for GraphFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GraphFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GraphError::Validation(format!("unknown graph format '{s}'")))
    }
}

/// Aggregate outcome of a load. Bad records never fail a load on their own, they only show up
/// here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Records considered for parsing (comments and blank lines excluded).
    pub data_lines: usize,
    pub accepted: usize,
    pub errors: usize,
}

impl LoadReport {
    /// Percentage of data records that produced an edge. `100.0` when there was nothing to parse.
    pub fn success_rate(&self) -> f64 {
        if self.data_lines == 0 {
            100.0
        } else {
            (self.data_lines - self.errors) as f64 / self.data_lines as f64 * 100.0
        }
    }
}

/// Output of a parse: nodes in first-seen order, edges in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub report: LoadReport,
}

/// Accumulates nodes and edges while a loader walks its input.
#[derive(Debug, Default)]
pub(crate) struct GraphBuilder {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    report: LoadReport,
}

impl GraphBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a node supplied explicitly by structured input. The first declaration of an id
    /// wins.
    pub(crate) fn declare_node(&mut self, node: Node) {
        match self.nodes.entry(node.id) {
            Entry::Occupied(_) => debug!("Ignoring duplicate declaration of node {}", node.id),
            Entry::Vacant(entry) => {
                entry.insert(node);
            }
        }
    }

    /// Creates a default node for `id` unless it was seen before.
    pub(crate) fn touch_node(&mut self, id: NodeId) {
        self.nodes.entry(id).or_insert_with(|| Node::new(id));
    }

    pub(crate) fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Counts one data record and appends its edge, creating the endpoints on first sight.
    pub(crate) fn add_edge(&mut self, edge: Edge) {
        self.touch_node(edge.source);
        self.touch_node(edge.target);
        self.push_edge(edge);
    }

    /// Counts one data record and appends its edge. Both endpoints must already exist.
    pub(crate) fn push_edge(&mut self, edge: Edge) {
        debug_assert!(self.contains_node(edge.source) && self.contains_node(edge.target));
        self.report.data_lines += 1;
        self.report.accepted += 1;
        self.edges.push(edge);
    }

    /// Counts one data record that could not be used.
    pub(crate) fn skip(&mut self, record: usize, line: &str, reason: &str) {
        debug!("Skipping record {record}: {reason} - {line:?}");
        self.report.data_lines += 1;
        self.report.errors += 1;
    }

    pub(crate) fn finish(self, format: GraphFormat) -> GraphResult<ParsedGraph> {
        let GraphBuilder {
            nodes,
            edges,
            report,
        } = self;
        if nodes.is_empty() {
            warn!(
                "No valid nodes found in {format} input ({} records, {} errors)",
                report.data_lines, report.errors
            );
            return Err(GraphError::Parse("no valid nodes".to_string()));
        }
        if report.errors > 0 {
            warn!(
                "Skipped {} of {} {format} records ({:.2}% success rate)",
                report.errors,
                report.data_lines,
                report.success_rate()
            );
        }
        info!(
            "Parsed {format} input: {} nodes, {} edges",
            nodes.len(),
            edges.len()
        );
        Ok(ParsedGraph {
            nodes: nodes.into_values().collect(),
            edges,
            report,
        })
    }
}

/// Lines that carry data: trimmed, non-empty and not starting with `#`.
pub(crate) fn data_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parses `raw` according to `format`.
pub fn parse(raw: &str, format: GraphFormat) -> GraphResult<ParsedGraph> {
    match format {
        GraphFormat::EdgeList => source::edge_list_loader::parse_edge_list(raw),
        GraphFormat::Csv => source::csv_loader::parse_csv(raw),
        GraphFormat::JsonNodesLinks | GraphFormat::JsonVerticesEdges => {
            source::json_loader::StructuredGraph::from_json(raw, format)?.normalize()
        }
    }
}

/// Parses raw bytes. Invalid UTF-8 sequences are replaced, which for the line formats means the
/// affected lines are counted as errors rather than failing the load.
pub fn parse_bytes(raw: &[u8], format: GraphFormat) -> GraphResult<ParsedGraph> {
    parse(&String::from_utf8_lossy(raw), format)
}

/// Reads a whole input file, decompressing it first when the name ends in `.gz`.
pub fn read_source<P: AsRef<Path>>(path: P) -> GraphResult<Vec<u8>> {
    let path = path.as_ref();
    let is_gziped = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| name.ends_with(".gz"))
        .is_some();

    let f = File::open(path)?;
    let mut buf = Vec::new();
    if is_gziped {
        BufReader::new(GzDecoder::new(f)).read_to_end(&mut buf)?;
    } else {
        BufReader::new(f).read_to_end(&mut buf)?;
    }
    debug!("Read {} bytes from {}", buf.len(), path.display());
    Ok(buf)
}

/// Reads and parses a file.
pub fn parse_file<P: AsRef<Path>>(path: P, format: GraphFormat) -> GraphResult<ParsedGraph> {
    parse_bytes(&read_source(path)?, format)
}

#[cfg(test)]
mod graph_loader_test {
    use super::*;
    use crate::core::utils::logging::global_debug_logger;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    #[test]
    fn format_round_trips_through_its_name() {
        for format in GraphFormat::ALL {
            assert_eq!(format.as_str().parse::<GraphFormat>().unwrap(), format);
        }
        assert_eq!("CSV".parse::<GraphFormat>().unwrap(), GraphFormat::Csv);
        assert!(matches!(
            "graphml".parse::<GraphFormat>(),
            Err(GraphError::Validation(_))
        ));
    }

    #[test]
    fn success_rate() {
        let report = LoadReport {
            data_lines: 4,
            accepted: 3,
            errors: 1,
        };
        assert_eq!(report.success_rate(), 75.0);
        assert_eq!(LoadReport::default().success_rate(), 100.0);
    }

    #[test]
    fn data_lines_drop_comments_and_blanks() {
        let lines: Vec<_> = data_lines("# header\n\n  \n 1 2 \n#2 3\n3 4").collect();
        assert_eq!(lines, vec!["1 2", "3 4"]);
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        global_debug_logger();
        for format in [GraphFormat::EdgeList, GraphFormat::Csv] {
            let err = parse("# nothing here\n\n", format).unwrap_err();
            assert!(matches!(err, GraphError::Parse(ref msg) if msg == "no valid nodes"));
        }
    }

    #[test]
    fn reads_gzipped_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"0 1\n1 2\n").unwrap();
        encoder.finish().unwrap();

        let parsed = parse_file(&path, GraphFormat::EdgeList).unwrap();
        assert_eq!(parsed.nodes.len(), 3);
        assert_eq!(parsed.edges.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(dir.path().join("missing.txt"), GraphFormat::EdgeList).unwrap_err();
        assert!(matches!(err, GraphError::IOError { .. }));
    }
}
