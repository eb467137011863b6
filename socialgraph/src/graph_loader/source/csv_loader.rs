//! Comma separated edge lists with a header row.
//!
//! The header must name a `source` and a `target` column (compared case-insensitively, in any
//! position). A `weight` or `value` column is used for the edge value when present.
//!
//! ```
//! use socialgraph::graph_loader::source::csv_loader::parse_csv;
//!
//! let parsed = parse_csv("Target,Source,Weight\n20,10,2\n30,10,").unwrap();
//! assert_eq!(parsed.edges[0].source, 10);
//! assert_eq!(parsed.edges[0].value, 2.0);
//! assert_eq!(parsed.edges[1].value, 1.0);
//! ```

use crate::{
    core::{
        entities::{Edge, NodeId},
        utils::errors::{GraphError, GraphResult},
    },
    graph_loader::{data_lines, GraphBuilder, GraphFormat, ParsedGraph},
};
use csv::StringRecord;
use itertools::Itertools;

/// Positions of the columns the loader cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsvColumns {
    pub source: usize,
    pub target: usize,
    pub weight: Option<usize>,
}

impl CsvColumns {
    pub fn from_header(header: &StringRecord) -> GraphResult<Self> {
        let find = |names: &[&str]| {
            header.iter().position(|field| {
                names
                    .iter()
                    .any(|name| field.trim().eq_ignore_ascii_case(name))
            })
        };
        let source = find(&["source"]).ok_or_else(|| {
            GraphError::Validation("CSV header must name a 'source' column".to_string())
        })?;
        let target = find(&["target"]).ok_or_else(|| {
            GraphError::Validation("CSV header must name a 'target' column".to_string())
        })?;
        Ok(Self {
            source,
            target,
            weight: find(&["weight", "value"]),
        })
    }

    fn edge(&self, record: &StringRecord) -> Result<Edge, &'static str> {
        let (Some(source), Some(target)) = (record.get(self.source), record.get(self.target))
        else {
            return Err("not enough columns");
        };
        let (Ok(source), Ok(target)) = (source.parse::<NodeId>(), target.parse::<NodeId>())
        else {
            return Err("ids are not integers");
        };
        let value = self
            .weight
            .and_then(|i| record.get(i))
            .and_then(|w| w.parse::<f64>().ok());
        Ok(Edge::with_value(source, target, value))
    }
}

pub fn parse_csv(raw: &str) -> GraphResult<ParsedGraph> {
    let mut builder = GraphBuilder::new();
    let body = data_lines(raw).join("\n");
    if body.is_empty() {
        return builder.finish(GraphFormat::Csv);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    let columns = CsvColumns::from_header(reader.headers()?)?;

    for (index, rec) in reader.records().enumerate() {
        let record = index + 1;
        match rec {
            Ok(rec) => match columns.edge(&rec) {
                Ok(edge) => builder.add_edge(edge),
                Err(reason) => builder.skip(record, &rec.iter().join(","), reason),
            },
            Err(err) => builder.skip(record, "", &err.to_string()),
        }
    }
    builder.finish(GraphFormat::Csv)
}
