use crate::core::entities::NodeId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EDGE_VALUE: f64 = 1.0;

/// An edge stored as an ordered `(source, target)` pair of node ids. All statistics treat it as
/// undirected. Parallel edges and self-loops are kept as separate records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub value: f64,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            value: DEFAULT_EDGE_VALUE,
        }
    }

    /// Same as [`Edge::new`] but with a weight. Anything that is not a positive finite number
    /// falls back to [`DEFAULT_EDGE_VALUE`].
    pub fn with_value(source: NodeId, target: NodeId, value: Option<f64>) -> Self {
        Self {
            source,
            target,
            value: value
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(DEFAULT_EDGE_VALUE),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint opposite to `id`, or `None` if the edge does not touch `id`.
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }
}
