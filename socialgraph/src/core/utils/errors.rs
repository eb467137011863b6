use crate::core::entities::NodeId;

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    /// Input could not be turned into a graph at all. Individual bad lines never end up here,
    /// they are tallied in the [`LoadReport`](crate::graph_loader::LoadReport).
    #[error("Failed to parse graph: {0}")]
    Parse(String),

    /// Structured input is missing something it cannot do without, e.g. a CSV header without
    /// `source`/`target` columns.
    #[error("Invalid graph input: {0}")]
    Validation(String),

    #[error("No Node with ID {0}")]
    NodeNotFound(NodeId),

    #[error("No graph loaded under name {0}")]
    GraphNotFound(String),

    #[error("IO operation failed")]
    IOError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON operation failed: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV operation failed: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },
}

impl GraphError {
    /// `true` for the failures a caller fixes by supplying different input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GraphError::Parse(_) | GraphError::Validation(_) | GraphError::JsonError { .. }
        )
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
