use serde::{Deserialize, Serialize};

/// Externally supplied node identifier. Never reassigned by the loaders.
pub type NodeId = i64;

/// Number of community tags handed out when the input does not supply one.
pub const NUM_DEFAULT_GROUPS: i64 = 8;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub group: u32,
    /// Always recomputed from the edge set when a snapshot is built.
    pub degree: usize,
}

impl Node {
    /// A node with the default display name and community tag and a zero degree.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: default_name(id),
            group: default_group(id),
            degree: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }
}

/// Display label used when the input does not name a node.
pub fn default_name(id: NodeId) -> String {
    format!("User {id}")
}

/// Community tag in `1..=8`, `(id mod 8) + 1`. Negative ids wrap around instead of going
/// below 1.
pub fn default_group(id: NodeId) -> u32 {
    (id.rem_euclid(NUM_DEFAULT_GROUPS) + 1) as u32
}
