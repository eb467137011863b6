pub mod edge;
pub mod node;

pub use edge::{Edge, DEFAULT_EDGE_VALUE};
pub use node::{default_group, default_name, Node, NodeId, NUM_DEFAULT_GROUPS};
