//! # socialgraph
//!
//! `socialgraph` loads social network edge lists and answers the questions a graph explorer asks
//! of them: how many users and friendships there are, how connected they are, which community
//! each user belongs to, and what a representative subgraph small enough to draw looks like.
//!
//! The crate is organised as follows:
//!
//!  * [`graph_loader`] parses edge lists, CSV files and two JSON document shapes into a
//!    normalized node and edge collection, counting the lines it had to skip.
//!  * [`algorithms`] holds the metrics (degree, local clustering coefficient, global statistics)
//!    and the degree-biased sampler. They are pure functions over node and edge slices.
//!  * [`db`] wraps a loaded graph in an immutable
//!    [`GraphSnapshot`](db::graph::snapshot::GraphSnapshot) and keeps named snapshots in a
//!    [`GraphStore`](db::graph::store::GraphStore).
//!
//! Graphs are always treated as undirected. Every degree is recomputed from the edges at load
//! time; a degree supplied by the input is ignored.
//!
//! # Examples
//!
//! ```rust
//! use socialgraph::prelude::*;
//!
//! let raw = "0 1\n0 2\n1 2\n# comment\n\n3 4";
//! let graph = GraphSnapshot::load(raw.as_bytes(), GraphFormat::EdgeList).unwrap();
//!
//! let stats = graph.global_stats();
//! assert_eq!(stats.total_nodes, 5);
//! assert_eq!(stats.total_edges, 4);
//! assert_eq!(stats.density, 0.4);
//!
//! let detail = graph.node_detail(0).unwrap();
//! assert_eq!(detail.neighbors, vec![1, 2]);
//! assert_eq!(detail.local_clustering, 1.0);
//! ```
//!
//! ## Supported Platforms
//!
//! **Note** they must have Rust 1.86 or later.
//!
//!    * `Linux`
//!    * `Windows`
//!    * `macOS`
//!

pub mod algorithms;
pub mod config;
pub mod core;
pub mod db;
pub mod graph_loader;

pub mod prelude {
    pub use crate::{
        algorithms::{
            metrics::{
                clustering_coefficient::{average_clustering, ClusteringEstimate},
                degree::{assign_degrees, compute_degrees},
                stats::{CommunityStats, GlobalStats},
            },
            sampling::degree_biased::{degree_biased_sample, SampleResult},
        },
        config::AnalyticsConfig,
        core::{
            entities::{Edge, Node, NodeId},
            utils::errors::{GraphError, GraphResult},
        },
        db::graph::{
            snapshot::{GraphSnapshot, NodeDetail},
            store::GraphStore,
        },
        graph_loader::{GraphFormat, LoadReport},
    };
}
