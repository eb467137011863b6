//! # Algorithms
//!
//! All algorithms are pure functions over node and edge slices. They treat the graph as
//! undirected and never modify their input.
//!
//! ## Metrics
//!  * [Degree](metrics::degree)
//!  * [Local clustering coefficient](metrics::clustering_coefficient)
//!  * [Global statistics](metrics::stats)
//!
//! ## Sampling
//!  * [Degree-biased sampling](sampling::degree_biased)

pub mod metrics;
pub mod sampling;
