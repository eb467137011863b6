pub mod clustering_coefficient;
pub mod degree;
pub mod stats;
