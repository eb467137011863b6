//! Subgraph selection for rendering budgets.

pub mod degree_biased;
