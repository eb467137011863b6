//! Core data types shared by the loaders, the algorithms and the snapshot store.

pub mod entities;
pub mod utils;
