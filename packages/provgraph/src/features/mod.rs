//! Feature slices, in pipeline order

pub mod doi;
pub mod graph_builder;
pub mod hierarchy;
pub mod interaction;
pub mod layering;
pub mod motifs;
pub mod partitioning;
