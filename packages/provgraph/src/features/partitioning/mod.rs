//! Subanalysis partitioning
//!
//! Splits the nodes of every analysis into weakly connected groups.

pub mod partitioner;

pub use partitioner::SubanalysisPartitioner;
