//! Motif Discovery
//!
//! Groups analyses into motifs per depth group, motifs into layers, and
//! measures how far each analysis deviates from its motif.
//!
//! ```text
//! buckets ──► MotifDiscoveryEngine ──► LayerMapper ──► DiffComputer
//!              (motifs + layers)       (boundaries,     (signed deltas)
//!                                       layer links)
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::LayeringPolicy;
pub use infrastructure::{DiffComputer, LayerMapper, MotifDiscoveryEngine};
