//! Degree of interest
//!
//! Five weighted components per entity and a threshold state machine that
//! expands interesting aggregates and folds away the rest.

pub mod domain;
pub mod engine;
pub mod infrastructure;

pub use domain::DoiThresholds;
pub use engine::{DoiEngine, Toggle};
pub use infrastructure::{collapse, expand, fold, unfold, VisibilityReport, VisibilityStateMachine};
