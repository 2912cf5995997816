//! DOI domain types
//!
//! Component values and weights are shared models; this module owns the
//! thresholds that drive the visibility state machine.

pub mod thresholds;

pub use thresholds::DoiThresholds;
