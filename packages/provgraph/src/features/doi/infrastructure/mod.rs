//! DOI infrastructure: component seeding, scoring and visibility transitions

pub mod expand_collapse;
pub mod initializer;
pub mod scoring;
pub mod visibility;

pub use expand_collapse::{collapse, expand, fold, unfold};
pub use initializer::{init_filter_component, init_layer_diff_component, init_time_component};
pub use scoring::compute_weighted_sums;
pub use visibility::{all_parents_hidden, VisibilityReport, VisibilityStateMachine};
