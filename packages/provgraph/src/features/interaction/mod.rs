//! User interaction operations
//!
//! Selection, path highlighting and filtering. Each operation only updates
//! flags and DOI components; rescoring and re-layering belong to the session.

pub mod filters;
pub mod highlight;
pub mod selection;

pub use filters::{aggregate_filter_flags, set_attribute_filter, set_time_filter};
pub use highlight::{clear_highlight, highlight_path, PathDirection};
pub use selection::{clear_selection, select};
