//! Topological Layering
//!
//! One Kahn sort plus longest-path layering, reused at three granularities:
//!
//! ```text
//!   Scope::Graph            analyses, inter-analysis links mapped upward
//!   Scope::Subanalysis(id)  leaf nodes of one subanalysis, internal links
//!   Scope::Visible          current representatives (dynamic view)
//! ```
//!
//! Barycenter reordering of subanalyses runs on the analysis-level buckets.

pub mod barycenter;
pub mod dynamic;
pub mod layer_assign;
pub mod positions;
pub mod scope;
pub mod topo_sort;

pub use barycenter::BarycenterReorderer;
pub use dynamic::{relayout_visible, representative_of};
pub use layer_assign::{assign_layers, group_into_buckets};
pub use positions::{layout_analyses, layout_subanalysis_nodes};
pub use scope::{Scope, ScopeEdge, ScopeView};
pub use topo_sort::TopologicalSorter;

pub type LayerBuckets = Vec<Vec<crate::shared::models::NodeId>>;
