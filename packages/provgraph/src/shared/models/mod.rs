//! Graph models

pub mod doi;
pub mod entity;
pub mod graph;
pub mod ids;
pub mod link;
pub mod motif;
pub mod workflow;

pub use doi::{DoiComponent, DoiComponents, DoiFactor, DoiWeights};
pub use entity::{
    AnalysisData, BaseNode, LayerData, MotifDiff, NodeData, NodeKind, NodeType, Payload,
    SubanalysisData,
};
pub use graph::{FoldedView, ProvGraph};
pub use ids::{LinkId, MotifId, NodeId};
pub use link::{Link, LinkKind};
pub use motif::Motif;
pub use workflow::WorkflowData;

pub(crate) use entity::push_unique;
