//! Render-facing view of the session state

use serde::{Deserialize, Serialize};

use crate::features::motifs::LayeringPolicy;
use crate::shared::models::{
    BaseNode, DoiWeights, Link, LinkId, LinkKind, MotifDiff, MotifId, NodeId, NodeKind, Payload,
    ProvGraph,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub handle: NodeId,
    pub id: i64,
    pub kind: NodeKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub parent: Option<NodeId>,
    pub x: f64,
    pub y: f64,
    pub col: usize,
    pub hidden: bool,
    pub filtered: bool,
    pub selected: bool,
    pub highlighted: bool,
    pub doi: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motif: Option<MotifId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motif_diff: Option<MotifDiff>,
    #[serde(default)]
    pub exaggerated: bool,
}

impl EntitySnapshot {
    fn of(entity: &BaseNode) -> Self {
        let (uuid, layer, motif, motif_diff) = match &entity.payload {
            Payload::Node(data) => (Some(data.uuid.clone()), None, None, None),
            Payload::Analysis(data) => (
                Some(data.uuid.clone()),
                data.layer,
                data.motif,
                Some(data.motif_diff),
            ),
            Payload::Layer(data) => (None, None, Some(data.motif), None),
            Payload::Subanalysis(_) => (None, None, None, None),
        };

        Self {
            handle: entity.handle,
            id: entity.id,
            kind: entity.kind(),
            label: entity.label(),
            uuid,
            parent: entity.parent,
            x: entity.x,
            y: entity.y,
            col: entity.col,
            hidden: entity.hidden,
            filtered: entity.filtered,
            selected: entity.selected,
            highlighted: entity.highlighted,
            doi: entity.doi.weighted_sum,
            layer,
            motif,
            motif_diff,
            exaggerated: entity.is_exaggerated(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub id: LinkId,
    pub kind: LinkKind,
    pub source: NodeId,
    pub target: NodeId,
    pub hidden: bool,
    pub filtered: bool,
    pub highlighted: bool,
}

impl From<&Link> for LinkSnapshot {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id,
            kind: link.kind,
            source: link.source,
            target: link.target,
            hidden: link.hidden,
            filtered: link.filtered,
            highlighted: link.highlighted,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub policy: LayeringPolicy,
    pub weights: DoiWeights,
    pub entities: Vec<EntitySnapshot>,
    pub links: Vec<LinkSnapshot>,
    pub motifs: usize,
}

impl GraphSnapshot {
    pub fn capture(graph: &ProvGraph, policy: LayeringPolicy, weights: &DoiWeights) -> Self {
        Self {
            policy,
            weights: weights.clone(),
            entities: graph.entities().iter().map(EntitySnapshot::of).collect(),
            links: graph.all_links().iter().map(LinkSnapshot::from).collect(),
            motifs: graph.motifs().len(),
        }
    }

    pub fn entity(&self, handle: NodeId) -> Option<&EntitySnapshot> {
        self.entities.get(handle.index())
    }

    /// Entities currently drawn (not hidden)
    pub fn visible(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.entities.iter().filter(|e| !e.hidden)
    }

    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &EntitySnapshot> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }
}
