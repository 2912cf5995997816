//! Hierarchy entities
//!
//! One entity type, [`BaseNode`], carries the fields shared by every level
//! (adjacency, position, flags, DOI). Level-specific data sits in the
//! [`Payload`] variant and is reached through exhaustive matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::doi::DoiComponents;
use super::ids::{LinkId, MotifId, NodeId};

/// Hierarchy level of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Node,
    Subanalysis,
    Analysis,
    Layer,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Subanalysis => "subanalysis",
            Self::Analysis => "analysis",
            Self::Layer => "layer",
        }
    }

    /// Levels that own children and can be expanded
    pub fn is_aggregate(&self) -> bool {
        !matches!(self, Self::Node)
    }
}

/// Classification of leaf nodes derived from the record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Source, sample or assay names
    Special,
    /// Data transformation step
    Dt,
    /// File without a stored url
    Intermediate,
    /// File with a stored url
    Stored,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Special => "special",
            Self::Dt => "dt",
            Self::Intermediate => "intermediate",
            Self::Stored => "stored",
        }
    }
}

/// Leaf node data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub uuid: String,
    pub name: String,
    /// Raw record type ("Source Name", "Derived Data File", ...)
    pub record_type: String,
    pub node_type: NodeType,
    pub study: String,
    pub assay: String,
    pub parents: Vec<String>,
    pub analysis_uuid: String,
    pub subanalysis: Option<u32>,
    pub file_url: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

/// Subanalysis data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubanalysisData {
    /// Partition id shared by the member nodes
    pub partition: u32,
    pub wf_uuid: String,
}

/// Signed deltas of an analysis against its motif
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifDiff {
    pub num_subanalyses: i64,
    pub num_ins: i64,
    pub num_outs: i64,
}

impl MotifDiff {
    /// L1 magnitude of the three deltas
    pub fn magnitude(&self) -> i64 {
        self.num_subanalyses.abs() + self.num_ins.abs() + self.num_outs.abs()
    }

    /// Largest single absolute delta
    pub fn max_abs(&self) -> i64 {
        self.num_subanalyses
            .abs()
            .max(self.num_ins.abs())
            .max(self.num_outs.abs())
    }
}

/// Analysis data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    pub uuid: String,
    pub wf_uuid: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub wf_name: String,
    pub wf_code: String,
    pub layer: Option<NodeId>,
    pub motif: Option<MotifId>,
    /// Kept visible inside a collapsed layer
    pub exaggerated: bool,
    pub motif_diff: MotifDiff,
}

/// Layer data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerData {
    pub motif: MotifId,
    pub wf_name: String,
    pub wf_code: String,
}

/// Level-specific payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    Node(NodeData),
    Subanalysis(SubanalysisData),
    Analysis(AnalysisData),
    Layer(LayerData),
}

/// Common part of every hierarchy entity
///
/// For aggregates, `hidden == true` means the entity is expanded, i.e. its
/// children are drawn in its place. For leaves it simply means not drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseNode {
    pub handle: NodeId,
    /// Domain id (record index, analysis index, subanalysis or layer counter)
    pub id: i64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub preds: Vec<NodeId>,
    pub succs: Vec<NodeId>,
    pub pred_links: Vec<LinkId>,
    pub succ_links: Vec<LinkId>,
    /// Boundary leaf nodes (aggregates only)
    pub inputs: Vec<NodeId>,
    pub outputs: Vec<NodeId>,
    /// Links internal to the aggregate
    pub links: Vec<LinkId>,
    pub x: f64,
    pub y: f64,
    /// Layer index assigned by the layering engine
    pub col: usize,
    pub bc_order: f64,
    /// Topological sort scratch marker
    pub removed: bool,
    pub hidden: bool,
    pub filtered: bool,
    pub selected: bool,
    pub highlighted: bool,
    pub doi: DoiComponents,
    pub payload: Payload,
}

impl BaseNode {
    pub fn new(handle: NodeId, id: i64, payload: Payload) -> Self {
        let hidden = !matches!(payload, Payload::Layer(_));
        Self {
            handle,
            id,
            parent: None,
            children: Vec::new(),
            preds: Vec::new(),
            succs: Vec::new(),
            pred_links: Vec::new(),
            succ_links: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            links: Vec::new(),
            x: 0.0,
            y: 0.0,
            col: 0,
            bc_order: 0.0,
            removed: false,
            hidden,
            filtered: true,
            selected: false,
            highlighted: false,
            doi: DoiComponents::default(),
            payload,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.payload {
            Payload::Node(_) => NodeKind::Node,
            Payload::Subanalysis(_) => NodeKind::Subanalysis,
            Payload::Analysis(_) => NodeKind::Analysis,
            Payload::Layer(_) => NodeKind::Layer,
        }
    }

    pub fn as_node(&self) -> Option<&NodeData> {
        match &self.payload {
            Payload::Node(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut NodeData> {
        match &mut self.payload {
            Payload::Node(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_subanalysis(&self) -> Option<&SubanalysisData> {
        match &self.payload {
            Payload::Subanalysis(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_analysis(&self) -> Option<&AnalysisData> {
        match &self.payload {
            Payload::Analysis(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_analysis_mut(&mut self) -> Option<&mut AnalysisData> {
        match &mut self.payload {
            Payload::Analysis(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_layer(&self) -> Option<&LayerData> {
        match &self.payload {
            Payload::Layer(data) => Some(data),
            _ => None,
        }
    }

    /// Workflow uuid for analyses and subanalyses
    pub fn wf_uuid(&self) -> Option<&str> {
        match &self.payload {
            Payload::Subanalysis(data) => Some(&data.wf_uuid),
            Payload::Analysis(data) => Some(&data.wf_uuid),
            Payload::Node(_) | Payload::Layer(_) => None,
        }
    }

    pub fn is_exaggerated(&self) -> bool {
        self.as_analysis().map(|a| a.exaggerated).unwrap_or(false)
    }

    /// Human-readable label
    pub fn label(&self) -> String {
        match &self.payload {
            Payload::Node(data) => data.name.clone(),
            Payload::Subanalysis(data) => format!("subanalysis {}", data.partition),
            Payload::Analysis(data) => data.wf_code.clone(),
            Payload::Layer(data) => data.wf_code.clone(),
        }
    }
}

/// Append a handle unless already present
pub(crate) fn push_unique<T: PartialEq + Copy>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> BaseNode {
        BaseNode::new(
            NodeId::new(0),
            0,
            Payload::Layer(LayerData {
                motif: MotifId::new(0),
                wf_name: "wf".to_string(),
                wf_code: "wf".to_string(),
            }),
        )
    }

    #[test]
    fn test_layers_start_collapsed_others_hidden() {
        let l = layer();
        assert_eq!(l.kind(), NodeKind::Layer);
        assert!(!l.hidden);

        let san = BaseNode::new(
            NodeId::new(1),
            0,
            Payload::Subanalysis(SubanalysisData {
                partition: 3,
                wf_uuid: "wf".to_string(),
            }),
        );
        assert!(san.hidden);
        assert!(san.filtered);
        assert_eq!(san.wf_uuid(), Some("wf"));
        assert_eq!(san.label(), "subanalysis 3");
    }

    #[test]
    fn test_motif_diff_magnitudes() {
        let diff = MotifDiff {
            num_subanalyses: -2,
            num_ins: 1,
            num_outs: 3,
        };
        assert_eq!(diff.magnitude(), 6);
        assert_eq!(diff.max_abs(), 3);
    }

    #[test]
    fn test_push_unique() {
        let mut items = vec![NodeId::new(1)];
        push_unique(&mut items, NodeId::new(1));
        push_unique(&mut items, NodeId::new(2));
        assert_eq!(items, vec![NodeId::new(1), NodeId::new(2)]);
    }
}
