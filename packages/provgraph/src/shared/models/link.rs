//! Directed links

use serde::{Deserialize, Serialize};

use super::ids::{LinkId, NodeId};

/// Level a link connects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Leaf node to leaf node (parent record → child record)
    Node,
    /// Layer to layer, synthesized by motif discovery
    Layer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub kind: LinkKind,
    pub source: NodeId,
    pub target: NodeId,
    pub hidden: bool,
    pub highlighted: bool,
    pub filtered: bool,
    /// Topological sort scratch marker
    pub removed: bool,
}

impl Link {
    pub fn new(id: LinkId, kind: LinkKind, source: NodeId, target: NodeId, hidden: bool) -> Self {
        Self {
            id,
            kind,
            source,
            target,
            hidden,
            highlighted: false,
            filtered: true,
            removed: false,
        }
    }
}
