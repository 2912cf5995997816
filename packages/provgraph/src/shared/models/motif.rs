//! Motif templates

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::{MotifId, NodeId};

/// Structural template shared by equivalent analyses
///
/// Immutable once created; discarded wholesale when the layering policy
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motif {
    pub id: MotifId,
    /// Source nodes of the founding analysis's pred links
    pub preds: BTreeSet<NodeId>,
    /// Target nodes of the founding analysis's succ links
    pub succs: BTreeSet<NodeId>,
    pub num_ins: usize,
    pub num_outs: usize,
    pub num_subanalyses: usize,
    pub wf_uuid: String,
}
