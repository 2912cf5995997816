//! Root provenance graph
//!
//! Owns every entity, link and motif in flat arenas. Collections such as
//! `analyses` or `layer_links` are ordered lists of handles into them.
//! Layers and layer links are always allocated last, so discarding them on a
//! policy change is a truncation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::entity::{BaseNode, MotifDiff, NodeKind, Payload};
use super::ids::{LinkId, MotifId, NodeId};
use super::link::{Link, LinkKind};
use super::motif::Motif;
use super::workflow::WorkflowData;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvGraph {
    entities: Vec<BaseNode>,
    link_arena: Vec<Link>,
    motif_arena: Vec<Motif>,

    /// Leaf nodes in record order
    pub nodes: Vec<NodeId>,
    pub subanalyses: Vec<NodeId>,
    /// Analyses; index 0 is the dataset pseudo-analysis
    pub analyses: Vec<NodeId>,
    pub layers: Vec<NodeId>,

    /// Every leaf-level link
    pub links: Vec<LinkId>,
    /// Leaf links crossing analysis boundaries
    pub analysis_links: Vec<LinkId>,
    pub layer_links: Vec<LinkId>,

    /// Nodes without successors
    pub output_nodes: Vec<NodeId>,
    /// Nodes without predecessors (and with successors)
    pub input_nodes: Vec<NodeId>,

    pub dataset: Option<NodeId>,
    pub node_by_uuid: FxHashMap<String, NodeId>,
    pub analysis_by_uuid: FxHashMap<String, NodeId>,
    /// analysis uuid → workflow uuid
    pub analysis_workflow: FxHashMap<String, String>,
    /// workflow uuid → parsed definition
    pub workflow_data: FxHashMap<String, WorkflowData>,
    /// Flags below an aggregate as they were when a child was last folded into it
    folds: FxHashMap<NodeId, FoldedView>,
}

/// Visibility flags of an aggregate's descendants and their internal links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldedView {
    pub entities: Vec<(NodeId, bool)>,
    pub links: Vec<(LinkId, bool)>,
    pub exaggerated: Vec<NodeId>,
}

impl ProvGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Arena access
    // ═══════════════════════════════════════════════════════════════════

    pub fn add_entity(&mut self, id: i64, payload: Payload) -> NodeId {
        let handle = NodeId::new(self.entities.len());
        self.entities.push(BaseNode::new(handle, id, payload));
        handle
    }

    pub fn add_link(
        &mut self,
        kind: LinkKind,
        source: NodeId,
        target: NodeId,
        hidden: bool,
    ) -> LinkId {
        let id = LinkId::new(self.link_arena.len());
        self.link_arena
            .push(Link::new(id, kind, source, target, hidden));
        id
    }

    pub fn add_motif(
        &mut self,
        preds: BTreeSet<NodeId>,
        succs: BTreeSet<NodeId>,
        num_ins: usize,
        num_outs: usize,
        num_subanalyses: usize,
        wf_uuid: String,
    ) -> MotifId {
        let id = MotifId::new(self.motif_arena.len());
        self.motif_arena.push(Motif {
            id,
            preds,
            succs,
            num_ins,
            num_outs,
            num_subanalyses,
            wf_uuid,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &BaseNode {
        &self.entities[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut BaseNode {
        &mut self.entities[id.index()]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.link_arena[id.index()]
    }

    pub fn link_mut(&mut self, id: LinkId) -> &mut Link {
        &mut self.link_arena[id.index()]
    }

    pub fn motif(&self, id: MotifId) -> &Motif {
        &self.motif_arena[id.index()]
    }

    pub fn motifs(&self) -> &[Motif] {
        &self.motif_arena
    }

    pub fn entities(&self) -> &[BaseNode] {
        &self.entities
    }

    pub fn all_links(&self) -> &[Link] {
        &self.link_arena
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Hierarchy navigation
    // ═══════════════════════════════════════════════════════════════════

    /// Owning analysis of any entity below the layer level
    pub fn analysis_of(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::Analysis => Some(id),
            NodeKind::Subanalysis => self.node(id).parent,
            NodeKind::Node => self.node(id).parent.and_then(|san| self.node(san).parent),
            NodeKind::Layer => None,
        }
    }

    /// Analysis uuid a leaf node was recorded under
    pub fn analysis_uuid_of(&self, leaf: NodeId) -> Option<&str> {
        self.node(leaf).as_node().map(|n| n.analysis_uuid.as_str())
    }

    /// Parent chain, innermost first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cur = self.node(id).parent;
        while let Some(p) = cur {
            chain.push(p);
            cur = self.node(p).parent;
        }
        chain
    }

    /// Every entity below `id`, pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.node(cur).children.iter().rev().copied());
        }
        out
    }

    /// Links entering `id`'s inputs and leaving its outputs
    pub fn boundary_links(&self, id: NodeId) -> Vec<LinkId> {
        let entity = self.node(id);
        let mut out = Vec::new();
        for input in &entity.inputs {
            out.extend(self.node(*input).pred_links.iter().copied());
        }
        for output in &entity.outputs {
            out.extend(self.node(*output).succ_links.iter().copied());
        }
        out
    }

    // ═══════════════════════════════════════════════════════════════════
    // Folded visibility
    // ═══════════════════════════════════════════════════════════════════

    /// Record the current flags below `aggregate`
    pub fn remember_fold(&mut self, aggregate: NodeId) {
        let below = self.descendants(aggregate);
        let links: Vec<LinkId> = std::iter::once(aggregate)
            .chain(below.iter().copied())
            .flat_map(|id| self.node(id).links.iter().copied())
            .collect();

        let view = FoldedView {
            entities: below.iter().map(|&d| (d, self.node(d).hidden)).collect(),
            links: links.iter().map(|&l| (l, self.link(l).hidden)).collect(),
            exaggerated: below
                .iter()
                .copied()
                .filter(|&d| self.node(d).is_exaggerated())
                .collect(),
        };
        self.folds.insert(aggregate, view);
    }

    /// Put back the flags recorded for `aggregate`. Returns false when none were.
    pub fn restore_fold(&mut self, aggregate: NodeId) -> bool {
        let Some(view) = self.folds.remove(&aggregate) else {
            return false;
        };
        for (id, hidden) in view.entities {
            self.node_mut(id).hidden = hidden;
        }
        for (link, hidden) in view.links {
            self.link_mut(link).hidden = hidden;
        }
        for id in view.exaggerated {
            if let Some(data) = self.node_mut(id).as_analysis_mut() {
                data.exaggerated = true;
            }
        }
        true
    }

    /// Drop every recorded fold; flags changed by something other than a toggle
    pub fn forget_folds(&mut self) {
        self.folds.clear();
    }

    // ═══════════════════════════════════════════════════════════════════
    // Layer lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Drop all layers, layer links and motifs and detach analyses from them
    pub fn discard_layers(&mut self) {
        if let Some(first) = self.layers.first() {
            self.entities.truncate(first.index());
        }
        if let Some(first) = self.layer_links.first() {
            self.link_arena.truncate(first.index());
        }
        self.layers.clear();
        self.layer_links.clear();
        self.motif_arena.clear();
        self.folds.clear();

        let analyses = self.analyses.clone();
        for an in analyses {
            let entity = self.node_mut(an);
            entity.parent = None;
            if let Some(data) = entity.as_analysis_mut() {
                data.layer = None;
                data.motif = None;
                data.exaggerated = false;
                data.motif_diff = MotifDiff::default();
            }
        }
    }
}
