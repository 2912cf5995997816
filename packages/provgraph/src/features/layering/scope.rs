//! Sort scopes
//!
//! A scope is the member set the sort runs over plus the directed edges
//! between members. Every edge remembers the link it came from so the sort
//! can mark it removed.

use rustc_hash::FxHashSet;
use std::fmt;

use crate::shared::models::{LinkId, NodeId, ProvGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Analyses of the whole graph
    Graph,
    /// Leaf nodes of one subanalysis
    Subanalysis(NodeId),
    /// Representatives of the dynamic view
    Visible,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Graph => write!(f, "graph"),
            Scope::Subanalysis(id) => write!(f, "subanalysis {}", id),
            Scope::Visible => write!(f, "visible view"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeEdge {
    pub link: LinkId,
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Clone)]
pub struct ScopeView {
    pub scope: Scope,
    pub members: Vec<NodeId>,
    pub edges: Vec<ScopeEdge>,
}

impl ScopeView {
    /// Edges leaving the member set are dropped. Self-loops are dropped only
    /// in the visible view, where they come from links folded into one
    /// representative; anywhere else they are one-member cycles.
    pub fn new(scope: Scope, members: Vec<NodeId>, edges: Vec<ScopeEdge>) -> Self {
        let set: FxHashSet<NodeId> = members.iter().copied().collect();
        let edges = edges
            .into_iter()
            .filter(|e| scope != Scope::Visible || e.source != e.target)
            .filter(|e| set.contains(&e.source) && set.contains(&e.target))
            .collect();
        Self {
            scope,
            members,
            edges,
        }
    }

    /// All analyses; inter-analysis links are lifted to their analyses
    pub fn graph(graph: &ProvGraph) -> Self {
        let edges = graph
            .analysis_links
            .iter()
            .filter_map(|&link| {
                let l = graph.link(link);
                Some(ScopeEdge {
                    link,
                    source: graph.analysis_of(l.source)?,
                    target: graph.analysis_of(l.target)?,
                })
            })
            .collect();
        Self::new(Scope::Graph, graph.analyses.clone(), edges)
    }

    /// Leaf nodes of a subanalysis with its internal links
    pub fn subanalysis(graph: &ProvGraph, san: NodeId) -> Self {
        let entity = graph.node(san);
        let edges = entity
            .links
            .iter()
            .map(|&link| {
                let l = graph.link(link);
                ScopeEdge {
                    link,
                    source: l.source,
                    target: l.target,
                }
            })
            .collect();
        Self::new(Scope::Subanalysis(san), entity.children.clone(), edges)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
