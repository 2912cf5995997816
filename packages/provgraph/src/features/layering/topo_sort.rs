//! Kahn topological sort over a scope
//!
//! Members without incoming scope edges seed the queue, in member order.
//! Popping a member marks its outgoing links removed; a successor is queued
//! once all of its incoming links are removed. Visiting fewer members than
//! the scope holds means the scope is cyclic, and the sort fails instead of
//! returning a partial order.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::scope::ScopeView;
use crate::errors::{ProvGraphError, Result};
use crate::shared::models::{NodeId, ProvGraph};

#[derive(Debug, Default)]
pub struct TopologicalSorter;

impl TopologicalSorter {
    pub fn new() -> Self {
        Self
    }

    /// Sort the scope's members; `CycleDetected` on a cyclic scope
    pub fn sort(&self, graph: &mut ProvGraph, view: &ScopeView) -> Result<Vec<NodeId>> {
        Self::reset_markers(graph, view);

        let mut incoming: FxHashMap<NodeId, Vec<usize>> = FxHashMap::default();
        let mut outgoing: FxHashMap<NodeId, Vec<usize>> = FxHashMap::default();
        for (idx, edge) in view.edges.iter().enumerate() {
            incoming.entry(edge.target).or_default().push(idx);
            outgoing.entry(edge.source).or_default().push(idx);
        }

        let mut queue: Vec<NodeId> = Vec::with_capacity(view.len());
        for &member in &view.members {
            if !incoming.contains_key(&member) {
                graph.node_mut(member).removed = true;
                queue.push(member);
            }
        }

        let mut i = 0;
        while i < queue.len() {
            let current = queue[i];
            i += 1;

            for &idx in outgoing.get(&current).into_iter().flatten() {
                let edge = view.edges[idx];
                graph.link_mut(edge.link).removed = true;

                let target = edge.target;
                if graph.node(target).removed {
                    continue;
                }
                let ready = incoming
                    .get(&target)
                    .into_iter()
                    .flatten()
                    .all(|&e| graph.link(view.edges[e].link).removed);
                if ready {
                    graph.node_mut(target).removed = true;
                    queue.push(target);
                }
            }
        }

        if queue.len() < view.len() {
            let members = Self::cycle_members(graph, view);
            warn!(scope = %view.scope, ?members, "Cycle detected, layering aborted");
            return Err(ProvGraphError::cycle(view.scope.to_string(), members));
        }

        debug!(scope = %view.scope, members = queue.len(), "Topological sort complete");
        Ok(queue)
    }

    /// Clear the removed markers of the scope's members and edges
    pub fn reset_markers(graph: &mut ProvGraph, view: &ScopeView) {
        for &member in &view.members {
            graph.node_mut(member).removed = false;
        }
        for edge in &view.edges {
            graph.link_mut(edge.link).removed = false;
        }
    }

    /// Domain ids of every member lying on a cycle, self-loops included, sorted
    pub fn cycle_members(graph: &ProvGraph, view: &ScopeView) -> Vec<i64> {
        let mut dag: DiGraph<NodeId, ()> = DiGraph::new();
        let mut index: FxHashMap<NodeId, NodeIndex> = FxHashMap::default();
        for &member in &view.members {
            index.insert(member, dag.add_node(member));
        }
        for edge in &view.edges {
            if let (Some(&s), Some(&t)) = (index.get(&edge.source), index.get(&edge.target)) {
                dag.add_edge(s, t, ());
            }
        }

        let mut members: Vec<i64> = tarjan_scc(&dag)
            .into_iter()
            .filter(|scc| scc.len() > 1 || dag.contains_edge(scc[0], scc[0]))
            .flatten()
            .map(|idx| graph.node(dag[idx]).id)
            .collect();
        members.sort_unstable();
        members
    }
}
