//! Longest-path layering and bucket grouping

use rustc_hash::FxHashMap;

use super::scope::ScopeView;
use super::LayerBuckets;
use crate::shared::models::{NodeId, ProvGraph};

/// Set `col` on every member to one more than its deepest in-scope
/// predecessor, or 0. `order` must be a topological order of the scope.
pub fn assign_layers(graph: &mut ProvGraph, view: &ScopeView, order: &[NodeId]) {
    let mut preds: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
    for edge in &view.edges {
        preds.entry(edge.target).or_default().push(edge.source);
    }

    for &member in order {
        let col = preds
            .get(&member)
            .into_iter()
            .flatten()
            .map(|p| graph.node(*p).col + 1)
            .max()
            .unwrap_or(0);
        graph.node_mut(member).col = col;
    }
}

/// Group members by `col`, keeping topological order inside each bucket
pub fn group_into_buckets(graph: &ProvGraph, order: &[NodeId]) -> LayerBuckets {
    let depth = order
        .iter()
        .map(|n| graph.node(*n).col + 1)
        .max()
        .unwrap_or(0);

    let mut buckets: LayerBuckets = vec![Vec::new(); depth];
    for &member in order {
        buckets[graph.node(member).col].push(member);
    }
    buckets
}
