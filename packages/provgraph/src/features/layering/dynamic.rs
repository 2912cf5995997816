//! Dynamic re-layering of the visible view
//!
//! Every leaf is drawn through its outermost collapsed ancestor. The
//! representatives are sorted, layered and placed on the grid with the same
//! engine as the static layout.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::layer_assign::{assign_layers, group_into_buckets};
use super::positions::place_buckets;
use super::scope::{Scope, ScopeEdge, ScopeView};
use super::topo_sort::TopologicalSorter;
use super::LayerBuckets;
use crate::config::{CellConfig, FilterAction};
use crate::errors::Result;
use crate::shared::models::{NodeId, ProvGraph};

/// Entity drawn in place of a leaf node
///
/// A collapsed aggregate has `hidden == false`. An exaggerated analysis is
/// drawn on its own even inside a collapsed layer.
pub fn representative_of(graph: &ProvGraph, leaf: NodeId) -> NodeId {
    let Some(san) = graph.node(leaf).parent else {
        return leaf;
    };
    let Some(analysis) = graph.node(san).parent else {
        return if graph.node(san).hidden { leaf } else { san };
    };

    let an = graph.node(analysis);
    if let Some(layer) = an.parent {
        if !graph.node(layer).hidden && !an.is_exaggerated() {
            return layer;
        }
    }
    if !an.hidden {
        analysis
    } else if !graph.node(san).hidden {
        san
    } else {
        leaf
    }
}

/// Build the visible scope: representatives plus mapped node links
pub fn visible_scope(graph: &ProvGraph, filter_action: FilterAction) -> ScopeView {
    let reps: FxHashMap<NodeId, NodeId> = graph
        .nodes
        .iter()
        .map(|&n| (n, representative_of(graph, n)))
        .collect();

    let mut seen = FxHashSet::default();
    let mut members = Vec::new();
    for rep in graph.nodes.iter().map(|n| reps[n]) {
        if !seen.insert(rep) {
            continue;
        }
        if filter_action == FilterAction::Hide && !graph.node(rep).filtered {
            continue;
        }
        members.push(rep);
    }

    let edges = graph
        .links
        .iter()
        .filter_map(|&link| {
            let l = graph.link(link);
            Some(ScopeEdge {
                link,
                source: *reps.get(&l.source)?,
                target: *reps.get(&l.target)?,
            })
        })
        .collect();

    ScopeView::new(Scope::Visible, members, edges)
}

/// Re-layer the visible view. Returns the visible buckets.
pub fn relayout_visible(
    graph: &mut ProvGraph,
    cell: &CellConfig,
    filter_action: FilterAction,
) -> Result<LayerBuckets> {
    let view = visible_scope(graph, filter_action);
    let order = TopologicalSorter::new().sort(graph, &view)?;
    assign_layers(graph, &view, &order);
    let buckets = group_into_buckets(graph, &order);
    place_buckets(graph, &buckets, cell);

    debug!(
        visible = view.len(),
        columns = buckets.len(),
        "Visible view re-layered"
    );
    Ok(buckets)
}
