//! Node selection

use tracing::debug;

use crate::features::doi::infrastructure::initializer::hierarchy;
use crate::shared::models::{NodeId, ProvGraph};

/// Deselect every entity
pub fn clear_selection(graph: &mut ProvGraph) {
    for id in hierarchy(graph) {
        let entity = graph.node_mut(id);
        entity.selected = false;
        entity.doi.selected_changed(false);
    }
}

/// Select `id` and everything below it. Returns the number of selected entities.
pub fn select(graph: &mut ProvGraph, id: NodeId) -> usize {
    clear_selection(graph);

    let mut targets = vec![id];
    targets.extend(graph.descendants(id));
    for &target in &targets {
        let entity = graph.node_mut(target);
        entity.selected = true;
        entity.doi.selected_changed(true);
    }

    debug!(entity = %id, selected = targets.len(), "Selection changed");
    targets.len()
}
