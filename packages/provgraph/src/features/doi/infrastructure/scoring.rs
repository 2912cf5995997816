/*
 * Weighted-sum scoring
 *
 * Layers first, then analyses, subanalyses and leaf nodes. Each entity's sum
 * depends only on its own components, so the order only matters for logs.
 */

use tracing::debug;

use super::initializer::hierarchy;
use crate::shared::models::{DoiWeights, ProvGraph};

/// Recompute every entity's weighted sum. Returns the highest score seen.
pub fn compute_weighted_sums(graph: &mut ProvGraph, weights: &DoiWeights) -> f64 {
    let mut max = 0.0_f64;
    for id in hierarchy(graph) {
        max = max.max(graph.node_mut(id).doi.compute_weighted_sum(weights));
    }
    debug!(max_score = max, "Weighted sums recomputed");
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{DoiComponent, NodeData, NodeType, Payload};

    fn leaf(graph: &mut ProvGraph, id: i64) -> crate::shared::models::NodeId {
        let handle = graph.add_entity(
            id,
            Payload::Node(NodeData {
                uuid: format!("n{}", id),
                name: "n".to_string(),
                record_type: "Derived Data File".to_string(),
                node_type: NodeType::Intermediate,
                study: String::new(),
                assay: String::new(),
                parents: Vec::new(),
                analysis_uuid: "dataset".to_string(),
                subanalysis: None,
                file_url: None,
                attributes: Default::default(),
            }),
        );
        graph.nodes.push(handle);
        handle
    }

    #[test]
    fn test_sum_uses_active_weights_only() {
        let mut graph = ProvGraph::new();
        let n = leaf(&mut graph, 0);
        graph.node_mut(n).doi.filtered_changed(true);
        graph.node_mut(n).doi.selected_changed(true);

        let mut weights = DoiWeights::default();
        assert_eq!(compute_weighted_sums(&mut graph, &weights), 0.4);

        weights.set_active(DoiComponent::Selected, false);
        weights.redistribute();
        compute_weighted_sums(&mut graph, &weights);
        assert_eq!(graph.node(n).doi.weighted_sum, 0.25);
    }

    #[test]
    fn test_full_interest_caps_at_one() {
        let mut graph = ProvGraph::new();
        let n = leaf(&mut graph, 0);
        let doi = &mut graph.node_mut(n).doi;
        doi.filtered_changed(true);
        doi.selected_changed(true);
        doi.highlighted_changed(true);
        doi.init_time_component(1.0);
        doi.init_layer_diff_component(1.0);

        compute_weighted_sums(&mut graph, &DoiWeights::default());
        assert_eq!(graph.node(n).doi.weighted_sum, 1.0);
    }
}
