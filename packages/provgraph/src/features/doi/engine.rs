//! DOI engine
//!
//! Owns the live weights and thresholds of a session. Graph state stays in
//! [`ProvGraph`]; the engine only reads and writes entity components.

use tracing::{debug, info};

use super::domain::DoiThresholds;
use super::infrastructure::{
    compute_weighted_sums, fold, init_filter_component, init_layer_diff_component,
    init_time_component, unfold, VisibilityReport, VisibilityStateMachine,
};
use crate::config::{CellConfig, DoiConfig, FilterAction};
use crate::errors::{ProvGraphError, Result};
use crate::features::layering::{relayout_visible, LayerBuckets};
use crate::shared::models::{DoiComponent, DoiWeights, NodeId, ProvGraph};

/// Direction of a user-triggered visibility toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expand,
    Collapse,
}

#[derive(Debug, Clone)]
pub struct DoiEngine {
    weights: DoiWeights,
    thresholds: DoiThresholds,
    auto_update: bool,
}

impl DoiEngine {
    pub fn new(config: &DoiConfig) -> Self {
        Self {
            weights: config.weights.clone(),
            thresholds: config.thresholds,
            auto_update: config.auto_update,
        }
    }

    pub fn weights(&self) -> &DoiWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &DoiThresholds {
        &self.thresholds
    }

    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    pub fn set_auto_update(&mut self, enabled: bool) {
        self.auto_update = enabled;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Components
    // ═══════════════════════════════════════════════════════════════════

    /// Seed filter, time and diff components, then score every entity
    pub fn initialize(&self, graph: &mut ProvGraph) {
        init_filter_component(graph);
        init_time_component(graph);
        init_layer_diff_component(graph);
        compute_weighted_sums(graph, &self.weights);
    }

    pub fn compute_weighted_sums(&self, graph: &mut ProvGraph) -> f64 {
        compute_weighted_sums(graph, &self.weights)
    }

    /// Rescore, run the state machine, then re-layer the visible view
    pub fn recompute_doi(
        &self,
        graph: &mut ProvGraph,
        cell: &CellConfig,
        filter_action: FilterAction,
    ) -> Result<(VisibilityReport, LayerBuckets)> {
        compute_weighted_sums(graph, &self.weights);
        let report = VisibilityStateMachine::new(&self.thresholds).run(graph);
        let buckets = relayout_visible(graph, cell, filter_action)?;
        Ok((report, buckets))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Weights
    // ═══════════════════════════════════════════════════════════════════

    pub fn set_weight(&mut self, component: DoiComponent, value: f64) -> Result<()> {
        if !self.weights.set_weight(component, value) {
            return Err(ProvGraphError::invalid_input(format!(
                "DOI component '{}' is inactive",
                component
            )));
        }
        debug!(component = %component, value, "DOI weight set");
        Ok(())
    }

    pub fn set_component_active(&mut self, component: DoiComponent, active: bool) {
        self.weights.set_active(component, active);
        debug!(component = %component, active, "DOI component toggled");
    }

    pub fn redistribute(&mut self) {
        self.weights.redistribute();
        info!(
            active = self.weights.active_count(),
            sum = self.weights.active_sum(),
            "DOI weights redistributed"
        );
    }

    pub fn reset_weights(&mut self) {
        self.weights.reset();
    }

    // ═══════════════════════════════════════════════════════════════════
    // User toggles
    // ═══════════════════════════════════════════════════════════════════

    /// Expand or collapse on request, then re-layer the visible view
    pub fn toggle(
        &self,
        graph: &mut ProvGraph,
        id: NodeId,
        toggle: Toggle,
        cell: &CellConfig,
        filter_action: FilterAction,
    ) -> Result<LayerBuckets> {
        let applied = match toggle {
            Toggle::Expand => unfold(graph, id),
            Toggle::Collapse => fold(graph, id),
        };
        if !applied {
            return Err(ProvGraphError::invalid_input(format!(
                "cannot {:?} {} ({})",
                toggle,
                graph.node(id).label(),
                graph.kind(id).as_str()
            )));
        }
        relayout_visible(graph, cell, filter_action)
    }
}
