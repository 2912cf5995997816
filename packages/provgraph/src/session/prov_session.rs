//! Provenance visualization session
//!
//! Load runs the static pipeline once:
//!
//! ```text
//! records ─► GraphBuilder ─► SubanalysisPartitioner ─► HierarchyAssembler
//!         ─► analysis sort + layering ─► node/analysis positions
//!         ─► BarycenterReorderer ─► MotifDiscoveryEngine ─► DoiEngine
//!         ─► visible re-layering
//! ```
//!
//! Events then mutate flags and DOI components in place; every event runs to
//! completion before the next one is accepted.

use tracing::{debug, info};

use super::events::SessionEvent;
use super::snapshot::GraphSnapshot;
use crate::config::VisConfig;
use crate::errors::{ProvGraphError, Result};
use crate::features::doi::{DoiEngine, Toggle, VisibilityReport};
use crate::features::graph_builder::infrastructure::facet_attribute_names;
use crate::features::graph_builder::{
    apply_facet_documents, AnalysisRecord, BuildDiagnostics, FacetDocument, GraphBuilder,
    NodeRecord,
};
use crate::features::hierarchy::HierarchyAssembler;
use crate::features::interaction::{
    clear_highlight, clear_selection, highlight_path, select, set_attribute_filter,
    set_time_filter,
};
use crate::features::layering::{
    assign_layers, group_into_buckets, layout_analyses, layout_subanalysis_nodes,
    relayout_visible, BarycenterReorderer, LayerBuckets, ScopeView, TopologicalSorter,
};
use crate::features::motifs::{LayeringPolicy, MotifDiscoveryEngine};
use crate::features::partitioning::SubanalysisPartitioner;
use crate::shared::models::{NodeId, ProvGraph};
use crate::shared::utils::parse_timestamp;

pub struct ProvSession {
    graph: ProvGraph,
    config: VisConfig,
    doi: DoiEngine,
    /// Analysis-level buckets of the static layout
    buckets: LayerBuckets,
    /// Buckets of the last visible re-layering
    visible: LayerBuckets,
    diagnostics: BuildDiagnostics,
    attribute_names: Vec<String>,
}

impl ProvSession {
    /// Build the hierarchy, layout, motifs and initial DOI for one dataset
    pub fn load(
        dataset: Vec<NodeRecord>,
        analyses: Vec<AnalysisRecord>,
        facets: Vec<FacetDocument>,
        config: VisConfig,
    ) -> Result<Self> {
        config.validate()?;

        let (mut graph, diagnostics) = GraphBuilder::new().build(&dataset, &analyses)?;
        let partitions = SubanalysisPartitioner::new().partition(&mut graph);
        debug!(partitions, "Partitioned");
        HierarchyAssembler::new().assemble(&mut graph);

        let buckets = static_layout(&mut graph, &config)?;
        MotifDiscoveryEngine::new(config.layering.policy).run(&mut graph, &buckets);

        let attribute_names = facet_attribute_names(&facets);
        let annotated = apply_facet_documents(&mut graph, &facets);

        let doi = DoiEngine::new(&config.doi);
        doi.initialize(&mut graph);
        let visible = relayout_visible(&mut graph, &config.cell, config.layering.filter_action)?;

        info!(
            nodes = graph.nodes.len(),
            subanalyses = graph.subanalyses.len(),
            analyses = graph.analyses.len(),
            layers = graph.layers.len(),
            motifs = graph.motifs().len(),
            annotated,
            "Session loaded"
        );

        Ok(Self {
            graph,
            config,
            doi,
            buckets,
            visible,
            diagnostics,
            attribute_names,
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    pub fn graph(&self) -> &ProvGraph {
        &self.graph
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    pub fn doi(&self) -> &DoiEngine {
        &self.doi
    }

    pub fn buckets(&self) -> &LayerBuckets {
        &self.buckets
    }

    pub fn visible_buckets(&self) -> &LayerBuckets {
        &self.visible
    }

    pub fn diagnostics(&self) -> &BuildDiagnostics {
        &self.diagnostics
    }

    /// Facet attribute names seen on the first document
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn policy(&self) -> LayeringPolicy {
        self.config.layering.policy
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.graph, self.policy(), self.doi.weights())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Events
    // ═══════════════════════════════════════════════════════════════════

    pub fn handle(&mut self, event: SessionEvent) -> Result<()> {
        debug!(event = event.name(), "Handling event");

        match event {
            SessionEvent::Select { node } => {
                self.check_handle(node)?;
                select(&mut self.graph, node);
                self.graph.forget_folds();
                self.after_component_change()
            }
            SessionEvent::ClearSelection => {
                clear_selection(&mut self.graph);
                self.graph.forget_folds();
                self.after_component_change()
            }
            SessionEvent::HighlightPath { node, direction } => {
                self.check_handle(node)?;
                highlight_path(&mut self.graph, node, direction);
                self.after_component_change()
            }
            SessionEvent::ClearHighlight => {
                clear_highlight(&mut self.graph);
                self.after_component_change()
            }
            SessionEvent::SetTimeFilter { start, end } => {
                let start = parse_timestamp(&start)?;
                let end = parse_timestamp(&end)?;
                set_time_filter(&mut self.graph, start, end);
                self.after_filter_change()
            }
            SessionEvent::SetAttributeFilter { documents } => {
                set_attribute_filter(&mut self.graph, &documents);
                self.after_filter_change()
            }
            SessionEvent::Expand { node } => self.toggle(node, Toggle::Expand),
            SessionEvent::Collapse { node } => self.toggle(node, Toggle::Collapse),
            SessionEvent::SetLayeringPolicy { policy } => self.set_layering_policy(policy),
            SessionEvent::SetDoiWeight { component, value } => {
                self.doi.set_weight(component, value)?;
                self.after_component_change()
            }
            SessionEvent::SetComponentActive { component, active } => {
                self.doi.set_component_active(component, active);
                self.after_component_change()
            }
            SessionEvent::RedistributeWeights => {
                self.doi.redistribute();
                self.after_component_change()
            }
            SessionEvent::SetAutoUpdate { enabled } => {
                self.doi.set_auto_update(enabled);
                Ok(())
            }
            SessionEvent::RecomputeDoi => self.recompute_doi().map(|_| ()),
        }
    }

    /// Rescore every entity, run the visibility state machine and re-layer
    pub fn recompute_doi(&mut self) -> Result<VisibilityReport> {
        let (report, visible) = self.doi.recompute_doi(
            &mut self.graph,
            &self.config.cell,
            self.config.layering.filter_action,
        )?;
        self.visible = visible;
        Ok(report)
    }

    /// Rebuild motifs and layers under a new policy
    pub fn set_layering_policy(&mut self, policy: LayeringPolicy) -> Result<()> {
        info!(
            from = self.config.layering.policy.as_str(),
            to = policy.as_str(),
            "Layering policy changed"
        );
        self.config.layering.policy = policy;
        self.doi.reset_weights();

        MotifDiscoveryEngine::new(policy).run(&mut self.graph, &self.buckets);
        self.doi.initialize(&mut self.graph);
        self.relayout()
    }

    fn toggle(&mut self, node: NodeId, toggle: Toggle) -> Result<()> {
        self.check_handle(node)?;
        self.visible = self.doi.toggle(
            &mut self.graph,
            node,
            toggle,
            &self.config.cell,
            self.config.layering.filter_action,
        )?;
        Ok(())
    }

    fn after_component_change(&mut self) -> Result<()> {
        self.doi.compute_weighted_sums(&mut self.graph);
        if self.doi.auto_update() {
            self.recompute_doi()?;
        }
        Ok(())
    }

    fn after_filter_change(&mut self) -> Result<()> {
        self.graph.forget_folds();
        self.relayout()?;
        self.after_component_change()
    }

    fn relayout(&mut self) -> Result<()> {
        self.visible = relayout_visible(
            &mut self.graph,
            &self.config.cell,
            self.config.layering.filter_action,
        )?;
        Ok(())
    }

    fn check_handle(&self, node: NodeId) -> Result<()> {
        if node.index() < self.graph.entities().len() {
            Ok(())
        } else {
            Err(ProvGraphError::invalid_input(format!(
                "unknown entity {}",
                node
            )))
        }
    }
}

/// Analysis-level sort, layering, positions and barycenter ordering
fn static_layout(graph: &mut ProvGraph, config: &VisConfig) -> Result<LayerBuckets> {
    let view = ScopeView::graph(graph);
    let order = TopologicalSorter::new().sort(graph, &view)?;
    assign_layers(graph, &view, &order);
    let buckets = group_into_buckets(graph, &order);

    layout_subanalysis_nodes(graph, &config.cell)?;
    layout_analyses(graph, &buckets, &config.cell);
    BarycenterReorderer::new(&config.cell, config.layering.barycenter_epsilon)
        .reorder(graph, &buckets);

    info!(
        analyses = order.len(),
        columns = buckets.len(),
        "Static layout computed"
    );
    Ok(buckets)
}
