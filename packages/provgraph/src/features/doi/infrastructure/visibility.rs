//! DOI-driven visibility state machine
//!
//! One pass per hierarchy level, outermost first. Every transition goes
//! through [`expand`]/[`collapse`]; re-layering is left to the caller.

use tracing::{debug, info};

use super::expand_collapse::{collapse, expand};
use crate::features::doi::domain::DoiThresholds;
use crate::shared::models::{NodeId, NodeKind, ProvGraph};

/// Number of transitions applied by one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityReport {
    pub expanded: usize,
    pub collapsed: usize,
    pub exaggerated: usize,
}

impl VisibilityReport {
    pub fn total(&self) -> usize {
        self.expanded + self.collapsed
    }
}

pub struct VisibilityStateMachine<'a> {
    thresholds: &'a DoiThresholds,
    report: VisibilityReport,
}

impl<'a> VisibilityStateMachine<'a> {
    pub fn new(thresholds: &'a DoiThresholds) -> Self {
        Self {
            thresholds,
            report: VisibilityReport::default(),
        }
    }

    pub fn run(mut self, graph: &mut ProvGraph) -> VisibilityReport {
        graph.forget_folds();
        self.layers(graph);
        self.analyses(graph);
        self.leaves(graph);
        self.subanalyses(graph);

        info!(
            expanded = self.report.expanded,
            collapsed = self.report.collapsed,
            exaggerated = self.report.exaggerated,
            "Visibility updated"
        );
        self.report
    }

    fn layers(&mut self, graph: &mut ProvGraph) {
        for layer in graph.layers.clone() {
            if self.expandable(graph, layer, self.thresholds.layer_expand) {
                self.expand(graph, layer);
            }
        }
    }

    fn analyses(&mut self, graph: &mut ProvGraph) {
        for an in graph.analyses.clone() {
            if self.expandable(graph, an, self.thresholds.analysis_expand) {
                self.expand(graph, an);
                continue;
            }

            let entity = graph.node(an);
            let Some(layer) = entity.parent else {
                continue;
            };
            if entity.doi.weighted_sum >= self.thresholds.analysis_collapse
                || entity.hidden
                || graph.node(layer).children.len() <= 1
            {
                continue;
            }

            self.collapse(graph, an);
            if graph.node(layer).filtered {
                self.exaggerate_siblings(graph, layer);
            }
        }
    }

    /// Keep interesting members of a collapsed layer on screen
    fn exaggerate_siblings(&mut self, graph: &mut ProvGraph, layer: NodeId) {
        for sibling in graph.node(layer).children.clone() {
            let score = graph.node(sibling).doi.weighted_sum;
            let exaggerate = score >= self.thresholds.exaggerate;

            let entity = graph.node_mut(sibling);
            if let Some(data) = entity.as_analysis_mut() {
                data.exaggerated = exaggerate;
            }
            entity.hidden = !exaggerate;

            if exaggerate {
                self.report.exaggerated += 1;
                debug!(analysis = %sibling, score, "Exaggerated");
                if self.expandable(graph, sibling, self.thresholds.analysis_expand) {
                    self.expand(graph, sibling);
                }
            }
        }
    }

    fn leaves(&mut self, graph: &mut ProvGraph) {
        for san in graph.subanalyses.clone() {
            let Some(&first) = graph.node(san).children.first() else {
                continue;
            };
            let max = max_child_score(graph, san);
            if max < self.thresholds.leaf_collapse
                && (all_parents_hidden(graph, first) || analysis_exaggerated(graph, san))
            {
                self.collapse(graph, first);
            }
        }
    }

    fn subanalyses(&mut self, graph: &mut ProvGraph) {
        for san in graph.subanalyses.clone() {
            if self.expandable(graph, san, self.thresholds.subanalysis_expand) {
                self.expand(graph, san);
                continue;
            }

            let Some(an) = graph.node(san).parent else {
                continue;
            };
            let max = max_child_score(graph, an);
            if max < self.thresholds.subanalysis_collapse
                && (all_parents_hidden(graph, san) || analysis_exaggerated(graph, san))
            {
                self.collapse(graph, san);
            }
        }
    }

    /// Collapsed aggregate inside the filter result scoring at least `threshold`
    fn expandable(&self, graph: &ProvGraph, id: NodeId, threshold: f64) -> bool {
        let entity = graph.node(id);
        entity.doi.weighted_sum >= threshold && !entity.hidden && entity.filtered
    }

    fn expand(&mut self, graph: &mut ProvGraph, id: NodeId) {
        if expand(graph, id) {
            self.report.expanded += 1;
        }
    }

    fn collapse(&mut self, graph: &mut ProvGraph, id: NodeId) {
        if collapse(graph, id) {
            self.report.collapsed += 1;
        }
    }
}

/// Every ancestor up to (and including) the layer is expanded
pub fn all_parents_hidden(graph: &ProvGraph, id: NodeId) -> bool {
    let mut cur = id;
    while graph.kind(cur) != NodeKind::Layer {
        let Some(parent) = graph.node(cur).parent else {
            break;
        };
        if !graph.node(parent).hidden {
            return false;
        }
        cur = parent;
    }
    true
}

fn max_child_score(graph: &ProvGraph, id: NodeId) -> f64 {
    graph
        .node(id)
        .children
        .iter()
        .map(|c| graph.node(*c).doi.weighted_sum)
        .fold(0.0, f64::max)
}

fn analysis_exaggerated(graph: &ProvGraph, san: NodeId) -> bool {
    graph
        .node(san)
        .parent
        .map(|an| graph.node(an).is_exaggerated())
        .unwrap_or(false)
}
