//! Initial component values
//!
//! Filter, time and structural-diff components are seeded once after the
//! hierarchy and layers exist, and again after a layering policy change.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::shared::models::{NodeId, ProvGraph};

/// Every entity starts inside the filter result
pub fn init_filter_component(graph: &mut ProvGraph) {
    for id in hierarchy(graph) {
        let entity = graph.node_mut(id);
        entity.filtered = true;
        entity.doi.filtered_changed(true);
    }
    let links: Vec<_> = graph
        .links
        .iter()
        .chain(graph.layer_links.iter())
        .copied()
        .collect();
    for link in links {
        graph.link_mut(link).filtered = true;
    }
}

/// Linear map of analysis start times onto [0, 1]
pub fn init_time_component(graph: &mut ProvGraph) {
    let starts: Vec<i64> = graph
        .analyses
        .iter()
        .filter_map(|&an| graph.node(an).as_analysis().map(|a| millis(a.start)))
        .collect();
    let scale = LinearScale::over(&starts);

    for an in graph.analyses.clone() {
        let Some(start) = graph.node(an).as_analysis().map(|a| millis(a.start)) else {
            continue;
        };
        let value = scale.map(start as f64);
        for id in std::iter::once(an).chain(graph.descendants(an)) {
            graph.node_mut(id).doi.init_time_component(value);
        }
    }

    for layer in graph.layers.clone() {
        let children = &graph.node(layer).children;
        if children.is_empty() {
            continue;
        }
        let mean = children.iter().map(|c| graph.node(*c).doi.time).sum::<f64>()
            / children.len() as f64;
        graph.node_mut(layer).doi.init_time_component(mean);
    }

    debug!(
        analyses = starts.len(),
        degenerate = scale.is_degenerate(),
        "Time component initialized"
    );
}

/// Structural deltas against the motif, scaled by the largest single delta
pub fn init_layer_diff_component(graph: &mut ProvGraph) {
    let max = graph
        .analyses
        .iter()
        .filter_map(|&an| graph.node(an).as_analysis())
        .map(|a| a.motif_diff.max_abs())
        .max()
        .unwrap_or(0);

    for an in graph.analyses.clone() {
        let Some(diff) = graph.node(an).as_analysis().map(|a| a.motif_diff) else {
            continue;
        };
        let value = if max > 0 {
            diff.magnitude() as f64 / max as f64
        } else {
            0.0
        };
        for id in std::iter::once(an).chain(graph.descendants(an)) {
            graph.node_mut(id).doi.init_layer_diff_component(value);
        }
    }

    for layer in graph.layers.clone() {
        let value = graph
            .node(layer)
            .children
            .iter()
            .map(|c| graph.node(*c).doi.layer_diff)
            .fold(0.0, f64::max);
        graph.node_mut(layer).doi.init_layer_diff_component(value);
    }

    debug!(max_delta = max, "Diff component initialized");
}

/// Layers, analyses, subanalyses and nodes, outermost first
pub(crate) fn hierarchy(graph: &ProvGraph) -> Vec<NodeId> {
    graph
        .layers
        .iter()
        .chain(graph.analyses.iter())
        .chain(graph.subanalyses.iter())
        .chain(graph.nodes.iter())
        .copied()
        .collect()
}

fn millis(t: DateTime<Utc>) -> i64 {
    t.timestamp_millis()
}

struct LinearScale {
    min: f64,
    max: f64,
}

impl LinearScale {
    fn over(values: &[i64]) -> Self {
        if values.len() < 2 {
            return Self { min: 0.0, max: 0.0 };
        }
        let min = values.iter().copied().min().unwrap_or(0) as f64;
        let max = values.iter().copied().max().unwrap_or(0) as f64;
        Self { min, max }
    }

    fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    fn map(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{AnalysisData, MotifDiff, Payload};
    use chrono::TimeZone;

    fn analysis(graph: &mut ProvGraph, id: i64, secs: i64, diff: MotifDiff) -> NodeId {
        let start = Utc.timestamp_opt(secs, 0).single().unwrap();
        let handle = graph.add_entity(
            id,
            Payload::Analysis(AnalysisData {
                uuid: format!("an-{}", id),
                wf_uuid: "wf".to_string(),
                start,
                end: start,
                created: start,
                wf_name: "wf".to_string(),
                wf_code: "wf".to_string(),
                layer: None,
                motif: None,
                exaggerated: false,
                motif_diff: diff,
            }),
        );
        graph.analyses.push(handle);
        handle
    }

    #[test]
    fn test_time_scale_spans_unit_interval() {
        let mut graph = ProvGraph::new();
        let a = analysis(&mut graph, 0, 100, MotifDiff::default());
        let b = analysis(&mut graph, 1, 150, MotifDiff::default());
        let c = analysis(&mut graph, 2, 200, MotifDiff::default());

        init_time_component(&mut graph);

        assert_eq!(graph.node(a).doi.time, 0.0);
        assert!((graph.node(b).doi.time - 0.5).abs() < 1e-9);
        assert_eq!(graph.node(c).doi.time, 1.0);
    }

    #[test]
    fn test_single_analysis_time_is_zero() {
        let mut graph = ProvGraph::new();
        let a = analysis(&mut graph, 0, 100, MotifDiff::default());
        init_time_component(&mut graph);
        assert_eq!(graph.node(a).doi.time, 0.0);
    }

    #[test]
    fn test_diff_scaled_by_largest_single_delta_and_clamped() {
        let mut graph = ProvGraph::new();
        let quiet = analysis(&mut graph, 0, 0, MotifDiff::default());
        let loud = analysis(
            &mut graph,
            1,
            0,
            MotifDiff {
                num_subanalyses: 2,
                num_ins: -1,
                num_outs: 0,
            },
        );
        let mild = analysis(
            &mut graph,
            2,
            0,
            MotifDiff {
                num_subanalyses: 0,
                num_ins: 1,
                num_outs: 0,
            },
        );

        init_layer_diff_component(&mut graph);

        assert_eq!(graph.node(quiet).doi.layer_diff, 0.0);
        assert_eq!(graph.node(loud).doi.layer_diff, 1.0);
        assert!((graph.node(mild).doi.layer_diff - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_filter_init_marks_everything() {
        let mut graph = ProvGraph::new();
        let a = analysis(&mut graph, 0, 0, MotifDiff::default());
        graph.node_mut(a).filtered = false;
        init_filter_component(&mut graph);
        assert!(graph.node(a).filtered);
        assert_eq!(graph.node(a).doi.filtered, 1.0);
    }
}
