//! Motif diff
//!
//! Signed deltas of an analysis against its motif template. Analyses alone
//! in their layer have no baseline and keep a zero diff.

use tracing::debug;

use crate::shared::models::{MotifDiff, ProvGraph};

#[derive(Debug, Default)]
pub struct DiffComputer;

impl DiffComputer {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, graph: &mut ProvGraph) {
        let mut diverging = 0;
        for an in graph.analyses.clone() {
            let entity = graph.node(an);
            let Some(data) = entity.as_analysis() else {
                continue;
            };
            let (Some(layer), Some(motif)) = (data.layer, data.motif) else {
                continue;
            };
            if graph.node(layer).children.len() == 1 {
                continue;
            }

            let motif = graph.motif(motif);
            let diff = MotifDiff {
                num_subanalyses: entity.children.len() as i64 - motif.num_subanalyses as i64,
                num_ins: entity.pred_links.len() as i64 - motif.num_ins as i64,
                num_outs: entity.succ_links.len() as i64 - motif.num_outs as i64,
            };
            if diff != MotifDiff::default() {
                diverging += 1;
            }
            if let Some(data) = graph.node_mut(an).as_analysis_mut() {
                data.motif_diff = diff;
            }
        }
        debug!(diverging, "Motif diffs computed");
    }
}
