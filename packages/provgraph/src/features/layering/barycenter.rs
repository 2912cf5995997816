//! Barycenter Reorderer
//!
//! Orders the subanalyses inside each analysis to reduce crossings.
//! Subanalyses with predecessors are ranked by the mean of
//! `pred.y + pred.parent.y`; equal barycenters are bumped by epsilon until
//! unique. The leftmost column (the dataset pseudo-analysis) has no
//! predecessors and is ranked by its successors instead.

use tracing::debug;

use super::LayerBuckets;
use crate::config::CellConfig;
use crate::shared::constants::layout::LEFT_COLUMN_ROW_DIVISOR;
use crate::shared::models::{NodeId, ProvGraph};

#[derive(Debug, Clone)]
pub struct BarycenterReorderer {
    row_height: f64,
    epsilon: f64,
}

impl BarycenterReorderer {
    pub fn new(cell: &CellConfig, epsilon: f64) -> Self {
        Self {
            row_height: cell.height,
            epsilon,
        }
    }

    pub fn reorder(&self, graph: &mut ProvGraph, buckets: &LayerBuckets) {
        for bucket in buckets {
            for &analysis in bucket {
                self.reorder_by_predecessors(graph, analysis);
            }
        }
        if let Some(&leftmost) = buckets.first().and_then(|b| b.first()) {
            self.reorder_by_successors(graph, leftmost);
        }
        debug!(columns = buckets.len(), "Barycenter reordering complete");
    }

    fn reorder_by_predecessors(&self, graph: &mut ProvGraph, analysis: NodeId) {
        let children = graph.node(analysis).children.clone();
        let mut used = Vec::new();
        let mut ranked = Vec::new();
        let mut unranked = Vec::new();

        for (j, &san) in children.iter().enumerate() {
            self.place(graph, san, j);

            let preds = &graph.node(san).preds;
            if preds.is_empty() {
                unranked.push(san);
                continue;
            }
            let acc: f64 = preds
                .iter()
                .map(|&p| {
                    let parent_y = graph.node(p).parent.map(|a| graph.node(a).y).unwrap_or(0.0);
                    graph.node(p).y + parent_y
                })
                .sum();
            let bc = self.unique(&mut used, acc / preds.len() as f64);
            graph.node_mut(san).bc_order = bc;
            ranked.push(san);
        }

        ranked.sort_by(|a, b| graph.node(*a).bc_order.total_cmp(&graph.node(*b).bc_order));
        ranked.extend(unranked);
        for (j, san) in ranked.into_iter().enumerate() {
            self.place(graph, san, j);
        }
    }

    fn reorder_by_successors(&self, graph: &mut ProvGraph, analysis: NodeId) {
        let children = graph.node(analysis).children.clone();
        let mut used = Vec::new();
        let mut loose = 0usize;

        for (j, &san) in children.iter().enumerate() {
            self.place(graph, san, j);

            let mut acc = 0.0;
            let mut degree = 0usize;
            for &succ in &graph.node(san).succs {
                let s = graph.node(succ);
                let parent_y = s.parent.map(|a| graph.node(a).y).unwrap_or(0.0);
                for &input in &s.inputs {
                    let fed_here = graph
                        .node(input)
                        .preds
                        .iter()
                        .any(|p| graph.node(*p).parent == Some(san));
                    if fed_here {
                        // subanalysis order dominates node order
                        acc += parent_y
                            + s.y
                            + (s.y / self.row_height) / LEFT_COLUMN_ROW_DIVISOR
                            + graph.node(input).y;
                        degree += 1;
                    }
                }
            }

            let bc = if degree == 0 {
                loose += 1;
                0.0
            } else {
                self.unique(&mut used, acc / degree as f64)
            };
            graph.node_mut(san).bc_order = bc;
        }

        let mut order = children;
        order.sort_by(|a, b| graph.node(*a).bc_order.total_cmp(&graph.node(*b).bc_order));
        // spread loose subanalyses over both ends
        let rotate = loose.div_ceil(2).min(order.len());
        order.rotate_left(rotate);
        for (j, san) in order.into_iter().enumerate() {
            self.place(graph, san, j);
        }
    }

    fn place(&self, graph: &mut ProvGraph, san: NodeId, row: usize) {
        let entity = graph.node_mut(san);
        entity.x = 0.0;
        entity.y = row as f64 * self.row_height;
    }

    /// Bump `value` by epsilon steps until no sibling uses it
    fn unique(&self, used: &mut Vec<f64>, value: f64) -> f64 {
        let mut delta = 0.0;
        let mut candidate = value;
        while used.contains(&candidate) {
            delta += self.epsilon;
            candidate = value + delta;
        }
        used.push(candidate);
        candidate
    }
}
