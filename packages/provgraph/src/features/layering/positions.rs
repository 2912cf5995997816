//! Grid positions
//!
//! Leaf nodes are placed on a grid inside their subanalysis, analyses on a
//! grid over the whole graph: `x = layer * cell.width`, `y = row * cell.height`.

use tracing::debug;

use super::layer_assign::{assign_layers, group_into_buckets};
use super::scope::ScopeView;
use super::topo_sort::TopologicalSorter;
use super::LayerBuckets;
use crate::config::CellConfig;
use crate::errors::Result;
use crate::shared::models::ProvGraph;

/// Place buckets on the grid
pub(crate) fn place_buckets(graph: &mut ProvGraph, buckets: &LayerBuckets, cell: &CellConfig) {
    for (col, bucket) in buckets.iter().enumerate() {
        for (row, &member) in bucket.iter().enumerate() {
            let entity = graph.node_mut(member);
            entity.x = col as f64 * cell.width;
            entity.y = row as f64 * cell.height;
        }
    }
}

/// Lay out the leaf nodes of every subanalysis
pub fn layout_subanalysis_nodes(graph: &mut ProvGraph, cell: &CellConfig) -> Result<()> {
    let sorter = TopologicalSorter::new();
    for san in graph.subanalyses.clone() {
        let view = ScopeView::subanalysis(graph, san);
        let order = sorter.sort(graph, &view)?;
        assign_layers(graph, &view, &order);
        let buckets = group_into_buckets(graph, &order);
        place_buckets(graph, &buckets, cell);
    }
    debug!(subanalyses = graph.subanalyses.len(), "Node layout complete");
    Ok(())
}

/// Place analyses from the analysis-level buckets
pub fn layout_analyses(graph: &mut ProvGraph, buckets: &LayerBuckets, cell: &CellConfig) {
    place_buckets(graph, buckets, cell);
}
