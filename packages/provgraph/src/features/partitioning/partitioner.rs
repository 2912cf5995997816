//! Subanalysis Partitioner
//!
//! Each seed starts a new partition id and floods it over every unassigned
//! neighbour (predecessor or successor) recorded under the same analysis.
//! Seeds are the graph's input nodes first, then any node still unassigned,
//! in record order. The flood is an explicit worklist, so stack usage does
//! not grow with the graph.

use tracing::{debug, info};

use crate::shared::models::{NodeId, ProvGraph};

#[derive(Debug, Default)]
pub struct SubanalysisPartitioner {
    next_id: u32,
}

impl SubanalysisPartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a partition id to every leaf node. Returns the number of ids used.
    pub fn partition(mut self, graph: &mut ProvGraph) -> u32 {
        for handle in graph.nodes.clone() {
            if let Some(data) = graph.node_mut(handle).as_node_mut() {
                data.subanalysis = None;
            }
        }

        let seeds: Vec<NodeId> = graph
            .input_nodes
            .iter()
            .chain(graph.nodes.iter())
            .copied()
            .collect();

        for seed in seeds {
            if partition_of(graph, seed).is_some() {
                continue;
            }
            let id = self.next_id;
            self.next_id += 1;
            let size = flood(graph, seed, id);
            debug!(partition = id, seed = %seed, size, "Partition assigned");
        }

        info!(
            nodes = graph.nodes.len(),
            partitions = self.next_id,
            "Subanalysis partitioning complete"
        );
        self.next_id
    }
}

fn partition_of(graph: &ProvGraph, node: NodeId) -> Option<u32> {
    graph.node(node).as_node().and_then(|d| d.subanalysis)
}

fn assign(graph: &mut ProvGraph, node: NodeId, id: u32) {
    if let Some(data) = graph.node_mut(node).as_node_mut() {
        data.subanalysis = Some(id);
    }
}

/// Flood `id` from `seed` within its analysis. Returns the partition size.
fn flood(graph: &mut ProvGraph, seed: NodeId, id: u32) -> usize {
    let analysis = graph.analysis_uuid_of(seed).unwrap_or_default().to_string();
    let mut worklist = vec![seed];
    let mut size = 1;
    assign(graph, seed, id);

    while let Some(current) = worklist.pop() {
        let entity = graph.node(current);
        let neighbours: Vec<NodeId> = entity
            .preds
            .iter()
            .chain(entity.succs.iter())
            .copied()
            .filter(|n| {
                partition_of(graph, *n).is_none()
                    && graph.analysis_uuid_of(*n) == Some(analysis.as_str())
            })
            .collect();

        for neighbour in neighbours {
            // a node may be queued twice through different edges
            if partition_of(graph, neighbour).is_some() {
                continue;
            }
            assign(graph, neighbour, id);
            size += 1;
            worklist.push(neighbour);
        }
    }
    size
}
