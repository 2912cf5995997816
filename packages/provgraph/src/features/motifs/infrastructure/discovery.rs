/*
 * Motif Discovery Engine
 *
 * Per depth group (analysis-level layer bucket), in start-time order:
 * - match the analysis against the motifs created in this group
 *   (weak: same workflow; strict: also same subanalysis / in / out counts
 *   and, for dataset-fed analyses, the same predecessor node set)
 * - otherwise create a motif from the analysis
 * Analyses sharing (predecessor motifs, own motif) in a group form a layer.
 */

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::diff::DiffComputer;
use super::layer_mapping::LayerMapper;
use crate::features::layering::LayerBuckets;
use crate::features::motifs::domain::LayeringPolicy;
use crate::shared::models::{LayerData, Motif, MotifId, NodeId, NodeKind, Payload, ProvGraph};

/// Structural signature of one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSignature {
    pub wf_uuid: String,
    pub preds: BTreeSet<NodeId>,
    pub succs: BTreeSet<NodeId>,
    pub num_ins: usize,
    pub num_outs: usize,
    pub num_subanalyses: usize,
    /// First predecessor is the dataset pseudo-analysis
    pub dataset_fed: bool,
}

impl AnalysisSignature {
    pub fn of(graph: &ProvGraph, analysis: NodeId) -> Self {
        let entity = graph.node(analysis);
        Self {
            wf_uuid: entity.wf_uuid().unwrap_or_default().to_string(),
            preds: entity
                .pred_links
                .iter()
                .map(|l| graph.link(*l).source)
                .collect(),
            succs: entity
                .succ_links
                .iter()
                .map(|l| graph.link(*l).target)
                .collect(),
            num_ins: entity.pred_links.len(),
            num_outs: entity.succ_links.len(),
            num_subanalyses: entity.children.len(),
            dataset_fed: matches!(
                (entity.preds.first(), graph.dataset),
                (Some(first), Some(dataset)) if *first == dataset
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MotifDiscoveryEngine {
    policy: LayeringPolicy,
}

impl MotifDiscoveryEngine {
    pub fn new(policy: LayeringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LayeringPolicy {
        self.policy
    }

    /// Rebuild motifs, layers, layer links and diffs from scratch
    pub fn run(&self, graph: &mut ProvGraph, buckets: &LayerBuckets) {
        graph.discard_layers();
        reset_visibility(graph);

        self.discover(graph, buckets);
        LayerMapper::new().map(graph);
        DiffComputer::new().compute(graph);

        info!(
            policy = %self.policy,
            motifs = graph.motifs().len(),
            layers = graph.layers.len(),
            layer_links = graph.layer_links.len(),
            "Motif discovery complete"
        );
    }

    /// Assign motifs and layers. Layers are appended to `graph.layers`.
    pub fn discover(&self, graph: &mut ProvGraph, buckets: &LayerBuckets) {
        let mut layer_id = graph.layers.len() as i64;

        for (depth, bucket) in buckets.iter().enumerate() {
            let mut group: Vec<NodeId> = bucket
                .iter()
                .copied()
                .filter(|an| graph.kind(*an) == NodeKind::Analysis)
                .collect();
            group.sort_by_key(|an| graph.node(*an).as_analysis().map(|a| a.start));

            let mut local: Vec<MotifId> = Vec::new();
            let mut assigned: Vec<(NodeId, MotifId)> = Vec::with_capacity(group.len());
            for &an in &group {
                let sig = AnalysisSignature::of(graph, an);
                let motif = match local
                    .iter()
                    .copied()
                    .find(|m| self.matches(graph.motif(*m), &sig))
                {
                    Some(found) => found,
                    None => {
                        let created = graph.add_motif(
                            sig.preds,
                            sig.succs,
                            sig.num_ins,
                            sig.num_outs,
                            sig.num_subanalyses,
                            sig.wf_uuid,
                        );
                        local.push(created);
                        created
                    }
                };
                if let Some(data) = graph.node_mut(an).as_analysis_mut() {
                    data.motif = Some(motif);
                }
                assigned.push((an, motif));
            }

            let mut layers_by_key: FxHashMap<String, NodeId> = FxHashMap::default();
            for (an, motif) in assigned {
                let key = layer_key(graph, an);
                let layer = match layers_by_key.get(&key) {
                    Some(&layer) => layer,
                    None => {
                        let layer = graph.add_entity(
                            layer_id,
                            Payload::Layer(LayerData {
                                motif,
                                wf_name: String::new(),
                                wf_code: String::new(),
                            }),
                        );
                        layer_id += 1;
                        graph.layers.push(layer);
                        layers_by_key.insert(key.clone(), layer);
                        debug!(depth, key = %key, layer = %layer, "Layer created");
                        layer
                    }
                };
                graph.node_mut(layer).children.push(an);
                if let Some(data) = graph.node_mut(an).as_analysis_mut() {
                    data.layer = Some(layer);
                }
            }
        }
    }

    fn matches(&self, motif: &Motif, sig: &AnalysisSignature) -> bool {
        if motif.wf_uuid != sig.wf_uuid {
            return false;
        }
        match self.policy {
            LayeringPolicy::Weak => true,
            LayeringPolicy::Strict => {
                motif.num_subanalyses == sig.num_subanalyses
                    && motif.num_ins == sig.num_ins
                    && motif.num_outs == sig.num_outs
                    && (!sig.dataset_fed || motif.preds == sig.preds)
            }
        }
    }
}

impl Default for MotifDiscoveryEngine {
    fn default() -> Self {
        Self::new(LayeringPolicy::default())
    }
}

/// Predecessor motif ids, then the analysis's own motif id
fn layer_key(graph: &ProvGraph, analysis: NodeId) -> String {
    let motif_of = |an: NodeId| {
        graph
            .node(an)
            .as_analysis()
            .and_then(|a| a.motif)
            .map(|m| m.index().to_string())
            .unwrap_or_default()
    };
    let preds: Vec<String> = graph
        .node(analysis)
        .preds
        .iter()
        .map(|p| motif_of(*p))
        .collect();
    format!("{}-{}", preds.join(","), motif_of(analysis))
}

/// Back to the load-time state: every non-layer entity and node link hidden
fn reset_visibility(graph: &mut ProvGraph) {
    let entities: Vec<NodeId> = graph
        .nodes
        .iter()
        .chain(&graph.subanalyses)
        .chain(&graph.analyses)
        .copied()
        .collect();
    for id in entities {
        graph.node_mut(id).hidden = true;
    }
    for link in graph.links.clone() {
        graph.link_mut(link).hidden = true;
    }
}
