//! Layer ↔ analysis mapping
//!
//! Fills in layer boundaries, names, adjacency and layer links once every
//! analysis has a layer. Single-member layers start expanded so their
//! analysis is drawn directly.

use tracing::debug;

use crate::shared::constants::sentinel::DATASET_LABEL;
use crate::shared::models::{push_unique, LinkKind, NodeId, Payload, ProvGraph};

#[derive(Debug, Default)]
pub struct LayerMapper;

impl LayerMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map(&self, graph: &mut ProvGraph) {
        for layer in graph.layers.clone() {
            self.map_members(graph, layer);
        }
        for layer in graph.layers.clone() {
            self.map_adjacency(graph, layer);
        }
        self.create_layer_links(graph);
    }

    fn map_members(&self, graph: &mut ProvGraph, layer: NodeId) {
        let children = graph.node(layer).children.clone();
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        let mut links = Vec::new();
        for &an in &children {
            graph.node_mut(an).parent = Some(layer);
            let entity = graph.node(an);
            inputs.extend(entity.inputs.iter().copied());
            outputs.extend(entity.outputs.iter().copied());
            links.extend(entity.links.iter().copied());
        }

        let wf_name = graph
            .node(layer)
            .as_layer()
            .map(|l| graph.motif(l.motif).wf_uuid.as_str())
            .and_then(|wf| graph.workflow_data.get(wf))
            .and_then(|data| data.name.clone())
            .unwrap_or_else(|| DATASET_LABEL.to_string());
        let wf_code = children
            .first()
            .and_then(|an| graph.node(*an).as_analysis())
            .map(|a| a.wf_code.clone())
            .unwrap_or_default();

        if let [single] = children.as_slice() {
            let single = *single;
            graph.node_mut(single).hidden = false;
            for link in graph.node(single).pred_links.clone() {
                graph.link_mut(link).hidden = false;
            }
            for link in graph.node(single).succ_links.clone() {
                graph.link_mut(link).hidden = false;
            }
        }

        let entity = graph.node_mut(layer);
        entity.inputs = inputs;
        entity.outputs = outputs;
        entity.links = links;
        entity.hidden = children.len() <= 1;
        if let Payload::Layer(data) = &mut entity.payload {
            data.wf_name = wf_name;
            data.wf_code = wf_code;
        }
    }

    fn map_adjacency(&self, graph: &mut ProvGraph, layer: NodeId) {
        let mut preds = Vec::new();
        let mut succs = Vec::new();
        for &an in &graph.node(layer).children {
            let entity = graph.node(an);
            for p in entity.preds.iter().filter_map(|p| graph.node(*p).parent) {
                if p != layer {
                    push_unique(&mut preds, p);
                }
            }
            for s in entity.succs.iter().filter_map(|s| graph.node(*s).parent) {
                if s != layer {
                    push_unique(&mut succs, s);
                }
            }
        }
        let entity = graph.node_mut(layer);
        entity.preds = preds;
        entity.succs = succs;
    }

    /// One link per (layer, successor layer), hidden when either end is
    fn create_layer_links(&self, graph: &mut ProvGraph) {
        for source in graph.layers.clone() {
            for target in graph.node(source).succs.clone() {
                let hidden = graph.node(source).hidden || graph.node(target).hidden;
                let link = graph.add_link(LinkKind::Layer, source, target, hidden);
                graph.layer_links.push(link);
                graph.node_mut(source).succ_links.push(link);
                graph.node_mut(target).pred_links.push(link);
            }
        }
        debug!(layer_links = graph.layer_links.len(), "Layer links created");
    }
}
