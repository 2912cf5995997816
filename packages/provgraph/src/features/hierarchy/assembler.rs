/*
 * Hierarchy Assembler
 *
 * Groups partitioned nodes into subanalyses and subanalyses into analyses:
 * - boundary sets (inputs: no preds or preds outside the analysis,
 *   outputs: no succs or succs outside the analysis)
 * - subanalysis / analysis adjacency derived from boundary nodes
 * - internal links vs. inter-analysis links
 * - workflow display names
 */

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::naming::workflow_display_name;
use crate::shared::constants::sentinel::DATASET_LABEL;
use crate::shared::models::{push_unique, NodeId, Payload, ProvGraph, SubanalysisData};

#[derive(Debug, Default)]
pub struct HierarchyAssembler;

impl HierarchyAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, graph: &mut ProvGraph) {
        self.create_subanalyses(graph);
        self.set_subanalysis_boundaries(graph);
        self.set_subanalysis_adjacency(graph);
        self.split_links(graph);
        self.aggregate_analyses(graph);

        info!(
            subanalyses = graph.subanalyses.len(),
            analyses = graph.analyses.len(),
            analysis_links = graph.analysis_links.len(),
            "Hierarchy assembled"
        );
    }

    /// One subanalysis per (analysis, partition), in node order
    fn create_subanalyses(&self, graph: &mut ProvGraph) {
        let mut by_analysis: FxHashMap<String, Vec<NodeId>> = FxHashMap::default();
        for &node in &graph.nodes {
            if let Some(uuid) = graph.analysis_uuid_of(node) {
                by_analysis.entry(uuid.to_string()).or_default().push(node);
            }
        }

        let mut san_id = 0i64;
        for analysis in graph.analyses.clone() {
            let (uuid, wf_uuid) = match graph.node(analysis).as_analysis() {
                Some(data) => (data.uuid.clone(), data.wf_uuid.clone()),
                None => continue,
            };
            let members = by_analysis.remove(&uuid).unwrap_or_default();

            let mut by_partition: FxHashMap<u32, NodeId> = FxHashMap::default();
            for node in members {
                let partition = graph
                    .node(node)
                    .as_node()
                    .and_then(|d| d.subanalysis)
                    .unwrap_or_default();
                let san = match by_partition.get(&partition) {
                    Some(&san) => san,
                    None => {
                        let san = graph.add_entity(
                            san_id,
                            Payload::Subanalysis(SubanalysisData {
                                partition,
                                wf_uuid: wf_uuid.clone(),
                            }),
                        );
                        san_id += 1;
                        graph.subanalyses.push(san);
                        graph.node_mut(san).parent = Some(analysis);
                        graph.node_mut(analysis).children.push(san);
                        by_partition.insert(partition, san);
                        san
                    }
                };
                graph.node_mut(san).children.push(node);
                graph.node_mut(node).parent = Some(san);
            }
        }
    }

    fn set_subanalysis_boundaries(&self, graph: &mut ProvGraph) {
        for san in graph.subanalyses.clone() {
            let mut inputs = Vec::new();
            let mut outputs = Vec::new();
            for &node in &graph.node(san).children {
                let here = graph.analysis_uuid_of(node);
                let entity = graph.node(node);
                let foreign = |other: &NodeId| graph.analysis_uuid_of(*other) != here;

                if entity.preds.is_empty() || entity.preds.iter().any(foreign) {
                    inputs.push(node);
                }
                if entity.succs.is_empty() || entity.succs.iter().any(foreign) {
                    outputs.push(node);
                }
            }
            let entity = graph.node_mut(san);
            entity.inputs = inputs;
            entity.outputs = outputs;
        }
    }

    fn set_subanalysis_adjacency(&self, graph: &mut ProvGraph) {
        for san in graph.subanalyses.clone() {
            let mut preds = Vec::new();
            let mut succs = Vec::new();
            let mut pred_links = Vec::new();
            let mut succ_links = Vec::new();

            for &input in &graph.node(san).inputs {
                let node = graph.node(input);
                for &pred in &node.preds {
                    if let Some(parent) = graph.node(pred).parent.filter(|p| *p != san) {
                        push_unique(&mut preds, parent);
                    }
                }
                pred_links.extend(node.pred_links.iter().copied());
            }
            for &output in &graph.node(san).outputs {
                let node = graph.node(output);
                for &succ in &node.succs {
                    if let Some(parent) = graph.node(succ).parent.filter(|p| *p != san) {
                        push_unique(&mut succs, parent);
                    }
                }
                succ_links.extend(node.succ_links.iter().copied());
            }

            let entity = graph.node_mut(san);
            entity.preds = preds;
            entity.succs = succs;
            entity.pred_links = pred_links;
            entity.succ_links = succ_links;
        }
    }

    /// Links stay with the subanalysis of their source when the target is in
    /// the same analysis, otherwise they join the inter-analysis set
    fn split_links(&self, graph: &mut ProvGraph) {
        for link in graph.links.clone() {
            let (source, target) = {
                let l = graph.link(link);
                (l.source, l.target)
            };
            let Some(san) = graph.node(source).parent else {
                continue;
            };
            if graph.analysis_uuid_of(source) == graph.analysis_uuid_of(target) {
                graph.node_mut(san).links.push(link);
            } else {
                graph.analysis_links.push(link);
            }
        }
    }

    fn aggregate_analyses(&self, graph: &mut ProvGraph) {
        for analysis in graph.analyses.clone() {
            let children = graph.node(analysis).children.clone();

            let mut inputs = Vec::new();
            let mut outputs = Vec::new();
            let mut links = Vec::new();
            let mut preds = Vec::new();
            let mut succs = Vec::new();
            for &san in &children {
                let entity = graph.node(san);
                inputs.extend(entity.inputs.iter().copied());
                outputs.extend(entity.outputs.iter().copied());
                links.extend(entity.links.iter().copied());
                for p in entity.preds.iter().filter_map(|s| graph.node(*s).parent) {
                    if p != analysis {
                        push_unique(&mut preds, p);
                    }
                }
                for s in entity.succs.iter().filter_map(|s| graph.node(*s).parent) {
                    if s != analysis {
                        push_unique(&mut succs, s);
                    }
                }
            }

            let mut pred_links = Vec::new();
            for input in &inputs {
                pred_links.extend(graph.node(*input).pred_links.iter().copied());
            }
            let mut succ_links = Vec::new();
            for output in &outputs {
                succ_links.extend(graph.node(*output).succ_links.iter().copied());
            }

            let wf_name = graph
                .node(analysis)
                .wf_uuid()
                .and_then(|wf| graph.workflow_data.get(wf))
                .and_then(|data| data.name.as_deref())
                .map(str::to_string);
            let code = workflow_display_name(wf_name.as_deref());

            let entity = graph.node_mut(analysis);
            entity.inputs = inputs;
            entity.outputs = outputs;
            entity.links = links;
            entity.preds = preds;
            entity.succs = succs;
            entity.pred_links = pred_links;
            entity.succ_links = succ_links;
            if let Some(data) = entity.as_analysis_mut() {
                data.wf_name = wf_name.unwrap_or_else(|| DATASET_LABEL.to_string());
                data.wf_code = code;
                debug!(analysis = %data.uuid, code = %data.wf_code, "Analysis assembled");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::graph_builder::{AnalysisRecord, GraphBuilder, NodeRecord};
    use crate::features::partitioning::SubanalysisPartitioner;
    use crate::shared::models::NodeKind;

    fn assembled() -> ProvGraph {
        let records = vec![
            NodeRecord::new("in", "Raw Data File"),
            NodeRecord::new("step", "Data Transformation Name")
                .with_parents(["in"])
                .with_analysis("an-1"),
            NodeRecord::new("out", "Derived Data File")
                .with_parents(["step"])
                .with_analysis("an-1"),
            NodeRecord::new("step2", "Data Transformation Name")
                .with_parents(["out"])
                .with_analysis("an-2"),
            NodeRecord::new("out2", "Derived Data File")
                .with_parents(["step2"])
                .with_analysis("an-2"),
        ];
        let analyses = vec![
            AnalysisRecord::new("an-1", "wf-1", "2016-01-01T00:00:00")
                .with_workflow_copy("{u'name': u'Test workflow: Align (bwa)'}"),
            AnalysisRecord::new("an-2", "wf-2", "2016-01-02T00:00:00"),
        ];
        let (mut graph, _) = GraphBuilder::new().build(&records, &analyses).unwrap();
        SubanalysisPartitioner::new().partition(&mut graph);
        HierarchyAssembler::new().assemble(&mut graph);
        graph
    }

    #[test]
    fn test_every_node_has_subanalysis_and_analysis() {
        let graph = assembled();
        for &node in &graph.nodes {
            let san = graph.node(node).parent.unwrap();
            assert_eq!(graph.kind(san), NodeKind::Subanalysis);
            let an = graph.node(san).parent.unwrap();
            assert_eq!(graph.kind(an), NodeKind::Analysis);
        }
        assert_eq!(graph.subanalyses.len(), 3);
    }

    #[test]
    fn test_boundaries_and_inter_analysis_links() {
        let graph = assembled();
        let an1 = graph.analysis_by_uuid["an-1"];
        let step = graph.node_by_uuid["step"];
        let out = graph.node_by_uuid["out"];

        assert_eq!(graph.node(an1).inputs, vec![step]);
        assert_eq!(graph.node(an1).outputs, vec![out]);
        assert_eq!(graph.node(an1).links.len(), 1);
        // in → step and out → step2
        assert_eq!(graph.analysis_links.len(), 2);
    }

    #[test]
    fn test_analysis_adjacency_excludes_self() {
        let graph = assembled();
        let dataset = graph.dataset.unwrap();
        let an1 = graph.analysis_by_uuid["an-1"];
        let an2 = graph.analysis_by_uuid["an-2"];

        assert_eq!(graph.node(an1).preds, vec![dataset]);
        assert_eq!(graph.node(an1).succs, vec![an2]);
        assert_eq!(graph.node(an2).preds, vec![an1]);
        assert!(!graph.node(an1).preds.contains(&an1));
        assert_eq!(graph.node(an1).pred_links.len(), 1);
    }

    #[test]
    fn test_workflow_names() {
        let graph = assembled();
        let an1 = graph.node(graph.analysis_by_uuid["an-1"]).as_analysis().unwrap();
        let an2 = graph.node(graph.analysis_by_uuid["an-2"]).as_analysis().unwrap();
        assert_eq!(an1.wf_name, "Test workflow: Align (bwa)");
        assert_eq!(an1.wf_code, "Align");
        assert_eq!(an2.wf_name, "dataset");
        assert_eq!(an2.wf_code, "dataset");
    }
}
