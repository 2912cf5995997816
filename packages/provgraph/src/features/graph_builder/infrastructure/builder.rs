//! Graph Builder
//!
//! Records → arena entities:
//! 1. leaf nodes (record order, id = record index)
//! 2. dataset pseudo-analysis plus one analysis per record
//! 3. workflow payloads
//! 4. parent references → node links, then adjacency and input/output sets
//!
//! Unresolvable references are recoverable: they are logged, counted in
//! [`BuildDiagnostics`] and skipped.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info, warn};

use super::node_factory::NodeFactory;
use super::workflow::parse_workflow;
use crate::errors::Result;
use crate::features::graph_builder::domain::{AnalysisRecord, BuildDiagnostics, NodeRecord};
use crate::shared::constants::sentinel::DATASET_UUID;
use crate::shared::models::{push_unique, AnalysisData, LinkKind, MotifDiff, Payload, ProvGraph};
use crate::shared::utils::parse_timestamp;

#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: ProvGraph,
    diagnostics: BuildDiagnostics,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build leaf nodes, analyses and node links
    pub fn build(
        mut self,
        records: &[NodeRecord],
        analyses: &[AnalysisRecord],
    ) -> Result<(ProvGraph, BuildDiagnostics)> {
        self.extract_nodes(records);
        self.extract_analyses(analyses)?;
        self.extract_workflows(analyses)?;
        self.reassign_orphans();
        self.extract_links();
        self.map_adjacency();

        info!(
            nodes = self.graph.nodes.len(),
            links = self.graph.links.len(),
            analyses = self.graph.analyses.len(),
            inputs = self.graph.input_nodes.len(),
            outputs = self.graph.output_nodes.len(),
            "Graph built"
        );
        if !self.diagnostics.is_clean() {
            warn!(diagnostics = ?self.diagnostics, "Dataset has recoverable problems");
        }

        Ok((self.graph, self.diagnostics))
    }

    fn extract_nodes(&mut self, records: &[NodeRecord]) {
        for (index, record) in records.iter().enumerate() {
            let Some(data) = NodeFactory::create(record) else {
                error!(index, "Node uuid is undefined, record skipped");
                self.diagnostics.missing_uuid += 1;
                continue;
            };
            if record.parents.is_none() {
                error!(uuid = %data.uuid, "Parents array of node is undefined");
                self.diagnostics.missing_parents += 1;
            }

            let uuid = data.uuid.clone();
            let handle = self.graph.add_entity(index as i64, Payload::Node(data));
            self.graph.nodes.push(handle);
            self.graph.node_by_uuid.insert(uuid, handle);
        }
    }

    fn extract_analyses(&mut self, analyses: &[AnalysisRecord]) -> Result<()> {
        let mut parsed = Vec::with_capacity(analyses.len());
        for record in analyses {
            parsed.push((
                parse_timestamp(&record.time_start)?,
                parse_timestamp(&record.time_end)?,
                parse_timestamp(&record.creation_date)?,
            ));
        }

        // The dataset has no timing of its own: one second before the first run
        let init = parsed
            .iter()
            .map(|(start, _, _)| *start)
            .min()
            .map(|earliest| earliest - Duration::seconds(1))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        self.push_analysis(0, DATASET_UUID, DATASET_UUID, (init, init, init));
        for (i, (record, times)) in analyses.iter().zip(parsed).enumerate() {
            self.push_analysis(i + 1, &record.uuid, &record.workflow_uuid, times);
        }
        Ok(())
    }

    fn push_analysis(
        &mut self,
        index: usize,
        uuid: &str,
        wf_uuid: &str,
        (start, end, created): (DateTime<Utc>, DateTime<Utc>, DateTime<Utc>),
    ) {
        let handle = self.graph.add_entity(
            index as i64,
            Payload::Analysis(AnalysisData {
                uuid: uuid.to_string(),
                wf_uuid: wf_uuid.to_string(),
                start,
                end,
                created,
                wf_name: String::new(),
                wf_code: String::new(),
                layer: None,
                motif: None,
                exaggerated: false,
                motif_diff: MotifDiff::default(),
            }),
        );
        if index == 0 {
            self.graph.dataset = Some(handle);
        }
        self.graph.analyses.push(handle);
        self.graph
            .analysis_by_uuid
            .insert(uuid.to_string(), handle);
        self.graph
            .analysis_workflow
            .insert(uuid.to_string(), wf_uuid.to_string());
    }

    fn extract_workflows(&mut self, analyses: &[AnalysisRecord]) -> Result<()> {
        for record in analyses {
            match record.workflow_copy.as_deref() {
                Some(raw) if !raw.trim().is_empty() => {
                    let data = parse_workflow(&record.uuid, raw)?;
                    debug!(workflow = %record.workflow_uuid, name = ?data.name, "Workflow parsed");
                    self.graph
                        .workflow_data
                        .insert(record.workflow_uuid.clone(), data);
                }
                _ => {
                    warn!(analysis = %record.uuid, "Analysis has no workflow definition");
                    self.diagnostics.missing_workflows += 1;
                }
            }
        }
        Ok(())
    }

    /// Nodes recorded under an unknown analysis are attached to the dataset
    fn reassign_orphans(&mut self) {
        for handle in self.graph.nodes.clone() {
            let known = self
                .graph
                .analysis_uuid_of(handle)
                .map(|uuid| self.graph.analysis_by_uuid.contains_key(uuid))
                .unwrap_or(true);
            if known {
                continue;
            }
            if let Some(data) = self.graph.node_mut(handle).as_node_mut() {
                warn!(
                    node = %data.uuid,
                    analysis = %data.analysis_uuid,
                    "Node refers to unknown analysis, attached to dataset"
                );
                data.analysis_uuid = DATASET_UUID.to_string();
            }
            self.diagnostics.unknown_analysis += 1;
        }
    }

    fn extract_links(&mut self) {
        for target in self.graph.nodes.clone() {
            let parents = match self.graph.node(target).as_node() {
                Some(data) => data.parents.clone(),
                None => continue,
            };
            for parent_uuid in parents {
                match self.graph.node_by_uuid.get(&parent_uuid).copied() {
                    Some(source) => {
                        let link = self.graph.add_link(LinkKind::Node, source, target, true);
                        self.graph.links.push(link);
                    }
                    None => {
                        error!(
                            parent = %parent_uuid,
                            node = %self.graph.node(target).label(),
                            "Dataset might be corrupt, parent does not exist"
                        );
                        self.diagnostics.dangling_parents += 1;
                    }
                }
            }
        }
    }

    fn map_adjacency(&mut self) {
        for link in self.graph.links.clone() {
            let (source, target) = {
                let l = self.graph.link(link);
                (l.source, l.target)
            };
            let src = self.graph.node_mut(source);
            push_unique(&mut src.succs, target);
            src.succ_links.push(link);
            let tgt = self.graph.node_mut(target);
            push_unique(&mut tgt.preds, source);
            tgt.pred_links.push(link);
        }

        for handle in self.graph.nodes.clone() {
            let node = self.graph.node(handle);
            if node.succs.is_empty() {
                self.graph.output_nodes.push(handle);
            } else if node.preds.is_empty() {
                self.graph.input_nodes.push(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{NodeKind, NodeType};

    fn records() -> Vec<NodeRecord> {
        vec![
            NodeRecord::new("src", "Source Name"),
            NodeRecord::new("raw", "Raw Data File")
                .with_parents(["src"])
                .with_file_url("http://files/raw"),
            NodeRecord::new("dt", "Data Transformation Name")
                .with_parents(["raw"])
                .with_analysis("an-1"),
            NodeRecord::new("out", "Derived Data File")
                .with_parents(["dt"])
                .with_analysis("an-1"),
        ]
    }

    fn analyses() -> Vec<AnalysisRecord> {
        vec![AnalysisRecord::new("an-1", "wf-1", "2016-03-01T10:00:00")
            .with_workflow_copy("{u'name': u'Test workflow: Align (bwa)'}")]
    }

    #[test]
    fn test_build_links_and_adjacency() {
        let (graph, diagnostics) = GraphBuilder::new().build(&records(), &analyses()).unwrap();

        assert!(diagnostics.is_clean());
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.links.len(), 3);
        assert_eq!(graph.analyses.len(), 2);

        let raw = graph.node_by_uuid["raw"];
        let src = graph.node_by_uuid["src"];
        assert_eq!(graph.node(raw).preds, vec![src]);
        assert_eq!(graph.node(src).succs, vec![raw]);
        assert_eq!(graph.node(raw).as_node().unwrap().node_type, NodeType::Stored);

        assert_eq!(graph.input_nodes, vec![src]);
        assert_eq!(graph.output_nodes, vec![graph.node_by_uuid["out"]]);
    }

    #[test]
    fn test_referential_integrity() {
        let (graph, _) = GraphBuilder::new().build(&records(), &analyses()).unwrap();
        for link in &graph.links {
            let l = graph.link(*link);
            assert_eq!(graph.kind(l.source), NodeKind::Node);
            assert_eq!(graph.kind(l.target), NodeKind::Node);
        }
    }

    #[test]
    fn test_dangling_parent_and_missing_uuid_are_recoverable() {
        let mut recs = records();
        recs.push(NodeRecord::new("lost", "Raw Data File").with_parents(["nowhere"]));
        recs.push(NodeRecord {
            uuid: None,
            ..NodeRecord::new("x", "Raw Data File")
        });

        let (graph, diagnostics) = GraphBuilder::new().build(&recs, &analyses()).unwrap();
        assert_eq!(diagnostics.dangling_parents, 1);
        assert_eq!(diagnostics.missing_uuid, 1);
        assert_eq!(graph.nodes.len(), 5);
        assert_eq!(graph.links.len(), 3);
    }

    #[test]
    fn test_dataset_pseudo_analysis_precedes_first_run() {
        let (graph, _) = GraphBuilder::new().build(&records(), &analyses()).unwrap();
        let dataset = graph.node(graph.dataset.unwrap());
        let run = graph.node(graph.analyses[1]);

        assert_eq!(dataset.id, 0);
        assert_eq!(run.id, 1);
        let gap = run.as_analysis().unwrap().start - dataset.as_analysis().unwrap().start;
        assert_eq!(gap, Duration::seconds(1));
        assert!(graph.workflow_data.contains_key("wf-1"));
    }

    #[test]
    fn test_no_analyses_uses_epoch() {
        let (graph, _) = GraphBuilder::new().build(&records()[..2], &[]).unwrap();
        let dataset = graph.node(graph.dataset.unwrap()).as_analysis().unwrap();
        assert_eq!(dataset.start, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_missing_workflow_is_recoverable() {
        let runs = vec![AnalysisRecord::new("an-1", "wf-1", "2016-03-01T10:00:00")];
        let (graph, diagnostics) = GraphBuilder::new().build(&records(), &runs).unwrap();
        assert_eq!(diagnostics.missing_workflows, 1);
        assert!(graph.workflow_data.is_empty());
    }

    #[test]
    fn test_unknown_analysis_moves_to_dataset() {
        let mut recs = records();
        recs.push(NodeRecord::new("stray", "Raw Data File").with_analysis("an-404"));
        let (graph, diagnostics) = GraphBuilder::new().build(&recs, &analyses()).unwrap();

        assert_eq!(diagnostics.unknown_analysis, 1);
        let stray = graph.node_by_uuid["stray"];
        assert_eq!(graph.analysis_uuid_of(stray), Some(DATASET_UUID));
    }

    #[test]
    fn test_malformed_workflow_propagates() {
        let runs = vec![AnalysisRecord::new("an-1", "wf-1", "2016-03-01T10:00:00")
            .with_workflow_copy("{'name': ")];
        let err = GraphBuilder::new().build(&records(), &runs).unwrap_err();
        assert!(matches!(err, crate::errors::ProvGraphError::Parse { .. }));
    }
}
