//! Test data builders

use provgraph::features::graph_builder::{AnalysisRecord, FacetDocument, NodeRecord};
use provgraph::{NodeId, ProvSession, VisConfig};

/// Builds node and analysis records the way the provenance API delivers them
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    nodes: Vec<NodeRecord>,
    analyses: Vec<AnalysisRecord>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analysis whose workflow payload carries `name`
    pub fn analysis(mut self, uuid: &str, workflow: &str, name: &str, start: &str) -> Self {
        let payload = format!("{{u'name': u'{}', u'steps': {{}}}}", name);
        self.analyses
            .push(AnalysisRecord::new(uuid, workflow, start).with_workflow_copy(payload));
        self
    }

    /// Analysis without a workflow payload
    pub fn bare_analysis(mut self, uuid: &str, workflow: &str, start: &str) -> Self {
        self.analyses.push(AnalysisRecord::new(uuid, workflow, start));
        self
    }

    /// Root-level source node owned by the dataset
    pub fn source(mut self, uuid: &str) -> Self {
        self.nodes
            .push(NodeRecord::new(uuid, "Source Name").with_name(uuid));
        self
    }

    /// Derived file produced inside `analysis`
    pub fn file(mut self, uuid: &str, analysis: &str, parents: &[&str]) -> Self {
        self.nodes.push(
            NodeRecord::new(uuid, "Derived Data File")
                .with_name(uuid)
                .with_analysis(analysis)
                .with_parents(parents.iter().copied()),
        );
        self
    }

    pub fn record(mut self, record: NodeRecord) -> Self {
        self.nodes.push(record);
        self
    }

    pub fn build(self) -> (Vec<NodeRecord>, Vec<AnalysisRecord>) {
        (self.nodes, self.analyses)
    }

    pub fn load(self, config: VisConfig) -> provgraph::Result<ProvSession> {
        self.load_with_facets(Vec::new(), config)
    }

    pub fn load_with_facets(
        self,
        facets: Vec<FacetDocument>,
        config: VisConfig,
    ) -> provgraph::Result<ProvSession> {
        ProvSession::load(self.nodes, self.analyses, facets, config)
    }
}

/// Facet document for one node
pub fn facet(uuid: &str, fields: &[(&str, &str)]) -> FacetDocument {
    let mut doc = FacetDocument::new();
    doc.insert("uuid".into(), uuid.into());
    for (k, v) in fields {
        doc.insert((*k).into(), (*v).into());
    }
    doc
}

/// Handle of the leaf node recorded under `uuid`
pub fn node(session: &ProvSession, uuid: &str) -> NodeId {
    session.graph().node_by_uuid[uuid]
}

/// Handle of the analysis recorded under `uuid`
pub fn analysis(session: &ProvSession, uuid: &str) -> NodeId {
    session.graph().analysis_by_uuid[uuid]
}

/// Subanalysis containing the leaf `uuid`
pub fn subanalysis_of(session: &ProvSession, uuid: &str) -> NodeId {
    let leaf = node(session, uuid);
    session
        .graph()
        .node(leaf)
        .parent
        .expect("leaf without subanalysis")
}

/// Layer owning the analysis `uuid`
pub fn layer_of(session: &ProvSession, uuid: &str) -> NodeId {
    let an = analysis(session, uuid);
    session.graph().node(an).parent.expect("analysis without layer")
}
