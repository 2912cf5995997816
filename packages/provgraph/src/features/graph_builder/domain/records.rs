//! Raw input records
//!
//! Field names follow the delivered JSON. Everything except the analysis
//! timestamps is optional because real datasets omit fields freely.

use serde::{Deserialize, Serialize};

/// One node of the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub record_type: String,
    /// Parent references; `None` when the field is absent altogether
    #[serde(default)]
    pub parents: Option<Vec<String>>,
    #[serde(default)]
    pub study: Option<String>,
    #[serde(default)]
    pub assay: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub analysis_uuid: Option<String>,
    #[serde(default)]
    pub subanalysis: Option<u32>,
}

impl NodeRecord {
    pub fn new(uuid: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            record_type: record_type.into(),
            parents: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = Some(parents.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_analysis(mut self, analysis_uuid: impl Into<String>) -> Self {
        self.analysis_uuid = Some(analysis_uuid.into());
        self
    }

    pub fn with_file_url(mut self, url: impl Into<String>) -> Self {
        self.file_url = Some(url.into());
        self
    }

    pub fn with_study_assay(mut self, study: impl Into<String>, assay: impl Into<String>) -> Self {
        self.study = Some(study.into());
        self.assay = Some(assay.into());
        self
    }
}

/// Dataset payload, either wrapped (`{"value": [...]}`) or a bare list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetRecord {
    Wrapped { value: Vec<NodeRecord> },
    Bare(Vec<NodeRecord>),
}

impl DatasetRecord {
    pub fn into_nodes(self) -> Vec<NodeRecord> {
        match self {
            DatasetRecord::Wrapped { value } => value,
            DatasetRecord::Bare(nodes) => nodes,
        }
    }
}

/// One analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub uuid: String,
    #[serde(rename = "workflow__uuid")]
    pub workflow_uuid: String,
    pub time_start: String,
    pub time_end: String,
    pub creation_date: String,
    /// Workflow definition in its non-standard serialized form
    #[serde(default)]
    pub workflow_copy: Option<String>,
}

impl AnalysisRecord {
    pub fn new(
        uuid: impl Into<String>,
        workflow_uuid: impl Into<String>,
        time_start: impl Into<String>,
    ) -> Self {
        let start = time_start.into();
        Self {
            uuid: uuid.into(),
            workflow_uuid: workflow_uuid.into(),
            time_end: start.clone(),
            creation_date: start.clone(),
            time_start: start,
            workflow_copy: None,
        }
    }

    pub fn with_workflow_copy(mut self, copy: impl Into<String>) -> Self {
        self.workflow_copy = Some(copy.into());
        self
    }
}

/// Facet search document: a `uuid` key plus dynamic attribute fields
pub type FacetDocument = serde_json::Map<String, serde_json::Value>;
