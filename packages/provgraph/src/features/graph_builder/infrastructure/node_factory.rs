/*
 * Node Factory
 *
 * Converts a raw node record into leaf node data:
 * - record type → NodeType classification
 * - study/assay/parent references stripped of their api prefixes
 * - "dataset" / "undefined" defaults for absent fields
 */

use std::collections::BTreeMap;

use crate::features::graph_builder::domain::NodeRecord;
use crate::shared::constants::api::{ASSAY_PREFIX, NODE_PREFIX, STUDY_PREFIX};
use crate::shared::constants::sentinel::{DATASET_UUID, UNDEFINED_NAME};
use crate::shared::models::{NodeData, NodeType};

pub struct NodeFactory;

impl NodeFactory {
    /// Classify a record by its type string and stored file url
    pub fn classify(record_type: &str, file_url: Option<&str>) -> NodeType {
        match record_type {
            "Source Name" | "Sample Name" | "Assay Name" => NodeType::Special,
            "Data Transformation Name" => NodeType::Dt,
            _ if file_url.is_none() => NodeType::Intermediate,
            _ => NodeType::Stored,
        }
    }

    /// Strip an api prefix and every remaining `/`
    pub fn strip_reference(raw: &str, prefix: &str) -> String {
        raw.replace(prefix, "").replace('/', "")
    }

    /// Build node data, or `None` when the record has no uuid
    pub fn create(record: &NodeRecord) -> Option<NodeData> {
        let uuid = record.uuid.clone()?;

        let study = record
            .study
            .as_deref()
            .map(|s| Self::strip_reference(s, STUDY_PREFIX))
            .unwrap_or_default();
        let assay = record
            .assay
            .as_deref()
            .map(|s| Self::strip_reference(s, ASSAY_PREFIX))
            .unwrap_or_default();
        let parents = record
            .parents
            .iter()
            .flatten()
            .map(|p| Self::strip_reference(p, NODE_PREFIX))
            .collect();

        Some(NodeData {
            uuid,
            name: record
                .name
                .clone()
                .unwrap_or_else(|| UNDEFINED_NAME.to_string()),
            record_type: record.record_type.clone(),
            node_type: Self::classify(&record.record_type, record.file_url.as_deref()),
            study,
            assay,
            parents,
            analysis_uuid: record
                .analysis_uuid
                .clone()
                .unwrap_or_else(|| DATASET_UUID.to_string()),
            subanalysis: record.subanalysis,
            file_url: record.file_url.clone(),
            attributes: BTreeMap::new(),
        })
    }
}
