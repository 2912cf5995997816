//! Facet attributes
//!
//! Facet documents carry dynamic attribute fields whose raw names encode
//! their origin (`REFINERY_TYPE_6_3_s`, `organism_Characteristics_6_3_s`).
//! Names are normalized before they are attached to nodes.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::features::graph_builder::domain::FacetDocument;
use crate::shared::models::ProvGraph;

const CHARACTERISTICS_MARKER: &str = "_Characteristics_";
const REFINERY_PREFIX: &str = "REFINERY_";

static INDEX_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([0-9])+_([0-9])+_s").expect("static regex"));

/// Normalize a raw facet field name
pub fn normalize_attribute_name(raw: &str) -> String {
    match raw.find(CHARACTERISTICS_MARKER) {
        Some(end) => raw[..end].to_string(),
        None => {
            let stripped = raw.replace(REFINERY_PREFIX, "");
            INDEX_SUFFIX.replace_all(&stripped, "").to_lowercase()
        }
    }
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Attach the normalized attributes of every document to its node
///
/// Documents whose uuid resolves to no node are skipped. Returns the number
/// of nodes updated.
pub fn apply_facet_documents(graph: &mut ProvGraph, documents: &[FacetDocument]) -> usize {
    let mut updated = 0;
    for doc in documents {
        let Some(uuid) = doc.get("uuid").and_then(|v| v.as_str()) else {
            continue;
        };
        let Some(&handle) = graph.node_by_uuid.get(uuid) else {
            debug!(uuid, "facet document for unknown node");
            continue;
        };
        let Some(data) = graph.node_mut(handle).as_node_mut() else {
            continue;
        };
        for (key, value) in doc {
            data.attributes
                .insert(normalize_attribute_name(key), value_to_string(value));
        }
        updated += 1;
    }
    updated
}

/// Attribute names seen on the first document
pub fn facet_attribute_names(documents: &[FacetDocument]) -> Vec<String> {
    documents
        .first()
        .map(|doc| doc.keys().map(|k| normalize_attribute_name(k)).collect())
        .unwrap_or_default()
}
