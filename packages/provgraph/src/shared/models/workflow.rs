//! Workflow definitions attached to analyses

use serde::{Deserialize, Serialize};

/// Parsed workflow-definition payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowData {
    /// Raw workflow name, when the payload carries one
    pub name: Option<String>,
    pub definition: serde_json::Value,
}

impl WorkflowData {
    pub fn from_definition(definition: serde_json::Value) -> Self {
        let name = definition
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Self { name, definition }
    }
}
