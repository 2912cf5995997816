//! Error types for provgraph
//!
//! Recoverable dataset problems (dangling parents, missing uuids, missing
//! workflow payloads) are logged and counted instead of surfacing here.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for provenance graph operations
#[derive(Debug, Error)]
pub enum ProvGraphError {
    /// Workflow payload could not be repaired into valid JSON
    #[error("Parse error in workflow of analysis '{analysis}': {source}")]
    Parse {
        analysis: String,
        #[source]
        source: serde_json::Error,
    },

    /// A layering scope is not acyclic
    #[error("Cycle detected in {scope}: members {members:?}")]
    CycleDetected { scope: String, members: Vec<i64> },

    /// Input records violate a structural requirement
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProvGraphError {
    /// Create a workflow parse error
    pub fn parse_error(analysis: impl Into<String>, source: serde_json::Error) -> Self {
        ProvGraphError::Parse {
            analysis: analysis.into(),
            source,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ProvGraphError::InvalidInput(msg.into())
    }

    /// Create a cycle error for a named scope
    pub fn cycle(scope: impl Into<String>, members: Vec<i64>) -> Self {
        ProvGraphError::CycleDetected {
            scope: scope.into(),
            members,
        }
    }

    /// True when the error signals a cyclic layering scope
    pub fn is_cycle(&self) -> bool {
        matches!(self, ProvGraphError::CycleDetected { .. })
    }
}

/// Result type alias for provgraph operations
pub type Result<T> = std::result::Result<T, ProvGraphError>;
