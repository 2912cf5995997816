//! Recoverable build problems

use serde::{Deserialize, Serialize};

/// Counts of records dropped or patched while building the graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDiagnostics {
    /// Node records without a uuid (skipped)
    pub missing_uuid: usize,
    /// Node records without a parents field
    pub missing_parents: usize,
    /// Parent references that resolve to no known node (link skipped)
    pub dangling_parents: usize,
    /// Nodes referring to an unknown analysis (moved to the dataset)
    pub unknown_analysis: usize,
    /// Analyses without a workflow payload
    pub missing_workflows: usize,
}

impl BuildDiagnostics {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    pub fn total(&self) -> usize {
        self.missing_uuid
            + self.missing_parents
            + self.dangling_parents
            + self.unknown_analysis
            + self.missing_workflows
    }
}
