//! Input schema and build diagnostics

pub mod diagnostics;
pub mod records;

pub use diagnostics::BuildDiagnostics;
pub use records::{AnalysisRecord, DatasetRecord, FacetDocument, NodeRecord};
