//! Graph Builder
//!
//! Turns raw node and analysis records into typed arena entities and leaf
//! links, resolving parent references by uuid.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Graph Builder Feature                  │
//! ├─────────────────────────────────────────────────────────┤
//! │  Domain:                                                │
//! │    - NodeRecord / AnalysisRecord (input schema)         │
//! │    - BuildDiagnostics (recoverable problems)            │
//! ├─────────────────────────────────────────────────────────┤
//! │  Infrastructure:                                        │
//! │    - NodeFactory (classification, reference cleanup)    │
//! │    - Workflow repair (non-standard payload → JSON)      │
//! │    - Facets (attribute name normalization)              │
//! │    - GraphBuilder (records → ProvGraph)                 │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{AnalysisRecord, BuildDiagnostics, DatasetRecord, FacetDocument, NodeRecord};
pub use infrastructure::{
    apply_facet_documents, normalize_attribute_name, repair_workflow_payload, GraphBuilder,
};
