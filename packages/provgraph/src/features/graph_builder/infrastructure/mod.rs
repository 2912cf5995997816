//! Graph builder infrastructure

pub mod builder;
pub mod facets;
pub mod node_factory;
pub mod workflow;

pub use builder::GraphBuilder;
pub use facets::{apply_facet_documents, facet_attribute_names, normalize_attribute_name};
pub use node_factory::NodeFactory;
pub use workflow::{parse_workflow, repair_workflow_payload};
