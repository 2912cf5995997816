pub mod diff;
pub mod discovery;
pub mod layer_mapping;

pub use diff::DiffComputer;
pub use discovery::MotifDiscoveryEngine;
pub use layer_mapping::LayerMapper;
