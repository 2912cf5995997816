//! Hierarchy assembly
//!
//! node → subanalysis → analysis, with boundary sets, adjacency and names.

pub mod assembler;
pub mod naming;

pub use assembler::HierarchyAssembler;
pub use naming::workflow_display_name;
