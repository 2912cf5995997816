//! Common test utilities for provgraph
//!
//! Dataset builders, canned fixtures and lookup helpers shared by the
//! integration tests.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
