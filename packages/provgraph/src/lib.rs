/*
 * provgraph - Provenance Graph Hierarchy & Degree-of-Interest Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Arena models (BaseNode, Link, Motif, DoiComponents), constants
 * - features/    : Vertical slices (graph_builder → partitioning → hierarchy
 *                  → layering → motifs → doi → interaction)
 * - config/      : YAML configuration with validation
 * - session/     : Application layer (ProvSession, events, snapshots)
 *
 * Every pass is single-threaded and runs to completion over the arena-owned
 * graph held by the session.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::should_implement_trait)] // from_str naming intentional

pub mod config;
pub mod errors;
pub mod features;
pub mod session;
pub mod shared;

pub use config::{ConfigError, ConfigResult, VisConfig};
pub use errors::{ProvGraphError, Result};
pub use session::{GraphSnapshot, ProvSession, SessionEvent};
pub use shared::models::{
    BaseNode, DoiComponent, DoiComponents, DoiWeights, Link, LinkId, LinkKind, Motif, MotifDiff,
    MotifId, NodeId, NodeKind, Payload, ProvGraph,
};
