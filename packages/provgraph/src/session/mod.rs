//! Application layer
//!
//! [`ProvSession`] owns the graph and configuration of one loaded dataset and
//! applies [`SessionEvent`]s to it one at a time.

pub mod events;
pub mod prov_session;
pub mod snapshot;

pub use events::SessionEvent;
pub use prov_session::ProvSession;
pub use snapshot::{EntitySnapshot, GraphSnapshot, LinkSnapshot};
