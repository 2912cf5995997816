//! Arena handles
//!
//! Entities, links and motifs live in flat vectors owned by [`ProvGraph`];
//! these handles are their indices. Parent/pred/succ references are plain
//! handles, so nothing in the graph owns anything through a back-reference.
//!
//! [`ProvGraph`]: super::graph::ProvGraph

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Handle of a hierarchy entity (node, subanalysis, analysis, layer)
    NodeId,
    "n"
);

arena_id!(
    /// Handle of a directed link
    LinkId,
    "l"
);

arena_id!(
    /// Handle of a motif template
    MotifId,
    "m"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_index_roundtrip() {
        let id = NodeId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.to_string(), "n42");
        assert_eq!(LinkId::new(3).to_string(), "l3");
        assert_eq!(MotifId::new(0).to_string(), "m0");
    }

    #[test]
    fn test_handle_serializes_as_number() {
        let json = serde_json::to_string(&NodeId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeId::new(7));
    }
}
