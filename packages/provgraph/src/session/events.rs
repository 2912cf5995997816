//! Interaction events
//!
//! Hosts feed these as JSON, e.g. `{"event": "select", "node": 12}`. Entity
//! references are arena handles as reported by the snapshot.

use serde::{Deserialize, Serialize};

use crate::features::graph_builder::FacetDocument;
use crate::features::interaction::PathDirection;
use crate::features::motifs::LayeringPolicy;
use crate::shared::models::{DoiComponent, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Select {
        node: NodeId,
    },
    ClearSelection,
    HighlightPath {
        node: NodeId,
        direction: PathDirection,
    },
    ClearHighlight,
    /// Bounds use the analysis timestamp format
    SetTimeFilter {
        start: String,
        end: String,
    },
    SetAttributeFilter {
        documents: Vec<FacetDocument>,
    },
    Expand {
        node: NodeId,
    },
    Collapse {
        node: NodeId,
    },
    SetLayeringPolicy {
        policy: LayeringPolicy,
    },
    SetDoiWeight {
        component: DoiComponent,
        value: f64,
    },
    SetComponentActive {
        component: DoiComponent,
        active: bool,
    },
    RedistributeWeights,
    SetAutoUpdate {
        enabled: bool,
    },
    RecomputeDoi,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::ClearSelection => "clear_selection",
            Self::HighlightPath { .. } => "highlight_path",
            Self::ClearHighlight => "clear_highlight",
            Self::SetTimeFilter { .. } => "set_time_filter",
            Self::SetAttributeFilter { .. } => "set_attribute_filter",
            Self::Expand { .. } => "expand",
            Self::Collapse { .. } => "collapse",
            Self::SetLayeringPolicy { .. } => "set_layering_policy",
            Self::SetDoiWeight { .. } => "set_doi_weight",
            Self::SetComponentActive { .. } => "set_component_active",
            Self::RedistributeWeights => "redistribute_weights",
            Self::SetAutoUpdate { .. } => "set_auto_update",
            Self::RecomputeDoi => "recompute_doi",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_events_from_json() {
        let events: Vec<SessionEvent> = serde_json::from_str(
            r#"[
                {"event": "select", "node": 3},
                {"event": "highlight_path", "node": 3, "direction": "successors"},
                {"event": "set_layering_policy", "policy": "strict"},
                {"event": "set_doi_weight", "component": "diff", "value": 0.4},
                {"event": "redistribute_weights"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                SessionEvent::Select {
                    node: NodeId::new(3)
                },
                SessionEvent::HighlightPath {
                    node: NodeId::new(3),
                    direction: PathDirection::Successors,
                },
                SessionEvent::SetLayeringPolicy {
                    policy: LayeringPolicy::Strict
                },
                SessionEvent::SetDoiWeight {
                    component: DoiComponent::LayerDiff,
                    value: 0.4,
                },
                SessionEvent::RedistributeWeights,
            ]
        );
    }

    #[test]
    fn test_unknown_event_rejected() {
        let result: Result<SessionEvent, _> = serde_json::from_str(r#"{"event": "teleport"}"#);
        assert!(result.is_err());
    }
}
