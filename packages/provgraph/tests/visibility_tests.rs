//! Expand / collapse and the DOI visibility state machine

mod common;

use common::*;
use pretty_assertions::assert_eq;
use provgraph::features::layering::representative_of;
use provgraph::{DoiComponent, NodeId, ProvGraphError, ProvSession, SessionEvent, VisConfig};

fn hidden_flags(session: &ProvSession, root: NodeId) -> Vec<(NodeId, bool)> {
    session
        .graph()
        .descendants(root)
        .into_iter()
        .map(|d| (d, session.graph().node(d).hidden))
        .collect()
}

/// Only the selected component counts, so selected entities score 1.0
fn selection_only(session: &mut ProvSession) {
    for c in [
        DoiComponent::Filtered,
        DoiComponent::Highlighted,
        DoiComponent::Time,
        DoiComponent::LayerDiff,
    ] {
        session
            .handle(SessionEvent::SetComponentActive {
                component: c,
                active: false,
            })
            .unwrap();
    }
    session.handle(SessionEvent::RedistributeWeights).unwrap();
    assert_eq!(session.doi().weights().get(DoiComponent::Selected), 1.0);
}

// ============================================================================
// Manual expand / collapse
// ============================================================================

#[test]
fn test_expand_analysis_shows_subanalyses() {
    let mut session = two_workflows().load(VisConfig::default()).unwrap();
    let align = analysis(&session, "an-align");
    let san = subanalysis_of(&session, "a1");

    session.handle(SessionEvent::Expand { node: align }).unwrap();

    let graph = session.graph();
    assert!(graph.node(align).hidden);
    assert!(!graph.node(san).hidden);
    assert!(graph.node(node(&session, "a1")).hidden);
    assert_eq!(representative_of(graph, node(&session, "a1")), san);
}

#[test]
fn test_expand_subanalysis_shows_nodes_and_links() {
    let mut session = two_workflows().load(VisConfig::default()).unwrap();
    let align = analysis(&session, "an-align");
    let san = subanalysis_of(&session, "a1");

    session.handle(SessionEvent::Expand { node: align }).unwrap();
    session.handle(SessionEvent::Expand { node: san }).unwrap();

    let graph = session.graph();
    let a1 = node(&session, "a1");
    let a2 = node(&session, "a2");
    assert!(!graph.node(a1).hidden);
    assert!(!graph.node(a2).hidden);
    for &link in &graph.node(san).links {
        assert!(!graph.link(link).hidden);
    }
    assert_eq!(representative_of(graph, a2), a2);
    assert_eq!(graph.node(a2).col, graph.node(a1).col + 1);
}

#[test]
fn test_collapse_then_expand_restores_descendants() {
    let mut session = chained_analyses().load(VisConfig::default()).unwrap();
    let align = analysis(&session, "an-align");
    let san = subanalysis_of(&session, "a1");

    session.handle(SessionEvent::Expand { node: align }).unwrap();
    let before = hidden_flags(&session, align);

    session.handle(SessionEvent::Collapse { node: san }).unwrap();
    assert!(!session.graph().node(align).hidden);
    assert!(session.graph().node(san).hidden);

    session.handle(SessionEvent::Expand { node: align }).unwrap();
    assert_eq!(hidden_flags(&session, align), before);
}

#[test]
fn test_collapse_then_expand_restores_opened_subanalysis() {
    let mut session = chained_analyses().load(VisConfig::default()).unwrap();
    let align = analysis(&session, "an-align");
    let san = subanalysis_of(&session, "a1");
    let (a1, a2) = (node(&session, "a1"), node(&session, "a2"));

    session.handle(SessionEvent::Expand { node: align }).unwrap();
    session.handle(SessionEvent::Expand { node: san }).unwrap();
    let before = hidden_flags(&session, align);
    assert_eq!(before, vec![(san, true), (a1, false), (a2, false)]);

    session.handle(SessionEvent::Collapse { node: san }).unwrap();
    assert!(session.graph().node(a1).hidden);

    session.handle(SessionEvent::Expand { node: align }).unwrap();
    assert_eq!(hidden_flags(&session, align), before);
    for &link in &session.graph().node(san).links {
        assert!(!session.graph().link(link).hidden);
    }
    assert_eq!(representative_of(session.graph(), a2), a2);
}

#[test]
fn test_selection_between_collapse_and_expand_resets_to_default() {
    let mut session = chained_analyses().load(VisConfig::default()).unwrap();
    let align = analysis(&session, "an-align");
    let san = subanalysis_of(&session, "a1");
    let (a1, a2) = (node(&session, "a1"), node(&session, "a2"));

    session.handle(SessionEvent::Expand { node: align }).unwrap();
    session.handle(SessionEvent::Expand { node: san }).unwrap();
    session.handle(SessionEvent::Collapse { node: san }).unwrap();
    session.handle(SessionEvent::Select { node: a1 }).unwrap();

    session.handle(SessionEvent::Expand { node: align }).unwrap();
    assert_eq!(
        hidden_flags(&session, align),
        vec![(san, false), (a1, true), (a2, true)]
    );
}

#[test]
fn test_collapse_into_layer_hides_members() {
    let mut session = repeated_workflow().load(VisConfig::default()).unwrap();
    let layer = layer_of(&session, "an-x");
    let x = analysis(&session, "an-x");

    session.handle(SessionEvent::Expand { node: layer }).unwrap();
    assert!(!session.graph().node(x).hidden);

    session.handle(SessionEvent::Collapse { node: x }).unwrap();
    let graph = session.graph();
    assert!(!graph.node(layer).hidden);
    assert!(graph.node(x).hidden);
    assert_eq!(representative_of(graph, node(&session, "x1")), layer);
}

#[test]
fn test_invalid_toggles_are_rejected() {
    let mut session = two_workflows().load(VisConfig::default()).unwrap();
    let leaf = node(&session, "a1");
    let layer = layer_of(&session, "an-align");

    assert!(matches!(
        session.handle(SessionEvent::Expand { node: leaf }),
        Err(ProvGraphError::InvalidInput(_))
    ));
    assert!(matches!(
        session.handle(SessionEvent::Collapse { node: layer }),
        Err(ProvGraphError::InvalidInput(_))
    ));
    assert!(session
        .handle(SessionEvent::Select {
            node: NodeId::new(10_000)
        })
        .is_err());
}

// ============================================================================
// State machine
// ============================================================================

#[test]
fn test_selected_analysis_expands_down_to_nodes() {
    let mut session = two_workflows().load(VisConfig::default()).unwrap();
    selection_only(&mut session);

    let align = analysis(&session, "an-align");
    session.handle(SessionEvent::Select { node: align }).unwrap();
    let report = session.recompute_doi().unwrap();

    let graph = session.graph();
    let a1 = node(&session, "a1");
    let san = subanalysis_of(&session, "a1");
    assert_eq!(graph.node(align).doi.weighted_sum, 1.0);
    assert!(graph.node(align).hidden, "analysis expanded");
    assert!(graph.node(san).hidden, "subanalysis expanded");
    assert!(!graph.node(a1).hidden);
    assert_eq!(representative_of(graph, a1), a1);
    assert_eq!(report.expanded, 2);

    // the unselected analysis stays collapsed
    let count = analysis(&session, "an-count");
    assert!(!graph.node(count).hidden);
    assert_eq!(representative_of(graph, node(&session, "b1")), count);
}

#[test]
fn test_interesting_sibling_is_exaggerated() {
    let mut session = repeated_workflow().load(VisConfig::default()).unwrap();
    selection_only(&mut session);

    let layer = layer_of(&session, "an-x");
    let x = analysis(&session, "an-x");
    let y = analysis(&session, "an-y");
    session.handle(SessionEvent::Expand { node: layer }).unwrap();
    session.handle(SessionEvent::Select { node: x }).unwrap();
    let report = session.recompute_doi().unwrap();

    let graph = session.graph();
    assert!(!graph.node(layer).hidden, "layer folded back");
    assert!(graph.node(x).is_exaggerated());
    assert!(!graph.node(y).is_exaggerated());
    assert!(graph.node(y).hidden);
    assert_eq!(report.exaggerated, 1);

    let x1 = node(&session, "x1");
    assert_eq!(representative_of(graph, x1), x1);
    assert_eq!(representative_of(graph, node(&session, "y1")), layer);
}

#[test]
fn test_auto_update_recomputes_on_selection() {
    let mut session = two_workflows()
        .load(VisConfig::default().with_auto_update(true))
        .unwrap();
    selection_only(&mut session);

    let count = analysis(&session, "an-count");
    session.handle(SessionEvent::Select { node: count }).unwrap();

    let graph = session.graph();
    assert!(graph.node(count).hidden, "expanded without an explicit recompute");
    let b1 = node(&session, "b1");
    assert!(!graph.node(b1).hidden);
}

#[test]
fn test_weighted_sums_stay_in_unit_interval() {
    let mut session = chained_analyses().load(VisConfig::default()).unwrap();
    let count = analysis(&session, "an-count");
    session.handle(SessionEvent::Select { node: count }).unwrap();
    session
        .handle(SessionEvent::HighlightPath {
            node: node(&session, "c2"),
            direction: provgraph::features::interaction::PathDirection::Predecessors,
        })
        .unwrap();
    session.recompute_doi().unwrap();

    for entity in session.graph().entities() {
        let sum = entity.doi.weighted_sum;
        assert!((0.0..=1.0).contains(&sum), "{} scored {}", entity.handle, sum);
    }
}
