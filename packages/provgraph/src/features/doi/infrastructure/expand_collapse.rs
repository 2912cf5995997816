//! Expand and collapse of hierarchy aggregates
//!
//! On an aggregate `hidden == true` means expanded: the aggregate is replaced
//! by its children. Neither operation re-layers; callers decide when to.
//!
//! `collapse`/`expand` reset the subtree to its default shape. The
//! `fold`/`unfold` pair used for user toggles also remembers the flags below
//! the parent, so unfolding it again brings back what the user had open.

use tracing::debug;

use crate::shared::models::{LinkId, NodeId, NodeKind, ProvGraph};

/// Replace `d` by its children. Returns false for leaf nodes.
pub fn expand(graph: &mut ProvGraph, d: NodeId) -> bool {
    let kind = graph.kind(d);
    if !kind.is_aggregate() {
        return false;
    }

    graph.node_mut(d).hidden = true;
    for child in graph.node(d).children.clone() {
        graph.node_mut(child).hidden = false;
        hide_descendants(graph, child);
    }

    match kind {
        NodeKind::Subanalysis => {
            let links = graph.node(d).links.clone();
            set_links_hidden(graph, &links, false);
        }
        NodeKind::Analysis => {
            for san in graph.node(d).children.clone() {
                let links = graph.node(san).links.clone();
                set_links_hidden(graph, &links, true);
            }
        }
        NodeKind::Layer => {
            let entity = graph.node(d);
            let links: Vec<LinkId> = entity
                .pred_links
                .iter()
                .chain(entity.succ_links.iter())
                .copied()
                .collect();
            set_links_hidden(graph, &links, true);
        }
        NodeKind::Node => {}
    }

    let boundary = graph.boundary_links(d);
    set_links_hidden(graph, &boundary, false);

    debug!(entity = %d, kind = kind.as_str(), "Expanded");
    true
}

/// Fold `d` into its parent. Returns false for layers and orphans.
pub fn collapse(graph: &mut ProvGraph, d: NodeId) -> bool {
    let kind = graph.kind(d);
    if kind == NodeKind::Layer {
        return false;
    }
    let Some(parent) = graph.node(d).parent else {
        return false;
    };

    if kind == NodeKind::Analysis {
        for sibling in graph.node(parent).children.clone() {
            if let Some(data) = graph.node_mut(sibling).as_analysis_mut() {
                data.exaggerated = false;
            }
        }
    }

    graph.node_mut(parent).hidden = false;
    hide_descendants(graph, parent);

    let internal = graph.node(parent).links.clone();
    set_links_hidden(graph, &internal, true);

    let boundary = graph.boundary_links(parent);
    set_links_hidden(graph, &boundary, false);

    if graph.kind(parent) == NodeKind::Layer {
        for link in graph.node(parent).pred_links.clone() {
            let source = graph.link(link).source;
            if !graph.node(source).hidden {
                graph.link_mut(link).hidden = false;
            }
        }
        for link in graph.node(parent).succ_links.clone() {
            let target = graph.link(link).target;
            if !graph.node(target).hidden {
                graph.link_mut(link).hidden = false;
            }
        }
    }

    debug!(entity = %d, parent = %parent, "Collapsed");
    true
}

/// `collapse`, remembering the flags below the parent first
pub fn fold(graph: &mut ProvGraph, d: NodeId) -> bool {
    if graph.kind(d) == NodeKind::Layer {
        return false;
    }
    let Some(parent) = graph.node(d).parent else {
        return false;
    };
    graph.remember_fold(parent);
    collapse(graph, d)
}

/// `expand`, then put back the flags remembered by the last `fold` into `d`
pub fn unfold(graph: &mut ProvGraph, d: NodeId) -> bool {
    if !expand(graph, d) {
        return false;
    }
    if graph.restore_fold(d) {
        debug!(entity = %d, "Restored folded view");
    }
    true
}

fn hide_descendants(graph: &mut ProvGraph, id: NodeId) {
    for d in graph.descendants(id) {
        graph.node_mut(d).hidden = true;
    }
}

fn set_links_hidden(graph: &mut ProvGraph, links: &[LinkId], hidden: bool) {
    for &link in links {
        graph.link_mut(link).hidden = hidden;
    }
}
