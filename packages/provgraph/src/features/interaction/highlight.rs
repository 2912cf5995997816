//! Predecessor / successor path highlighting

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::features::doi::infrastructure::initializer::hierarchy;
use crate::shared::models::{LinkId, NodeId, NodeKind, ProvGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDirection {
    Predecessors,
    Successors,
}

impl PathDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Predecessors => "predecessors",
            Self::Successors => "successors",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "predecessors" | "pred" | "p" => Ok(Self::Predecessors),
            "successors" | "succ" | "s" => Ok(Self::Successors),
            _ => Err(format!(
                "Unknown path direction '{}'. Valid: predecessors, successors",
                s
            )),
        }
    }
}

/// Remove every node and link highlight
pub fn clear_highlight(graph: &mut ProvGraph) {
    for id in hierarchy(graph) {
        let entity = graph.node_mut(id);
        entity.highlighted = false;
        entity.doi.highlighted_changed(false);
    }
    let links: Vec<LinkId> = graph
        .links
        .iter()
        .chain(graph.layer_links.iter())
        .copied()
        .collect();
    for link in links {
        graph.link_mut(link).highlighted = false;
    }
}

/// Highlight the transitive path from `start`. Returns the number of
/// highlighted links.
pub fn highlight_path(graph: &mut ProvGraph, start: NodeId, direction: PathDirection) -> usize {
    clear_highlight(graph);

    let mut visited = FxHashSet::default();
    let mut worklist = vec![start];
    let mut highlighted_links = 0;

    while let Some(cur) = worklist.pop() {
        if !visited.insert(cur) {
            continue;
        }
        mark_with_ancestors(graph, cur);

        let is_layer = graph.kind(cur) == NodeKind::Layer;
        let owners = if is_layer {
            graph.node(cur).children.clone()
        } else {
            vec![cur]
        };

        for owner in owners {
            let entity = graph.node(owner);
            let links = match direction {
                PathDirection::Predecessors => entity.pred_links.clone(),
                PathDirection::Successors => entity.succ_links.clone(),
            };
            for link_id in links {
                let link = graph.link_mut(link_id);
                link.highlighted = true;
                if is_layer {
                    link.hidden = false;
                }
                highlighted_links += 1;
                worklist.push(match direction {
                    PathDirection::Predecessors => link.source,
                    PathDirection::Successors => link.target,
                });
            }
        }
    }

    for link in graph.analysis_links.clone() {
        let link = graph.link_mut(link);
        if link.highlighted {
            link.hidden = false;
        }
    }

    debug!(
        entity = %start,
        direction = direction.as_str(),
        nodes = visited.len(),
        links = highlighted_links,
        "Path highlighted"
    );
    highlighted_links
}

fn mark_with_ancestors(graph: &mut ProvGraph, id: NodeId) {
    let mut chain = vec![id];
    chain.extend(graph.ancestors(id));
    for n in chain {
        let entity = graph.node_mut(n);
        entity.highlighted = true;
        entity.doi.highlighted_changed(true);
    }
}
