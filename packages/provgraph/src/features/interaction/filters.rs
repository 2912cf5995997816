//! Time and attribute filters
//!
//! Both filters set leaf/subanalysis/analysis flags first and then derive the
//! aggregate and link flags bottom-up with [`aggregate_filter_flags`].

use chrono::{DateTime, Duration, Utc};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::features::doi::infrastructure::initializer::hierarchy;
use crate::features::graph_builder::{apply_facet_documents, FacetDocument};
use crate::shared::models::{LinkId, NodeId, ProvGraph};

/// Keep analyses started within `[start, end + 1s]`. Returns the number in range.
pub fn set_time_filter(graph: &mut ProvGraph, start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
    let upper = end + Duration::seconds(1);
    let mut in_range = 0;

    for an in graph.analyses.clone() {
        let Some(an_start) = graph.node(an).as_analysis().map(|a| a.start) else {
            continue;
        };
        let keep = start <= an_start && an_start <= upper;
        if keep {
            in_range += 1;
        }

        graph.node_mut(an).filtered = keep;
        for d in graph.descendants(an) {
            graph.node_mut(d).filtered = keep;
        }
        for san in graph.node(an).children.clone() {
            let links = graph.node(san).links.clone();
            set_links_filtered(graph, &links, keep);
        }
    }

    aggregate_filter_flags(graph);
    info!(
        start = %start,
        end = %end,
        in_range,
        total = graph.analyses.len(),
        "Time filter applied"
    );
    in_range
}

/// Keep the subanalyses containing a matching node, and the predecessor chain
/// of every match inside them. Returns the number of matching nodes.
pub fn set_attribute_filter(graph: &mut ProvGraph, documents: &[FacetDocument]) -> usize {
    apply_facet_documents(graph, documents);

    let matches: FxHashSet<NodeId> = documents
        .iter()
        .filter_map(|doc| doc.get("uuid").and_then(|v| v.as_str()))
        .filter_map(|uuid| graph.node_by_uuid.get(uuid).copied())
        .collect();

    for san in graph.subanalyses.clone() {
        let children = graph.node(san).children.clone();
        let links = graph.node(san).links.clone();
        let hits: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|n| matches.contains(n))
            .collect();

        for &n in &children {
            graph.node_mut(n).filtered = false;
        }
        if hits.is_empty() {
            graph.node_mut(san).filtered = false;
            set_links_filtered(graph, &links, false);
            continue;
        }

        graph.node_mut(san).filtered = true;
        set_links_filtered(graph, &links, true);
        for hit in hits {
            filter_pred_chain(graph, hit, san);
        }
    }

    aggregate_filter_flags(graph);
    info!(
        documents = documents.len(),
        matches = matches.len(),
        "Attribute filter applied"
    );
    matches.len()
}

/// Filter `start` and its predecessors that share its subanalysis
fn filter_pred_chain(graph: &mut ProvGraph, start: NodeId, san: NodeId) {
    let mut visited = FxHashSet::default();
    let mut worklist = vec![start];

    while let Some(cur) = worklist.pop() {
        if !visited.insert(cur) {
            continue;
        }
        graph.node_mut(cur).filtered = true;

        for link in graph.node(cur).pred_links.clone() {
            let source = graph.link(link).source;
            if graph.node(source).parent != Some(san) {
                continue;
            }
            graph.link_mut(link).filtered = true;
            worklist.push(source);
        }
    }
}

/// Derive analysis, layer and link filter flags and refresh the filtered
/// DOI component everywhere
pub fn aggregate_filter_flags(graph: &mut ProvGraph) {
    for an in graph.analyses.clone() {
        let children = &graph.node(an).children;
        if children.is_empty() {
            continue;
        }
        let any = children.iter().any(|san| graph.node(*san).filtered);
        graph.node_mut(an).filtered = any;
    }

    for layer in graph.layers.clone() {
        let any = graph
            .node(layer)
            .children
            .iter()
            .any(|an| graph.node(*an).filtered);
        graph.node_mut(layer).filtered = any;
    }

    for link in graph.analysis_links.clone() {
        let l = graph.link(link);
        let both = [l.source, l.target].iter().all(|&end| {
            graph
                .analysis_of(end)
                .map(|an| graph.node(an).filtered)
                .unwrap_or(false)
        });
        graph.link_mut(link).filtered = both;
    }

    for link in graph.layer_links.clone() {
        let l = graph.link(link);
        let both = graph.node(l.source).filtered && graph.node(l.target).filtered;
        graph.link_mut(link).filtered = both;
    }

    for id in hierarchy(graph) {
        let entity = graph.node_mut(id);
        let filtered = entity.filtered;
        entity.doi.filtered_changed(filtered);
    }

    debug!("Filter flags aggregated");
}

fn set_links_filtered(graph: &mut ProvGraph, links: &[LinkId], filtered: bool) {
    for &link in links {
        graph.link_mut(link).filtered = filtered;
    }
}
