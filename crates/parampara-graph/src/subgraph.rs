//! Depth-bounded extraction of the teaching lineage around a focal person.
//!
//! Extraction never fails: missing ids, dangling edges and foreign relation
//! labels all degrade to a smaller (possibly empty) result so a malformed
//! snapshot cannot abort the rendering pipeline.

use crate::{GraphEdge, GraphNode, LineageGraph, LineageNode, NodeCategory};
use rustc_hash::{FxHashMap, FxHashSet};

/// Smallest radius any lineage node is drawn with.
pub const RADIUS_FLOOR: f64 = 15.0;
/// Radius of a level-0 node.
pub const RADIUS_BASE: f64 = 25.0;
/// Radius gained (or lost) per hierarchy level.
pub const RADIUS_PER_LEVEL: f64 = 3.0;

/// Cuts the full snapshot down to the lineage neighborhood.
///
/// Only `Person` nodes and `teaches` edges are eligible. With a focal id the
/// neighborhood is grown breadth-first for exactly `max_depth` rounds,
/// treating `teaches` edges as undirected; without one, every person touched
/// by at least one `teaches` edge is kept. The emitted edge set is restricted
/// to edges whose endpoints both survived, so the output never dangles.
///
/// An unknown focal id yields an empty graph. Depth 0 with a known focal
/// yields just the focal person.
pub fn extract(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    focal: Option<&str>,
    max_depth: usize,
) -> LineageGraph {
    let reached: FxHashSet<&str> = match focal {
        Some(focal) => reachable(edges, focal, max_depth),
        None => edges
            .iter()
            .filter(|e| e.is_teaches())
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect(),
    };

    let kept: Vec<&GraphNode> = nodes
        .iter()
        .filter(|n| n.category == NodeCategory::Person && reached.contains(n.id.as_str()))
        .collect();
    let kept_ids: FxHashSet<&str> = kept.iter().map(|n| n.id.as_str()).collect();

    let kept_edges: Vec<GraphEdge> = edges
        .iter()
        .filter(|e| {
            e.is_teaches()
                && kept_ids.contains(e.source.as_str())
                && kept_ids.contains(e.target.as_str())
        })
        .cloned()
        .collect();

    // Net teaches count, relative to the visible neighborhood rather than the
    // full snapshot.
    let mut levels: FxHashMap<&str, i32> = FxHashMap::default();
    for e in &kept_edges {
        *levels.entry(e.source.as_str()).or_insert(0) += 1;
        *levels.entry(e.target.as_str()).or_insert(0) -= 1;
    }

    let lineage_nodes: Vec<LineageNode> = kept
        .into_iter()
        .map(|n| {
            let level = levels.get(n.id.as_str()).copied().unwrap_or(0);
            LineageNode {
                node: n.clone(),
                level,
                radius: visual_radius(level),
            }
        })
        .collect();

    tracing::debug!(
        reached = reached.len(),
        nodes = lineage_nodes.len(),
        edges = kept_edges.len(),
        focal = focal.unwrap_or(""),
        max_depth,
        "extracted lineage subgraph"
    );

    LineageGraph {
        nodes: lineage_nodes,
        edges: kept_edges,
        focal: focal.map(str::to_string),
    }
}

/// Radius for a hierarchy level. Equal levels always produce equal radii.
pub fn visual_radius(level: i32) -> f64 {
    (RADIUS_BASE + f64::from(level) * RADIUS_PER_LEVEL).max(RADIUS_FLOOR)
}

/// Undirected breadth-first reach over `teaches` edges, expanding the frontier
/// for exactly `max_depth` rounds and stopping early once a round adds nothing.
fn reachable<'a>(edges: &'a [GraphEdge], focal: &'a str, max_depth: usize) -> FxHashSet<&'a str> {
    let mut reached: FxHashSet<&str> = FxHashSet::default();
    reached.insert(focal);

    for _ in 0..max_depth {
        let mut frontier: FxHashSet<&str> = FxHashSet::default();
        for e in edges.iter().filter(|e| e.is_teaches()) {
            if reached.contains(e.source.as_str()) && !reached.contains(e.target.as_str()) {
                frontier.insert(e.target.as_str());
            }
            if reached.contains(e.target.as_str()) && !reached.contains(e.source.as_str()) {
                frontier.insert(e.source.as_str());
            }
        }
        if frontier.is_empty() {
            break;
        }
        reached.extend(frontier);
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::visual_radius;

    #[test]
    fn radius_grows_with_level_and_floors() {
        assert_eq!(visual_radius(0), 25.0);
        assert_eq!(visual_radius(2), 31.0);
        assert_eq!(visual_radius(-3), 16.0);
        assert_eq!(visual_radius(-10), 15.0);
    }
}
