//! The iterative physics passes behind [`crate::layout`].
//!
//! State lives in a working array allocated per call; the input graph is
//! read-only. Each iteration runs six passes in order: repulsion, spring
//! attraction, hierarchy bias, integration, collision resolution, bounds
//! clamp. There is no convergence check and no cooling schedule; the round
//! count is exactly `LayoutParams::iterations`.

use crate::rng::XorShift64Star;
use crate::{LayoutParams, PositionedNode};
use parampara_graph::LineageGraph;
use rustc_hash::FxHashMap;

/// Margin kept between any non-pinned node and the canvas edge.
const PADDING: f64 = 100.0;
/// Target vertical gap from a teacher down to each of their students.
const IDEAL_VERTICAL_SEPARATION: f64 = 100.0;
/// Fraction of the separation deficit converted into a velocity nudge.
const HIERARCHY_CORRECTION: f64 = 0.01;
/// Scale applied when folding accumulated forces into velocity.
const VELOCITY_SCALE: f64 = 1e-3;
/// Initial positions are drawn from a box of this fraction of the shorter
/// canvas side, centered on the canvas.
const SPAWN_HALF_EXTENT: f64 = 0.25;

struct SimNode {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    repulsion_fx: f64,
    repulsion_fy: f64,
    pinned: bool,
}

pub(crate) fn run(
    graph: &LineageGraph,
    width: f64,
    height: f64,
    params: &LayoutParams,
) -> Vec<PositionedNode> {
    let mut rng = XorShift64Star::new(params.random_seed);
    let (cx, cy) = (width / 2.0, height / 2.0);
    let half = width.min(height) * SPAWN_HALF_EXTENT;

    let mut nodes: Vec<SimNode> = graph
        .nodes
        .iter()
        .map(|ln| {
            let pinned = graph.focal.as_deref() == Some(ln.node.id.as_str());
            let (x, y) = if pinned {
                (cx, cy)
            } else {
                (
                    cx - half + rng.next_f64_unit() * (2.0 * half),
                    cy - half + rng.next_f64_unit() * (2.0 * half),
                )
            };
            SimNode {
                x,
                y,
                vx: 0.0,
                vy: 0.0,
                repulsion_fx: 0.0,
                repulsion_fy: 0.0,
                pinned,
            }
        })
        .collect();

    // Index pairs for the teaches springs; source is the teacher. Dangling
    // endpoints cannot come out of extraction, but are skipped rather than
    // surfaced if a hand-built graph carries them.
    let index: FxHashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.node.id.as_str(), i))
        .collect();
    let springs: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter(|e| e.is_teaches())
        .filter_map(|e| {
            Some((
                *index.get(e.source.as_str())?,
                *index.get(e.target.as_str())?,
            ))
        })
        .collect();

    let n = nodes.len();
    let repulsion = params.repulsion * crowding_discount(n);

    for _ in 0..params.iterations {
        // 1. Pairwise inverse-square repulsion, accumulated per node. The
        // distance is floored at min_distance, which also covers coincident
        // pairs: they contribute no direction and therefore no force.
        for i in 0..n {
            let (mut fx, mut fy) = (0.0, 0.0);
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = nodes[i].x - nodes[j].x;
                let dy = nodes[i].y - nodes[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(params.min_distance);
                let force = repulsion / (dist * dist);
                fx += dx / dist * force;
                fy += dy / dist * force;
            }
            nodes[i].repulsion_fx = fx;
            nodes[i].repulsion_fy = fy;
        }

        // 2. Hooke springs along teaches edges, equal and opposite, applied
        // straight to velocity. No rest length: the spring only pulls.
        for &(a, b) in &springs {
            let dx = nodes[b].x - nodes[a].x;
            let dy = nodes[b].y - nodes[a].y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > 0.0 {
                let force = dist * params.attraction;
                let fx = dx / dist * force;
                let fy = dy / dist * force;
                nodes[a].vx += fx;
                nodes[a].vy += fy;
                nodes[b].vx -= fx;
                nodes[b].vy -= fy;
            }
        }

        // 3. Vertical hierarchy bias: whenever a student is not at least the
        // ideal separation below their teacher, nudge the pair apart.
        for &(teacher, student) in &springs {
            let separation = nodes[student].y - nodes[teacher].y;
            if separation < IDEAL_VERTICAL_SEPARATION {
                let nudge = (IDEAL_VERTICAL_SEPARATION - separation)
                    * HIERARCHY_CORRECTION
                    * params.hierarchy_strength
                    * VELOCITY_SCALE;
                nodes[teacher].vy -= nudge;
                nodes[student].vy += nudge;
            }
        }

        // 4. Integration with damping. Pinned nodes never move.
        for node in nodes.iter_mut().filter(|node| !node.pinned) {
            node.vx += node.repulsion_fx * VELOCITY_SCALE;
            node.vy += node.repulsion_fy * VELOCITY_SCALE;
            node.vx *= params.damping;
            node.vy *= params.damping;
            node.x += node.vx;
            node.y += node.vy;
        }

        // 5. Local collision resolution. A single pass per pair; pathological
        // configurations may oscillate between iterations rather than settle.
        for i in 0..n {
            for j in (i + 1)..n {
                resolve_overlap(&mut nodes, i, j, params.min_distance);
            }
        }

        // 6. Viewport clamp. min-then-max so a canvas narrower than twice the
        // padding collapses to the padding line instead of inverting.
        for node in nodes.iter_mut().filter(|node| !node.pinned) {
            node.x = node.x.min(width - PADDING).max(PADDING);
            node.y = node.y.min(height - PADDING).max(PADDING);
        }
    }

    graph
        .nodes
        .iter()
        .zip(nodes)
        .map(|(ln, s)| PositionedNode {
            node: ln.node.clone(),
            x: s.x,
            y: s.y,
            vx: s.vx,
            vy: s.vy,
            pinned: s.pinned,
            level: ln.level,
            radius: ln.radius,
        })
        .collect()
}

/// Per-pair repulsion shrinks as the graph grows so dense lineages do not
/// explode outward.
fn crowding_discount(node_count: usize) -> f64 {
    (1.0 - node_count as f64 / 200.0).max(0.3)
}

/// Pushes a pair closer than `min_distance` back apart along their connecting
/// line. Free pairs split the correction; a pinned endpoint passes its share
/// to the free one. Coincident pairs have no separating direction and are
/// left to repulsion.
fn resolve_overlap(nodes: &mut [SimNode], i: usize, j: usize, min_distance: f64) {
    if nodes[i].pinned && nodes[j].pinned {
        return;
    }
    let dx = nodes[i].x - nodes[j].x;
    let dy = nodes[i].y - nodes[j].y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= 0.0 || dist >= min_distance {
        return;
    }

    let ux = dx / dist;
    let uy = dy / dist;
    let gap = min_distance - dist;

    match (nodes[i].pinned, nodes[j].pinned) {
        (false, false) => {
            nodes[i].x += ux * gap / 2.0;
            nodes[i].y += uy * gap / 2.0;
            nodes[j].x -= ux * gap / 2.0;
            nodes[j].y -= uy * gap / 2.0;
        }
        (true, false) => {
            nodes[j].x -= ux * gap;
            nodes[j].y -= uy * gap;
        }
        (false, true) => {
            nodes[i].x += ux * gap;
            nodes[i].y += uy * gap;
        }
        (true, true) => unreachable!("both-pinned pairs return early"),
    }
}
