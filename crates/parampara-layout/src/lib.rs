#![forbid(unsafe_code)]

//! Headless force-directed layout for teaching lineage graphs.
//!
//! Consumes the subgraph produced by `parampara_graph::subgraph::extract` and
//! computes stable planar positions with an iterative physics pass: pairwise
//! repulsion, spring attraction along `teaches` edges, a vertical bias that
//! keeps teachers above their students, local collision resolution and a
//! viewport clamp. One call runs every iteration synchronously and
//! returns fresh output records; the input graph is never mutated, so
//! concurrent calls with independent inputs are safe.
//!
//! Initial placement is the only random component. It is driven by a seeded
//! generator ([`LayoutParams::random_seed`]), so a fixed seed makes the whole
//! computation reproducible.

pub mod error;

mod rng;
mod sim;

pub use error::{Error, Result};

use parampara_graph::{GraphNode, LineageGraph};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Tuning knobs for the simulation. The defaults are starting points that
/// behave well for tens to low hundreds of nodes, not hard-coded constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Inverse-square push between every pair of nodes.
    pub repulsion: f64,
    /// Spring pull along `teaches` edges, proportional to distance. The
    /// spring has no rest length; it only ever pulls.
    pub attraction: f64,
    /// Per-iteration velocity retention, strictly inside (0, 1).
    pub damping: f64,
    /// Floor for pairwise distances: repulsion clamps to it and collision
    /// resolution restores it.
    pub min_distance: f64,
    /// Strength of the teacher-above-student vertical bias.
    pub hierarchy_strength: f64,
    /// Exact number of simulation rounds. There is no convergence check; pick
    /// this empirically for the expected graph size.
    pub iterations: usize,
    /// Seed for initial node placement. Equal seeds on equal inputs give
    /// byte-identical output; callers wanting a fresh arrangement per request
    /// supply a varying seed.
    pub random_seed: u64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            repulsion: 50_000.0,
            attraction: 0.01,
            damping: 0.85,
            min_distance: 80.0,
            hierarchy_strength: 1000.0,
            iterations: 100,
            random_seed: 0,
        }
    }
}

impl LayoutParams {
    /// Checks the caller contract from the module docs. [`layout`] itself does
    /// not defend against out-of-contract values.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_distance > 0.0) {
            return Err(Error::NonPositiveMinDistance(self.min_distance));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(Error::DampingOutOfRange(self.damping));
        }
        if self.iterations == 0 {
            return Err(Error::ZeroIterations);
        }
        Ok(())
    }
}

/// A lineage node with its final simulation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub node: GraphNode,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Pinned nodes (the focal person) sit at the canvas center and are never
    /// moved by the simulation. The engine sets this flag and never clears it.
    pub pinned: bool,
    pub level: i32,
    pub radius: f64,
}

/// An edge of the lineage with both endpoints resolved to positioned nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEdge {
    pub source: PositionedNode,
    pub target: PositionedNode,
    pub relation: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutResult {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<ResolvedEdge>,
}

/// Runs the simulation and resolves edge endpoints.
///
/// Node order in the output matches the input graph. Edges whose endpoints
/// did not survive extraction are dropped here as well rather than surfaced;
/// a well-formed `LineageGraph` never contains any.
pub fn layout(
    graph: &LineageGraph,
    width: f64,
    height: f64,
    params: &LayoutParams,
) -> LayoutResult {
    let nodes = sim::run(graph, width, height, params);

    let index: FxHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.node.id.as_str(), i))
        .collect();

    let edges: Vec<ResolvedEdge> = graph
        .edges
        .iter()
        .filter_map(|e| {
            let source = *index.get(e.source.as_str())?;
            let target = *index.get(e.target.as_str())?;
            Some(ResolvedEdge {
                source: nodes[source].clone(),
                target: nodes[target].clone(),
                relation: e.relation.clone(),
            })
        })
        .collect();

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        iterations = params.iterations,
        "computed lineage layout"
    );

    LayoutResult { nodes, edges }
}
