#![forbid(unsafe_code)]

//! Snapshot model for the teacher directory graph plus depth-bounded lineage
//! extraction.
//!
//! The data layer hands over one flat snapshot per request: every node in the
//! directory (people, institutions, events) and every relation between them.
//! This crate carries the plain-data types for that snapshot and the builder
//! that cuts it down to the teaching lineage around a focal person. Positions
//! are computed separately by `parampara-layout`; nothing here is mutated by
//! the simulation.

pub mod error;
pub mod subgraph;

pub use error::{Error, Result};

use serde::{Deserialize, Serialize};

/// Relation label that drives traversal and hierarchy, read as "source taught
/// target". Every other label is passed through untouched and ignored by the
/// lineage core.
pub const TEACHES: &str = "teaches";

/// Category of a directory node. Only `Person` nodes appear in lineage output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NodeCategory {
    Person,
    Institution,
    Event,
    Other,
}

impl From<String> for NodeCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "person" => Self::Person,
            "institution" => Self::Institution,
            "event" => Self::Event,
            _ => Self::Other,
        }
    }
}

/// Free-form node attributes, opaque to extraction and layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeAttributes {
    pub tradition: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub popularity: u64,
}

/// One node of the full directory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub category: NodeCategory,
    #[serde(default)]
    pub attributes: NodeAttributes,
}

/// One relation of the full directory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relation: String,
}

impl GraphEdge {
    pub fn is_teaches(&self) -> bool {
        self.relation == TEACHES
    }
}

/// A person node of the extracted lineage, with derived display data.
///
/// `level` is the net teaches count within the extracted neighborhood (more
/// students and fewer teachers means a higher, more senior level). `radius`
/// grows with level and is floored; both are fixed before layout runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageNode {
    pub node: GraphNode,
    pub level: i32,
    pub radius: f64,
}

/// The depth-bounded lineage neighborhood produced by [`subgraph::extract`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct LineageGraph {
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<GraphEdge>,
    /// The focal person, when extraction was centered on one. The layout pins
    /// this node at the canvas center.
    pub focal: Option<String>,
}

impl LineageGraph {
    /// Checks the builder's output invariant: every edge endpoint resolves to
    /// an included node. Extraction upholds this by construction; the check is
    /// for callers assembling a `LineageGraph` by hand.
    pub fn validate(&self) -> Result<()> {
        let ids: std::collections::BTreeSet<&str> =
            self.nodes.iter().map(|n| n.node.id.as_str()).collect();
        for e in &self.edges {
            if !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()) {
                return Err(Error::MissingEndpoint { edge_id: e.id.clone() });
            }
        }
        Ok(())
    }
}
