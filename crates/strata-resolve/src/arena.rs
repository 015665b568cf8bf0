//! Indexed fragment records with a separate edge table.
//!
//! Nodes are addressed by position; edges are `(source, target, kind)`
//! triples kept in a set, so inserting the same edge twice is a no-op and
//! iteration order is stable.

use std::collections::BTreeSet;

use strata_model::{DependencyKind, FragmentId};
use strata_platform::{Platform, PlatformSet};

/// A fragment under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentNode {
    pub name: String,
    pub platforms: PlatformSet,
    pub root_platforms: PlatformSet,
    pub aliases: BTreeSet<String>,
    pub variants: Vec<String>,
    pub is_test: bool,
    pub is_default: bool,
}

impl FragmentNode {
    /// Words identifying the platform grouping: alias names if any, else the deepest root.
    pub fn label(&self) -> Vec<&str> {
        if !self.aliases.is_empty() {
            return self.aliases.iter().map(String::as_str).collect();
        }
        deepest_root(&self.root_platforms)
            .map(|p| vec![p.pretty()])
            .unwrap_or_default()
    }
}

/// The most specific of `roots`; the first in table order on equal depth.
pub fn deepest_root(roots: &PlatformSet) -> Option<Platform> {
    let mut best: Option<Platform> = None;
    for &root in roots {
        if best.map_or(true, |b| root.depth() > b.depth()) {
            best = Some(root);
        }
    }
    best
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub source: FragmentId,
    pub target: FragmentId,
    pub kind: DependencyKind,
}

/// Fragment records plus their edge table.
#[derive(Debug, Clone, Default)]
pub struct FragmentArena {
    nodes: Vec<FragmentNode>,
    edges: BTreeSet<Edge>,
}

impl FragmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: FragmentNode) -> FragmentId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Insert an edge; returns `false` if it was already present.
    pub fn add_edge(&mut self, source: FragmentId, target: FragmentId, kind: DependencyKind) -> bool {
        self.edges.insert(Edge {
            source,
            target,
            kind,
        })
    }

    pub fn node(&self, id: FragmentId) -> &FragmentNode {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[FragmentNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing edges of `source`, ordered by target then kind.
    pub fn edges_from(&self, source: FragmentId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.source == source)
    }

    /// The node with exactly these platforms and variant options.
    pub fn find(&self, platforms: &PlatformSet, variants: &[String]) -> Option<FragmentId> {
        self.nodes
            .iter()
            .position(|n| &n.platforms == platforms && n.variants == variants)
    }
}
