//! Rooted dependency graphs
//!
//! A sentence is modelled as a directed graph over token indices where node
//! `0` is a virtual root standing for "no governor" and nodes `1..=n` are the
//! tokens in left-to-right order. Graphs are validated on construction and
//! immutable afterwards.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// Token index; `0` is the virtual root
pub type NodeId = usize;

/// A `(governor, dependent)` pair
pub type Edge = (NodeId, NodeId);

/// The virtual root node
pub const ROOT: NodeId = 0;

/// Reasons an edge list does not describe a rooted tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("dependency graph is empty")]
    Empty,

    #[error("no edge is governed by the virtual root")]
    MissingRoot,

    #[error("virtual root has {count} outgoing edges, expected exactly one")]
    MultipleRoots { count: usize },

    #[error("node {node} has more than one governor")]
    DuplicateDependent { node: NodeId },

    #[error("virtual root cannot be a dependent (governor {governor})")]
    RootAsDependent { governor: NodeId },

    #[error("node {node} governs itself")]
    SelfLoop { node: NodeId },

    #[error("cycle through node {node}")]
    Cycle { node: NodeId },

    #[error("node {node} is not reachable from the root")]
    Disconnected { node: NodeId },
}

/// Immutable rooted directed graph
///
/// Nodes and successor lists keep the order in which edges were supplied,
/// which fixes the traversal order used by serialization and head-finality.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Nodes in order of first appearance, starting with the virtual root
    nodes: Vec<NodeId>,
    /// Edges in input order
    edges: Vec<Edge>,
    successors: FxHashMap<NodeId, Vec<NodeId>>,
    root: NodeId,
}

impl Graph {
    /// Build and validate a graph from `(governor, dependent)` pairs
    pub fn from_edges(edges: &[Edge]) -> Result<Self, GraphError> {
        if edges.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut nodes = vec![ROOT];
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        seen.insert(ROOT);
        let mut governor_of: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut successors: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();

        for &(governor, dependent) in edges {
            if dependent == ROOT {
                return Err(GraphError::RootAsDependent { governor });
            }
            if governor == dependent {
                return Err(GraphError::SelfLoop { node: dependent });
            }
            if governor_of.insert(dependent, governor).is_some() {
                return Err(GraphError::DuplicateDependent { node: dependent });
            }
            for node in [governor, dependent] {
                if seen.insert(node) {
                    nodes.push(node);
                }
            }
            successors.entry(governor).or_default().push(dependent);
        }

        let root = match successors.get(&ROOT).map(Vec::as_slice) {
            None | Some([]) => return Err(GraphError::MissingRoot),
            Some([root]) => *root,
            Some(roots) => return Err(GraphError::MultipleRoots { count: roots.len() }),
        };

        let graph = Self {
            nodes,
            edges: edges.to_vec(),
            successors,
            root,
        };
        graph.check_reachable(&governor_of)?;
        Ok(graph)
    }

    /// Every node must hang below the virtual root. For the first node that
    /// does not, walk up its governors to tell a cycle from a dangling chain.
    fn check_reachable(&self, governor_of: &FxHashMap<NodeId, NodeId>) -> Result<(), GraphError> {
        let reached: FxHashSet<NodeId> = self.preorder(ROOT).into_iter().collect();
        if reached.len() == self.nodes.len() {
            return Ok(());
        }

        let Some(&start) = self.nodes.iter().find(|&&n| !reached.contains(&n)) else {
            return Ok(());
        };

        let mut path = FxHashSet::default();
        let mut current = start;
        while path.insert(current) {
            match governor_of.get(&current) {
                Some(&governor) => current = governor,
                None => return Err(GraphError::Disconnected { node: start }),
            }
        }
        Err(GraphError::Cycle { node: current })
    }

    /// The dependent of the virtual root (the sentence's syntactic root)
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Direct dependents of `node`, in input order
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        self.successors.get(&node).map_or(&[], Vec::as_slice)
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.successors(node).len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All nodes including the virtual root, in order of first appearance
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Depth-first pre-order starting at `start`
    ///
    /// Uses an explicit stack so arbitrarily deep chains are safe.
    pub fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.successors(node).iter().rev());
        }
        order
    }

    /// Depth-first pre-order from the syntactic root (virtual root excluded)
    pub fn traversal_order(&self) -> Vec<NodeId> {
        self.preorder(self.root)
    }
}

/// The two graph variants of one sentence
///
/// `syntactic` carries genuine syntactic relations only; `with_punct` adds
/// punctuation attachments on top. Both are built independently from the
/// same input.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    pub syntactic: Graph,
    pub with_punct: Graph,
}

impl DependencyGraph {
    /// Build both variants from the syntactic and punctuation edge lists
    pub fn build(edges: &[Edge], punct_edges: &[Edge]) -> Result<Self, GraphError> {
        let syntactic = Graph::from_edges(edges)?;
        let with_punct = if punct_edges.is_empty() {
            syntactic.clone()
        } else {
            let merged: Vec<Edge> = edges.iter().chain(punct_edges).copied().collect();
            Graph::from_edges(&merged)?
        };
        Ok(Self {
            syntactic,
            with_punct,
        })
    }
}
