//! Random rooted trees as a null model
//!
//! Shuffle the tokens, hang the last one under the virtual root, and attach
//! every other token to a uniformly chosen token later in the shuffled
//! order. Parents always come later, so the result is acyclic and connected
//! without rejection sampling. This is not uniform over labeled trees.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::graph::{Edge, Graph, GraphError, NodeId, ROOT};

/// Random tree over tokens `1..=n` using the thread-local generator
pub fn random_tree(n: usize) -> Result<Graph, GraphError> {
    random_tree_with_rng(n, &mut rand::thread_rng())
}

/// Random tree over tokens `1..=n` drawn from `rng`
pub fn random_tree_with_rng<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Graph, GraphError> {
    if n == 0 {
        return Err(GraphError::Empty);
    }

    let mut order: Vec<NodeId> = (1..=n).collect();
    order.shuffle(rng);

    let mut edges: Vec<Edge> = Vec::with_capacity(n);
    edges.push((ROOT, order[n - 1]));
    for i in 0..n - 1 {
        let offset = rng.gen_range(1..n - i);
        edges.push((order[i + offset], order[i]));
    }

    Graph::from_edges(&edges)
}
