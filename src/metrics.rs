//! Structural metrics over dependency graphs
//!
//! All token positions are 1-indexed; the virtual root (node 0) never enters
//! a sequence or an average. Metrics that divide return `DegenerateMetric`
//! instead of producing `NaN` or infinity.

use crate::baseline::BaselineError;
use crate::graph::{DependencyGraph, Edge, GraphError, NodeId, ROOT};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Error while computing the metrics of one sentence
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("invalid dependency graph: {0}")]
    InvalidGraph(#[from] GraphError),

    #[error("{metric} is undefined: {reason}")]
    DegenerateMetric {
        metric: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Baseline(#[from] BaselineError),
}

/// Number of syntactic edges, the root edge included
pub fn sentence_length(graph: &DependencyGraph) -> usize {
    graph.syntactic.edge_count()
}

pub fn number_of_syntactic_links(graph: &DependencyGraph) -> usize {
    graph.syntactic.edge_count() - 1
}

/// Token index of the syntactic root
pub fn root_distance(graph: &DependencyGraph) -> usize {
    graph.syntactic.root()
}

fn distance(edge: &Edge) -> usize {
    edge.0.abs_diff(edge.1)
}

/// Linear distance of every non-root edge, ordered by dependent index
pub fn dependency_distances(graph: &DependencyGraph) -> Vec<usize> {
    let mut edges: Vec<&Edge> = graph
        .syntactic
        .edges()
        .iter()
        .filter(|(governor, _)| *governor > ROOT)
        .collect();
    edges.sort_by_key(|(_, dependent)| *dependent);
    edges.into_iter().map(distance).collect()
}

pub fn dependency_distance_sum(graph: &DependencyGraph) -> usize {
    graph
        .syntactic
        .edges()
        .iter()
        .filter(|(governor, _)| *governor > ROOT)
        .map(distance)
        .sum()
}

/// Mean dependency distance
pub fn mdd(graph: &DependencyGraph) -> Result<f64, MetricsError> {
    let links = number_of_syntactic_links(graph);
    if links == 0 {
        return Err(MetricsError::DegenerateMetric {
            metric: "mdd",
            reason: "sentence has no syntactic links",
        });
    }
    Ok(dependency_distance_sum(graph) as f64 / links as f64)
}

/// Normalized dependency distance: `|ln(mdd / sqrt(rootDistance * sentenceLength))|`
pub fn ndd(graph: &DependencyGraph) -> Result<f64, MetricsError> {
    let mdd = mdd(graph)?;
    let normalizer = root_distance(graph) * sentence_length(graph);
    if normalizer == 0 {
        return Err(MetricsError::DegenerateMetric {
            metric: "ndd",
            reason: "root distance times sentence length is zero",
        });
    }
    Ok((mdd / (normalizer as f64).sqrt()).ln().abs())
}

/// Whether `v` has exactly one endpoint strictly inside the span of `u`
/// while sharing no endpoint with it
fn crosses(u: &Edge, v: &Edge) -> bool {
    if u.0 == v.0 || u.0 == v.1 || u.1 == v.0 || u.1 == v.1 {
        return false;
    }
    let (lo, hi) = (u.0.min(u.1), u.0.max(u.1));
    let inside = |x: NodeId| lo < x && x < hi;
    inside(v.0) != inside(v.1)
}

/// Number of crossing pairs among the non-root edges
pub fn crossings(graph: &DependencyGraph) -> usize {
    let edges: Vec<&Edge> = graph
        .syntactic
        .edges()
        .iter()
        .filter(|(governor, _)| *governor > ROOT)
        .collect();

    // every crossing pair is seen from both of its edges
    let total: usize = edges
        .iter()
        .map(|u| edges.iter().filter(|v| crosses(u, v)).count())
        .sum();
    total / 2
}

/// Weighted longest path from the virtual root, edges weighted by distance
///
/// The root edge counts too, so the result is at least `rootDistance`.
pub fn dependency_height(graph: &DependencyGraph) -> usize {
    let tree = &graph.syntactic;
    let mut heights: FxHashMap<NodeId, usize> = FxHashMap::default();

    // reverse pre-order visits children before their parent
    for node in tree.preorder(ROOT).into_iter().rev() {
        let height = tree
            .successors(node)
            .iter()
            .map(|&s| node.abs_diff(s) + heights.get(&s).copied().unwrap_or(0))
            .max()
            .unwrap_or(0);
        heights.insert(node, height);
    }
    heights.get(&ROOT).copied().unwrap_or(0)
}

/// Same as [`dependency_height`]
pub fn longest_path(graph: &DependencyGraph) -> usize {
    dependency_height(graph)
}

/// Depth of every token in pre-order, the syntactic root at `start`
fn depths(graph: &DependencyGraph, start: usize) -> Vec<usize> {
    let tree = &graph.syntactic;
    let mut depths = Vec::with_capacity(tree.node_count());
    let mut stack = vec![(tree.root(), start)];
    while let Some((node, depth)) = stack.pop() {
        depths.push(depth);
        stack.extend(tree.successors(node).iter().rev().map(|&s| (s, depth + 1)));
    }
    depths
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

/// Population variance
fn variance(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64
}

pub fn depth_mean(graph: &DependencyGraph) -> f64 {
    mean(&depths(graph, 0))
}

pub fn depth_variance(graph: &DependencyGraph) -> f64 {
    variance(&depths(graph, 0))
}

/// One more than the deepest token depth
pub fn tree_height(graph: &DependencyGraph) -> usize {
    depths(graph, 1).into_iter().max().unwrap_or(0)
}

/// Tokens without dependents
pub fn leaves(graph: &DependencyGraph) -> usize {
    let tree = &graph.syntactic;
    tree.traversal_order()
        .into_iter()
        .filter(|&node| tree.out_degree(node) == 0)
        .count()
}

fn out_degrees(graph: &DependencyGraph) -> Vec<usize> {
    let tree = &graph.syntactic;
    tree.nodes()
        .iter()
        .filter(|&&node| node != ROOT)
        .map(|&node| tree.out_degree(node))
        .collect()
}

pub fn tree_degree(graph: &DependencyGraph) -> usize {
    out_degrees(graph).into_iter().max().unwrap_or(0)
}

pub fn tree_degree_mean(graph: &DependencyGraph) -> f64 {
    mean(&out_degrees(graph))
}

pub fn tree_degree_variance(graph: &DependencyGraph) -> f64 {
    variance(&out_degrees(graph))
}

/// Share of dependents preceding their head, averaged over all heads
pub fn head_final_ratio(graph: &DependencyGraph) -> Result<f64, MetricsError> {
    let tree = &graph.syntactic;
    let ratios: Vec<f64> = tree
        .nodes()
        .iter()
        .filter(|&&head| head != ROOT)
        .filter_map(|&head| {
            let dependents = tree.successors(head);
            if dependents.is_empty() {
                return None;
            }
            let head_final = dependents.iter().filter(|&&d| d < head).count();
            Some(head_final as f64 / dependents.len() as f64)
        })
        .collect();

    if ratios.is_empty() {
        return Err(MetricsError::DegenerateMetric {
            metric: "headFinalRatio",
            reason: "no token has dependents",
        });
    }
    Ok(ratios.iter().sum::<f64>() / ratios.len() as f64)
}

/// Edit distance between the pre-order traversal of the punctuation-inclusive
/// tree and the plain left-to-right token order
pub fn head_final_distance(graph: &DependencyGraph) -> usize {
    let traversal = graph.with_punct.traversal_order();
    let mut word_order = traversal.clone();
    word_order.sort_unstable();
    levenshtein(&word_order, &traversal)
}

/// Levenshtein distance over arbitrary symbols
fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(x != y);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "The quick brown fox jumped over the lazy dog ."
    fn jumped() -> DependencyGraph {
        DependencyGraph::build(
            &[
                (4, 1),
                (4, 2),
                (4, 3),
                (5, 4),
                (0, 5),
                (9, 6),
                (9, 7),
                (9, 8),
                (5, 9),
            ],
            &[(5, 10)],
        )
        .unwrap()
    }

    /// Six tokens, root at 6, one crossing between 6->2 and 1->3
    fn geklappt() -> DependencyGraph {
        DependencyGraph::build(
            &[(6, 1), (6, 2), (1, 3), (5, 4), (6, 5), (0, 6)],
            &[(6, 7)],
        )
        .unwrap()
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} +/- {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_jumped() {
        let graph = jumped();

        assert_eq!(dependency_distances(&graph), vec![3, 2, 1, 1, 3, 2, 1, 4]);
        assert_eq!(dependency_distance_sum(&graph), 17);
        assert_eq!(number_of_syntactic_links(&graph), 8);
        assert_eq!(sentence_length(&graph), 9);
        assert_eq!(root_distance(&graph), 5);
        assert_close(mdd(&graph).unwrap(), 2.125, 1e-5);
        assert_close(ndd(&graph).unwrap(), 1.14955944251, 1e-5);
        assert_eq!(crossings(&graph), 0);
        assert_eq!(tree_height(&graph), 3);
    }

    #[test]
    fn test_jumped_shape() {
        let graph = jumped();

        assert_eq!(dependency_height(&graph), 12);
        assert_eq!(longest_path(&graph), 12);
        assert_close(depth_mean(&graph), 14.0 / 9.0, 1e-9);
        assert_close(depth_variance(&graph), 0.4691358, 1e-6);
        assert_eq!(leaves(&graph), 6);
        assert_eq!(tree_degree(&graph), 3);
        assert_close(tree_degree_mean(&graph), 8.0 / 9.0, 1e-9);
        assert_close(tree_degree_variance(&graph), 1.6543210, 1e-6);
        assert_close(head_final_ratio(&graph).unwrap(), 2.5 / 3.0, 1e-9);
        assert_eq!(head_final_distance(&graph), 5);
    }

    #[test]
    fn test_geklappt() {
        let graph = geklappt();

        assert_eq!(dependency_distances(&graph), vec![5, 4, 2, 1, 1]);
        assert_eq!(number_of_syntactic_links(&graph), 5);
        assert_eq!(sentence_length(&graph), 6);
        assert_eq!(root_distance(&graph), 6);
        assert_close(mdd(&graph).unwrap(), 2.6, 1e-5);
        assert_close(ndd(&graph).unwrap(), 0.8362480242, 1e-5);
        assert_eq!(crossings(&graph), 1);
        assert_eq!(tree_height(&graph), 3);
        assert_eq!(dependency_height(&graph), 13);
        assert_close(depth_mean(&graph), 1.17, 0.01);
        assert_close(depth_variance(&graph), 0.47, 0.01);
        assert_eq!(leaves(&graph), 3);
        assert_eq!(tree_degree(&graph), 3);
        assert_close(tree_degree_mean(&graph), 0.83, 0.01);
        assert_close(tree_degree_variance(&graph), 1.139, 0.01);
        assert_close(head_final_ratio(&graph).unwrap(), 0.67, 0.01);
        assert_eq!(head_final_distance(&graph), 4);
    }

    #[test]
    fn test_single_token_is_degenerate() {
        let graph = DependencyGraph::build(&[(0, 1)], &[]).unwrap();

        assert_eq!(number_of_syntactic_links(&graph), 0);
        assert!(matches!(
            mdd(&graph),
            Err(MetricsError::DegenerateMetric { metric: "mdd", .. })
        ));
        assert!(matches!(
            ndd(&graph),
            Err(MetricsError::DegenerateMetric { .. })
        ));
        assert!(matches!(
            head_final_ratio(&graph),
            Err(MetricsError::DegenerateMetric { .. })
        ));

        // the shape metrics stay defined
        assert_eq!(leaves(&graph), 1);
        assert_eq!(tree_height(&graph), 1);
        assert_eq!(dependency_height(&graph), 1);
        assert_eq!(head_final_distance(&graph), 0);
    }

    #[test]
    fn test_crossings_are_symmetric_under_edge_order() {
        let edges = [(0, 2), (2, 4), (4, 1), (2, 3), (3, 5)];
        let mut reversed = edges;
        reversed.reverse();

        let a = DependencyGraph::build(&edges, &[]).unwrap();
        let b = DependencyGraph::build(&reversed, &[]).unwrap();
        assert_eq!(crossings(&a), crossings(&b));
        // 3->5 crosses both 2->4 and 4->1
        assert_eq!(crossings(&a), 2);
    }

    #[test]
    fn test_head_final_ratio_bounds() {
        let head_initial = DependencyGraph::build(&[(0, 1), (1, 2), (2, 3)], &[]).unwrap();
        let head_final = DependencyGraph::build(&[(0, 3), (3, 2), (2, 1)], &[]).unwrap();

        assert_eq!(head_final_ratio(&head_initial).unwrap(), 0.0);
        assert_eq!(head_final_ratio(&head_final).unwrap(), 1.0);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein::<u8>(&[], &[]), 0);
        assert_eq!(levenshtein(b"kitten", b"sitting"), 3);
        assert_eq!(levenshtein(&[1, 2, 3], &[1, 2, 3]), 0);
        assert_eq!(levenshtein(&[1, 2, 3], &[]), 3);
    }
}
