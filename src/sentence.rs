//! Per-sentence input and output records
//!
//! [`SentenceEdges`] is what an ingestion layer hands over for one sentence;
//! [`SentenceMetrics`] is the finished record for a serialization layer.
//! Field names serialize in camelCase.

use serde::{Deserialize, Serialize};

use crate::baseline::baseline_distance;
use crate::config::MetricsConfig;
use crate::graph::{DependencyGraph, Edge, GraphError};
use crate::metrics::{self, MetricsError};

/// The two edge lists of one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceEdges {
    /// Syntactic `(governor, dependent)` edges; governor 0 marks the root
    pub dependency_edges: Vec<Edge>,
    /// Punctuation attachments
    #[serde(default)]
    pub punct_edges: Vec<Edge>,
}

impl SentenceEdges {
    pub fn new(dependency_edges: Vec<Edge>, punct_edges: Vec<Edge>) -> Self {
        Self {
            dependency_edges,
            punct_edges,
        }
    }

    pub fn graph(&self) -> Result<DependencyGraph, GraphError> {
        DependencyGraph::build(&self.dependency_edges, &self.punct_edges)
    }

    /// Build the graphs and compute every metric
    pub fn metrics(&self, config: &MetricsConfig) -> Result<SentenceMetrics, MetricsError> {
        SentenceMetrics::compute(&self.graph()?, config)
    }
}

/// All metrics of one sentence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceMetrics {
    pub dependency_edges: Vec<Edge>,
    pub dependency_edges_with_punct: Vec<Edge>,
    pub dependency_distances: Vec<usize>,
    pub dependency_distance_sum: usize,
    pub sentence_length: usize,
    pub number_of_syntactic_links: usize,
    pub root_distance: usize,
    pub dependency_height: usize,
    pub mdd: f64,
    pub ndd: f64,
    pub tree_height: usize,
    pub depth_mean: f64,
    pub depth_variance: f64,
    pub leaves: usize,
    pub tree_degree: usize,
    pub tree_degree_mean: f64,
    pub tree_degree_variance: f64,
    pub head_final_ratio: f64,
    pub head_final_distance: usize,
    pub crossings: usize,
    /// Empty only when the baseline is optional and could not be computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_edit_distance: Option<usize>,
}

impl SentenceMetrics {
    pub fn compute(graph: &DependencyGraph, config: &MetricsConfig) -> Result<Self, MetricsError> {
        let mdd = metrics::mdd(graph)?;
        let ndd = metrics::ndd(graph)?;
        let head_final_ratio = metrics::head_final_ratio(graph)?;

        let tree_edit_distance = match baseline_distance(
            &graph.syntactic,
            metrics::sentence_length(graph),
            &config.baseline,
        ) {
            Ok(distance) => Some(distance),
            Err(err) if !config.baseline.required => {
                tracing::debug!(error = %err, "dropping random baseline");
                None
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            dependency_edges: graph.syntactic.edges().to_vec(),
            dependency_edges_with_punct: graph.with_punct.edges().to_vec(),
            dependency_distances: metrics::dependency_distances(graph),
            dependency_distance_sum: metrics::dependency_distance_sum(graph),
            sentence_length: metrics::sentence_length(graph),
            number_of_syntactic_links: metrics::number_of_syntactic_links(graph),
            root_distance: metrics::root_distance(graph),
            dependency_height: metrics::dependency_height(graph),
            mdd,
            ndd,
            tree_height: metrics::tree_height(graph),
            depth_mean: metrics::depth_mean(graph),
            depth_variance: metrics::depth_variance(graph),
            leaves: metrics::leaves(graph),
            tree_degree: metrics::tree_degree(graph),
            tree_degree_mean: metrics::tree_degree_mean(graph),
            tree_degree_variance: metrics::tree_degree_variance(graph),
            head_final_ratio,
            head_final_distance: metrics::head_final_distance(graph),
            crossings: metrics::crossings(graph),
            tree_edit_distance,
        })
    }
}
