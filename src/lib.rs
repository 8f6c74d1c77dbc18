//! Depmetrics: structural complexity of dependency trees
//!
//! Computes dependency distance, crossing, depth, branching and
//! head-finality measures for parsed sentences, plus a tree edit distance
//! against a random tree of the same size.

pub mod baseline; // Random-baseline tree edit distance
pub mod config; // Engine configuration
pub mod conllu; // CoNLL-U sentence reader
pub mod graph; // Rooted dependency graphs and validation
pub mod metrics; // Metric computation
pub mod parser; // Tree string parser
pub mod random; // Random tree generator
pub mod sentence; // Per-sentence input and output records
pub mod serializer; // Canonical tree strings
pub mod tree; // Ordered labeled trees
pub mod zhang_shasha; // Tree edit distance

// Re-exports for convenience
pub use baseline::{BaselineError, baseline_distance};
pub use config::{BaselineConfig, MetricsConfig};
pub use conllu::CoNLLUReader;
pub use graph::{DependencyGraph, Edge, Graph, GraphError, NodeId};
pub use metrics::MetricsError;
pub use parser::parse_tree;
pub use random::random_tree;
pub use sentence::{SentenceEdges, SentenceMetrics};
pub use serializer::{LabelAlphabet, SerializeError, serialize};
pub use tree::LabeledTree;
pub use zhang_shasha::tree_edit_distance;
