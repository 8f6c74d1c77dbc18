//! Random-baseline tree edit distance
//!
//! Scores how far a sentence's tree is from one random tree of the same
//! size. A single random draw is used: further attempts are made only when
//! an attempt fails, never to pick a better sample.

use rand::Rng;
use thiserror::Error;

use crate::config::BaselineConfig;
use crate::graph::{Graph, GraphError};
use crate::parser::{ParseError, parse_tree};
use crate::random::random_tree_with_rng;
use crate::serializer::{LabelAlphabet, SerializeError, serialize_with};
use crate::tree::LabeledTree;
use crate::zhang_shasha::tree_edit_distance;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaselineError {
    #[error("serialization capacity exceeded: {0}")]
    CapacityExceeded(#[from] SerializeError),

    #[error("failed to parse tree string: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to generate random tree: {0}")]
    Generate(#[from] GraphError),

    #[error("failed to generate a valid random tree of length {tree_size} in {attempts} tries")]
    Exhausted { tree_size: usize, attempts: usize },
}

/// Edit distance between `real` and a random tree of `tree_size` tokens
pub fn baseline_distance(
    real: &Graph,
    tree_size: usize,
    config: &BaselineConfig,
) -> Result<usize, BaselineError> {
    baseline_distance_with_rng(real, tree_size, config, &mut rand::thread_rng())
}

/// Like [`baseline_distance`], drawing random trees from `rng`
///
/// Failures on the real tree are returned immediately; failures while
/// drawing or comparing a random tree are retried up to `max_tries` times.
pub fn baseline_distance_with_rng<R: Rng + ?Sized>(
    real: &Graph,
    tree_size: usize,
    config: &BaselineConfig,
    rng: &mut R,
) -> Result<usize, BaselineError> {
    let real_tree = parse_tree(&serialize_with(real, real.root(), config.labels)?)?;

    for attempt in 1..=config.max_tries {
        match sample_distance(&real_tree, tree_size, config.labels, rng) {
            Ok(distance) => return Ok(distance),
            Err(err) => {
                tracing::debug!(attempt, tree_size, error = %err, "random baseline attempt failed");
            }
        }
    }

    Err(BaselineError::Exhausted {
        tree_size,
        attempts: config.max_tries,
    })
}

fn sample_distance<R: Rng + ?Sized>(
    real_tree: &LabeledTree,
    tree_size: usize,
    labels: LabelAlphabet,
    rng: &mut R,
) -> Result<usize, BaselineError> {
    let random = random_tree_with_rng(tree_size, rng)?;
    let random_tree = parse_tree(&serialize_with(&random, random.root(), labels)?)?;
    Ok(tree_edit_distance(real_tree, &random_tree))
}
