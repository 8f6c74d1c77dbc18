use divan::AllocProfiler;
use divan::{Bencher, black_box};
use rand::SeedableRng;
use rand::rngs::StdRng;

use depmetrics::random::random_tree_with_rng;
use depmetrics::{
    DependencyGraph, MetricsConfig, SentenceMetrics, parse_tree, serialize, tree_edit_distance,
};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

/// Random sentence-shaped graph with `n` tokens
fn sentence(n: usize, seed: u64) -> DependencyGraph {
    let tree = random_tree_with_rng(n, &mut StdRng::seed_from_u64(seed)).unwrap();
    DependencyGraph::build(tree.edges(), &[]).unwrap()
}

#[divan::bench(args = [10, 40, 120])]
fn random_tree(bencher: Bencher, n: usize) {
    let mut rng = StdRng::seed_from_u64(1);
    bencher.bench_local(|| black_box(random_tree_with_rng(black_box(n), &mut rng).unwrap()));
}

#[divan::bench(args = [10, 40, 120])]
fn zhang_shasha(bencher: Bencher, n: usize) {
    let a = sentence(n, 1);
    let b = sentence(n, 2);
    let a = parse_tree(&serialize(&a.syntactic, a.syntactic.root())).unwrap();
    let b = parse_tree(&serialize(&b.syntactic, b.syntactic.root())).unwrap();
    bencher.bench_local(|| black_box(tree_edit_distance(black_box(&a), black_box(&b))));
}

#[divan::bench(args = [10, 40, 120], sample_count = 20)]
fn sentence_metrics(bencher: Bencher, n: usize) {
    let graph = sentence(n, 3);
    let config = MetricsConfig::default();
    bencher.bench_local(|| black_box(SentenceMetrics::compute(black_box(&graph), &config).unwrap()));
}
