//! Zhang–Shasha tree edit distance
//!
//! Ordered labeled tree edit distance over [`LabeledTree`] with a
//! pluggable cost model. Nodes are numbered in post-order (1-based); for every
//! pair of keyroots the forest distance table is filled, reusing the tree
//! distances of earlier (smaller) keyroot pairs.

use rustc_hash::FxHashSet;

use crate::tree::LabeledTree;

/// Costs of the three edit operations
pub trait EditCosts {
    fn insert(&self, label: &str) -> usize;
    fn delete(&self, label: &str) -> usize;
    fn relabel(&self, from: &str, to: &str) -> usize;
}

/// Insert and delete cost 1; relabel costs 1 unless the labels are equal
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCost;

impl EditCosts for UnitCost {
    fn insert(&self, _label: &str) -> usize {
        1
    }

    fn delete(&self, _label: &str) -> usize {
        1
    }

    fn relabel(&self, from: &str, to: &str) -> usize {
        usize::from(from != to)
    }
}

/// Post-order view of a tree
struct Postorder<'a> {
    /// `labels[k]` is the label of post-order node `k`; slot 0 is unused
    labels: Vec<&'a str>,
    /// Post-order index of the leftmost leaf below `k`
    leftmost: Vec<usize>,
    /// Nodes whose leftmost leaf differs from their parent's, ascending
    keyroots: Vec<usize>,
}

impl<'a> Postorder<'a> {
    fn new(tree: &'a LabeledTree) -> Self {
        let order = tree.postorder();
        let mut position = vec![0; tree.len()];
        for (k, &id) in order.iter().enumerate() {
            position[id] = k + 1;
        }

        let mut labels = Vec::with_capacity(order.len() + 1);
        let mut leftmost = Vec::with_capacity(order.len() + 1);
        labels.push("");
        leftmost.push(0);
        for &id in &order {
            labels.push(tree.label(id).unwrap_or_default());
            let l = match tree.children(id).first() {
                Some(&first) => leftmost[position[first]],
                None => position[id],
            };
            leftmost.push(l);
        }

        let mut seen = FxHashSet::default();
        let mut keyroots: Vec<usize> = (1..=order.len())
            .rev()
            .filter(|&k| seen.insert(leftmost[k]))
            .collect();
        keyroots.reverse();

        Self {
            labels,
            leftmost,
            keyroots,
        }
    }

    fn len(&self) -> usize {
        self.labels.len() - 1
    }
}

/// Unit-cost edit distance between two trees
pub fn tree_edit_distance(a: &LabeledTree, b: &LabeledTree) -> usize {
    tree_edit_distance_with(a, b, &UnitCost)
}

/// Edit distance between two trees under `costs`
pub fn tree_edit_distance_with<C: EditCosts + ?Sized>(
    a: &LabeledTree,
    b: &LabeledTree,
    costs: &C,
) -> usize {
    let a = Postorder::new(a);
    let b = Postorder::new(b);
    let (n, m) = (a.len(), b.len());

    if n == 0 {
        return b.labels[1..].iter().map(|l| costs.insert(l)).sum();
    }
    if m == 0 {
        return a.labels[1..].iter().map(|l| costs.delete(l)).sum();
    }

    let width = m + 1;
    let at = |i: usize, j: usize| i * width + j;
    let mut tree_dist = vec![0; (n + 1) * width];
    let mut forest_dist = vec![0; (n + 1) * width];

    for &i in &a.keyroots {
        for &j in &b.keyroots {
            let (li, lj) = (a.leftmost[i], b.leftmost[j]);

            forest_dist[at(li - 1, lj - 1)] = 0;
            for i1 in li..=i {
                forest_dist[at(i1, lj - 1)] =
                    forest_dist[at(i1 - 1, lj - 1)] + costs.delete(a.labels[i1]);
            }
            for j1 in lj..=j {
                forest_dist[at(li - 1, j1)] =
                    forest_dist[at(li - 1, j1 - 1)] + costs.insert(b.labels[j1]);
            }

            for i1 in li..=i {
                for j1 in lj..=j {
                    let delete = forest_dist[at(i1 - 1, j1)] + costs.delete(a.labels[i1]);
                    let insert = forest_dist[at(i1, j1 - 1)] + costs.insert(b.labels[j1]);

                    if a.leftmost[i1] == li && b.leftmost[j1] == lj {
                        // both prefixes are whole trees
                        let relabel = forest_dist[at(i1 - 1, j1 - 1)]
                            + costs.relabel(a.labels[i1], b.labels[j1]);
                        let d = delete.min(insert).min(relabel);
                        forest_dist[at(i1, j1)] = d;
                        tree_dist[at(i1, j1)] = d;
                    } else {
                        let matched = forest_dist[at(a.leftmost[i1] - 1, b.leftmost[j1] - 1)]
                            + tree_dist[at(i1, j1)];
                        forest_dist[at(i1, j1)] = delete.min(insert).min(matched);
                    }
                }
            }
        }
    }

    tree_dist[at(n, m)]
}
