//! CART decision tree (Gini impurity)
//!
//! Trees are grown on a bootstrap sample given as a list of row indices
//! (repeats allowed, which weights duplicated rows). At each node a random
//! subset of features is searched for the best threshold; leaves store the
//! class distribution of the rows that reached them.

use crate::data::FEATURE_COUNT;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Non-constant features examined per split
    pub max_features: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Best split found for one node
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    /// Sum over children of (class count² / child size); higher = purer
    purity: f64,
}

/// Training inputs shared by every recursive call
struct TrainingSet<'a> {
    x: &'a [[f64; FEATURE_COUNT]],
    y: &'a [usize],
    n_classes: usize,
    params: TreeParams,
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree over `indices` (reordered in place during partitioning)
    pub fn fit<R: Rng>(
        x: &[[f64; FEATURE_COUNT]],
        y: &[usize],
        indices: &mut [usize],
        n_classes: usize,
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let set = TrainingSet { x, y, n_classes, params };
        let mut tree = Self { nodes: Vec::new() };
        tree.build(&set, indices, 0, rng);
        tree
    }

    /// Class distribution of the leaf `row` falls into
    pub fn predict_proba(&self, row: &[f64; FEATURE_COUNT]) -> &[f64] {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { distribution } => return distribution,
                Node::Split { feature, threshold, left, right } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn depth_of(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + depth_of(nodes, *left).max(depth_of(nodes, *right))
                }
            }
        }
        depth_of(&self.nodes, 0)
    }

    fn build<R: Rng>(
        &mut self,
        set: &TrainingSet,
        indices: &mut [usize],
        depth: usize,
        rng: &mut R,
    ) -> usize {
        let counts = class_counts(set, indices);
        let node_id = self.nodes.len();

        let is_pure = counts.iter().filter(|&&c| c > 0.0).count() <= 1;
        if depth >= set.params.max_depth
            || indices.len() < set.params.min_samples_split
            || is_pure
        {
            self.nodes.push(leaf(&counts));
            return node_id;
        }

        let Some(split) = best_split(set, indices, rng) else {
            self.nodes.push(leaf(&counts));
            return node_id;
        };

        // Placeholder until both children have ids
        self.nodes.push(Node::Leaf { distribution: Vec::new() });

        sort_by_feature(set.x, indices, split.feature);
        let mid = indices.partition_point(|&i| set.x[i][split.feature] <= split.threshold);
        let (left_rows, right_rows) = indices.split_at_mut(mid);

        let left = self.build(set, left_rows, depth + 1, rng);
        let right = self.build(set, right_rows, depth + 1, rng);

        self.nodes[node_id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_id
    }
}

fn class_counts(set: &TrainingSet, indices: &[usize]) -> Vec<f64> {
    let mut counts = vec![0.0; set.n_classes];
    for &i in indices {
        counts[set.y[i]] += 1.0;
    }
    counts
}

fn leaf(counts: &[f64]) -> Node {
    let total: f64 = counts.iter().sum();
    Node::Leaf {
        distribution: counts.iter().map(|c| c / total).collect(),
    }
}

fn sort_by_feature(x: &[[f64; FEATURE_COUNT]], indices: &mut [usize], feature: usize) {
    indices.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));
}

/// Search random features (in random order) until `max_features`
/// non-constant ones have been examined
fn best_split<R: Rng>(
    set: &TrainingSet,
    indices: &mut [usize],
    rng: &mut R,
) -> Option<SplitCandidate> {
    let mut features: [usize; FEATURE_COUNT] = std::array::from_fn(|f| f);
    features.shuffle(rng);

    let mut best: Option<SplitCandidate> = None;
    let mut examined = 0;

    for &feature in &features {
        if examined >= set.params.max_features {
            break;
        }

        sort_by_feature(set.x, indices, feature);
        let first = set.x[indices[0]][feature];
        let last = set.x[indices[indices.len() - 1]][feature];
        if first == last {
            continue;
        }
        examined += 1;

        if let Some(candidate) = best_threshold(set, indices, feature) {
            if best.map_or(true, |b| candidate.purity > b.purity) {
                best = Some(candidate);
            }
        }
    }

    best
}

/// Sweep thresholds over rows already sorted by `feature`
fn best_threshold(set: &TrainingSet, sorted: &[usize], feature: usize) -> Option<SplitCandidate> {
    let n = sorted.len();
    let mut right_counts = class_counts(set, sorted);
    let mut left_counts = vec![0.0; set.n_classes];

    // Running Σ count² per side, updated incrementally as rows move left
    let mut left_sq = 0.0;
    let mut right_sq: f64 = right_counts.iter().map(|c| c * c).sum();

    let mut best: Option<SplitCandidate> = None;

    for pos in 1..n {
        let class = set.y[sorted[pos - 1]];
        let l = left_counts[class];
        let r = right_counts[class];
        left_sq += 2.0 * l + 1.0;
        right_sq -= 2.0 * r - 1.0;
        left_counts[class] = l + 1.0;
        right_counts[class] = r - 1.0;

        let prev = set.x[sorted[pos - 1]][feature];
        let next = set.x[sorted[pos]][feature];
        if prev == next {
            continue;
        }

        let purity = left_sq / pos as f64 + right_sq / (n - pos) as f64;
        if best.map_or(true, |b| purity > b.purity) {
            let mut threshold = (prev + next) / 2.0;
            if threshold >= next {
                threshold = prev;
            }
            best = Some(SplitCandidate { feature, threshold, purity });
        }
    }

    best
}
