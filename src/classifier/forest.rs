//! Bagged decision-tree ensemble
//!
//! Each tree sees a bootstrap resample of the training rows and searches
//! `sqrt(n_features)` features per split. Tree `t` draws from its own RNG
//! seeded with `seed + t`, so training is reproducible and independent of how
//! rayon schedules the trees. Predicted probabilities are the mean of the
//! per-tree leaf distributions.

use super::tree::{DecisionTree, TreeParams};
use crate::data::FEATURE_COUNT;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 20,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Fit on encoded labels `y` (each < `n_classes`); `x` must be non-empty
    pub fn fit(
        x: &[[f64; FEATURE_COUNT]],
        y: &[usize],
        n_classes: usize,
        params: &ForestParams,
    ) -> Self {
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            max_features: ((FEATURE_COUNT as f64).sqrt() as usize).max(1),
        };
        let n = x.len();

        let trees = (0..params.n_trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(t as u64));
                let mut bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(x, y, &mut bootstrap, n_classes, tree_params, &mut rng)
            })
            .collect();

        Self { trees, n_classes }
    }

    /// Mean class distribution across trees (sums to 1)
    pub fn predict_proba(&self, row: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (total, p) in totals.iter_mut().zip(tree.predict_proba(row)) {
                *total += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= n_trees);
        totals
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn max_tree_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dataset() -> (Vec<[f64; FEATURE_COUNT]>, Vec<usize>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for class in 0..3 {
            for i in 0..10 {
                let base = class as f64 * 100.0 + i as f64;
                x.push([base; FEATURE_COUNT]);
                y.push(class);
            }
        }
        (x, y)
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (x, y) = dataset();
        let params = ForestParams { n_trees: 10, ..Default::default() };
        let forest = RandomForest::fit(&x, &y, 3, &params);

        let proba = forest.predict_proba(&[150.0; FEATURE_COUNT]);

        assert_eq!(proba.len(), 3);
        assert_relative_eq!(proba.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_training_is_reproducible() {
        let (x, y) = dataset();
        let params = ForestParams { n_trees: 15, ..Default::default() };

        let a = RandomForest::fit(&x, &y, 3, &params);
        let b = RandomForest::fit(&x, &y, 3, &params);

        for probe in [0.0, 55.0, 104.0, 150.0, 209.0] {
            assert_eq!(
                a.predict_proba(&[probe; FEATURE_COUNT]),
                b.predict_proba(&[probe; FEATURE_COUNT])
            );
        }
    }

    #[test]
    fn test_depth_limit_respected() {
        let (x, y) = dataset();
        let params = ForestParams { n_trees: 5, max_depth: 1, ..Default::default() };

        let forest = RandomForest::fit(&x, &y, 3, &params);

        assert_eq!(forest.n_trees(), 5);
        assert!(forest.max_tree_depth() <= 1);
    }

    #[test]
    fn test_cluster_centres_rank_their_own_class_first() {
        let (x, y) = dataset();
        let params = ForestParams { n_trees: 25, ..Default::default() };
        let forest = RandomForest::fit(&x, &y, 3, &params);

        for class in 0..3 {
            let probe = [class as f64 * 100.0 + 4.5; FEATURE_COUNT];
            let proba = forest.predict_proba(&probe);
            let top = (0..3).max_by(|&a, &b| proba[a].total_cmp(&proba[b])).unwrap();
            assert_eq!(top, class);
        }
    }
}
