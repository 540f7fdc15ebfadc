//! Crop classifier
//!
//! Standardizes the seven sample attributes and fits a bagged tree ensemble
//! over them, once, at startup. The fitted state is immutable: inference
//! reuses the training-time scaler and never refits.
//!
//! - `scaler.rs` - per-feature mean/scale fitted on the training population
//! - `tree.rs` - CART tree with Gini splits over random feature subsets
//! - `forest.rs` - bootstrap ensemble, seeded per tree, trained with rayon

pub mod forest;
pub mod scaler;
pub mod tree;

pub use forest::{ForestParams, RandomForest};
pub use scaler::StandardScaler;

use crate::data::{SampleRecord, FEATURE_COUNT};
use crate::error::DatasetError;
use anyhow::{ensure, Result};
use rustc_hash::FxHashMap;

/// Probability assigned to one crop label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelProbability<'a> {
    pub label: &'a str,
    pub probability: f64,
}

/// Trained classifier state: label set, scaler and forest
pub struct CropClassifier {
    /// Sorted unique labels; index = encoded class
    labels: Vec<String>,
    scaler: StandardScaler,
    forest: RandomForest,
}

impl CropClassifier {
    /// Train on every sample
    ///
    /// # Errors
    /// Fails when there are no samples or the ensemble would have no trees.
    pub fn train(samples: &[SampleRecord], params: &ForestParams) -> Result<Self> {
        if samples.is_empty() {
            return Err(DatasetError::EmptyTable {
                table: "crop samples".to_string(),
            }
            .into());
        }
        ensure!(params.n_trees > 0, "Crop classifier needs at least one tree");

        let mut labels: Vec<String> = samples.iter().map(|s| s.label.clone()).collect();
        labels.sort();
        labels.dedup();

        let class_of: FxHashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.as_str(), idx))
            .collect();

        let raw: Vec<[f64; FEATURE_COUNT]> = samples.iter().map(|s| s.features).collect();
        let scaler = StandardScaler::fit(&raw);
        let x: Vec<[f64; FEATURE_COUNT]> = raw.iter().map(|row| scaler.transform(row)).collect();
        let y: Vec<usize> = samples.iter().map(|s| class_of[s.label.as_str()]).collect();

        let forest = RandomForest::fit(&x, &y, labels.len(), params);

        tracing::info!(
            "Crop classifier trained with {} samples ({} crops, {} trees, max depth {})",
            samples.len(),
            labels.len(),
            forest.n_trees(),
            params.max_depth
        );

        Ok(Self { labels, scaler, forest })
    }

    /// Probability per known label, in label order; sums to 1
    pub fn predict_probabilities(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Vec<LabelProbability<'_>> {
        let scaled = self.scaler.transform(features);

        self.labels
            .iter()
            .zip(self.forest.predict_proba(&scaled))
            .map(|(label, probability)| LabelProbability {
                label: label.as_str(),
                probability,
            })
            .collect()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples() -> Vec<SampleRecord> {
        let mut samples = Vec::new();
        for (offset, label) in [(0.0, "rice"), (50.0, "maize"), (100.0, "coffee")] {
            for i in 0..8 {
                samples.push(SampleRecord {
                    features: [offset + i as f64; FEATURE_COUNT],
                    label: label.to_string(),
                });
            }
        }
        samples
    }

    fn params() -> ForestParams {
        ForestParams { n_trees: 20, ..Default::default() }
    }

    #[test]
    fn test_labels_sorted() {
        let classifier = CropClassifier::train(&samples(), &params()).unwrap();

        assert_eq!(classifier.labels(), &["coffee", "maize", "rice"]);
    }

    #[test]
    fn test_probabilities_cover_every_label() {
        let classifier = CropClassifier::train(&samples(), &params()).unwrap();

        let proba = classifier.predict_probabilities(&[3.5; FEATURE_COUNT]);

        assert_eq!(proba.len(), 3);
        assert_relative_eq!(proba.iter().map(|p| p.probability).sum::<f64>(), 1.0, epsilon = 1e-9);
        let best = proba
            .iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
            .unwrap();
        assert_eq!(best.label, "rice");
    }

    #[test]
    fn test_scaler_fitted_on_raw_features() {
        let classifier = CropClassifier::train(&samples(), &params()).unwrap();

        // Mean of 0..8, 50..58, 100..108
        assert_relative_eq!(classifier.scaler().mean()[0], 53.5);
    }

    #[test]
    fn test_empty_training_set_is_fatal() {
        let err = CropClassifier::train(&[], &params()).err().unwrap();

        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::EmptyTable { .. })
        ));
    }

    #[test]
    fn test_zero_trees_rejected() {
        let params = ForestParams { n_trees: 0, ..Default::default() };

        assert!(CropClassifier::train(&samples(), &params).is_err());
    }
}
