//! Recommendation Ranker
//!
//! Builds a feature vector for a district from its seasonal rainfall and the
//! soil heuristics, scores every crop with the classifier, and returns the
//! top N together with each crop's requirement profile.
//!
//! Temperature and humidity are not known per district, so fixed typical
//! values stand in for them.

use crate::classifier::CropClassifier;
use crate::data::{CropProfile, DatasetStore, DistrictRainfall, FEATURE_COUNT};
use crate::season::Season;
use crate::soil::SoilType;

/// Temperature (°C) assumed for every district
pub const ASSUMED_TEMPERATURE: f64 = 25.0;

/// Relative humidity (%) assumed for every district
pub const ASSUMED_HUMIDITY: f64 = 75.0;

/// Seasonal rainfall is divided by this to approximate a monthly figure
pub const MONTHS_PER_SEASON: f64 = 4.0;

/// One ranked crop
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    pub crop: String,
    /// Classifier probability, 0-1
    pub suitability_score: f64,
    pub requirements: CropProfile,
}

pub struct Recommender<'a> {
    store: &'a DatasetStore,
    classifier: &'a CropClassifier,
}

impl<'a> Recommender<'a> {
    /// `classifier` must have been trained on `store`'s samples so that every
    /// label it scores has a requirement profile.
    pub fn new(store: &'a DatasetStore, classifier: &'a CropClassifier) -> Self {
        debug_assert!(
            classifier.labels() == store.available_crops().as_slice(),
            "classifier labels do not match the store's crops"
        );
        Self { store, classifier }
    }

    /// Classifier input for a district/soil/season combination
    ///
    /// Order: N, P, K, temperature, humidity, pH, rainfall.
    pub fn feature_vector(
        district: &DistrictRainfall,
        soil: SoilType,
        season: Season,
    ) -> [f64; FEATURE_COUNT] {
        let profile = soil.profile();
        let seasonal_rainfall = season.seasonal_rainfall(district);

        [
            profile.n,
            profile.p,
            profile.k,
            ASSUMED_TEMPERATURE,
            ASSUMED_HUMIDITY,
            profile.ph,
            seasonal_rainfall / MONTHS_PER_SEASON,
        ]
    }

    /// Top `top_n` crops by suitability, highest first
    ///
    /// Equal scores keep the classifier's label order. Returns
    /// `min(top_n, known crops)` entries.
    pub fn recommend(
        &self,
        district: &DistrictRainfall,
        soil: SoilType,
        season: Season,
        top_n: usize,
    ) -> Vec<RecommendationResult> {
        let features = Self::feature_vector(district, soil, season);
        tracing::debug!(
            "Recommending for {} ({}), soil={}, season={}, features={:?}",
            district.district,
            district.state,
            soil.as_str(),
            season.as_str(),
            features
        );

        let mut ranked = self.classifier.predict_probabilities(&features);
        // Stable sort: ties stay in label order
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        ranked.truncate(top_n);

        ranked
            .into_iter()
            .filter_map(|entry| {
                let requirements = self.store.crop_requirements(entry.label);
                if requirements.is_none() {
                    tracing::warn!(
                        "Classifier label '{}' has no samples in the store",
                        entry.label
                    );
                }
                requirements.map(|requirements| RecommendationResult {
                    crop: entry.label.to_string(),
                    suitability_score: entry.probability,
                    requirements,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ForestParams;
    use polars::prelude::*;

    fn district() -> DistrictRainfall {
        DistrictRainfall {
            state: "TEST".to_string(),
            district: "FIXTURE".to_string(),
            annual: 1000.0,
            jan_feb: 30.0,
            mar_may: 120.0,
            jun_sep: 800.0,
            oct_dec: 50.0,
        }
    }

    #[test]
    fn test_feature_vector_rabi() {
        let features = Recommender::feature_vector(&district(), SoilType::Loamy, Season::Rabi);

        assert_eq!(features, [60.0, 40.0, 40.0, 25.0, 75.0, 6.5, 20.0]);
    }

    #[test]
    fn test_feature_vector_kharif_clay() {
        let features = Recommender::feature_vector(&district(), SoilType::Clay, Season::Kharif);

        assert_eq!(features, [80.0, 50.0, 50.0, 25.0, 75.0, 7.0, 200.0]);
    }

    #[test]
    fn test_feature_vector_zaid() {
        let features = Recommender::feature_vector(&district(), SoilType::Sandy, Season::Zaid);

        assert_eq!(features[6], 30.0);
    }

    fn store_with_labels(labels: &[&str]) -> DatasetStore {
        let n = labels.len();
        let values: Vec<f64> = (0..n).map(|i| 10.0 * i as f64).collect();
        let crops = df![
            "N" => values.clone(),
            "P" => values.clone(),
            "K" => values.clone(),
            "temperature" => values.clone(),
            "humidity" => values.clone(),
            "ph" => values.clone(),
            "rainfall" => values,
            "label" => labels,
        ]
        .unwrap();
        let rainfall = df![
            "STATE_UT_NAME" => &["TEST"],
            "DISTRICT" => &["FIXTURE"],
            "ANNUAL" => &[1000.0],
            "Jan-Feb" => &[30.0],
            "Mar-May" => &[120.0],
            "Jun-Sep" => &[800.0],
            "Oct-Dec" => &[50.0],
        ]
        .unwrap();
        DatasetStore::from_frames(&crops, &rainfall).unwrap()
    }

    fn params() -> ForestParams {
        ForestParams { n_trees: 5, ..ForestParams::default() }
    }

    #[test]
    fn test_recommend_returns_every_label_when_paired() {
        let store = store_with_labels(&["rice", "chickpea", "maize"]);
        let classifier = CropClassifier::train(store.samples(), &params()).unwrap();

        let results = Recommender::new(&store, &classifier).recommend(
            &district(),
            SoilType::Loamy,
            Season::Kharif,
            10,
        );

        assert_eq!(results.len(), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "classifier labels do not match")]
    fn test_mismatched_store_and_classifier_rejected() {
        let trained_on = store_with_labels(&["rice", "chickpea"]);
        let other = store_with_labels(&["rice", "maize"]);
        let classifier = CropClassifier::train(trained_on.samples(), &params()).unwrap();

        Recommender::new(&other, &classifier);
    }
}
