//! Advisor facade
//!
//! Owns the loaded datasets and the trained classifier behind `Arc`s so one
//! instance can be cloned into any number of request handlers. Every query
//! method is read-only.

use crate::classifier::{CropClassifier, ForestParams};
use crate::config::AdvisorConfig;
use crate::data::{CropProfile, DatasetStore, DistrictRainfall, StateDistricts};
use crate::location::{LocationMatch, LocationResolver};
use crate::recommend::{RecommendationResult, Recommender};
use crate::report::{build_farm_report, FarmReport, DEFAULT_LANGUAGE};
use crate::season::Season;
use crate::soil::SoilType;
use crate::yield_estimate::{YieldEstimator, YieldReport};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct CropAdvisor {
    store: Arc<DatasetStore>,
    classifier: Arc<CropClassifier>,
    default_top_n: usize,
}

impl CropAdvisor {
    /// Load every dataset from `config.data_dir` and train the classifier
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        tracing::info!("Loading datasets from {}", config.data_dir.display());
        let store = DatasetStore::load(&config.data_paths())
            .with_context(|| {
                format!("Failed to load datasets from {}", config.data_dir.display())
            })?;

        Self::from_store(store, &config.forest, config.default_top_n)
    }

    /// Train on an already-loaded store
    pub fn from_store(
        store: DatasetStore,
        forest: &ForestParams,
        default_top_n: usize,
    ) -> Result<Self> {
        let start = Instant::now();
        let classifier = CropClassifier::train(store.samples(), forest)?;
        tracing::info!("Classifier ready in {:.2?}", start.elapsed());

        Ok(Self {
            store: Arc::new(store),
            classifier: Arc::new(classifier),
            default_top_n,
        })
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn classifier(&self) -> &CropClassifier {
        &self.classifier
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    pub fn location_hierarchy(&self) -> Vec<StateDistricts> {
        self.store.location_hierarchy()
    }

    pub fn available_crops(&self) -> Vec<String> {
        self.store.available_crops()
    }

    pub fn crop_requirements(&self, crop: &str) -> Option<CropProfile> {
        self.store.crop_requirements(crop)
    }

    pub fn district_data(
        &self,
        state: Option<&str>,
        district: Option<&str>,
    ) -> Vec<&DistrictRainfall> {
        self.store.district_data(state, district)
    }

    pub fn resolve(&self, query: &str) -> Option<LocationMatch<'_>> {
        LocationResolver::new(&self.store).resolve_match(query)
    }

    /// Rank crops for a district
    ///
    /// Missing soil/season fall back to loamy/kharif and a missing `top_n`
    /// to the configured default.
    pub fn recommend(
        &self,
        district: &DistrictRainfall,
        soil: Option<&str>,
        season: Option<&str>,
        top_n: Option<usize>,
    ) -> Vec<RecommendationResult> {
        let soil = soil.map(SoilType::parse).unwrap_or_default();
        let season = season.map(Season::parse).unwrap_or_default();
        let top_n = top_n.unwrap_or(self.default_top_n);

        Recommender::new(&self.store, &self.classifier).recommend(district, soil, season, top_n)
    }

    pub fn estimate_yield(
        &self,
        crop: &str,
        district: &DistrictRainfall,
        soil: Option<&str>,
    ) -> Option<YieldReport> {
        let soil = soil.map(SoilType::parse).unwrap_or_default();
        YieldEstimator::new(&self.store).estimate_yield(crop, district, soil)
    }

    pub fn farm_report(&self, district: &DistrictRainfall, language: Option<&str>) -> FarmReport {
        let recommender = Recommender::new(&self.store, &self.classifier);
        build_farm_report(
            &recommender,
            district,
            language.unwrap_or(DEFAULT_LANGUAGE),
            self.default_top_n,
        )
    }

    /// Resolve `location` then recommend; `None` when it does not resolve
    pub fn recommend_for_location(
        &self,
        location: &str,
        soil: Option<&str>,
        season: Option<&str>,
        top_n: Option<usize>,
    ) -> Option<Vec<RecommendationResult>> {
        let district = self.resolve_logged(location)?;
        Some(self.recommend(district, soil, season, top_n))
    }

    /// `None` when the location does not resolve or the crop is unknown
    pub fn yield_for_location(
        &self,
        crop: &str,
        location: &str,
        soil: Option<&str>,
    ) -> Option<YieldReport> {
        let district = self.resolve_logged(location)?;
        self.estimate_yield(crop, district, soil)
    }

    pub fn farm_report_for_location(
        &self,
        location: &str,
        language: Option<&str>,
    ) -> Option<FarmReport> {
        let district = self.resolve_logged(location)?;
        Some(self.farm_report(district, language))
    }

    fn resolve_logged(&self, location: &str) -> Option<&DistrictRainfall> {
        match self.resolve(location) {
            Some(found) => {
                tracing::debug!(
                    "Resolved '{}' to {}, {} ({:?})",
                    location,
                    found.district.district,
                    found.district.state,
                    found.method
                );
                Some(found.district)
            }
            None => {
                tracing::warn!("Location not found: '{}'", location);
                None
            }
        }
    }
}
