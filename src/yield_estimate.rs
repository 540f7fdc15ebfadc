//! Yield Estimator
//!
//! Deterministic point estimate for one crop in one district. The only
//! stress modelled is the deviation of the district's annual rainfall from
//! the crop's average rainfall in the sample data.

use crate::data::{DatasetStore, DistrictRainfall};
use crate::soil::SoilType;

/// Fixed confidence reported with every estimate
pub const YIELD_CONFIDENCE: f64 = 0.75;

/// Fraction of base yield lost at full (1.0) rainfall stress
pub const STRESS_YIELD_PENALTY: f64 = 0.3;

/// Base yield for crops not in the lookup table (tonnes/ha)
pub const DEFAULT_BASE_YIELD: f64 = 2.0;

/// Stress above which irrigation is advised
pub const IRRIGATION_STRESS: f64 = 0.3;

/// Stress above which water conservation is also advised
pub const SEVERE_STRESS: f64 = 0.5;

pub const YIELD_UNIT: &str = "tonnes";

/// Typical yield in tonnes per hectare
pub fn base_yield(crop: &str) -> f64 {
    match crop {
        "rice" => 3.5,
        "wheat" => 3.2,
        "maize" => 2.8,
        "cotton" => 1.5,
        "sugarcane" => 70.0,
        "jute" => 2.0,
        _ => DEFAULT_BASE_YIELD,
    }
}

/// Relative rainfall deviation, capped at 1.0
///
/// A zero optimum counts as full stress.
pub fn rainfall_stress(actual: f64, optimal: f64) -> f64 {
    if optimal == 0.0 {
        return 1.0;
    }
    ((actual - optimal).abs() / optimal).min(1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimated yield with stress diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct YieldReport {
    pub crop: String,
    pub soil_type: SoilType,
    /// Tonnes per hectare, rounded to 2 decimals
    pub predicted_yield_per_hectare: f64,
    /// 0-1, rounded to 2 decimals
    pub rainfall_stress: f64,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}

pub struct YieldEstimator<'a> {
    store: &'a DatasetStore,
}

impl<'a> YieldEstimator<'a> {
    pub fn new(store: &'a DatasetStore) -> Self {
        Self { store }
    }

    /// Estimate yield; `None` for a crop with no samples
    pub fn estimate_yield(
        &self,
        crop: &str,
        district: &DistrictRainfall,
        soil: SoilType,
    ) -> Option<YieldReport> {
        let Some(profile) = self.store.crop_requirements(crop) else {
            tracing::debug!("No requirements for crop '{}'", crop);
            return None;
        };

        let stress = rainfall_stress(district.annual, profile.rainfall.mean);
        let predicted = base_yield(crop) * (1.0 - stress * STRESS_YIELD_PENALTY);

        Some(YieldReport {
            crop: crop.to_string(),
            soil_type: soil,
            predicted_yield_per_hectare: round2(predicted),
            rainfall_stress: round2(stress),
            confidence: YIELD_CONFIDENCE,
            recommendations: yield_recommendations(stress, crop),
        })
    }
}

fn yield_recommendations(stress: f64, crop: &str) -> Vec<String> {
    let mut recommendations = Vec::new();

    if stress > IRRIGATION_STRESS {
        recommendations.push("High stress detected. Consider irrigation.".to_string());
    }
    if stress > SEVERE_STRESS {
        recommendations.push("Severe stress. Implement water conservation techniques.".to_string());
    }

    recommendations.push(format!("Use certified {} seeds for better yield.", crop));
    recommendations.push("Apply balanced NPK fertilizers based on soil test.".to_string());

    recommendations
}
