//! JSON views returned to callers
//!
//! Domain types stay free of wire concerns; these views fix the field names
//! and convert every numeric result to `f64` at the edge.

use crate::data::CropProfile;
use crate::recommend::RecommendationResult;
use crate::report::{FarmReport, IrrigationAdvice, LocationAnalysis, SeasonalPlan, SoilAdvice};
use crate::soil::SoilType;
use crate::yield_estimate::{YieldReport, YIELD_UNIT};
use serde::Serialize;

/// Averages and observed ranges for one crop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRequirements {
    pub crop: String,
    #[serde(rename = "N_avg")]
    pub n_avg: f64,
    #[serde(rename = "P_avg")]
    pub p_avg: f64,
    #[serde(rename = "K_avg")]
    pub k_avg: f64,
    pub temperature_avg: f64,
    pub humidity_avg: f64,
    pub ph_avg: f64,
    pub rainfall_avg: f64,
    #[serde(rename = "N_range")]
    pub n_range: (f64, f64),
    #[serde(rename = "P_range")]
    pub p_range: (f64, f64),
    #[serde(rename = "K_range")]
    pub k_range: (f64, f64),
    pub temperature_range: (f64, f64),
    pub humidity_range: (f64, f64),
    pub ph_range: (f64, f64),
    pub rainfall_range: (f64, f64),
}

impl From<&CropProfile> for CropRequirements {
    fn from(profile: &CropProfile) -> Self {
        Self {
            crop: profile.crop.clone(),
            n_avg: profile.n.mean,
            p_avg: profile.p.mean,
            k_avg: profile.k.mean,
            temperature_avg: profile.temperature.mean,
            humidity_avg: profile.humidity.mean,
            ph_avg: profile.ph.mean,
            rainfall_avg: profile.rainfall.mean,
            n_range: profile.n.range(),
            p_range: profile.p.range(),
            k_range: profile.k.range(),
            temperature_range: profile.temperature.range(),
            humidity_range: profile.humidity.range(),
            ph_range: profile.ph.range(),
            rainfall_range: profile.rainfall.range(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub crop: String,
    pub suitability_score: f64,
    pub requirements: CropRequirements,
}

impl From<&RecommendationResult> for RecommendationView {
    fn from(result: &RecommendationResult) -> Self {
        Self {
            crop: result.crop.clone(),
            suitability_score: result.suitability_score,
            requirements: CropRequirements::from(&result.requirements),
        }
    }
}

pub fn recommendation_views(results: &[RecommendationResult]) -> Vec<RecommendationView> {
    results.iter().map(RecommendationView::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldView {
    pub crop: String,
    pub soil_type: SoilType,
    pub predicted_yield_per_hectare: f64,
    pub unit: &'static str,
    pub rainfall_stress: f64,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}

impl From<&YieldReport> for YieldView {
    fn from(report: &YieldReport) -> Self {
        Self {
            crop: report.crop.clone(),
            soil_type: report.soil_type,
            predicted_yield_per_hectare: report.predicted_yield_per_hectare,
            unit: YIELD_UNIT,
            rainfall_stress: report.rainfall_stress,
            confidence: report.confidence,
            recommendations: report.recommendations.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmReportView {
    pub location_analysis: LocationAnalysis,
    pub recommended_crops: Vec<RecommendationView>,
    pub seasonal_planning: SeasonalPlan,
    pub irrigation_advice: IrrigationAdvice,
    pub soil_management: SoilAdvice,
    pub language: String,
}

impl From<&FarmReport> for FarmReportView {
    fn from(report: &FarmReport) -> Self {
        Self {
            location_analysis: report.location_analysis.clone(),
            recommended_crops: recommendation_views(&report.recommended_crops),
            seasonal_planning: report.seasonal_planning.clone(),
            irrigation_advice: report.irrigation_advice,
            soil_management: report.soil_management,
            language: report.language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AttributeStats;

    fn stats(mean: f64, min: f64, max: f64) -> AttributeStats {
        AttributeStats { mean, min, max }
    }

    fn profile() -> CropProfile {
        CropProfile {
            crop: "rice".to_string(),
            n: stats(80.0, 60.0, 99.0),
            p: stats(48.0, 35.0, 60.0),
            k: stats(40.0, 35.0, 45.0),
            temperature: stats(23.7, 20.0, 26.9),
            humidity: stats(82.3, 80.1, 84.9),
            ph: stats(6.4, 5.0, 7.8),
            rainfall: stats(236.2, 182.6, 298.6),
        }
    }

    #[test]
    fn test_requirements_field_names() {
        let json = serde_json::to_value(CropRequirements::from(&profile())).unwrap();

        assert_eq!(json["crop"], "rice");
        assert_eq!(json["N_avg"], 80.0);
        assert_eq!(json["rainfall_range"][0], 182.6);
        assert_eq!(json["rainfall_range"][1], 298.6);
        assert_eq!(json["ph_range"][1], 7.8);
    }

    #[test]
    fn test_yield_view_adds_unit() {
        let report = YieldReport {
            crop: "rice".to_string(),
            soil_type: SoilType::Clay,
            predicted_yield_per_hectare: 3.5,
            rainfall_stress: 0.0,
            confidence: 0.75,
            recommendations: vec![],
        };

        let json = serde_json::to_value(YieldView::from(&report)).unwrap();

        assert_eq!(json["unit"], "tonnes");
        assert_eq!(json["soil_type"], "clay");
    }
}
