//! Farm report
//!
//! One-page summary for a district: rainfall overview, default-parameter crop
//! recommendations, a seasonal plan, and rainfall-zone irrigation advice.

use crate::data::DistrictRainfall;
use crate::recommend::{RecommendationResult, Recommender};
use crate::season::Season;
use crate::soil::SoilType;
use serde::Serialize;

/// Annual rainfall (mm) below which a district is a low-rainfall zone
pub const LOW_RAINFALL_LIMIT: f64 = 750.0;

/// Annual rainfall (mm) below which a district is a moderate-rainfall zone
pub const MODERATE_RAINFALL_LIMIT: f64 = 1500.0;

pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RainfallZone {
    Low,
    Moderate,
    High,
}

impl RainfallZone {
    pub fn from_annual(annual: f64) -> Self {
        if annual < LOW_RAINFALL_LIMIT {
            RainfallZone::Low
        } else if annual < MODERATE_RAINFALL_LIMIT {
            RainfallZone::Moderate
        } else {
            RainfallZone::High
        }
    }

    pub fn irrigation_advice(&self) -> IrrigationAdvice {
        let (category, advice, water_conservation) = match self {
            RainfallZone::Low => (
                "Low rainfall zone",
                "Drip irrigation and mulching recommended",
                "Critical",
            ),
            RainfallZone::Moderate => (
                "Moderate rainfall zone",
                "Supplemental irrigation during dry spells",
                "Important",
            ),
            RainfallZone::High => (
                "High rainfall zone",
                "Focus on drainage and water harvesting",
                "Moderate",
            ),
        };
        IrrigationAdvice { category, advice, water_conservation }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationAnalysis {
    pub district: String,
    pub state: String,
    pub annual_rainfall: f64,
    pub monsoon_rainfall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonPlan {
    pub months: &'static str,
    pub rainfall: f64,
    pub suitable_crops: &'static [&'static str],
}

impl SeasonPlan {
    fn for_season(season: Season, district: &DistrictRainfall) -> Self {
        Self {
            months: season.months(),
            rainfall: season.seasonal_rainfall(district),
            suitable_crops: season.typical_crops(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalPlan {
    pub kharif: SeasonPlan,
    pub rabi: SeasonPlan,
    pub zaid: SeasonPlan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IrrigationAdvice {
    pub category: &'static str,
    pub advice: &'static str,
    pub water_conservation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NpkAdvice {
    #[serde(rename = "N")]
    pub n: &'static str,
    #[serde(rename = "P")]
    pub p: &'static str,
    #[serde(rename = "K")]
    pub k: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoilAdvice {
    pub npk_recommendation: NpkAdvice,
    pub organic_matter: &'static str,
    pub ph_management: &'static str,
}

impl Default for SoilAdvice {
    fn default() -> Self {
        Self {
            npk_recommendation: NpkAdvice {
                n: "Nitrogen management based on crop requirement",
                p: "Apply phosphorus based on soil test",
                k: "Potassium supplementation needed",
            },
            organic_matter: "Incorporate farm yard manure or compost",
            ph_management: "Maintain pH between 6.0-7.5 for optimal growth",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FarmReport {
    pub location_analysis: LocationAnalysis,
    pub recommended_crops: Vec<RecommendationResult>,
    pub seasonal_planning: SeasonalPlan,
    pub irrigation_advice: IrrigationAdvice,
    pub soil_management: SoilAdvice,
    pub language: String,
}

/// Assemble the report; crop recommendations use the default soil and season
pub fn build_farm_report(
    recommender: &Recommender,
    district: &DistrictRainfall,
    language: &str,
    top_n: usize,
) -> FarmReport {
    FarmReport {
        location_analysis: LocationAnalysis {
            district: district.district.clone(),
            state: district.state.clone(),
            annual_rainfall: district.annual,
            monsoon_rainfall: district.jun_sep,
        },
        recommended_crops: recommender.recommend(
            district,
            SoilType::default(),
            Season::default(),
            top_n,
        ),
        seasonal_planning: SeasonalPlan {
            kharif: SeasonPlan::for_season(Season::Kharif, district),
            rabi: SeasonPlan::for_season(Season::Rabi, district),
            zaid: SeasonPlan::for_season(Season::Zaid, district),
        },
        irrigation_advice: RainfallZone::from_annual(district.annual).irrigation_advice(),
        soil_management: SoilAdvice::default(),
        language: language.to_string(),
    }
}
