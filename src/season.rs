//! Cropping seasons
//!
//! Maps a season tag to the rainfall sub-periods it spans.

use crate::data::DistrictRainfall;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Monsoon season (Jun-Sep)
    #[default]
    Kharif,
    /// Post-monsoon / winter season (Oct-Dec + Jan-Feb)
    Rabi,
    /// Summer season (Mar-May)
    Zaid,
}

impl Season {
    /// "kharif" and "rabi" (any case) map to themselves; anything else is zaid
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "kharif" => Season::Kharif,
            "rabi" => Season::Rabi,
            _ => Season::Zaid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Zaid => "zaid",
        }
    }

    /// Total normal rainfall over the season's sub-periods
    pub fn seasonal_rainfall(&self, district: &DistrictRainfall) -> f64 {
        match self {
            Season::Kharif => district.jun_sep,
            Season::Rabi => district.oct_dec + district.jan_feb,
            Season::Zaid => district.mar_may,
        }
    }

    pub fn months(&self) -> &'static str {
        match self {
            Season::Kharif => "June-September",
            Season::Rabi => "October-March",
            Season::Zaid => "March-June",
        }
    }

    /// Crops conventionally sown in the season
    pub fn typical_crops(&self) -> &'static [&'static str] {
        match self {
            Season::Kharif => &["rice", "maize", "cotton", "jute"],
            Season::Rabi => &["wheat", "chickpea", "lentil"],
            Season::Zaid => &["watermelon", "muskmelon", "cucumber"],
        }
    }
}
