//! Soil type heuristics
//!
//! Representative N, P, K and pH for each soil family. These stand in for a
//! soil test when only the soil type is known. Unknown tags fall back to
//! loamy; that is a documented default, not an error.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Sandy,
    #[default]
    Loamy,
    Clay,
    Black,
    Red,
    Laterite,
}

/// Typical nutrient levels and pH for a soil type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilProfile {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ph: f64,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Clay,
        SoilType::Black,
        SoilType::Red,
        SoilType::Laterite,
    ];

    /// Parse a soil tag case-insensitively; unknown tags become `Loamy`
    pub fn parse(tag: &str) -> Self {
        let normalized = tag.trim().to_lowercase();
        match Self::ALL.into_iter().find(|soil| soil.as_str() == normalized) {
            Some(soil) => soil,
            None => {
                tracing::debug!("Unknown soil type '{}', using loamy", tag);
                SoilType::Loamy
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Sandy => "sandy",
            SoilType::Loamy => "loamy",
            SoilType::Clay => "clay",
            SoilType::Black => "black",
            SoilType::Red => "red",
            SoilType::Laterite => "laterite",
        }
    }

    pub fn profile(&self) -> SoilProfile {
        let (n, p, k, ph) = match self {
            SoilType::Sandy => (30.0, 20.0, 30.0, 6.0),
            SoilType::Loamy => (60.0, 40.0, 40.0, 6.5),
            SoilType::Clay => (80.0, 50.0, 50.0, 7.0),
            SoilType::Black => (70.0, 45.0, 45.0, 7.5),
            SoilType::Red => (50.0, 35.0, 35.0, 6.2),
            SoilType::Laterite => (40.0, 30.0, 30.0, 5.5),
        };
        SoilProfile { n, p, k, ph }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(SoilType::parse("CLAY"), SoilType::Clay);
        assert_eq!(SoilType::parse(" Black "), SoilType::Black);
    }

    #[test]
    fn test_unknown_defaults_to_loamy() {
        assert_eq!(SoilType::parse("peat"), SoilType::Loamy);
        assert_eq!(SoilType::parse(""), SoilType::Loamy);
    }

    #[test]
    fn test_profiles() {
        assert_eq!(
            SoilType::Laterite.profile(),
            SoilProfile { n: 40.0, p: 30.0, k: 30.0, ph: 5.5 }
        );
        assert_eq!(SoilType::default().profile().ph, 6.5);
    }
}
