//! Location Resolver
//!
//! Maps a free-text location to one district rainfall row.
//!
//! - `"District, State"` (exactly two comma-separated parts): exact,
//!   case-insensitive match on both fields. No fuzzy fallback, since the
//!   caller already disambiguated the state.
//! - Anything else: the whole trimmed query is fuzzy-matched against every
//!   district name. The highest score wins (first row on ties) and is
//!   accepted only when strictly above `FUZZY_MATCH_THRESHOLD`.

use crate::data::{same_name, DatasetStore, DistrictRainfall};
use crate::utils::similarity_ratio;

/// Minimum similarity (exclusive, 0-100 scale) for a fuzzy district match
pub const FUZZY_MATCH_THRESHOLD: f64 = 70.0;

/// How a query was resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchMethod {
    Exact,
    Fuzzy { score: f64 },
}

/// A resolved location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationMatch<'a> {
    pub district: &'a DistrictRainfall,
    pub method: MatchMethod,
}

pub struct LocationResolver<'a> {
    districts: &'a [DistrictRainfall],
}

impl<'a> LocationResolver<'a> {
    pub fn new(store: &'a DatasetStore) -> Self {
        Self {
            districts: store.districts(),
        }
    }

    /// Resolve a query to its district row; `None` when nothing matches
    pub fn resolve(&self, query: &str) -> Option<&'a DistrictRainfall> {
        self.resolve_match(query).map(|m| m.district)
    }

    /// Like `resolve`, also reporting which strategy matched
    pub fn resolve_match(&self, query: &str) -> Option<LocationMatch<'a>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let parts: Vec<&str> = query.split(',').map(str::trim).collect();

        if let [district, state] = parts.as_slice() {
            self.exact_match(district, state).map(|district| LocationMatch {
                district,
                method: MatchMethod::Exact,
            })
        } else {
            self.fuzzy_match(query)
        }
    }

    fn exact_match(&self, district: &str, state: &str) -> Option<&'a DistrictRainfall> {
        let found = self
            .districts
            .iter()
            .find(|row| same_name(&row.state, state) && same_name(&row.district, district));

        if found.is_none() {
            tracing::debug!("No exact match for district '{}' in state '{}'", district, state);
        }
        found
    }

    fn fuzzy_match(&self, query: &str) -> Option<LocationMatch<'a>> {
        let mut best: Option<&'a DistrictRainfall> = None;
        let mut best_score = 0.0;

        for row in self.districts {
            let score = similarity_ratio(query, &row.district);
            if score > best_score {
                best_score = score;
                best = Some(row);
            }
        }

        match best {
            Some(district) if best_score > FUZZY_MATCH_THRESHOLD => {
                tracing::debug!(
                    "Fuzzy matched '{}' to {} ({}) with score {}",
                    query,
                    district.district,
                    district.state,
                    best_score
                );
                Some(LocationMatch {
                    district,
                    method: MatchMethod::Fuzzy { score: best_score },
                })
            }
            _ => {
                tracing::debug!("No fuzzy match for '{}' (best score {})", query, best_score);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn store() -> DatasetStore {
        let crops = df![
            "N" => &[90i64],
            "P" => &[42i64],
            "K" => &[43i64],
            "temperature" => &[20.8],
            "humidity" => &[82.0],
            "ph" => &[6.5],
            "rainfall" => &[202.9],
            "label" => &["rice"],
        ]
        .unwrap();

        let rainfall = df![
            "STATE_UT_NAME" => &["MAHARASHTRA", "KARNATAKA", "MAHARASHTRA", "TAMIL NADU"],
            "DISTRICT" => &["PUNE", "PUNE", "NASHIK", "SALEM"],
            "ANNUAL" => &[722.0, 900.0, 1010.0, 950.0],
            "Jan-Feb" => &[3.0, 5.0, 2.0, 20.0],
            "Mar-May" => &[60.0, 80.0, 40.0, 150.0],
            "Jun-Sep" => &[560.0, 600.0, 850.0, 400.0],
            "Oct-Dec" => &[99.0, 215.0, 118.0, 380.0],
        ]
        .unwrap();

        DatasetStore::from_frames(&crops, &rainfall).unwrap()
    }

    #[test]
    fn test_exact_match_ignores_case() {
        let store = store();
        let resolver = LocationResolver::new(&store);

        let a = resolver.resolve("Pune, Maharashtra").unwrap();
        let b = resolver.resolve("PUNE, maharashtra").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.state, "MAHARASHTRA");
    }

    #[test]
    fn test_exact_match_uses_state() {
        let store = store();
        let resolver = LocationResolver::new(&store);

        assert_eq!(resolver.resolve("pune, karnataka").unwrap().annual, 900.0);
    }

    #[test]
    fn test_exact_branch_has_no_fuzzy_fallback() {
        let store = store();
        let resolver = LocationResolver::new(&store);

        assert!(resolver.resolve("Punee, Maharashtra").is_none());
        assert!(resolver.resolve("Pune, Kerala").is_none());
    }

    #[test]
    fn test_fuzzy_match_first_row_wins_ties() {
        let store = store();
        let resolver = LocationResolver::new(&store);

        let found = resolver.resolve_match("Punee").unwrap();

        assert_eq!(found.district.state, "MAHARASHTRA");
        assert_eq!(found.method, MatchMethod::Fuzzy { score: 89.0 });
    }

    #[test]
    fn test_fuzzy_match_below_threshold() {
        let store = store();
        let resolver = LocationResolver::new(&store);

        assert!(resolver.resolve("Xyzabc123").is_none());
    }

    #[test]
    fn test_blank_query() {
        let store = store();
        let resolver = LocationResolver::new(&store);

        assert!(resolver.resolve("").is_none());
        assert!(resolver.resolve("   ").is_none());
    }

    #[test]
    fn test_three_parts_fuzzy_on_whole_query() {
        let store = store();
        let resolver = LocationResolver::new(&store);

        // Whole string "Nashik, Maharashtra, India" is far from any district name
        assert!(resolver.resolve("Nashik, Maharashtra, India").is_none());
    }
}
