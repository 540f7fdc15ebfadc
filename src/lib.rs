//! Crop Advisor
//!
//! Location-aware crop recommendation and yield estimation over Indian
//! district rainfall normals and a labelled crop sample dataset.
//!
//! - `data`: CSV loading with Polars into typed records
//! - `location`: free-text location to district row (exact or fuzzy)
//! - `classifier`: scaler + random forest trained once at startup
//! - `recommend`: feature vector construction and top-N ranking
//! - `yield_estimate`: rainfall-stress yield estimate
//! - `report`: per-district farm report
//! - `advisor`: shareable facade over all of the above
//!
//! Everything is built once and then read-only, so an `Arc`-backed
//! `CropAdvisor` can serve concurrent callers without locking.

pub mod advisor;
pub mod classifier;
pub mod config;
pub mod data;
pub mod error;
pub mod location;
pub mod recommend;
pub mod report;
pub mod response;
pub mod season;
pub mod soil;
pub mod utils;
pub mod yield_estimate;

// Re-export commonly used types
pub use advisor::CropAdvisor;
pub use classifier::{CropClassifier, ForestParams};
pub use config::{AdvisorConfig, DataPaths};
pub use data::{CropProfile, DatasetStore, DistrictRainfall, SampleRecord, StateDistricts};
pub use error::DatasetError;
pub use location::{LocationMatch, LocationResolver, MatchMethod};
pub use recommend::{RecommendationResult, Recommender};
pub use report::FarmReport;
pub use season::Season;
pub use soil::SoilType;
pub use yield_estimate::{YieldEstimator, YieldReport};
