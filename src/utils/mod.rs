//! Utility modules shared by the loaders and the resolver
//!
//! - Frame helpers: CSV reading and column validation at the polars boundary
//! - Similarity: 0-100 fuzzy string ratio

pub mod frame_helpers;
pub mod similarity;

pub use frame_helpers::{f64_column, materialize_with_columns, read_csv, str_column};
pub use similarity::similarity_ratio;
