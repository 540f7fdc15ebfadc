//! String similarity on a 0-100 scale
//!
//! Indel-based ratio: `2 * matches / (len_a + len_b)`, scaled to 100 and
//! rounded to the nearest integer. Comparison is case-insensitive.

use rapidfuzz::distance::indel;

/// Similarity between two strings, 0 (nothing shared) to 100 (identical)
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a = a.to_uppercase();
    let b = b.to_uppercase();

    (indel::normalized_similarity(a.chars(), b.chars()) * 100.0).round()
}
