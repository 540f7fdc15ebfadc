//! Feature standardization
//!
//! Zero mean / unit variance per feature, fitted once on the full training
//! population and reapplied unchanged to every inference input. Uses the
//! population standard deviation; a constant feature gets scale 1.0 so it
//! maps to 0 instead of NaN.

use crate::data::FEATURE_COUNT;

#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Fit on the given rows (callers guarantee at least one row)
    pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> Self {
        let n = rows.len().max(1) as f64;

        let mut mean = [0.0; FEATURE_COUNT];
        for row in rows {
            for (acc, value) in mean.iter_mut().zip(row) {
                *acc += value;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut variance = [0.0; FEATURE_COUNT];
        for row in rows {
            for feature in 0..FEATURE_COUNT {
                let diff = row[feature] - mean[feature];
                variance[feature] += diff * diff;
            }
        }

        let scale = variance.map(|v| {
            let std = (v / n).sqrt();
            if std > f64::EPSILON { std } else { 1.0 }
        });

        Self { mean, scale }
    }

    pub fn transform(&self, row: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        std::array::from_fn(|feature| (row[feature] - self.mean[feature]) / self.scale[feature])
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }
}
