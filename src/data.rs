//! Data Loading and Management
//!
//! Loads the crop sample, district rainfall and coordinate datasets with
//! Polars, then copies the first two into typed records. Everything is
//! immutable after construction; the store is shared by reference between
//! the resolver, the classifier and the recommenders.

use crate::config::DataPaths;
use crate::utils::{f64_column, materialize_with_columns, read_csv, str_column};
use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Number of numeric attributes per sample (the classifier's input width)
pub const FEATURE_COUNT: usize = 7;

/// Attribute column names, in feature-vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

const LABEL_COLUMN: &str = "label";

const STATE_COLUMN: &str = "STATE_UT_NAME";
const DISTRICT_COLUMN: &str = "DISTRICT";
const ANNUAL_COLUMN: &str = "ANNUAL";
const JAN_FEB_COLUMN: &str = "Jan-Feb";
const MAR_MAY_COLUMN: &str = "Mar-May";
const JUN_SEP_COLUMN: &str = "Jun-Sep";
const OCT_DEC_COLUMN: &str = "Oct-Dec";

/// One observed soil/climate tuple labelled with the crop grown
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    /// N, P, K, temperature, humidity, pH, rainfall (see `FEATURE_NAMES`)
    pub features: [f64; FEATURE_COUNT],
    pub label: String,
}

/// Rainfall normals for one district
///
/// Sub-period sums come from an independent source and are not reconciled
/// with `annual`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictRainfall {
    #[serde(rename = "STATE_UT_NAME")]
    pub state: String,
    #[serde(rename = "DISTRICT")]
    pub district: String,
    #[serde(rename = "ANNUAL")]
    pub annual: f64,
    #[serde(rename = "Jan-Feb")]
    pub jan_feb: f64,
    #[serde(rename = "Mar-May")]
    pub mar_may: f64,
    #[serde(rename = "Jun-Sep")]
    pub jun_sep: f64,
    #[serde(rename = "Oct-Dec")]
    pub oct_dec: f64,
}

/// Mean and observed range of one attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl AttributeStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return None;
        }

        // Summation error must not push the mean outside its own range
        let mean = (sum / count as f64).clamp(min, max);

        Some(Self { mean, min, max })
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Per-crop aggregate of every sample carrying that label
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfile {
    pub crop: String,
    pub n: AttributeStats,
    pub p: AttributeStats,
    pub k: AttributeStats,
    pub temperature: AttributeStats,
    pub humidity: AttributeStats,
    pub ph: AttributeStats,
    pub rainfall: AttributeStats,
}

impl CropProfile {
    /// Aggregate the given samples; `None` when there are none
    pub fn from_samples<'a>(
        crop: &str,
        samples: impl Iterator<Item = &'a SampleRecord> + Clone,
    ) -> Option<Self> {
        let stats = |feature: usize| {
            AttributeStats::from_values(samples.clone().map(|s| s.features[feature]))
        };

        Some(Self {
            crop: crop.to_string(),
            n: stats(0)?,
            p: stats(1)?,
            k: stats(2)?,
            temperature: stats(3)?,
            humidity: stats(4)?,
            ph: stats(5)?,
            rainfall: stats(6)?,
        })
    }

    /// Attribute stats paired with their column names, in feature order
    pub fn attributes(&self) -> [(&'static str, &AttributeStats); FEATURE_COUNT] {
        [
            (FEATURE_NAMES[0], &self.n),
            (FEATURE_NAMES[1], &self.p),
            (FEATURE_NAMES[2], &self.k),
            (FEATURE_NAMES[3], &self.temperature),
            (FEATURE_NAMES[4], &self.humidity),
            (FEATURE_NAMES[5], &self.ph),
            (FEATURE_NAMES[6], &self.rainfall),
        ]
    }
}

/// Districts of one state, in the order they first appear in the rainfall table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateDistricts {
    pub state: String,
    pub districts: Vec<String>,
}

/// Case-insensitive comparison used for every state/district lookup
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

/// In-memory dataset store
pub struct DatasetStore {
    samples: Vec<SampleRecord>,
    districts: Vec<DistrictRainfall>,

    /// District coordinates with rainfall (kept for location features outside the core)
    rainfall_coordinates: DataFrame,

    /// City coordinates (kept for location features outside the core)
    city_coordinates: DataFrame,
}

impl DatasetStore {
    /// Load all four datasets
    ///
    /// # Errors
    /// Fails if any file is missing, is not valid CSV, or lacks a required
    /// column. There is no partial load.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        tracing::info!("Loading datasets...");

        let crop_df = read_csv(&paths.crop_samples, "crop samples")?;
        let rainfall_df = read_csv(&paths.district_rainfall, "district rainfall")?;
        let rainfall_coordinates = read_csv(&paths.rainfall_coordinates, "rainfall coordinates")?;
        let city_coordinates = read_csv(&paths.city_coordinates, "city coordinates")?;

        let store = Self::from_frames(&crop_df, &rainfall_df)?
            .with_coordinates(rainfall_coordinates, city_coordinates);

        tracing::info!("  Crop samples: {}", store.samples.len());
        tracing::info!("  Districts with rainfall data: {}", store.districts.len());
        tracing::info!("  Rainfall coordinates: {}", store.rainfall_coordinates.height());
        tracing::info!("  City coordinates: {}", store.city_coordinates.height());

        Ok(store)
    }

    /// Build a store from already-loaded frames (coordinate tables left empty)
    pub fn from_frames(crop_df: &DataFrame, rainfall_df: &DataFrame) -> Result<Self> {
        let samples = Self::parse_samples(crop_df).context("Failed to read crop samples")?;
        let districts =
            Self::parse_districts(rainfall_df).context("Failed to read district rainfall")?;

        Ok(Self {
            samples,
            districts,
            rainfall_coordinates: DataFrame::default(),
            city_coordinates: DataFrame::default(),
        })
    }

    pub fn with_coordinates(
        mut self,
        rainfall_coordinates: DataFrame,
        city_coordinates: DataFrame,
    ) -> Self {
        self.rainfall_coordinates = rainfall_coordinates;
        self.city_coordinates = city_coordinates;
        self
    }

    fn parse_samples(df: &DataFrame) -> Result<Vec<SampleRecord>> {
        const TABLE: &str = "crop samples";

        let mut required: Vec<&str> = FEATURE_NAMES.to_vec();
        required.push(LABEL_COLUMN);
        let df = materialize_with_columns(df, &required, TABLE)?;

        let columns = FEATURE_NAMES
            .iter()
            .map(|&name| f64_column(&df, name, TABLE))
            .collect::<Result<Vec<_>>>()?;
        let labels = str_column(&df, LABEL_COLUMN, TABLE)?;

        let samples = labels
            .into_iter()
            .enumerate()
            .map(|(row, label)| SampleRecord {
                features: std::array::from_fn(|feature| columns[feature][row]),
                label,
            })
            .collect();

        Ok(samples)
    }

    fn parse_districts(df: &DataFrame) -> Result<Vec<DistrictRainfall>> {
        const TABLE: &str = "district rainfall";

        let df = materialize_with_columns(
            df,
            &[
                STATE_COLUMN,
                DISTRICT_COLUMN,
                ANNUAL_COLUMN,
                JAN_FEB_COLUMN,
                MAR_MAY_COLUMN,
                JUN_SEP_COLUMN,
                OCT_DEC_COLUMN,
            ],
            TABLE,
        )?;

        let states = str_column(&df, STATE_COLUMN, TABLE)?;
        let districts = str_column(&df, DISTRICT_COLUMN, TABLE)?;
        let annual = f64_column(&df, ANNUAL_COLUMN, TABLE)?;
        let jan_feb = f64_column(&df, JAN_FEB_COLUMN, TABLE)?;
        let mar_may = f64_column(&df, MAR_MAY_COLUMN, TABLE)?;
        let jun_sep = f64_column(&df, JUN_SEP_COLUMN, TABLE)?;
        let oct_dec = f64_column(&df, OCT_DEC_COLUMN, TABLE)?;

        let rows = states
            .into_iter()
            .zip(districts)
            .enumerate()
            .map(|(row, (state, district))| DistrictRainfall {
                state,
                district,
                annual: annual[row],
                jan_feb: jan_feb[row],
                mar_may: mar_may[row],
                jun_sep: jun_sep[row],
                oct_dec: oct_dec[row],
            })
            .collect();

        Ok(rows)
    }

    /// All crop samples (the classifier's training population)
    pub fn samples(&self) -> &[SampleRecord] {
        &self.samples
    }

    /// All district rainfall rows in file order
    pub fn districts(&self) -> &[DistrictRainfall] {
        &self.districts
    }

    /// Raw coordinate tables: (district rainfall with lat/long, city lat/long)
    pub fn coordinate_tables(&self) -> (&DataFrame, &DataFrame) {
        (&self.rainfall_coordinates, &self.city_coordinates)
    }

    /// States with their districts, both in order of first appearance
    pub fn location_hierarchy(&self) -> Vec<StateDistricts> {
        let mut hierarchy: Vec<StateDistricts> = Vec::new();
        let mut state_index: FxHashMap<&str, usize> = FxHashMap::default();

        for row in &self.districts {
            let slot = *state_index.entry(row.state.as_str()).or_insert_with(|| {
                hierarchy.push(StateDistricts {
                    state: row.state.clone(),
                    districts: Vec::new(),
                });
                hierarchy.len() - 1
            });

            let districts = &mut hierarchy[slot].districts;
            if !districts.contains(&row.district) {
                districts.push(row.district.clone());
            }
        }

        hierarchy
    }

    /// Sorted, de-duplicated crop labels
    pub fn available_crops(&self) -> Vec<String> {
        let mut crops: Vec<String> = self.samples.iter().map(|s| s.label.clone()).collect();
        crops.sort();
        crops.dedup();
        crops
    }

    /// Aggregate requirements for a crop label (exact, case-sensitive match)
    pub fn crop_requirements(&self, crop: &str) -> Option<CropProfile> {
        CropProfile::from_samples(crop, self.samples.iter().filter(|s| s.label == crop))
    }

    /// Rainfall rows filtered by state and/or district (case-insensitive, AND-combined)
    pub fn district_data(
        &self,
        state: Option<&str>,
        district: Option<&str>,
    ) -> Vec<&DistrictRainfall> {
        self.districts
            .iter()
            .filter(|row| state.map_or(true, |s| same_name(&row.state, s)))
            .filter(|row| district.map_or(true, |d| same_name(&row.district, d)))
            .collect()
    }
}
