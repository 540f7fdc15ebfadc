//! Runtime configuration
//!
//! Read once from environment variables when a binary starts:
//!
//! | Variable           | Default | Meaning                              |
//! |--------------------|---------|--------------------------------------|
//! | `DATA_DIR`         | `data`  | Directory holding the four CSV files |
//! | `FOREST_TREES`     | 100     | Trees in the crop classifier         |
//! | `FOREST_MAX_DEPTH` | 20      | Maximum depth of each tree           |
//! | `FOREST_SEED`      | 42      | Seed for bootstrap/feature sampling  |
//! | `TOP_N`            | 5       | Default number of recommendations    |

use crate::classifier::ForestParams;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CROP_FILE: &str = "Crop_recommendation.csv";
pub const DISTRICT_RAINFALL_FILE: &str = "district-wise-rainfall-normal.csv";
pub const RAINFALL_COORDS_FILE: &str = "rainfall_lat_long.csv";
pub const CITY_COORDS_FILE: &str = "city_lat.csv";

/// Locations of the datasets the store loads
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub crop_samples: PathBuf,
    pub district_rainfall: PathBuf,
    pub rainfall_coordinates: PathBuf,
    pub city_coordinates: PathBuf,
}

impl DataPaths {
    /// Standard file names inside `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            crop_samples: dir.join(CROP_FILE),
            district_rainfall: dir.join(DISTRICT_RAINFALL_FILE),
            rainfall_coordinates: dir.join(RAINFALL_COORDS_FILE),
            city_coordinates: dir.join(CITY_COORDS_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [
            &self.crop_samples,
            &self.district_rainfall,
            &self.rainfall_coordinates,
            &self.city_coordinates,
        ]
    }

    /// Required files that do not exist on disk
    pub fn missing(&self) -> Vec<&Path> {
        self.all().into_iter().filter(|path| !path.exists()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub data_dir: PathBuf,
    pub forest: ForestParams,
    pub default_top_n: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            forest: ForestParams::default(),
            default_top_n: 5,
        }
    }
}

impl AdvisorConfig {
    /// Build configuration from environment variables
    ///
    /// Unset variables fall back to defaults; set-but-unparseable values are
    /// an error so a typo never silently trains a different model.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let forest = ForestParams {
            n_trees: env_or("FOREST_TREES", defaults.forest.n_trees)?,
            max_depth: env_or("FOREST_MAX_DEPTH", defaults.forest.max_depth)?,
            seed: env_or("FOREST_SEED", defaults.forest.seed)?,
            ..defaults.forest
        };

        let default_top_n = env_or("TOP_N", defaults.default_top_n)?;

        Ok(Self {
            data_dir,
            forest,
            default_top_n,
        })
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths::in_dir(&self.data_dir)
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
