//! DataFrame helpers with column validation
//!
//! Every dataset is read through polars once at startup and immediately
//! copied into typed records. These helpers keep that boundary strict: a
//! required column that is absent, or a null cell inside one, fails the load
//! instead of surfacing later as a lookup error.

use crate::error::DatasetError;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Read a headered CSV file into a DataFrame
///
/// # Errors
/// Returns `DatasetError::MissingFile` if the path does not exist, or a
/// polars error (with context) if the file is not valid CSV.
pub fn read_csv(path: &Path, table: &str) -> Result<DataFrame> {
    if !path.exists() {
        return Err(DatasetError::MissingFile(path.to_path_buf()).into());
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load {} CSV: {}", table, path.display()))
}

/// Project a DataFrame onto exactly the given columns
///
/// # Errors
/// Returns `DatasetError::MissingColumn` naming the first absent column.
///
/// # Example
/// ```rust,ignore
/// let rainfall = materialize_with_columns(&df, &["STATE_UT_NAME", "DISTRICT"], "rainfall")?;
/// ```
pub fn materialize_with_columns(
    df: &DataFrame,
    columns: &[&str],
    table: &str,
) -> Result<DataFrame> {
    let available: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    for &expected in columns {
        if !available.iter().any(|name| name == expected) {
            return Err(DatasetError::MissingColumn {
                table: table.to_string(),
                column: expected.to_string(),
                available,
            }
            .into());
        }
    }

    let col_exprs: Vec<Expr> = columns.iter().map(|&name| col(name)).collect();

    df.clone()
        .lazy()
        .select(&col_exprs)
        .collect()
        .with_context(|| format!("{}: Failed to materialize columns {:?}", table, columns))
}

/// Copy a numeric column out as `f64` values
///
/// Integer columns are cast. Text that does not parse as a number is an
/// error rather than a null.
pub fn f64_column(df: &DataFrame, name: &str, table: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .with_context(|| format!("{}: Column '{}' not found", table, name))?
        .strict_cast(&DataType::Float64)
        .with_context(|| format!("{}: Column '{}' is not numeric", table, name))?;

    let values = column
        .f64()
        .with_context(|| format!("{}: Column '{}' is not f64 after cast", table, name))?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                DatasetError::NullValue {
                    table: table.to_string(),
                    column: name.to_string(),
                    row,
                }
                .into()
            })
        })
        .collect()
}

/// Copy a text column out as owned strings
pub fn str_column(df: &DataFrame, name: &str, table: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .with_context(|| format!("{}: Column '{}' not found", table, name))?
        .cast(&DataType::String)
        .with_context(|| format!("{}: Column '{}' cannot be read as text", table, name))?;

    let values = column
        .str()
        .with_context(|| format!("{}: Column '{}' is not string type", table, name))?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.map(|s| s.to_string()).ok_or_else(|| {
                DatasetError::NullValue {
                    table: table.to_string(),
                    column: name.to_string(),
                    row,
                }
                .into()
            })
        })
        .collect()
}
