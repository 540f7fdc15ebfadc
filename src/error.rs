//! Dataset errors
//!
//! Structural problems found while loading the CSV datasets. All of these are
//! fatal at startup: the advisor cannot serve anything without its tables.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("required dataset file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{table}: missing required column '{column}' (available: {available:?})")]
    MissingColumn {
        table: String,
        column: String,
        available: Vec<String>,
    },

    #[error("{table}: null value in required column '{column}' at row {row}")]
    NullValue {
        table: String,
        column: String,
        row: usize,
    },

    #[error("{table}: dataset contains no rows")]
    EmptyTable { table: String },
}
