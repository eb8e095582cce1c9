//! Error taxonomy for the tourism advisor
//!
//! A filter that matches no rows is not an error: analytical functions return
//! an empty/`None` sentinel for it. These variants are the fail-fast cases.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TourismError>;

#[derive(Error, Debug)]
pub enum TourismError {
    /// Dataset file absent at startup. Fatal.
    #[error("Dataset not found at `{}`. Place the CSV there.", path.display())]
    MissingSourceFile { path: PathBuf },

    #[error("Dataset is missing required column '{column}'. Available columns: {available:?}")]
    MissingColumn { column: String, available: Vec<String> },

    #[error("Malformed row {row}, column '{column}': {reason}")]
    MalformedRow {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Unknown month '{0}'")]
    InvalidMonth(String),

    #[error("Invalid trip parameters: {0}")]
    InvalidTripParameters(String),

    #[error("Please provide both name and email to continue.")]
    InvalidSignIn,

    #[error("Unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
