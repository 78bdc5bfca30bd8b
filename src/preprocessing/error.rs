//! Error types for preprocessing operations.

use polars::prelude::PolarsError;
use std::fmt;

/// Error type for preprocessing operations.
#[derive(Debug)]
pub enum PreprocessingError {
    /// A requested column is absent from the input table.
    ColumnNotFound(String),
    /// No branch of a feature union has the requested name.
    BranchNotFound(String),
    /// No stage of a pipeline has the requested name.
    StepNotFound(String),
    /// A stage was asked for state it only has after transforming data.
    NotFitted(String),
    /// A stage does not expose output feature names.
    FeatureNamesUnsupported(String),
    /// Shape mismatch between expected and actual array dimensions.
    InvalidShape { expected: String, got: String },
    /// A stage received a kind of data it cannot handle.
    InvalidInput(String),
    /// Invalid configuration value.
    InvalidParameter(String),
    /// A value has no numeric representation.
    NonNumeric(String),
    /// Empty data provided where non-empty was required.
    EmptyData(String),
}

impl fmt::Display for PreprocessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreprocessingError::ColumnNotFound(name) => {
                write!(f, "Column not found: '{}'", name)
            }
            PreprocessingError::BranchNotFound(name) => {
                write!(f, "Branch not found: '{}'", name)
            }
            PreprocessingError::StepNotFound(name) => {
                write!(f, "Step not found: '{}'", name)
            }
            PreprocessingError::NotFitted(msg) => {
                write!(f, "Not fitted: {}", msg)
            }
            PreprocessingError::FeatureNamesUnsupported(step) => {
                write!(f, "Feature names not supported by {}", step)
            }
            PreprocessingError::InvalidShape { expected, got } => {
                write!(f, "Invalid shape: expected {}, got {}", expected, got)
            }
            PreprocessingError::InvalidInput(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
            PreprocessingError::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {}", msg)
            }
            PreprocessingError::NonNumeric(msg) => {
                write!(f, "Non-numeric value: {}", msg)
            }
            PreprocessingError::EmptyData(msg) => {
                write!(f, "Empty data: {}", msg)
            }
        }
    }
}

impl std::error::Error for PreprocessingError {}

impl From<ndarray::ShapeError> for PreprocessingError {
    fn from(err: ndarray::ShapeError) -> Self {
        PreprocessingError::InvalidShape {
            expected: "compatible array dimensions".to_string(),
            got: err.to_string(),
        }
    }
}

impl From<PolarsError> for PreprocessingError {
    fn from(err: PolarsError) -> Self {
        match err {
            PolarsError::ColumnNotFound(msg) => PreprocessingError::ColumnNotFound(msg.to_string()),
            other => PreprocessingError::InvalidInput(other.to_string()),
        }
    }
}
