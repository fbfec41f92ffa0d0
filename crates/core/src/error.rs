use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Configuration errors surfaced before any column is processed.
///
/// Nothing in this class produces a partial `BatchResult`; analysis either
/// starts with a valid configuration or does not start at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("confidence threshold {value} is outside [0.0, 1.0]")]
    InvalidThreshold { value: f64 },

    #[error("invalid rule at index {index}: {reason}")]
    InvalidRule { index: usize, reason: String },
}

/// A single rule failed to evaluate against a column name.
///
/// Recovered locally: the engine logs the failure, treats the rule as a
/// non-match for that column, and keeps evaluating the remaining rules.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid regex pattern '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },
}

/// Lookup of a column name that is not present in the batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("column '{column}' is not present in this batch")]
pub struct UnknownColumnError {
    pub column: String,
}
