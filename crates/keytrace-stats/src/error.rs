//! Error types for keytrace-stats

use thiserror::Error;

/// Errors raised by the estimators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// No finite observations to estimate from
    #[error("Sample is empty")]
    EmptySample,

    /// Too few observations or zero spread for a data-driven bandwidth
    #[error("Degenerate sample: n = {n}, std_dev = {std_dev}")]
    DegenerateSample { n: usize, std_dev: f64 },

    /// Bandwidth must be finite and strictly positive
    #[error("Invalid bandwidth: {0}")]
    InvalidBandwidth(f64),

    /// Quantile probability outside [0, 1]
    #[error("Invalid probability: {0}")]
    InvalidProbability(f64),
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
