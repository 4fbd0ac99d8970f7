//! Error types for keytrace-core
//!
//! Provides error handling for:
//! - Dataset loading
//! - Per-group density estimation
//! - Configuration validation
//! - Timer scheduling

use keytrace_io::{Group, IoError};
use keytrace_stats::StatsError;
use thiserror::Error;

/// Main error type for chart operations
#[derive(Error, Debug)]
pub enum ChartError {
    /// A dataset could not be loaded; terminal for the chart
    #[error("Failed to load data: {0}")]
    DataLoad(#[from] IoError),

    /// One group's sample cannot support a density estimate
    #[error("Not enough data for {group}: {source}")]
    DegenerateSample {
        group: Group,
        #[source]
        source: StatsError,
    },

    /// Statistics errors outside a specific group
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Timers need a running tokio runtime
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl ChartError {
    /// Attach the group a statistics error came from
    pub fn for_group(group: Group, source: StatsError) -> Self {
        ChartError::DegenerateSample { group, source }
    }

    /// Check if this error only affects a single group
    pub fn is_group_local(&self) -> bool {
        matches!(self, ChartError::DegenerateSample { .. })
    }
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
