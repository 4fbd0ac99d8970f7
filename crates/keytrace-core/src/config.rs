//! Configuration for keytrace-core
//!
//! Centralized chart parameters: density domain and resolution, violin
//! smoothing, pointer throttling and replay pacing.

use keytrace_stats::{Aggregation, Bandwidth};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Chart-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeytraceConfig {
    /// Typing-speed density plot
    #[serde(default)]
    pub density: DensityPlotConfig,
    /// Keystroke timing violin plot
    #[serde(default)]
    pub violin: ViolinConfig,
    /// Bar chart of aggregated keystroke timings
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Pointer handling
    #[serde(default)]
    pub interaction: InteractionConfig,
    /// Keyboard replay
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Density plot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityPlotConfig {
    /// Lower end of the x-domain in WPM
    pub domain_min: f64,
    /// Upper end of the x-domain in WPM
    pub domain_max: f64,
    /// Requested tick count; ticks are the KDE evaluation points
    pub tick_count: usize,
    /// Plot area width in pixels
    pub width: f32,
    /// Plot area height in pixels
    pub height: f32,
    /// Bandwidth selection
    pub bandwidth: Bandwidth,
}

impl Default for DensityPlotConfig {
    fn default() -> Self {
        Self {
            domain_min: -10.0,
            domain_max: 300.0,
            tick_count: 300,
            width: 800.0,
            height: 400.0,
            bandwidth: Bandwidth::Silverman,
        }
    }
}

/// Violin plot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolinConfig {
    /// Requested tick count of the value axis
    pub tick_count: usize,
    /// Plot area height in pixels
    pub height: f32,
    /// Bandwidth in milliseconds
    pub bandwidth: Bandwidth,
}

impl Default for ViolinConfig {
    fn default() -> Self {
        Self {
            tick_count: 50,
            height: 400.0,
            bandwidth: Bandwidth::Manual(7.0),
        }
    }
}

/// Bar metrics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Reduction applied to each group
    pub aggregation: Aggregation,
}

/// Pointer handling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Minimum spacing between handled pointer moves in milliseconds
    pub throttle_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { throttle_ms: 10 }
    }
}

/// Keyboard replay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Playback speed factor, 1.0 is real time
    pub speed: f64,
    /// Number of recent keystrokes kept for the live metric charts
    pub window: usize,
    /// Refresh interval of the metric charts in milliseconds
    pub refresh_ms: u64,
    /// Participant replayed on the Parkinson's keyboard
    pub parkinsons_participant: String,
    /// Participant replayed on the control keyboard
    pub control_participant: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            window: 10,
            refresh_ms: 16,
            parkinsons_participant: "1001".to_string(),
            control_participant: "1002".to_string(),
        }
    }
}

impl KeytraceConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let density = &self.density;
        if !(density.domain_min.is_finite() && density.domain_max.is_finite())
            || density.domain_min >= density.domain_max
        {
            return Err(ConfigError::InvalidDomain(format!(
                "density domain [{}, {}] must be finite and increasing",
                density.domain_min, density.domain_max
            )));
        }

        if density.tick_count == 0 || self.violin.tick_count == 0 {
            return Err(ConfigError::OutOfRange(
                "tick_count must be positive".to_string(),
            ));
        }

        if density.width <= 0.0 || density.height <= 0.0 || self.violin.height <= 0.0 {
            return Err(ConfigError::OutOfRange(
                "plot dimensions must be positive".to_string(),
            ));
        }

        for bandwidth in [&density.bandwidth, &self.violin.bandwidth] {
            if let Bandwidth::Manual(h) = bandwidth {
                if !(h.is_finite() && *h > 0.0) {
                    return Err(ConfigError::OutOfRange(format!(
                        "manual bandwidth must be positive, got {}",
                        h
                    )));
                }
            }
        }

        if !(self.replay.speed.is_finite() && self.replay.speed > 0.0) {
            return Err(ConfigError::OutOfRange(
                "replay speed must be positive".to_string(),
            ));
        }

        if self.replay.window == 0 {
            return Err(ConfigError::OutOfRange(
                "replay window must hold at least one keystroke".to_string(),
            ));
        }

        if self.replay.refresh_ms == 0 {
            return Err(ConfigError::OutOfRange(
                "refresh_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDomain(String),
    OutOfRange(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDomain(msg) => write!(f, "Invalid domain: {}", msg),
            ConfigError::OutOfRange(msg) => write!(f, "Value out of range: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ChartError {
    fn from(err: ConfigError) -> Self {
        ChartError::InvalidConfig(err.to_string())
    }
}
