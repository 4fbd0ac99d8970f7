//! Bandwidth selection
//!
//! The density plot derives one bandwidth per group from that group's
//! sample; the violin plot smooths with a fixed width instead.

use crate::error::{StatsError, StatsResult};
use crate::sample::Sample;
use serde::{Deserialize, Serialize};

/// Silverman's rule of thumb: `1.06 * sigma * n^(-1/5)`
///
/// `sigma` is the sample (n - 1) standard deviation of the finite values.
/// Samples with fewer than two observations, or without spread, cannot
/// yield a usable width and fail with [`StatsError::DegenerateSample`].
pub fn silverman_bandwidth(sample: &[f64]) -> StatsResult<f64> {
    let sample = Sample::from_values(sample);
    silverman_for(&sample)
}

fn silverman_for(sample: &Sample) -> StatsResult<f64> {
    let n = sample.len();
    let std_dev = sample.std_dev().unwrap_or(f64::NAN);

    if n < 2 || !sample.has_spread() {
        return Err(StatsError::DegenerateSample { n, std_dev });
    }

    let h = 1.06 * std_dev * (n as f64).powf(-0.2);
    if !h.is_finite() || h <= 0.0 {
        return Err(StatsError::DegenerateSample { n, std_dev });
    }
    Ok(h)
}

/// Method used to pick the smoothing width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "lowercase")]
pub enum Bandwidth {
    /// Estimate from the sample with Silverman's rule of thumb
    Silverman,
    /// Use this value as the bandwidth
    Manual(f64),
}

impl Default for Bandwidth {
    fn default() -> Self {
        Bandwidth::Silverman
    }
}

impl Bandwidth {
    /// Resolve the bandwidth for a sample
    pub fn estimate(&self, sample: &Sample) -> StatsResult<f64> {
        match *self {
            Bandwidth::Silverman => silverman_for(sample),
            Bandwidth::Manual(h) => validate_bandwidth(h),
        }
    }
}

/// Check that a bandwidth is finite and strictly positive
pub fn validate_bandwidth(h: f64) -> StatsResult<f64> {
    if h.is_finite() && h > 0.0 {
        Ok(h)
    } else {
        Err(StatsError::InvalidBandwidth(h))
    }
}
