//! Kernel density estimation
//!
//! Density at `x` is the mean over the sample of the Epanechnikov kernel
//! centred on each observation:
//!
//! ```text
//! u = (x - v) / h
//! K(u) = 0.75 * (1 - u^2) / h    if |u| <= 1
//!        0                       otherwise
//! ```
//!
//! Evaluation is O(|sample| x |points|) and lazy: [`Kde::evaluate`] yields
//! pairs on demand and [`Kde::curve`] collects them.

use crate::bandwidth::{validate_bandwidth, Bandwidth};
use crate::curve::DensityCurve;
use crate::error::{StatsError, StatsResult};
use crate::sample::Sample;

/// Epanechnikov kernel scaled by a bandwidth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epanechnikov {
    bandwidth: f64,
}

impl Epanechnikov {
    /// Create a kernel with a validated bandwidth
    pub fn new(bandwidth: f64) -> StatsResult<Self> {
        Ok(Self {
            bandwidth: validate_bandwidth(bandwidth)?,
        })
    }

    /// Kernel weight for an offset `x - v`
    pub fn weight(&self, offset: f64) -> f64 {
        let u = offset / self.bandwidth;
        if u.abs() <= 1.0 {
            0.75 * (1.0 - u * u) / self.bandwidth
        } else {
            0.0
        }
    }

    /// Get the bandwidth
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

/// Univariate kernel density estimator over a borrowed sample
#[derive(Debug, Clone)]
pub struct Kde<'a> {
    sample: &'a [f64],
    kernel: Epanechnikov,
}

impl<'a> Kde<'a> {
    /// Create an estimator from finite observations and a bandwidth
    pub fn new(sample: &'a [f64], bandwidth: f64) -> StatsResult<Self> {
        if sample.is_empty() {
            return Err(StatsError::EmptySample);
        }
        Ok(Self {
            sample,
            kernel: Epanechnikov::new(bandwidth)?,
        })
    }

    /// Create an estimator, resolving the bandwidth with `method`
    pub fn with_bandwidth(sample: &'a Sample, method: Bandwidth) -> StatsResult<Self> {
        if sample.is_empty() {
            return Err(StatsError::EmptySample);
        }
        let h = method.estimate(sample)?;
        Self::new(sample.as_slice(), h)
    }

    /// Bandwidth used by the estimator
    pub fn bandwidth(&self) -> f64 {
        self.kernel.bandwidth()
    }

    /// Estimated density at `x`
    pub fn density_at(&self, x: f64) -> f64 {
        let sum: f64 = self.sample.iter().map(|&v| self.kernel.weight(x - v)).sum();
        sum / self.sample.len() as f64
    }

    /// Lazily evaluate the density at each point
    pub fn evaluate<'p>(&'p self, points: &'p [f64]) -> impl Iterator<Item = (f64, f64)> + 'p {
        points.iter().map(move |&x| (x, self.density_at(x)))
    }

    /// Evaluate at every point and collect the curve
    pub fn curve(&self, points: &[f64]) -> DensityCurve {
        DensityCurve::from_points(self.evaluate(points).collect())
    }
}

/// Estimate a density curve for `sample` at `eval_points`
///
/// Non-finite observations are ignored. Fails when no finite observation
/// remains or when `bandwidth` is not finite and positive.
pub fn estimate_density(
    sample: &[f64],
    eval_points: &[f64],
    bandwidth: f64,
) -> StatsResult<DensityCurve> {
    let sample = Sample::from_values(sample);
    let kde = Kde::new(sample.as_slice(), bandwidth)?;
    Ok(kde.curve(eval_points))
}
