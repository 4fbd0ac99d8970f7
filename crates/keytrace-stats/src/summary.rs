//! Summary statistics for keystroke samples
//!
//! Provides the statistics behind the violin box plots and the
//! grouped bar metrics:
//! - Mean, standard deviation, min, max
//! - Linearly interpolated quantiles
//! - Box plot whiskers (Tukey fences clamped to the data)

use crate::error::{StatsError, StatsResult};
use crate::sample::Sample;
use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Number of missing/NaN values
    pub missing: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Sample standard deviation (NaN when count < 2)
    pub std_dev: f64,
    /// Median (50th percentile)
    pub median: f64,
}

impl SummaryStats {
    /// Compute summary statistics from a sample
    pub fn from_sample(sample: &Sample) -> Self {
        if sample.is_empty() {
            return Self::empty(sample.missing());
        }

        let sorted = sample.sorted();
        Self {
            count: sample.len(),
            missing: sample.missing(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean: sample.mean().unwrap_or(f64::NAN),
            std_dev: sample.std_dev().unwrap_or(f64::NAN),
            median: quantile_sorted(&sorted, 0.5).ok().flatten().unwrap_or(f64::NAN),
        }
    }

    /// Create empty statistics (all NaN)
    fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            std_dev: f64::NAN,
            median: f64::NAN,
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Quantile of ascending data with linear interpolation between ranks
///
/// Uses rank `(n - 1) * p`, so `p = 0` is the minimum and `p = 1` the maximum.
/// Returns `Ok(None)` for empty input.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> StatsResult<Option<f64>> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidProbability(p));
    }
    let n = sorted.len();
    if n == 0 {
        return Ok(None);
    }
    if n == 1 {
        return Ok(Some(sorted[0]));
    }

    let rank = (n - 1) as f64 * p;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    Ok(Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac))
}

/// Box plot statistics drawn inside a violin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lower whisker: `max(min, q1 - 1.5 * IQR)`
    pub lower_whisker: f64,
    /// Upper whisker: `min(max, q3 + 1.5 * IQR)`
    pub upper_whisker: f64,
}

impl BoxPlotStats {
    /// Compute box plot statistics, `None` for an empty sample
    pub fn from_sample(sample: &Sample) -> Option<Self> {
        let sorted = sample.sorted();
        let q1 = quantile_sorted(&sorted, 0.25).ok()??;
        let median = quantile_sorted(&sorted, 0.5).ok()??;
        let q3 = quantile_sorted(&sorted, 0.75).ok()??;
        let iqr = q3 - q1;

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker: min.max(q1 - 1.5 * iqr),
            upper_whisker: max.min(q3 + 1.5 * iqr),
        })
    }

    /// Get the interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower whisker clamped so it never drops below the axis origin
    pub fn clamped_lower_whisker(&self) -> f64 {
        self.lower_whisker.max(0.0)
    }
}

/// How a group of values is reduced to one bar height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Mean,
    Median,
}

impl Aggregation {
    /// Reduce a sample, `None` when it is empty
    pub fn apply(&self, sample: &Sample) -> Option<f64> {
        match self {
            Aggregation::Mean => sample.mean(),
            Aggregation::Median => quantile_sorted(&sample.sorted(), 0.5).ok().flatten(),
        }
    }

    /// Display name with a leading capital
    pub fn title(&self) -> &'static str {
        match self {
            Aggregation::Mean => "Mean",
            Aggregation::Median => "Median",
        }
    }
}

impl std::str::FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Aggregation::Mean),
            "median" => Ok(Aggregation::Median),
            other => Err(format!("Unknown aggregation: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_basic() {
        let sample: Sample = (1..=10).map(f64::from).collect();
        let stats = SummaryStats::from_sample(&sample);

        assert_eq!(stats.count, 10);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert!((stats.mean - 5.5).abs() < 1e-10);
        assert!((stats.median - 5.5).abs() < 1e-10);
        assert_eq!(stats.range(), 9.0);
    }

    #[test]
    fn test_summary_stats_odd_median() {
        let sample = Sample::from_values(&[9.0, 1.0, 4.0]);
        assert_eq!(SummaryStats::from_sample(&sample).median, 4.0);
    }

    #[test]
    fn test_summary_stats_with_nan() {
        let sample = Sample::from_values(&[1.0, 2.0, f64::NAN, 4.0, 5.0]);
        let stats = SummaryStats::from_sample(&sample);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.missing, 1);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_summary_stats_empty() {
        let stats = SummaryStats::from_sample(&Sample::default());
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.0).unwrap(), Some(1.0));
        assert_eq!(quantile_sorted(&sorted, 1.0).unwrap(), Some(4.0));
        // rank 0.75 between 1 and 2
        assert_eq!(quantile_sorted(&sorted, 0.25).unwrap(), Some(1.75));
        assert_eq!(quantile_sorted(&sorted, 0.5).unwrap(), Some(2.5));
    }

    #[test]
    fn test_quantile_rejects_bad_probability() {
        assert!(quantile_sorted(&[1.0], 1.5).is_err());
        assert_eq!(quantile_sorted(&[], 0.5).unwrap(), None);
    }

    #[test]
    fn test_box_plot_whiskers() {
        let sample = Sample::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        let stats = BoxPlotStats::from_sample(&sample).unwrap();

        assert_eq!(stats.q1, 2.25);
        assert_eq!(stats.q3, 4.75);
        assert_eq!(stats.lower_whisker, 1.0);
        // 100 lies beyond the upper fence
        assert!((stats.upper_whisker - (4.75 + 1.5 * 2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_box_plot_lower_whisker_clamp() {
        let stats = BoxPlotStats {
            q1: 1.0,
            median: 2.0,
            q3: 10.0,
            lower_whisker: -12.5,
            upper_whisker: 20.0,
        };
        assert_eq!(stats.clamped_lower_whisker(), 0.0);
        assert_eq!(stats.iqr(), 9.0);
    }

    #[test]
    fn test_aggregation() {
        let sample = Sample::from_values(&[1.0, 2.0, 9.0]);
        assert_eq!(Aggregation::Mean.apply(&sample), Some(4.0));
        assert_eq!(Aggregation::Median.apply(&sample), Some(2.0));
        assert_eq!(Aggregation::Mean.apply(&Sample::default()), None);
        assert_eq!("Median".parse::<Aggregation>(), Ok(Aggregation::Median));
        assert!("mode".parse::<Aggregation>().is_err());
    }
}
