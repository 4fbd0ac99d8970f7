//! Samples of scalar observations
//!
//! A `Sample` only ever holds finite values. Non-numeric CSV cells arrive as
//! NaN and are dropped on construction; duplicates are kept because the
//! multiplicity of an observation weights its kernel.

use serde::{Deserialize, Serialize};

/// An ordered collection of finite observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    values: Vec<f64>,
    /// Number of non-finite inputs that were dropped
    missing: usize,
}

impl Sample {
    /// Build a sample, dropping NaN and infinite values
    pub fn from_values(data: &[f64]) -> Self {
        data.iter().copied().collect()
    }

    /// Get the finite values in input order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of finite observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the sample has no observations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of inputs dropped as non-finite
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Arithmetic mean, `None` for an empty sample
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Sample variance with Bessel's correction, `None` when n < 2
    pub fn variance(&self) -> Option<f64> {
        let n = self.values.len();
        if n < 2 {
            return None;
        }
        let mean = self.mean()?;
        let ss: f64 = self.values.iter().map(|x| (x - mean).powi(2)).sum();
        Some(ss / (n - 1) as f64)
    }

    /// Sample standard deviation, `None` when n < 2
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Smallest observation
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// Largest observation
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Whether at least two different values are present
    pub fn has_spread(&self) -> bool {
        match (self.min(), self.max()) {
            (Some(lo), Some(hi)) => hi > lo,
            _ => false,
        }
    }

    /// Values sorted ascending
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

impl FromIterator<f64> for Sample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut values = Vec::new();
        let mut missing = 0;
        for x in iter {
            if x.is_finite() {
                values.push(x);
            } else {
                missing += 1;
            }
        }
        Self { values, missing }
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
