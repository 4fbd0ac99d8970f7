//! Density curves
//!
//! A `DensityCurve` is the immutable output of the estimator: one
//! `(x, density)` pair per evaluation point, ordered by ascending x so that
//! lookups can bisect the x column.

use crate::cdf::integrate_cdf;
use serde::{Deserialize, Serialize};

/// Ordered `(x, density)` samples of an estimated density
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    points: Vec<(f64, f64)>,
}

impl DensityCurve {
    /// Build a curve from `(x, density)` pairs, ordering them by x
    pub fn from_points(mut points: Vec<(f64, f64)>) -> Self {
        if !points.windows(2).all(|w| w[0].0 <= w[1].0) {
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        Self { points }
    }

    /// Get the `(x, density)` pairs
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Number of evaluation points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the curve has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the x column
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.0)
    }

    /// Iterate over the density column
    pub fn densities(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.1)
    }

    /// First and last x, `None` for an empty curve
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.0, self.points.last()?.0))
    }

    /// Largest density value, 0 for an empty curve
    pub fn max_density(&self) -> f64 {
        self.densities().fold(0.0, f64::max)
    }

    /// Index of the first point whose x is not less than `x`
    ///
    /// Equals `len()` when every point lies left of `x`.
    pub fn bisect_left(&self, x: f64) -> usize {
        self.points.partition_point(|p| p.0 < x)
    }

    /// Density reported under a hover position
    ///
    /// Looks up the point at the bisect-left index of `x`. Positions left of
    /// the second point or right of the last point report nothing.
    pub fn hover_lookup(&self, x: f64) -> Option<(f64, f64)> {
        let idx = self.bisect_left(x);
        if idx > 0 && idx < self.points.len() {
            Some(self.points[idx])
        } else {
            None
        }
    }

    /// Points with `low <= x <= high`, bounds taken in either order
    ///
    /// This is the geometry of a shaded area under the curve.
    pub fn window(&self, a: f64, b: f64) -> &[(f64, f64)] {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let start = self.points.partition_point(|p| p.0 < low);
        let end = self.points.partition_point(|p| p.0 <= high);
        if start >= end {
            return &[];
        }
        &self.points[start..end]
    }

    /// Approximate probability mass between two x-bounds
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        integrate_cdf(self, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> DensityCurve {
        DensityCurve::from_points(vec![(0.0, 0.0), (1.0, 0.5), (2.0, 1.0), (3.0, 0.5)])
    }

    #[test]
    fn test_orders_points() {
        let curve = DensityCurve::from_points(vec![(2.0, 0.1), (0.0, 0.3), (1.0, 0.2)]);
        assert_eq!(curve.xs().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);
        assert_eq!(curve.densities().collect::<Vec<_>>(), vec![0.3, 0.2, 0.1]);
    }

    #[test]
    fn test_domain_and_max() {
        let curve = ramp();
        assert_eq!(curve.domain(), Some((0.0, 3.0)));
        assert_eq!(curve.max_density(), 1.0);
        assert_eq!(DensityCurve::default().domain(), None);
        assert_eq!(DensityCurve::default().max_density(), 0.0);
    }

    #[test]
    fn test_bisect_left() {
        let curve = ramp();
        assert_eq!(curve.bisect_left(-1.0), 0);
        assert_eq!(curve.bisect_left(1.0), 1);
        assert_eq!(curve.bisect_left(1.5), 2);
        assert_eq!(curve.bisect_left(9.0), 4);
    }

    #[test]
    fn test_hover_lookup() {
        let curve = ramp();
        // Index 0 is never reported
        assert_eq!(curve.hover_lookup(-5.0), None);
        assert_eq!(curve.hover_lookup(0.0), None);
        assert_eq!(curve.hover_lookup(1.2), Some((2.0, 1.0)));
        assert_eq!(curve.hover_lookup(3.0), Some((3.0, 0.5)));
        assert_eq!(curve.hover_lookup(3.1), None);
    }

    #[test]
    fn test_window() {
        let curve = ramp();
        assert_eq!(curve.window(0.5, 2.0), &[(1.0, 0.5), (2.0, 1.0)]);
        assert_eq!(curve.window(2.0, 0.5), &[(1.0, 0.5), (2.0, 1.0)]);
        assert!(curve.window(1.2, 1.8).is_empty());
        assert_eq!(curve.window(1.0, 1.0), &[(1.0, 0.5)]);
    }
}
