//! Interval CDF by trapezoidal integration
//!
//! The density curve is sampled on a grid, so a drag between two arbitrary
//! x-values rarely hits grid points. The integration window is widened to the
//! grid points that bracket the requested bounds, and bounds outside the
//! sampled range clamp to the first or last point instead of failing.

use crate::curve::DensityCurve;

/// Approximate probability mass of `curve` between two x-bounds
///
/// Bounds may be given in either order. A NaN bound, a zero-width interval,
/// an empty curve, or a window that collapses after clamping all yield `0`. The
/// result is not renormalised, so boundary leakage of the estimate can push
/// it slightly outside `[0, 1]`.
pub fn integrate_cdf(curve: &DensityCurve, low_x: f64, high_x: f64) -> f64 {
    if low_x.is_nan() || high_x.is_nan() {
        return 0.0;
    }
    let (low, high) = if low_x <= high_x {
        (low_x, high_x)
    } else {
        (high_x, low_x)
    };
    if low == high || curve.len() < 2 {
        return 0.0;
    }

    let points = curve.points();
    let start = curve.bisect_left(low).saturating_sub(1);
    let end = curve.bisect_left(high).min(points.len() - 1);
    if start >= end {
        return 0.0;
    }

    points[start..=end]
        .windows(2)
        .map(|w| {
            let (x0, d0) = w[0];
            let (x1, d1) = w[1];
            (x1 - x0) * (d0 + d1) / 2.0
        })
        .sum()
}
