//! Shared samples and grids for estimator tests

/// Evaluation grid from `start` to `end` inclusive in unit steps
pub fn unit_grid(start: i32, end: i32) -> Vec<f64> {
    (start..=end).map(f64::from).collect()
}

/// Evaluation grid covering `[start, end]` with a fixed step
pub fn grid(start: f64, end: f64, step: f64) -> Vec<f64> {
    let n = ((end - start) / step).ceil() as usize;
    (0..=n).map(|i| start + i as f64 * step).collect()
}

/// Tight cluster of typing speeds around `center`
pub fn cluster(center: f64) -> Vec<f64> {
    [-5.0, -2.0, -1.0, 0.0, 0.0, 1.0, 2.0, 5.0]
        .iter()
        .map(|d| center + d)
        .collect()
}

/// Largest single trapezoid of a curve
pub fn max_segment_area(curve: &keytrace_stats::DensityCurve) -> f64 {
    curve
        .points()
        .windows(2)
        .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
        .fold(0.0, f64::max)
}
