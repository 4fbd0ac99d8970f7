//! Linear scales and tick generation
//!
//! Ticks follow the usual 1/2/5 × 10^k stepping. Steps below one are
//! represented by their inverse so that tick values are computed as
//! `i / inverse` and come out exact (`0.1`, not `0.30000000000000004`).

use serde::{Deserialize, Serialize};

/// Maps a continuous data domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale from `domain` onto `range`
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Data domain
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Pixel range
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a data value to a pixel position
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a pixel position back to a data value
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` evenly spaced, human-friendly values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Extend the domain outward to round tick boundaries
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count as f64);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }
}

/// Tick values between `start` and `stop`, both inclusive when they land on a step
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let (lo, hi, reversed) = if stop < start {
        (stop, start, true)
    } else {
        (start, stop, false)
    };

    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let mut values: Vec<f64> = (i1 as i64..=i2 as i64)
        .map(|i| {
            let i = i as f64;
            if inc < 0.0 {
                i / -inc
            } else {
                i * inc
            }
        })
        .collect();
    if reversed {
        values.reverse();
    }
    values
}

/// Step between ticks; negative values encode the inverse of a sub-unit step
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    match tick_spec(start, stop, count) {
        Some((_, _, inc)) => inc,
        None => 0.0,
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    if !(count > 0.0) || !(stop > start) {
        return None;
    }

    let step = (stop - start) / count;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        i1 = (start * inverse).round();
        i2 = (stop * inverse).round();
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        inc = -inverse;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_and_invert() {
        let scale = LinearScale::new((-10.0, 300.0), (0.0, 620.0));
        assert_eq!(scale.map(-10.0), 0.0);
        assert_eq!(scale.map(300.0), 620.0);
        assert!((scale.map(50.0) - 120.0).abs() < 1e-9);
        assert!((scale.invert(120.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_flipped_range() {
        let scale = LinearScale::new((0.0, 0.04), (400.0, 0.0));
        assert_eq!(scale.map(0.0), 400.0);
        assert_eq!(scale.map(0.04), 0.0);
        assert!((scale.invert(200.0) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_density_domain_ticks() {
        let values = ticks(-10.0, 300.0, 300);
        assert_eq!(values.len(), 311);
        assert_eq!(values[0], -10.0);
        assert_eq!(values[10], 0.0);
        assert_eq!(*values.last().unwrap(), 300.0);
        assert!(values.windows(2).all(|w| w[1] - w[0] == 1.0));
    }

    #[test]
    fn test_small_step_ticks_are_exact() {
        assert_eq!(ticks(0.0, 1.0, 10)[3], 0.3);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_ticks_step_sizes() {
        assert_eq!(ticks(0.0, 10.0, 10), (0..=10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(ticks(0.0, 100.0, 4), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks(0.0, 1000.0, 50)[1], 20.0);
    }

    #[test]
    fn test_degenerate_ticks() {
        assert!(ticks(0.0, 10.0, 0).is_empty());
        assert!(ticks(f64::NAN, 10.0, 5).is_empty());
        assert_eq!(ticks(3.0, 3.0, 5), vec![3.0]);
    }

    #[test]
    fn test_reversed_ticks() {
        assert_eq!(ticks(2.0, 0.0, 2), vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_nice() {
        let scale = LinearScale::new((0.0, 487.3), (400.0, 0.0)).nice(10);
        assert_eq!(scale.domain(), (0.0, 500.0));

        let scale = LinearScale::new((0.13, 0.87), (0.0, 1.0)).nice(10);
        assert_eq!(scale.domain(), (0.1, 0.9));
    }
}
