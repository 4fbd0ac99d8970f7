//! Typing-speed density plot model
//!
//! One KDE curve per group over the x-axis ticks. Groups are estimated
//! independently: a group whose sample cannot support a bandwidth is kept as
//! [`GroupDensity::NotEnoughData`] and the other group still renders.

use keytrace_io::{Group, GroupedSamples};
use keytrace_stats::{DensityCurve, Kde, Sample};
use serde::{Deserialize, Serialize};

use crate::config::DensityPlotConfig;
use crate::error::{ChartError, ChartResult};
use crate::scale::LinearScale;

/// A group's estimated density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCurve {
    pub group: Group,
    /// Bandwidth the curve was estimated with
    pub bandwidth: f64,
    /// Observations behind the estimate
    pub sample_size: usize,
    pub curve: DensityCurve,
}

/// Outcome of estimating one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GroupDensity {
    Ready(GroupCurve),
    NotEnoughData { group: Group, reason: String },
}

impl GroupDensity {
    /// Which group this entry belongs to
    pub fn group(&self) -> Group {
        match self {
            GroupDensity::Ready(curve) => curve.group,
            GroupDensity::NotEnoughData { group, .. } => *group,
        }
    }

    /// The curve, if the group had enough data
    pub fn curve(&self) -> Option<&GroupCurve> {
        match self {
            GroupDensity::Ready(curve) => Some(curve),
            GroupDensity::NotEnoughData { .. } => None,
        }
    }
}

/// Estimate one group's curve over the given evaluation points
pub fn estimate_group(
    group: Group,
    sample: &Sample,
    config: &DensityPlotConfig,
    points: &[f64],
) -> ChartResult<GroupCurve> {
    let kde = Kde::with_bandwidth(sample, config.bandwidth)
        .map_err(|e| ChartError::for_group(group, e))?;
    Ok(GroupCurve {
        group,
        bandwidth: kde.bandwidth(),
        sample_size: sample.len(),
        curve: kde.curve(points),
    })
}

/// KDE evaluation points: the axis ticks, extended to both domain ends
///
/// Ticks fall on round values, so a domain like `[-3.7, 151.3]` would
/// otherwise leave the curve short of the plotted range.
pub fn evaluation_points(x_scale: &LinearScale, count: usize) -> Vec<f64> {
    let (min, max) = x_scale.domain();
    let mut points = x_scale.ticks(count);
    if points.first().map_or(true, |&x| x > min) {
        points.insert(0, min);
    }
    if points.last().map_or(true, |&x| x < max) {
        points.push(max);
    }
    points
}

/// Density curves for both groups on a shared x-scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityPlot {
    x_scale: LinearScale,
    height: f32,
    groups: Vec<GroupDensity>,
}

impl DensityPlot {
    /// Estimate both groups over the configured domain
    pub fn build(samples: &GroupedSamples, config: &DensityPlotConfig) -> Self {
        let x_scale = LinearScale::new(
            (config.domain_min, config.domain_max),
            (0.0, config.width as f64),
        );
        let points = evaluation_points(&x_scale, config.tick_count);

        let groups = Group::ALL
            .iter()
            .map(|&group| {
                match estimate_group(group, samples.get(group), config, &points) {
                    Ok(curve) => {
                        tracing::debug!(
                            group = %group,
                            bandwidth = curve.bandwidth,
                            n = curve.sample_size,
                            "estimated density"
                        );
                        GroupDensity::Ready(curve)
                    }
                    Err(e) => {
                        tracing::warn!(group = %group, "skipping density curve: {}", e);
                        GroupDensity::NotEnoughData {
                            group,
                            reason: e.to_string(),
                        }
                    }
                }
            })
            .collect();

        Self {
            x_scale,
            height: config.height,
            groups,
        }
    }

    /// Shared x-scale, WPM to pixels
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// Y-scale from zero to the tallest curve, density to pixels
    pub fn y_scale(&self) -> LinearScale {
        LinearScale::new((0.0, self.y_max()), (self.height as f64, 0.0))
    }

    /// All group entries in legend order
    pub fn groups(&self) -> &[GroupDensity] {
        &self.groups
    }

    /// Entry for one group
    pub fn group(&self, group: Group) -> Option<&GroupDensity> {
        self.groups.iter().find(|g| g.group() == group)
    }

    /// Curve for one group, if it had enough data
    pub fn curve(&self, group: Group) -> Option<&DensityCurve> {
        self.group(group)
            .and_then(GroupDensity::curve)
            .map(|c| &c.curve)
    }

    /// Groups that produced a curve
    pub fn ready(&self) -> impl Iterator<Item = &GroupCurve> {
        self.groups.iter().filter_map(GroupDensity::curve)
    }

    /// Tallest density across available curves, 0 when none are available
    pub fn y_max(&self) -> f64 {
        self.ready()
            .map(|c| c.curve.max_density())
            .fold(0.0, f64::max)
    }

    /// Curve vertices in pixel coordinates
    pub fn line_pixels(&self, group: Group) -> Vec<(f32, f32)> {
        let y_scale = self.y_scale();
        self.curve(group)
            .map(|curve| {
                curve
                    .points()
                    .iter()
                    .map(|&(x, d)| (self.x_scale.map(x) as f32, y_scale.map(d) as f32))
                    .collect()
            })
            .unwrap_or_default()
    }
}
