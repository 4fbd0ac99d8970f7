//! Violin plots of keystroke timings
//!
//! Each group gets a mirrored density (fixed bandwidth, evaluated at the
//! value axis ticks) with a box plot drawn inside it.

use std::path::Path;

use keytrace_io::{load_merged, partition_by_group, Group, GroupedSamples};
use keytrace_stats::{BoxPlotStats, DensityCurve, Kde, StatsError, SummaryStats};
use serde::{Deserialize, Serialize};

use crate::config::ViolinConfig;
use crate::error::{ChartError, ChartResult};
use crate::metrics::TimingMetric;
use crate::scale::LinearScale;

/// One group's violin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolinGroup {
    pub group: Group,
    /// Count, spread and extremes of the observations
    pub summary: SummaryStats,
    /// Density over the value axis ticks
    pub curve: DensityCurve,
    pub box_plot: BoxPlotStats,
}

impl ViolinGroup {
    /// Whether the lower whisker is drawn; it is hidden when clamped to zero
    pub fn shows_lower_whisker(&self) -> bool {
        self.box_plot.clamped_lower_whisker() > 0.0
    }
}

/// Violin plot of one timing metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolinPlot {
    pub metric: TimingMetric,
    y_scale: LinearScale,
    groups: Vec<ViolinGroup>,
}

impl ViolinPlot {
    /// Build both violins on a shared `[0, max]` value axis
    ///
    /// Groups without observations are left out.
    pub fn build(
        samples: &GroupedSamples,
        metric: TimingMetric,
        config: &ViolinConfig,
    ) -> ChartResult<Self> {
        let summaries = Group::ALL.map(|g| SummaryStats::from_sample(samples.get(g)));
        let y_max = summaries
            .iter()
            .filter(|s| s.count > 0)
            .map(|s| s.max)
            .fold(f64::NEG_INFINITY, f64::max);
        if !y_max.is_finite() {
            return Err(ChartError::Stats(StatsError::EmptySample));
        }

        let y_scale = LinearScale::new((0.0, y_max), (config.height as f64, 0.0)).nice(10);
        let points = y_scale.ticks(config.tick_count);

        let mut groups = Vec::with_capacity(Group::ALL.len());
        for (group, summary) in Group::ALL.into_iter().zip(summaries) {
            let sample = samples.get(group);
            let Some(box_plot) = BoxPlotStats::from_sample(sample) else {
                tracing::warn!(group = %group, metric = ?metric, "no values, skipping violin");
                continue;
            };
            let kde = Kde::with_bandwidth(sample, config.bandwidth)
                .map_err(|e| ChartError::for_group(group, e))?;
            groups.push(ViolinGroup {
                group,
                summary,
                curve: kde.curve(&points),
                box_plot,
            });
        }

        Ok(Self {
            metric,
            y_scale,
            groups,
        })
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn groups(&self) -> &[ViolinGroup] {
        &self.groups
    }

    pub fn group(&self, group: Group) -> Option<&ViolinGroup> {
        self.groups.iter().find(|g| g.group == group)
    }

    /// Widest density across the violins, sizes the violin width scale
    pub fn max_density(&self) -> f64 {
        self.groups
            .iter()
            .map(|g| g.curve.max_density())
            .fold(0.0, f64::max)
    }
}

/// Load keystroke files and build one violin plot
pub async fn load_violin<P: AsRef<Path>>(
    paths: &[P],
    metric: TimingMetric,
    config: &ViolinConfig,
) -> ChartResult<ViolinPlot> {
    let table = load_merged(paths).await?;
    let samples = partition_by_group(&table, &metric.column_spec())?;
    ViolinPlot::build(&samples, metric, config)
}
