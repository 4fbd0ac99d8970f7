//! Aggregated keystroke timings per group
//!
//! Hold time and flight time of every keystroke, reduced to one value per
//! group (mean or median) for a grouped bar chart.

use std::path::Path;

use keytrace_io::{load_merged, partition_by_group, ColumnSpec, CsvTable, Group};
use keytrace_stats::Aggregation;
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Keystroke timing column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingMetric {
    /// Hold time: release minus press
    Duration,
    /// Flight time: gap before the press
    Delay,
}

impl TimingMetric {
    pub const ALL: [TimingMetric; 2] = [TimingMetric::Duration, TimingMetric::Delay];

    /// Columns to read, converted to milliseconds
    pub fn column_spec(&self) -> ColumnSpec {
        match self {
            TimingMetric::Duration => ColumnSpec::duration_ms(),
            TimingMetric::Delay => ColumnSpec::delay_ms(),
        }
    }

    /// Value axis label of the violin plot
    pub fn axis_label(&self) -> &'static str {
        match self {
            TimingMetric::Duration => "Duration (milliseconds)",
            TimingMetric::Delay => "Delay (milliseconds)",
        }
    }

    /// Category label of the bar chart
    pub fn bar_label(&self) -> &'static str {
        match self {
            TimingMetric::Duration => "Avg Hold Time (ms)",
            TimingMetric::Delay => "Avg Delay Time (ms)",
        }
    }
}

/// One bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarValue {
    pub metric: TimingMetric,
    pub group: Group,
    /// `None` when the group has no values for the metric
    pub value: Option<f64>,
}

impl BarValue {
    /// Tooltip text, e.g. `Parkinson's: 123.45 ms`
    pub fn label(&self) -> String {
        match self.value {
            Some(v) => format!("{}: {:.2} ms", self.group.name(), v),
            None => format!("{}: no data", self.group.name()),
        }
    }
}

/// Grouped bar chart model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarMetrics {
    pub aggregation: Aggregation,
    bars: Vec<BarValue>,
}

impl BarMetrics {
    /// Reduce both timing columns of a keystroke table
    pub fn from_table(table: &CsvTable, aggregation: Aggregation) -> ChartResult<Self> {
        let mut bars = Vec::with_capacity(4);
        for metric in TimingMetric::ALL {
            let samples = partition_by_group(table, &metric.column_spec())?;
            for group in Group::ALL {
                bars.push(BarValue {
                    metric,
                    group,
                    value: aggregation.apply(samples.get(group)),
                });
            }
        }
        Ok(Self { aggregation, bars })
    }

    /// Chart title naming the reduction
    pub fn title(&self) -> String {
        format!(
            "Comparison of Typing Metrics in Parkinson's vs. Non-Parkinson's ({})",
            self.aggregation.title()
        )
    }

    pub fn bars(&self) -> &[BarValue] {
        &self.bars
    }

    pub fn value(&self, metric: TimingMetric, group: Group) -> Option<f64> {
        self.bars
            .iter()
            .find(|b| b.metric == metric && b.group == group)
            .and_then(|b| b.value)
    }

    /// Tallest bar, 0 when there are none
    pub fn max_value(&self) -> f64 {
        self.bars
            .iter()
            .filter_map(|b| b.value)
            .fold(0.0, f64::max)
    }
}

/// Load keystroke files and aggregate them
pub async fn load_bar_metrics<P: AsRef<Path>>(
    paths: &[P],
    aggregation: Aggregation,
) -> ChartResult<BarMetrics> {
    let table = load_merged(paths).await?;
    BarMetrics::from_table(&table, aggregation)
}
