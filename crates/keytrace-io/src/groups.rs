//! Group labels and sample partitioning

use crate::csv_reader::{parse_number, CsvTable};
use crate::reader::IoResult;
use keytrace_stats::Sample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary subject group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    /// Subjects with Parkinson's disease
    Parkinsons,
    /// Control subjects
    Control,
}

impl Group {
    /// Both groups in display order
    pub const ALL: [Group; 2] = [Group::Parkinsons, Group::Control];

    /// Parse a label cell such as `"True"`, `"Yes"`, `"False"` or `"No"`
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(Group::Parkinsons),
            "false" | "no" | "0" => Some(Group::Control),
            _ => None,
        }
    }

    /// Legend name
    pub fn name(&self) -> &'static str {
        match self {
            Group::Parkinsons => "Parkinson's",
            Group::Control => "Non-Parkinson's",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which columns to read when partitioning a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Numeric column holding the observations
    pub value: String,
    /// Column holding the group label
    pub label: String,
    /// Factor applied to every value (e.g. 1000 for seconds to ms)
    pub scale: f64,
}

impl ColumnSpec {
    /// Read `value` as-is, partitioned by `label`
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            scale: 1.0,
        }
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Typing speed in WPM labelled by the `gt` column
    pub fn typing_speed() -> Self {
        Self::new("typingSpeed", "gt")
    }

    /// Key hold duration converted from seconds to milliseconds
    pub fn duration_ms() -> Self {
        Self::new("duration", "has_parkinsons").with_scale(1000.0)
    }

    /// Inter-key delay converted from seconds to milliseconds
    pub fn delay_ms() -> Self {
        Self::new("delay", "has_parkinsons").with_scale(1000.0)
    }
}

/// One numeric column split into the two groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedSamples {
    pub parkinsons: Sample,
    pub control: Sample,
    /// Rows whose label matched neither group
    pub unlabeled: usize,
}

impl GroupedSamples {
    /// Build from already partitioned values
    pub fn new(parkinsons: &[f64], control: &[f64]) -> Self {
        Self {
            parkinsons: Sample::from_values(parkinsons),
            control: Sample::from_values(control),
            unlabeled: 0,
        }
    }

    /// Get the sample of one group
    pub fn get(&self, group: Group) -> &Sample {
        match group {
            Group::Parkinsons => &self.parkinsons,
            Group::Control => &self.control,
        }
    }
}

/// Partition a numeric column by the group label column
///
/// Non-numeric and missing values are dropped by [`Sample`]; rows with an
/// unrecognised label are counted but excluded.
pub fn partition_by_group(table: &CsvTable, spec: &ColumnSpec) -> IoResult<GroupedSamples> {
    let values = table.column(&spec.value)?;
    let labels = table.column(&spec.label)?;

    let mut parkinsons = Vec::new();
    let mut control = Vec::new();
    let mut unlabeled = 0;

    for (cell, label) in values.iter().zip(labels.iter()) {
        let value = parse_number(cell) * spec.scale;
        match Group::from_label(label) {
            Some(Group::Parkinsons) => parkinsons.push(value),
            Some(Group::Control) => control.push(value),
            None => unlabeled += 1,
        }
    }

    let grouped = GroupedSamples {
        parkinsons: Sample::from_values(&parkinsons),
        control: Sample::from_values(&control),
        unlabeled,
    };
    tracing::debug!(
        column = %spec.value,
        parkinsons = grouped.parkinsons.len(),
        control = grouped.control.len(),
        dropped = grouped.parkinsons.missing() + grouped.control.missing(),
        unlabeled,
        "partitioned samples"
    );
    Ok(grouped)
}
