//! Keyboard heatmap of per-key delay differences
//!
//! For every key typed by both groups, the mean `delay` of the Parkinson's
//! group minus the mean `delay` of the control group. Keys are laid out on a
//! simplified QWERTY keyboard and colored on a diverging scale.

use std::collections::BTreeMap;
use std::path::Path;

use keytrace_io::{load_merged, CsvTable, Group};
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

pub const HEATMAP_TITLE: &str = "Keyboard Typing Delay: Parkinson's vs Control Group";

/// Differences at or beyond this magnitude saturate the color scale
pub const COLOR_LIMIT: f64 = 0.2;

/// Differences above this magnitude sit on dark fills and get light text
pub const LIGHT_TEXT_THRESHOLD: f64 = 0.15;

/// Key rows, top to bottom
pub const KEYBOARD_ROWS: [&[&str]; 4] = [
    &["Tab", "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "BackSpace"],
    &["Caps_Lock", "a", "s", "d", "f", "g", "h", "j", "k", "l", "Enter"],
    &["Shift_L", "z", "x", "c", "v", "b", "n", "m", "Shift_R"],
    &["Control_L", "space", "Control_R"],
];

/// Width of a key in units of a letter key
pub fn key_width_units(key: &str) -> f64 {
    match key {
        "BackSpace" | "Enter" => 2.0,
        "Tab" => 1.5,
        "Caps_Lock" | "Control_L" | "Control_R" => 1.75,
        "Shift_L" | "Shift_R" => 2.25,
        "space" => 5.8,
        _ => 1.0,
    }
}

/// Placed key, coordinates in pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyCell {
    pub key: &'static str,
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lay out the keyboard
///
/// Each row is indented by half a key more than the row above it.
pub fn keyboard_layout(key_size: f64, spacing: f64) -> Vec<KeyCell> {
    let mut cells = Vec::new();
    for (row, keys) in KEYBOARD_ROWS.iter().enumerate() {
        let row_offset = key_size * 0.5 * row as f64;
        let y = row as f64 * (key_size + spacing) + spacing;
        let mut x = spacing;
        for &key in keys.iter() {
            let width = key_size * key_width_units(key);
            cells.push(KeyCell {
                key,
                row,
                x: row_offset + x,
                y,
                width,
                height: key_size,
            });
            x += width + spacing;
        }
    }
    cells
}

#[derive(Debug, Clone, Copy, Default)]
struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Mean delays of one key in both groups
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyDelay {
    pub parkinsons_mean: f64,
    pub control_mean: f64,
    pub parkinsons_count: usize,
    pub control_count: usize,
}

impl KeyDelay {
    /// Parkinson's mean minus control mean
    pub fn difference(&self) -> f64 {
        self.parkinsons_mean - self.control_mean
    }
}

/// Per-key delay comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelayHeatmap {
    keys: BTreeMap<String, KeyDelay>,
}

impl DelayHeatmap {
    /// Aggregate a keystroke table with `key`, `delay` and `has_parkinsons`
    ///
    /// Non-numeric delays and unlabeled rows are skipped. Only keys with at
    /// least one valid delay in both groups are kept.
    pub fn from_table(table: &CsvTable) -> ChartResult<Self> {
        let keys = table.column("key")?;
        let delays = table.numeric_column("delay", 1.0)?;
        let labels = table.column("has_parkinsons")?;

        let mut parkinsons: BTreeMap<&str, RunningMean> = BTreeMap::new();
        let mut control: BTreeMap<&str, RunningMean> = BTreeMap::new();
        for ((&key, &delay), &label) in keys.iter().zip(delays.iter()).zip(labels.iter()) {
            if delay.is_nan() {
                continue;
            }
            let target = match Group::from_label(label) {
                Some(Group::Parkinsons) => &mut parkinsons,
                Some(Group::Control) => &mut control,
                None => continue,
            };
            target.entry(key).or_default().push(delay);
        }

        let keys: BTreeMap<String, KeyDelay> = parkinsons
            .iter()
            .filter_map(|(&key, pd)| {
                control.get(key).map(|ctl| {
                    (
                        key.to_string(),
                        KeyDelay {
                            parkinsons_mean: pd.mean(),
                            control_mean: ctl.mean(),
                            parkinsons_count: pd.count,
                            control_count: ctl.count,
                        },
                    )
                })
            })
            .collect();

        tracing::debug!(
            shared = keys.len(),
            parkinsons_only = parkinsons.len() - keys.len(),
            "aggregated key delays"
        );
        Ok(Self { keys })
    }

    pub fn get(&self, key: &str) -> Option<&KeyDelay> {
        self.keys.get(key)
    }

    /// Delay difference of a key, `None` when either group never typed it
    pub fn difference(&self, key: &str) -> Option<f64> {
        self.get(key).map(KeyDelay::difference)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyDelay)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Smallest and largest difference
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mut diffs = self.keys.values().map(KeyDelay::difference);
        let first = diffs.next()?;
        Some(diffs.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Fill of a key on the red-blue scale
    pub fn fill(&self, key: &str) -> KeyFill {
        match self.difference(key) {
            Some(diff) => KeyFill::Scale(color_position(diff)),
            None => KeyFill::Missing,
        }
    }

    /// Whether a key's label is drawn in light text
    pub fn uses_light_text(&self, key: &str) -> bool {
        self.difference(key)
            .is_some_and(|diff| diff.abs() > LIGHT_TEXT_THRESHOLD)
    }

    /// Hover text, `None` for keys without data
    pub fn tooltip(&self, key: &str) -> Option<String> {
        self.difference(key)
            .map(|diff| format!("Difference: {:.2} ms", diff))
    }
}

/// Key fill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KeyFill {
    /// Position on the red-blue interpolator, 0 is red and 1 is blue
    Scale(f64),
    /// Neutral gray for keys missing from either group
    Missing,
}

/// Map a difference onto `[0, 1]`
///
/// The scale runs from `+COLOR_LIMIT` (red, 0) to `-COLOR_LIMIT` (blue, 1),
/// so slower Parkinson's keys come out red. Values beyond the limit clamp.
pub fn color_position(diff: f64) -> f64 {
    ((COLOR_LIMIT - diff) / (2.0 * COLOR_LIMIT)).clamp(0.0, 1.0)
}

/// Load keystroke files and build the heatmap
pub async fn load_heatmap<P: AsRef<Path>>(paths: &[P]) -> ChartResult<DelayHeatmap> {
    let table = load_merged(paths).await?;
    DelayHeatmap::from_table(&table)
}
