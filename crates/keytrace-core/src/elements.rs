//! Drawable elements of the density chart
//!
//! [`describe_density_chart`] turns the plot and the current interaction
//! state into keyed primitives in plot-area pixels. A renderer reconciles
//! them against what it has drawn.

use keytrace_io::Group;
use serde::{Deserialize, Serialize};

use crate::density_plot::{DensityPlot, GroupDensity};
use crate::interaction::InteractionState;

/// Identity of a drawn element across redraws
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKey {
    Curve(Group),
    NotEnoughData(Group),
    Legend(Group),
    ShadedArea(Group),
    StartLine,
    EndLine,
    CdfReadout,
    HoverLine,
    HoverDot(Group),
    HoverReadout,
}

/// Primitive geometry in plot-area pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartElement {
    /// Open polyline
    Line { points: Vec<(f32, f32)> },
    /// Polygon closed along the x-axis baseline
    Area { points: Vec<(f32, f32)>, baseline: f32 },
    /// Full-height vertical rule
    Rule { x: f32 },
    Dot { x: f32, y: f32 },
    Label { anchor: (f32, f32), lines: Vec<String> },
}

/// Every element that should be visible right now
pub fn describe_density_chart(
    plot: &DensityPlot,
    interaction: &InteractionState,
) -> Vec<(ElementKey, ChartElement)> {
    let x_scale = plot.x_scale();
    let y_scale = plot.y_scale();
    let baseline = y_scale.map(0.0) as f32;
    let mut elements = Vec::new();

    for (i, entry) in plot.groups().iter().enumerate() {
        let group = entry.group();
        let legend_anchor = (x_scale.range().1 as f32 - 150.0, 20.0 + 20.0 * i as f32);
        match entry {
            GroupDensity::Ready(_) => {
                elements.push((
                    ElementKey::Curve(group),
                    ChartElement::Line {
                        points: plot.line_pixels(group),
                    },
                ));
                elements.push((
                    ElementKey::Legend(group),
                    ChartElement::Label {
                        anchor: legend_anchor,
                        lines: vec![group.name().to_string()],
                    },
                ));
            }
            GroupDensity::NotEnoughData { .. } => {
                elements.push((
                    ElementKey::NotEnoughData(group),
                    ChartElement::Label {
                        anchor: legend_anchor,
                        lines: vec![format!("{}: not enough data", group.name())],
                    },
                ));
            }
        }
    }

    if let Some(overlay) = interaction.overlay() {
        for area in &overlay.areas {
            elements.push((
                ElementKey::ShadedArea(area.group),
                ChartElement::Area {
                    points: area
                        .points
                        .iter()
                        .map(|&(x, d)| (x_scale.map(x) as f32, y_scale.map(d) as f32))
                        .collect(),
                    baseline,
                },
            ));
        }
        elements.push((
            ElementKey::StartLine,
            ChartElement::Rule {
                x: overlay.bound_lines.0,
            },
        ));
        elements.push((
            ElementKey::EndLine,
            ChartElement::Rule {
                x: overlay.bound_lines.1,
            },
        ));
        elements.push((
            ElementKey::CdfReadout,
            ChartElement::Label {
                anchor: overlay.anchor,
                lines: overlay.lines(),
            },
        ));
    }

    if interaction.is_hover_visible() {
        if let Some(hover) = interaction.hover() {
            elements.push((ElementKey::HoverLine, ChartElement::Rule { x: hover.line_px }));
            for point in &hover.points {
                if let Some(y) = point.y_px {
                    elements.push((
                        ElementKey::HoverDot(point.group),
                        ChartElement::Dot {
                            x: hover.line_px,
                            y,
                        },
                    ));
                }
            }
            elements.push((
                ElementKey::HoverReadout,
                ChartElement::Label {
                    anchor: (hover.line_px, 0.0),
                    lines: hover.lines(),
                },
            ));
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DensityPlotConfig;
    use keytrace_io::GroupedSamples;
    use std::time::{Duration, Instant};

    fn plot(parkinsons: &[f64]) -> DensityPlot {
        let samples = GroupedSamples::new(parkinsons, &[58.9, 62.4, 66.1, 70.0]);
        DensityPlot::build(&samples, &DensityPlotConfig::default())
    }

    fn keys(elements: &[(ElementKey, ChartElement)]) -> Vec<ElementKey> {
        elements.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_idle_chart() {
        let plot = plot(&[38.0, 41.0, 44.8]);
        let interaction = InteractionState::new(Duration::from_millis(10));
        let elements = describe_density_chart(&plot, &interaction);

        assert_eq!(
            keys(&elements),
            vec![
                ElementKey::Curve(Group::Parkinsons),
                ElementKey::Legend(Group::Parkinsons),
                ElementKey::Curve(Group::Control),
                ElementKey::Legend(Group::Control),
            ]
        );
    }

    #[test]
    fn test_dragging_adds_overlay() {
        let plot = plot(&[38.0, 41.0, 44.8]);
        let mut interaction = InteractionState::new(Duration::ZERO);
        let x0 = plot.x_scale().map(35.0) as f32;
        let x1 = plot.x_scale().map(65.0) as f32;
        interaction.pointer_down(&plot, x0, 10.0);
        interaction.pointer_move(&plot, x1, 10.0, Instant::now());

        let keys = keys(&describe_density_chart(&plot, &interaction));
        assert!(keys.contains(&ElementKey::ShadedArea(Group::Parkinsons)));
        assert!(keys.contains(&ElementKey::ShadedArea(Group::Control)));
        assert!(keys.contains(&ElementKey::StartLine));
        assert!(keys.contains(&ElementKey::CdfReadout));
        assert!(!keys.contains(&ElementKey::HoverLine));
    }

    #[test]
    fn test_hover_elements() {
        let plot = plot(&[38.0, 41.0, 44.8]);
        let mut interaction = InteractionState::new(Duration::ZERO);
        interaction.pointer_move(&plot, plot.x_scale().map(50.0) as f32, 0.0, Instant::now());

        let keys = keys(&describe_density_chart(&plot, &interaction));
        assert!(keys.contains(&ElementKey::HoverLine));
        assert!(keys.contains(&ElementKey::HoverDot(Group::Control)));
        assert!(keys.contains(&ElementKey::HoverReadout));
    }

    #[test]
    fn test_not_enough_data_label() {
        let plot = plot(&[50.0]);
        let interaction = InteractionState::new(Duration::from_millis(10));
        let elements = describe_density_chart(&plot, &interaction);

        let (_, label) = elements
            .iter()
            .find(|(k, _)| *k == ElementKey::NotEnoughData(Group::Parkinsons))
            .unwrap();
        assert_eq!(
            *label,
            ChartElement::Label {
                anchor: (650.0, 20.0),
                lines: vec!["Parkinson's: not enough data".to_string()],
            }
        );
    }
}
