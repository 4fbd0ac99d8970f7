//! Pointer interaction on the density plot
//!
//! Two behaviours share the tracking surface:
//! - Hover: while idle, report each group's density under the pointer
//! - Drag to integrate: between pointer down and up, shade the dragged
//!   interval under every curve and report its probability mass
//!
//! States are `Idle -> Dragging -> Idle`. A release anywhere (including
//! outside the surface) or leaving the surface ends the drag.

use std::time::{Duration, Instant};

use keytrace_io::Group;
use keytrace_stats::integrate_cdf;
use serde::{Deserialize, Serialize};

use crate::density_plot::DensityPlot;

/// Pointer input in plot-area pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer entered the tracking surface
    Enter { x: f32, y: f32 },
    /// Button pressed over the surface
    Down { x: f32, y: f32 },
    /// Pointer moved over the surface
    Move { x: f32, y: f32 },
    /// Button released, over the surface or anywhere in the window
    Up,
    /// Pointer left the surface
    Leave,
}

/// Drops pointer moves that arrive too soon after the last handled one
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Check whether an event at `now` should be handled, recording it if so
    pub fn ready(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Interval under an in-progress drag, in domain units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragInterval {
    pub start_x: f64,
    pub end_x: f64,
}

impl DragInterval {
    /// Zero-width interval at `x`
    pub fn at(x: f64) -> Self {
        Self {
            start_x: x,
            end_x: x,
        }
    }

    pub fn low(&self) -> f64 {
        self.start_x.min(self.end_x)
    }

    pub fn high(&self) -> f64 {
        self.start_x.max(self.end_x)
    }

    pub fn width(&self) -> f64 {
        self.high() - self.low()
    }
}

/// Drag state; the interval is active exactly while `Dragging`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragInterval),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn interval(&self) -> Option<&DragInterval> {
        match self {
            DragState::Dragging(interval) => Some(interval),
            DragState::Idle => None,
        }
    }
}

/// Curve points inside the dragged interval for one group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadedArea {
    pub group: Group,
    pub points: Vec<(f64, f64)>,
}

/// Probability mass of one group over the dragged interval
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CdfResult {
    pub group: Group,
    /// `None` when the group has no curve
    pub probability: Option<f64>,
}

impl CdfResult {
    /// Readout line, e.g. `Parkinson's: 12.3%`
    pub fn label(&self) -> String {
        match self.probability {
            Some(p) => format!("{}: {:.1}%", self.group.name(), p * 100.0),
            None => format!("{}: not enough data", self.group.name()),
        }
    }
}

/// Everything drawn while dragging
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CdfOverlay {
    pub interval: DragInterval,
    /// Pixel x of the start and end bound lines
    pub bound_lines: (f32, f32),
    pub areas: Vec<ShadedArea>,
    pub results: Vec<CdfResult>,
    /// Pointer position the readout is anchored at
    pub anchor: (f32, f32),
}

impl CdfOverlay {
    /// Recompute shading and mass for every group
    pub fn compute(plot: &DensityPlot, interval: DragInterval, anchor: (f32, f32)) -> Self {
        let (low, high) = (interval.low(), interval.high());
        let mut areas = Vec::new();
        let mut results = Vec::with_capacity(Group::ALL.len());

        for group in Group::ALL {
            let curve = plot.curve(group);
            if let Some(curve) = curve {
                areas.push(ShadedArea {
                    group,
                    points: curve.window(low, high).to_vec(),
                });
            }
            results.push(CdfResult {
                group,
                probability: curve.map(|c| integrate_cdf(c, low, high)),
            });
        }

        let x_scale = plot.x_scale();
        Self {
            interval,
            bound_lines: (
                x_scale.map(interval.start_x) as f32,
                x_scale.map(interval.end_x) as f32,
            ),
            areas,
            results,
            anchor,
        }
    }

    /// Mass for one group, if it has a curve
    pub fn probability(&self, group: Group) -> Option<f64> {
        self.results
            .iter()
            .find(|r| r.group == group)
            .and_then(|r| r.probability)
    }

    /// Readout text, header first
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "CDF from {:.1} to {:.1} WPM",
            self.interval.low(),
            self.interval.high()
        )];
        lines.extend(self.results.iter().map(CdfResult::label));
        lines
    }
}

/// Density of one group under the hover line
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    pub group: Group,
    /// Curve point reported under the pointer
    pub point: Option<(f64, f64)>,
    /// Pixel y of the marker dot
    pub y_px: Option<f32>,
}

/// Hover line and tooltip while idle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoverReadout {
    /// Pointer position in domain units
    pub x: f64,
    /// Pixel x of the hover line
    pub line_px: f32,
    pub points: Vec<HoverPoint>,
}

impl HoverReadout {
    pub fn compute(plot: &DensityPlot, x_px: f32) -> Self {
        let x = plot.x_scale().invert(x_px as f64);
        let y_scale = plot.y_scale();
        let points = Group::ALL
            .iter()
            .map(|&group| {
                let point = plot.curve(group).and_then(|c| c.hover_lookup(x));
                HoverPoint {
                    group,
                    point,
                    y_px: point.map(|(_, d)| y_scale.map(d) as f32),
                }
            })
            .collect();
        Self {
            x,
            line_px: x_px,
            points,
        }
    }

    /// Tooltip text
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Typing Speed: {:.1} WPM", self.x)];
        for hover in &self.points {
            let value = match hover.point {
                Some((_, d)) => format!("{:.3}", d),
                None => "N/A".to_string(),
            };
            lines.push(format!("{} Density: {}", hover.group.name(), value));
        }
        lines.push("Click and drag to calculate CDF".to_string());
        lines
    }
}

/// What a handled pointer event changed
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionOutcome {
    /// Move dropped by the throttle
    Throttled,
    /// Nothing to redraw
    Unchanged,
    /// Hover line and tooltip moved
    Hover(HoverReadout),
    /// Drag overlay created or updated
    Overlay(CdfOverlay),
    /// Drag ended; overlay and readout hidden
    OverlayHidden,
    /// Hover elements hidden
    HoverHidden,
}

/// Drag, hover and visibility state of one chart
#[derive(Clone, Debug)]
pub struct InteractionState {
    drag: DragState,
    overlay: Option<CdfOverlay>,
    hover: Option<HoverReadout>,
    hover_visible: bool,
    throttle: Throttle,
}

impl InteractionState {
    pub fn new(throttle: Duration) -> Self {
        Self {
            drag: DragState::Idle,
            overlay: None,
            hover: None,
            hover_visible: false,
            throttle: Throttle::new(throttle),
        }
    }

    /// Dispatch a pointer event
    pub fn handle(
        &mut self,
        plot: &DensityPlot,
        event: PointerEvent,
        now: Instant,
    ) -> InteractionOutcome {
        match event {
            PointerEvent::Enter { x, .. } => self.pointer_enter(plot, x),
            PointerEvent::Down { x, y } => self.pointer_down(plot, x, y),
            PointerEvent::Move { x, y } => self.pointer_move(plot, x, y, now),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_enter(&mut self, plot: &DensityPlot, x: f32) -> InteractionOutcome {
        self.hover_visible = true;
        if self.drag.is_dragging() {
            return InteractionOutcome::Unchanged;
        }
        let hover = HoverReadout::compute(plot, x);
        self.hover = Some(hover.clone());
        InteractionOutcome::Hover(hover)
    }

    /// Start a drag with a zero-width interval under the pointer
    pub fn pointer_down(&mut self, plot: &DensityPlot, x: f32, y: f32) -> InteractionOutcome {
        let interval = DragInterval::at(plot.x_scale().invert(x as f64));
        self.drag = DragState::Dragging(interval);
        self.hover = None;

        let overlay = CdfOverlay::compute(plot, interval, (x, y));
        self.overlay = Some(overlay.clone());
        InteractionOutcome::Overlay(overlay)
    }

    /// Extend the drag, or move the hover line while idle
    pub fn pointer_move(
        &mut self,
        plot: &DensityPlot,
        x: f32,
        y: f32,
        now: Instant,
    ) -> InteractionOutcome {
        if !self.throttle.ready(now) {
            return InteractionOutcome::Throttled;
        }

        match &mut self.drag {
            DragState::Dragging(interval) => {
                interval.end_x = plot.x_scale().invert(x as f64);
                let overlay = CdfOverlay::compute(plot, *interval, (x, y));
                self.overlay = Some(overlay.clone());
                InteractionOutcome::Overlay(overlay)
            }
            DragState::Idle => {
                let hover = HoverReadout::compute(plot, x);
                self.hover_visible = true;
                self.hover = Some(hover.clone());
                InteractionOutcome::Hover(hover)
            }
        }
    }

    /// End the drag; also handles releases outside the surface
    pub fn pointer_up(&mut self) -> InteractionOutcome {
        self.hover_visible = true;
        if self.end_drag() {
            InteractionOutcome::OverlayHidden
        } else {
            InteractionOutcome::Unchanged
        }
    }

    pub fn pointer_leave(&mut self) -> InteractionOutcome {
        self.hover_visible = false;
        self.hover = None;
        if self.end_drag() {
            InteractionOutcome::OverlayHidden
        } else {
            InteractionOutcome::HoverHidden
        }
    }

    fn end_drag(&mut self) -> bool {
        let was_dragging = self.drag.is_dragging();
        self.drag = DragState::Idle;
        self.overlay = None;
        was_dragging
    }

    /// Return to the freshly mounted state
    pub fn reset(&mut self) {
        self.drag = DragState::Idle;
        self.overlay = None;
        self.hover = None;
        self.hover_visible = false;
        self.throttle.reset();
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Current overlay; `Some` exactly while it is visible
    pub fn overlay(&self) -> Option<&CdfOverlay> {
        self.overlay.as_ref()
    }

    pub fn hover(&self) -> Option<&HoverReadout> {
        self.hover.as_ref()
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn is_hover_visible(&self) -> bool {
        self.hover_visible && !self.drag.is_dragging()
    }
}
