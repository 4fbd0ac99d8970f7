//! Chart session management
//!
//! A session is created when a density chart mounts and owns everything
//! that lives as long as the chart:
//! - The density plot and its scales
//! - Drag, hover and throttle state
//! - Timers started on behalf of the chart
//! - The elements currently drawn
//!
//! Teardown (explicit or on drop) cancels every pending timer.

use std::path::Path;
use std::time::{Duration, Instant};

use keytrace_io::{load_merged, partition_by_group, ColumnSpec};

use crate::config::{InteractionConfig, KeytraceConfig};
use crate::density_plot::DensityPlot;
use crate::elements::{describe_density_chart, ChartElement, ElementKey};
use crate::error::ChartResult;
use crate::interaction::{InteractionOutcome, InteractionState, PointerEvent};
use crate::reconcile::{Reconciliation, Scene};
use crate::scheduler::Scheduler;

/// Live state of a mounted density chart
#[derive(Debug)]
pub struct ChartSession {
    id: String,
    plot: DensityPlot,
    interaction: InteractionState,
    scheduler: Scheduler,
    scene: Scene<ElementKey, ChartElement>,
    mounted: bool,
}

impl ChartSession {
    /// Mount a chart for `plot`
    pub fn mount(plot: DensityPlot, config: &InteractionConfig) -> Self {
        let session = Self {
            id: uuid::Uuid::new_v4().to_string(),
            plot,
            interaction: InteractionState::new(Duration::from_millis(config.throttle_ms)),
            scheduler: Scheduler::new(),
            scene: Scene::new(),
            mounted: true,
        };
        tracing::info!(
            session = %session.id,
            curves = session.plot.ready().count(),
            "chart mounted"
        );
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn plot(&self) -> &DensityPlot {
        &self.plot
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Timers owned by this chart
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Elements drawn as of the last render
    pub fn scene(&self) -> &Scene<ElementKey, ChartElement> {
        &self.scene
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Feed a pointer event through the drag and hover handlers
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> InteractionOutcome {
        if !self.mounted {
            return InteractionOutcome::Unchanged;
        }
        self.interaction.handle(&self.plot, event, now)
    }

    /// Bring the drawn elements up to date, returning what changed
    pub fn render(&mut self) -> Reconciliation<ElementKey, ChartElement> {
        if !self.mounted {
            return Reconciliation {
                added: Vec::new(),
                updated: Vec::new(),
                removed: Vec::new(),
            };
        }
        let desired = describe_density_chart(&self.plot, &self.interaction);
        self.scene.sync(&desired)
    }

    /// Swap in a freshly built plot, dropping any in-progress gesture
    pub fn replace_plot(&mut self, plot: DensityPlot) {
        self.scheduler.cancel_all();
        self.interaction.reset();
        self.plot = plot;
        tracing::debug!(session = %self.id, "chart data replaced");
    }

    /// Cancel timers, reset interaction and forget drawn elements
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        let cancelled = self.scheduler.cancel_all();
        self.interaction.reset();
        self.scene.clear();
        self.mounted = false;
        tracing::info!(session = %self.id, cancelled, "chart torn down");
    }
}

impl Drop for ChartSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// What a chart shows
#[derive(Debug)]
pub enum ChartState {
    Loading,
    Ready(Box<ChartSession>),
    /// Terminal fallback shown instead of the chart
    Failed { message: String },
}

impl ChartState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ChartState::Ready(_))
    }

    pub fn session(&self) -> Option<&ChartSession> {
        match self {
            ChartState::Ready(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut ChartSession> {
        match self {
            ChartState::Ready(session) => Some(&mut **session),
            _ => None,
        }
    }

    /// Fallback text, if loading failed
    pub fn failure(&self) -> Option<&str> {
        match self {
            ChartState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Load the speed files and build the density plot
///
/// Every file is read before any estimation starts; one failed file fails
/// the whole plot.
pub async fn load_density_plot<P: AsRef<Path>>(
    paths: &[P],
    config: &KeytraceConfig,
) -> ChartResult<DensityPlot> {
    config.validate()?;
    let table = load_merged(paths).await?;
    let samples = partition_by_group(&table, &ColumnSpec::typing_speed())?;
    Ok(DensityPlot::build(&samples, &config.density))
}

/// Load data and mount a chart, or fall back to the failed state
pub async fn mount_density_chart<P: AsRef<Path>>(paths: &[P], config: &KeytraceConfig) -> ChartState {
    match load_density_plot(paths, config).await {
        Ok(plot) => ChartState::Ready(Box::new(ChartSession::mount(plot, &config.interaction))),
        Err(e) => {
            tracing::error!("density chart unavailable: {}", e);
            ChartState::Failed {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DensityPlotConfig;
    use keytrace_io::GroupedSamples;

    fn session() -> ChartSession {
        let samples = GroupedSamples::new(&[35.5, 38.0, 41.0, 44.8], &[58.9, 62.4, 66.1, 70.0]);
        let plot = DensityPlot::build(&samples, &DensityPlotConfig::default());
        ChartSession::mount(plot, &InteractionConfig::default())
    }

    #[test]
    fn test_mount_and_render() {
        let mut session = session();
        assert!(session.is_mounted());
        assert!(!session.id().is_empty());

        let first = session.render();
        assert_eq!(first.added.len(), 4);
        assert!(session.render().is_empty());
    }

    #[test]
    fn test_render_tracks_drag() {
        let mut session = session();
        session.render();
        let x = session.plot().x_scale().map(40.0) as f32;

        session.handle_pointer(PointerEvent::Down { x, y: 5.0 }, Instant::now());
        let during = session.render();
        assert!(during
            .added
            .iter()
            .any(|(k, _)| *k == ElementKey::CdfReadout));

        session.handle_pointer(PointerEvent::Up, Instant::now());
        let after = session.render();
        assert!(after.removed.contains(&ElementKey::CdfReadout));
        assert!(after.removed.contains(&ElementKey::StartLine));
    }

    #[tokio::test]
    async fn test_teardown_cancels_timers() {
        let mut session = session();
        session
            .scheduler_mut()
            .schedule(Duration::from_secs(60), || {})
            .unwrap();
        assert_eq!(session.scheduler_mut().pending(), 1);

        session.teardown();
        assert!(!session.is_mounted());
        assert_eq!(session.scheduler_mut().pending(), 0);
        assert!(session.scene().is_empty());
        assert_eq!(
            session.handle_pointer(PointerEvent::Leave, Instant::now()),
            InteractionOutcome::Unchanged
        );
    }

    #[test]
    fn test_replace_plot_resets_drag() {
        let mut session = session();
        let x = session.plot().x_scale().map(40.0) as f32;
        session.handle_pointer(PointerEvent::Down { x, y: 0.0 }, Instant::now());
        assert!(session.interaction().drag().is_dragging());

        let plot = DensityPlot::build(&GroupedSamples::default(), &DensityPlotConfig::default());
        session.replace_plot(plot);
        assert!(!session.interaction().drag().is_dragging());
        assert_eq!(session.plot().ready().count(), 0);
    }

    #[test]
    fn test_failed_state() {
        let state = ChartState::Failed {
            message: "missing".to_string(),
        };
        assert_eq!(state.failure(), Some("missing"));
        assert!(state.session().is_none());
        assert!(!state.is_ready());
    }
}
