//! Keyboard replay
//!
//! Re-plays logged key presses and releases in real time (scaled by a
//! playback speed) so two participants can be compared side by side. Each
//! press also publishes that keystroke's hold time and flight time to a
//! rolling [`MetricsBuffer`] that a separate refresh loop reads.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use keytrace_io::{Group, KeystrokeRecord};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::ReplayConfig;
use crate::error::{ChartError, ChartResult};
use crate::scheduler::{Scheduler, TimerHandle};

const NAMED_KEYS: [&str; 8] = [
    "Shift_L",
    "Shift_R",
    "Caps_Lock",
    "Enter",
    "Tab",
    "Control_L",
    "Control_R",
    "BackSpace",
];

/// Check if a logged key has a place on the replay keyboard
pub fn is_replayable_key(key: &str) -> bool {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_lowercase() || c == ' ',
        _ => NAMED_KEYS.contains(&key),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
}

/// Timing of one keystroke, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetric {
    pub key: String,
    /// Release minus press
    pub duration_ms: f64,
    /// Press minus the previous press; `None` for the first keystroke
    pub delay_ms: Option<f64>,
}

/// One key change at an offset from the start of playback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEvent {
    pub offset: Duration,
    pub key: String,
    pub action: KeyAction,
    /// Set on presses
    pub metric: Option<KeyMetric>,
}

/// Ordered press and release events of one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaySchedule {
    speed: f64,
    events: Vec<ReplayEvent>,
}

impl ReplaySchedule {
    /// Build the schedule, offsets relative to the first press
    ///
    /// Keys without a place on the replay keyboard are skipped before delays
    /// are computed, so a delay spans only replayed keystrokes.
    pub fn from_records(records: &[KeystrokeRecord], speed: f64) -> ChartResult<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "replay speed must be positive, got {}",
                speed
            )));
        }

        let mut keystrokes: Vec<&KeystrokeRecord> = records
            .iter()
            .filter(|r| is_replayable_key(&r.key))
            .collect();
        keystrokes.sort_by(|a, b| a.press.total_cmp(&b.press));

        let Some(origin) = keystrokes.first().map(|r| r.press) else {
            return Ok(Self {
                speed,
                events: Vec::new(),
            });
        };
        let at = |t: f64| Duration::from_secs_f64(((t - origin) / speed).max(0.0));

        let mut events = Vec::with_capacity(keystrokes.len() * 2);
        let mut previous_press: Option<f64> = None;
        for record in keystrokes {
            let metric = KeyMetric {
                key: record.key.clone(),
                duration_ms: record.hold_ms(),
                delay_ms: previous_press.map(|p| (record.press - p) * 1000.0),
            };
            previous_press = Some(record.press);

            events.push(ReplayEvent {
                offset: at(record.press),
                key: record.key.clone(),
                action: KeyAction::Press,
                metric: Some(metric),
            });
            events.push(ReplayEvent {
                offset: at(record.release),
                key: record.key.clone(),
                action: KeyAction::Release,
                metric: None,
            });
        }
        events.sort_by_key(|e| e.offset);

        Ok(Self { speed, events })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn events(&self) -> &[ReplayEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Offset of the last event
    pub fn duration(&self) -> Duration {
        self.events.last().map(|e| e.offset).unwrap_or_default()
    }

    /// Per-keystroke timings in press order
    pub fn metrics(&self) -> impl Iterator<Item = &KeyMetric> {
        self.events.iter().filter_map(|e| e.metric.as_ref())
    }
}

/// Latest keystroke timings, oldest evicted first
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsBuffer {
    capacity: usize,
    entries: VecDeque<KeyMetric>,
}

impl MetricsBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Wrap in a handle shared with replay timers
    pub fn shared(capacity: usize) -> SharedMetrics {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    pub fn push(&mut self, metric: KeyMetric) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(metric);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Buffered metrics, oldest first
    pub fn latest(&self) -> Vec<KeyMetric> {
        self.entries.iter().cloned().collect()
    }

    pub fn durations(&self) -> Vec<f64> {
        self.entries.iter().map(|m| m.duration_ms).collect()
    }

    /// Delays with the first keystroke's missing delay as NaN, one per entry
    pub fn delays(&self) -> Vec<f64> {
        self.entries
            .iter()
            .map(|m| m.delay_ms.unwrap_or(f64::NAN))
            .collect()
    }
}

/// Metrics buffer shared between replay timers and the refresh loop
pub type SharedMetrics = Arc<Mutex<MetricsBuffer>>;

/// Lock a shared buffer, recovering the data if a holder panicked
pub fn lock_metrics(metrics: &SharedMetrics) -> MutexGuard<'_, MetricsBuffer> {
    metrics.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A replay in progress
#[derive(Debug)]
pub struct Replay {
    group: Group,
    timers: Vec<TimerHandle>,
}

impl Replay {
    /// Schedule every event of `schedule`
    ///
    /// Events are sent to `sink` tagged with `group` when their timer fires;
    /// press events also push their metric into `metrics`.
    pub fn start(
        scheduler: &mut Scheduler,
        group: Group,
        schedule: &ReplaySchedule,
        sink: UnboundedSender<(Group, ReplayEvent)>,
        metrics: SharedMetrics,
    ) -> ChartResult<Self> {
        let mut timers = Vec::with_capacity(schedule.len());
        for event in schedule.events() {
            let event = event.clone();
            let sink = sink.clone();
            let metrics = metrics.clone();
            timers.push(scheduler.schedule(event.offset, move || {
                if let Some(metric) = &event.metric {
                    lock_metrics(&metrics).push(metric.clone());
                }
                // The receiver going away only means nobody is watching.
                let _ = sink.send((group, event));
            })?);
        }

        tracing::info!(
            group = %group,
            events = timers.len(),
            duration_ms = schedule.duration().as_millis() as u64,
            "replay started"
        );
        Ok(Self { group, timers })
    }

    pub fn group(&self) -> Group {
        self.group
    }

    /// Stop every event that has not played yet
    pub fn cancel(&self) {
        for timer in &self.timers {
            timer.cancel();
        }
    }

    /// Check if every event played or was cancelled
    pub fn is_finished(&self) -> bool {
        self.timers.iter().all(TimerHandle::is_finished)
    }
}

/// Snapshot of both groups' rolling metrics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub parkinsons: Vec<KeyMetric>,
    pub control: Vec<KeyMetric>,
}

/// Two participants replayed side by side
#[derive(Debug)]
pub struct ComparisonReplay {
    replays: Vec<Replay>,
    parkinsons_metrics: SharedMetrics,
    control_metrics: SharedMetrics,
}

impl ComparisonReplay {
    /// Replay the configured participant of each group from one keystroke log
    pub fn start(
        scheduler: &mut Scheduler,
        records: &[KeystrokeRecord],
        config: &ReplayConfig,
        sink: UnboundedSender<(Group, ReplayEvent)>,
    ) -> ChartResult<Self> {
        let parkinsons_metrics = MetricsBuffer::shared(config.window);
        let control_metrics = MetricsBuffer::shared(config.window);

        let mut replays = Vec::with_capacity(2);
        for (group, participant, metrics) in [
            (
                Group::Parkinsons,
                &config.parkinsons_participant,
                &parkinsons_metrics,
            ),
            (Group::Control, &config.control_participant, &control_metrics),
        ] {
            let own: Vec<KeystrokeRecord> =
                KeystrokeRecord::for_participant(records, participant)
                    .cloned()
                    .collect();
            if own.is_empty() {
                tracing::warn!(group = %group, participant = %participant, "no keystrokes to replay");
            }
            let schedule = ReplaySchedule::from_records(&own, config.speed)?;
            replays.push(Replay::start(
                scheduler,
                group,
                &schedule,
                sink.clone(),
                metrics.clone(),
            )?);
        }

        Ok(Self {
            replays,
            parkinsons_metrics,
            control_metrics,
        })
    }

    /// Current contents of both metric buffers
    pub fn snapshot(&self) -> MetricsSnapshot {
        snapshot(&self.parkinsons_metrics, &self.control_metrics)
    }

    /// Call `on_refresh` with a fresh snapshot every `period`
    pub fn watch<F>(
        &self,
        scheduler: &mut Scheduler,
        period: Duration,
        mut on_refresh: F,
    ) -> ChartResult<TimerHandle>
    where
        F: FnMut(MetricsSnapshot) + Send + 'static,
    {
        let parkinsons = self.parkinsons_metrics.clone();
        let control = self.control_metrics.clone();
        scheduler.schedule_repeating(period, move || on_refresh(snapshot(&parkinsons, &control)))
    }

    pub fn cancel(&self) {
        for replay in &self.replays {
            replay.cancel();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.replays.iter().all(Replay::is_finished)
    }
}

fn snapshot(parkinsons: &SharedMetrics, control: &SharedMetrics) -> MetricsSnapshot {
    MetricsSnapshot {
        parkinsons: lock_metrics(parkinsons).latest(),
        control: lock_metrics(control).latest(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, press: f64, release: f64) -> KeystrokeRecord {
        KeystrokeRecord {
            key: key.to_string(),
            press,
            release,
            participant: "1001".to_string(),
        }
    }

    #[test]
    fn test_replayable_keys() {
        assert!(is_replayable_key("a"));
        assert!(is_replayable_key(" "));
        assert!(is_replayable_key("Shift_L"));
        assert!(is_replayable_key("BackSpace"));
        assert!(!is_replayable_key("A"));
        assert!(!is_replayable_key("F1"));
        assert!(!is_replayable_key(""));
    }

    #[test]
    fn test_schedule_offsets_and_metrics() {
        let records = vec![
            record("b", 100.5, 100.6),
            record("a", 100.0, 100.2),
            record("F5", 100.3, 100.4),
        ];
        let schedule = ReplaySchedule::from_records(&records, 1.0).unwrap();

        assert_eq!(schedule.len(), 4);
        let first = &schedule.events()[0];
        assert_eq!(first.key, "a");
        assert_eq!(first.action, KeyAction::Press);
        assert_eq!(first.offset, Duration::ZERO);

        let metrics: Vec<&KeyMetric> = schedule.metrics().collect();
        assert_eq!(metrics[0].delay_ms, None);
        assert!((metrics[0].duration_ms - 200.0).abs() < 1e-6);
        assert!((metrics[1].delay_ms.unwrap() - 500.0).abs() < 1e-6);
        assert!((schedule.duration().as_secs_f64() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_speed_scales_offsets() {
        let records = vec![record("a", 10.0, 10.1), record("b", 12.0, 12.4)];
        let schedule = ReplaySchedule::from_records(&records, 4.0).unwrap();

        let press_b = schedule
            .events()
            .iter()
            .find(|e| e.key == "b" && e.action == KeyAction::Press)
            .unwrap();
        assert_eq!(press_b.offset, Duration::from_millis(500));
        assert!(ReplaySchedule::from_records(&records, 0.0).is_err());
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = ReplaySchedule::from_records(&[], 1.0).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.duration(), Duration::ZERO);
    }

    #[test]
    fn test_metrics_buffer_rolls() {
        let mut buffer = MetricsBuffer::new(2);
        for (i, key) in ["a", "b", "c"].iter().enumerate() {
            buffer.push(KeyMetric {
                key: key.to_string(),
                duration_ms: i as f64,
                delay_ms: (i > 0).then_some(100.0),
            });
        }
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.durations(), vec![1.0, 2.0]);
        assert_eq!(buffer.latest()[0].key, "b");
    }

    #[test]
    fn test_missing_delay_is_nan() {
        let mut buffer = MetricsBuffer::new(10);
        buffer.push(KeyMetric {
            key: "a".to_string(),
            duration_ms: 80.0,
            delay_ms: None,
        });
        assert!(buffer.delays()[0].is_nan());
    }

    #[tokio::test]
    async fn test_replay_delivers_events() {
        let records = vec![record("a", 0.0, 0.01), record("b", 0.02, 0.03)];
        let schedule = ReplaySchedule::from_records(&records, 1.0).unwrap();
        let metrics = MetricsBuffer::shared(10);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();

        let replay =
            Replay::start(&mut scheduler, Group::Parkinsons, &schedule, tx, metrics.clone()).unwrap();

        let mut received = Vec::new();
        for _ in 0..4 {
            received.push(rx.recv().await.unwrap());
        }
        assert!(received.iter().all(|(g, _)| *g == Group::Parkinsons));
        assert_eq!(received[0].1.action, KeyAction::Press);
        assert_eq!(lock_metrics(&metrics).len(), 2);

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(replay.is_finished());
    }

    #[tokio::test]
    async fn test_cancelled_replay_stays_silent() {
        let records = vec![record("a", 0.0, 0.05), record("b", 0.1, 0.15)];
        let schedule = ReplaySchedule::from_records(&records, 1.0).unwrap();
        let metrics = MetricsBuffer::shared(10);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();

        let replay =
            Replay::start(&mut scheduler, Group::Control, &schedule, tx, metrics.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        replay.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;

        let mut delivered = 0;
        while rx.try_recv().is_ok() {
            delivered += 1;
        }
        assert_eq!(delivered, 1);
        assert_eq!(lock_metrics(&metrics).len(), 1);
    }
}
