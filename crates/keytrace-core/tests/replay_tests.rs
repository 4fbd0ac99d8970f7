//! Keyboard replay integration tests

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::fixtures::{init_tracing, write_fixture, REPLAY_CSV};
use keytrace_core::{
    ChartSession, ComparisonReplay, Group, InteractionConfig, KeyAction, MetricsSnapshot,
    ReplayConfig, Scheduler,
};
use keytrace_io::{load_all, KeystrokeRecord};

fn fast_config() -> ReplayConfig {
    ReplayConfig {
        speed: 10.0,
        refresh_ms: 5,
        ..ReplayConfig::default()
    }
}

async fn records() -> Vec<KeystrokeRecord> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "keystroke_data.csv", REPLAY_CSV);
    let tables = load_all(&[path]).await.unwrap();
    KeystrokeRecord::from_table(&tables[0]).unwrap()
}

#[tokio::test]
async fn test_side_by_side_replay() {
    init_tracing();
    let records = records().await;
    let mut scheduler = Scheduler::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let replay = ComparisonReplay::start(&mut scheduler, &records, &fast_config(), tx).unwrap();

    // 3 replayable keystrokes for 1001 (F2 is skipped), 2 for 1002
    let mut events = Vec::new();
    for _ in 0..10 {
        events.push(tokio::time::timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap());
    }

    let presses = |group: Group| {
        events
            .iter()
            .filter(|(g, e)| *g == group && e.action == KeyAction::Press)
            .map(|(_, e)| e.key.as_str())
            .collect::<Vec<_>>()
    };
    assert_eq!(presses(Group::Parkinsons), vec!["h", "e", "y"]);
    assert_eq!(presses(Group::Control), vec!["h", "i"]);

    let snapshot = replay.snapshot();
    assert_eq!(snapshot.parkinsons.len(), 3);
    assert_eq!(snapshot.control.len(), 2);
    assert_eq!(snapshot.parkinsons[0].delay_ms, None);
    let delay = snapshot.parkinsons[2].delay_ms.unwrap();
    assert!((delay - 130.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_refresh_loop_sees_metrics() {
    let records = records().await;
    let mut scheduler = Scheduler::new();
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();

    let replay = ComparisonReplay::start(&mut scheduler, &records, &fast_config(), tx).unwrap();
    let latest: Arc<Mutex<MetricsSnapshot>> = Arc::default();
    let sink = latest.clone();
    replay
        .watch(&mut scheduler, Duration::from_millis(5), move |snapshot| {
            *sink.lock().unwrap() = snapshot;
        })
        .unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(replay.is_finished());
    let seen = latest.lock().unwrap().clone();
    assert_eq!(seen.parkinsons.len(), 3);
    assert_eq!(seen.control.len(), 2);
}

#[tokio::test]
async fn test_teardown_stops_replay() {
    let records = records().await;
    let plot = common::fixtures::separated_plot();
    let mut session = ChartSession::mount(plot, &InteractionConfig::default());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let config = ReplayConfig {
        speed: 0.5,
        ..ReplayConfig::default()
    };
    let replay = ComparisonReplay::start(session.scheduler_mut(), &records, &config, tx).unwrap();

    session.teardown();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Only the zero-offset first presses may have fired before teardown
    let mut delivered = 0;
    while rx.try_recv().is_ok() {
        delivered += 1;
    }
    assert!(delivered <= 2);
    assert!(replay.is_finished());
}
