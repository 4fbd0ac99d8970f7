//! Loading and partitioning integration tests

mod common;

use common::fixtures::{write_fixture, KEYSTROKES_CSV, SPEED_CS1_CSV, SPEED_CS2_CSV};
use keytrace_io::{load_all, load_merged, partition_by_group, ColumnSpec, Group, IoError};

#[tokio::test]
async fn test_two_files_merge_into_groups() {
    let dir = tempfile::tempdir().unwrap();
    let cs1 = write_fixture(&dir, "GT_DataPD_MIT-CS1PD.csv", SPEED_CS1_CSV);
    let cs2 = write_fixture(&dir, "GT_DataPD_MIT-CS2PD.csv", SPEED_CS2_CSV);

    let table = load_merged(&[cs1, cs2]).await.unwrap();
    let grouped = partition_by_group(&table, &ColumnSpec::typing_speed()).unwrap();

    assert_eq!(grouped.get(Group::Parkinsons).len(), 4);
    assert_eq!(grouped.get(Group::Control).len(), 4);
    // "n/a" speed is dropped, not zeroed
    assert_eq!(grouped.parkinsons.missing(), 1);
}

#[tokio::test]
async fn test_keystroke_columns_in_milliseconds() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "keystroke_data.csv", KEYSTROKES_CSV);

    let tables = load_all(&[path]).await.unwrap();
    let durations = partition_by_group(&tables[0], &ColumnSpec::duration_ms()).unwrap();
    let delays = partition_by_group(&tables[0], &ColumnSpec::delay_ms()).unwrap();

    assert!(durations.parkinsons.as_slice().iter().all(|&ms| ms >= 100.0));
    assert_eq!(delays.control.len(), 3);
}

#[tokio::test]
async fn test_any_failed_load_is_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_fixture(&dir, "good.csv", SPEED_CS1_CSV);
    let bad = dir.path().join("absent.csv");

    let result = load_merged(&[good, bad]).await;
    assert!(matches!(result, Err(IoError::FileNotFound(_))));
}
