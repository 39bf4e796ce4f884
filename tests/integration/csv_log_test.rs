//! Integration tests for loading CSV logs from disk

use std::rc::Rc;

use tempfile::TempDir;

use flightsync::log::{CsvLog, LogLoadError};
use flightsync::sync::LogSource;
use flightsync::MemoryPresetStorage;

use crate::helpers::{headless_session, write_file, SAMPLE_CSV};

#[test]
fn parse_file_reads_header_and_frames() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "flight.csv", SAMPLE_CSV);

    let log = CsvLog::parse(&path).unwrap();

    assert_eq!(log.field_names(), ["motor[0]", "gyroADC[0]"]);
    assert_eq!(log.frame_count(), 5);
    assert_eq!(log.min_time(), 0);
    assert_eq!(log.max_time(), 10_000);
}

#[test]
fn frame_lookup_holds_last_frame_until_next() {
    let dir = TempDir::new().unwrap();
    let log = CsvLog::parse(write_file(dir.path(), "flight.csv", SAMPLE_CSV)).unwrap();

    assert_eq!(log.frame_at(1500), Some(vec![Some(1210.0), None]));
    assert_eq!(log.frame_at(9999), Some(vec![Some(1230.0), Some(1.0)]));
    assert_eq!(log.frame_at(10_001), None);
}

#[test]
fn blackbox_export_with_loop_iteration_column_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "export.csv",
        "loopIteration, time (us), axisP[0], motor[0]\n\
         0, 5000, 1.5, 1100\n\
         1, 6000, -2, 1120\n\
         2, 7000, , 1140\n",
    );

    let log = CsvLog::parse(&path).unwrap();

    assert_eq!(log.field_names(), ["loopIteration", "axisP[0]", "motor[0]"]);
    assert_eq!(log.min_time(), 5000);
    assert_eq!(log.max_time(), 7000);
    assert_eq!(log.frame_at(6500), Some(vec![Some(1.0), Some(-2.0), Some(1120.0)]));
    assert_eq!(log.frame_at(7000), Some(vec![Some(2.0), None, Some(1140.0)]));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = CsvLog::parse(dir.path().join("nope.csv"));
    assert!(matches!(result, Err(LogLoadError::Io(_))));
}

#[test]
fn selecting_a_loaded_log_rewinds_to_its_start() {
    let dir = TempDir::new().unwrap();
    let content = SAMPLE_CSV.replace("\n0,", "\n500,");
    let log = CsvLog::parse(write_file(dir.path(), "late.csv", &content)).unwrap();

    let (mut session, _clock) = headless_session(MemoryPresetStorage::new());
    session.select_log(Rc::new(log));

    assert_eq!(session.current_time(), 500);
    assert_eq!(session.log_range().map(|r| r.max), Some(10_000));
}
