//! Integration tests for the flightsync CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{write_file, SAMPLE_CSV};

/// flightsync with its config directory pointed at `dir`
fn flightsync(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flightsync").unwrap();
    cmd.env("FLIGHTSYNC_CONFIG_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    flightsync(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn simulate_prints_one_line_per_tick() {
    let dir = TempDir::new().unwrap();
    flightsync(&dir)
        .args(["simulate", "--duration", "10", "--ticks", "3", "--tick-ms", "500"])
        .assert()
        .success()
        .stdout("1\tPLAYING\t500000\n2\tPLAYING\t1000000\n3\tPLAYING\t1500000\n");
}

#[test]
fn simulate_pauses_at_end_of_csv_log() {
    let dir = TempDir::new().unwrap();
    let log = write_file(dir.path(), "flight.csv", SAMPLE_CSV);

    flightsync(&dir)
        .args(["simulate", "--ticks", "2", "--tick-ms", "8", "--log"])
        .arg(&log)
        .assert()
        .success()
        .stdout("1\tPLAYING\t8000\n2\tPAUSED\t10000\n");
}

#[test]
fn simulate_uses_configured_rate() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "config.toml", "[playback]\ndefault_rate = 200\n");

    flightsync(&dir)
        .args(["simulate", "--ticks", "1", "--tick-ms", "100"])
        .assert()
        .success()
        .stdout("1\tPLAYING\t200000\n");
}

#[test]
fn simulate_follows_video_offset() {
    let dir = TempDir::new().unwrap();
    flightsync(&dir)
        .args([
            "simulate",
            "--ticks",
            "1",
            "--tick-ms",
            "1000",
            "--video-duration",
            "30",
            "--video-offset",
            "0.25",
        ])
        .assert()
        .success()
        .stdout("1\tPLAYING\t750000\n");
}

#[test]
fn bad_log_file_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let log = write_file(dir.path(), "bad.csv", "speed,alt\n1,2\n");

    flightsync(&dir)
        .args(["simulate", "--log"])
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load log"));
}

#[test]
fn config_path_honours_override() {
    let dir = TempDir::new().unwrap();
    let expected = dir.path().join("config.toml");

    flightsync(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", expected.display())));
}

#[test]
fn config_show_prints_defaults_as_toml() {
    let dir = TempDir::new().unwrap();
    flightsync(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[playback]"))
        .stdout(predicate::str::contains("default_rate = 100"));
}
