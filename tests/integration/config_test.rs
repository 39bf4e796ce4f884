//! Integration tests for configuration files

use tempfile::TempDir;

use flightsync::Config;

use crate::helpers::write_file;

#[test]
fn missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "config.toml",
        "[playback]\ndefault_rate = 50\n\n[video]\nsync_step_fps = 30.0\n",
    );

    let settings = Config::load_from(&path).unwrap().session_settings();

    assert_eq!(settings.playback_rate, 50);
    assert_eq!(settings.sync_step_fps, 30.0);
    assert_eq!(settings.graph_zoom, 100);
    assert_eq!(settings.small_jump, 100_000);
}

#[test]
fn saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.graph.default_zoom = 250;
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn malformed_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "config.toml", "[playback\n");

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.toml"));
}
