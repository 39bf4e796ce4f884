//! Integration tests for preset persistence across sessions

use std::rc::Rc;

use tempfile::TempDir;

use flightsync::log::SyntheticLog;
use flightsync::sync::{GraphDefinition, GraphPreset, Preset};
use flightsync::FilePresetStorage;

use crate::helpers::headless_session;

#[test]
fn graph_preset_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let (mut session, _clock) = headless_session(FilePresetStorage::new(dir.path()));
        session.select_log(Rc::new(SyntheticLog::new(5.0)));
        session.graph_presets_mut().add(
            Preset::new(
                "Motors only",
                GraphPreset {
                    graphs: vec![GraphDefinition::new("Motors", &["motor[all]"])],
                },
            ),
            true,
        );
        session.pump_events();
    }

    assert!(dir.path().join("graphPresets.json").exists());

    let (mut session, _clock) = headless_session(FilePresetStorage::new(dir.path()));
    session.select_log(Rc::new(SyntheticLog::new(5.0)));

    let names: Vec<_> = session
        .graph_presets()
        .presets()
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(names, ["Default", "Motors only"]);
    assert_eq!(
        session.graph_presets().active().map(|p| p.name.as_str()),
        Some("Motors only")
    );

    let labels: Vec<_> = session
        .graph_config()
        .graphs()
        .iter()
        .map(|g| g.label.clone())
        .collect();
    assert_eq!(labels, ["Motors"]);
}

#[test]
fn unreadable_preset_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("graphPresets.json"), "{ not json").unwrap();

    let (session, _clock) = headless_session(FilePresetStorage::new(dir.path()));

    assert_eq!(session.graph_presets().len(), 1);
    assert_eq!(
        session.graph_presets().active().map(|p| p.name.as_str()),
        Some("Default")
    );
}

#[test]
fn restoring_does_not_rewrite_files() {
    let dir = TempDir::new().unwrap();

    let (mut session, _clock) = headless_session(FilePresetStorage::new(dir.path()));
    session.pump_events();

    assert!(!dir.path().join("graphPresets.json").exists());
    assert!(!dir.path().join("layoutPresets.json").exists());
}
