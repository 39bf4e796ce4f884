//! Shared helpers for integration tests

use std::path::{Path, PathBuf};
use std::rc::Rc;

use flightsync::headless::{NullFieldTable, NullRenderer, NullSeekBar};
use flightsync::player::FrameFlag;
use flightsync::sync::{Collaborators, ManualClock, PresetStorage};
use flightsync::{PlaybackSession, SessionSettings};

/// Small log: 1 ms frames over 10 ms, two fields, one gap.
pub const SAMPLE_CSV: &str = "\
time (us),motor[0],gyroADC[0]
0,1200,0.5
1000,1210,
2000,1220,-0.25
3000,1230,1
10000,1300,2
";

/// Write `content` to `name` inside `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Session that draws nothing, backed by `storage`.
pub fn headless_session(storage: impl PresetStorage + 'static) -> (PlaybackSession, ManualClock) {
    let clock = ManualClock::new();
    let session = PlaybackSession::new(
        SessionSettings::default(),
        Collaborators {
            clock: Rc::new(clock.clone()),
            frames: Box::new(FrameFlag::new()),
            renderer: Box::new(NullRenderer),
            seek_bar: Box::new(NullSeekBar),
            field_table: Box::new(NullFieldTable),
            storage: Box::new(storage),
        },
    );
    (session, clock)
}
