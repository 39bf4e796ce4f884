//! Headless session runs.
//!
//! Drives a [`PlaybackSession`] with a [`ManualClock`] and collaborators that
//! draw nothing, one fixed-length tick at a time. Used by the `simulate`
//! command and handy for checking sync behaviour without a terminal.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tracing::warn;

use crate::player::{FrameFlag, VideoOptions};
use crate::storage::MemoryPresetStorage;
use crate::sync::{
    Collaborators, FieldTable, GraphConfig, LayoutConfig, LogSource, LogTimeRange, ManualClock,
    PlaybackSession, PlaybackState, Renderer, SeekBar, SessionSettings,
};
use crate::video::SimulatedVideo;

/// Renderer that draws nothing.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _time: i64) {}
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn set_graph_zoom(&mut self, _zoom: f64) {}
    fn set_in_time(&mut self, _time: Option<i64>) {}
    fn set_out_time(&mut self, _time: Option<i64>) {}
    fn set_display_config(&mut self, _layout: &LayoutConfig) {}
    fn set_graph_config(&mut self, _config: &GraphConfig) {}
}

/// Seek bar that draws nothing.
#[derive(Debug, Default)]
pub struct NullSeekBar;

impl SeekBar for NullSeekBar {
    fn set_current_time(&mut self, _time: i64) {}
    fn set_time_range(&mut self, _range: LogTimeRange, _current: i64) {}
    fn set_in_time(&mut self, _time: Option<i64>) {}
    fn set_out_time(&mut self, _time: Option<i64>) {}
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn repaint(&mut self) {}
}

/// Field table that shows nothing.
#[derive(Debug, Default)]
pub struct NullFieldTable;

impl FieldTable for NullFieldTable {
    fn show_values(&mut self, _time: i64, _names: &[String], _frame: Option<&[Option<f64>]>) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOptions {
    pub ticks: u32,
    /// Wall time between ticks
    pub tick: Duration,
    /// Playback rate in percent; the configured default when absent
    pub rate: Option<u32>,
    pub video: Option<VideoOptions>,
}

/// Session state after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRecord {
    pub tick: u32,
    pub state: PlaybackState,
    /// Log time in microseconds
    pub time: i64,
}

impl fmt::Display for TickRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.tick, self.state.label(), self.time)
    }
}

/// Play `log` from its start for `options.ticks` ticks.
pub fn simulate(
    log: Rc<dyn LogSource>,
    settings: SessionSettings,
    options: &SimulationOptions,
) -> Vec<TickRecord> {
    let clock = ManualClock::new();
    let frames = FrameFlag::new();

    let mut session = PlaybackSession::new(
        settings,
        Collaborators {
            clock: Rc::new(clock.clone()),
            frames: Box::new(frames.clone()),
            renderer: Box::new(NullRenderer),
            seek_bar: Box::new(NullSeekBar),
            field_table: Box::new(NullFieldTable),
            storage: Box::new(MemoryPresetStorage::new()),
        },
    );
    session.select_log(log);

    if let Some(rate) = options.rate {
        if !session.set_playback_rate(rate) {
            warn!(rate, "playback rate out of range, keeping {}%", session.playback_rate());
        }
    }

    if let Some(video) = options.video {
        session.attach_video(Box::new(SimulatedVideo::new(
            Rc::new(clock.clone()),
            video.duration,
        )));
        session.set_video_offset(video.offset);
    }

    if frames.take() {
        session.on_animation_frame();
    }
    session.set_state(PlaybackState::Playing);

    (1..=options.ticks)
        .map(|tick| {
            clock.advance(options.tick);
            if frames.take() {
                session.on_animation_frame();
            }
            session.poll_timers();

            TickRecord {
                tick,
                state: session.state(),
                time: session.current_time(),
            }
        })
        .collect()
}
