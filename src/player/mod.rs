//! Terminal player
//!
//! Hosts a [`PlaybackSession`] in the terminal: the graph, seek bar and
//! field values are drawn with ANSI sequences, keys and mouse clicks drive
//! the session, and the event loop stands in for the browser's animation
//! frames and timers.
//!
//! # Architecture
//!
//! - `host`: frame request flag and terminal mode guard
//! - `state`: UI state and shared types (InputResult)
//! - `input/`: keyboard and mouse handling
//! - `render/`: drawing collaborators plus status bar and help overlay
//!
//! # Usage
//!
//! ```no_run
//! use std::rc::Rc;
//! use flightsync::log::SyntheticLog;
//! use flightsync::player::play_session;
//! use flightsync::Config;
//!
//! let config = Config::load().unwrap();
//! play_session(Rc::new(SyntheticLog::new(60.0)), None, &config).unwrap();
//! ```

mod host;
pub(crate) mod input;
pub mod render;
pub mod state;

pub use host::{FrameFlag, TerminalGuard};
pub use state::{InputResult, UiState};

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use tracing::debug;

use crate::config::Config;
use crate::storage::FilePresetStorage;
use crate::sync::{Clock, Collaborators, LogSource, PlaybackSession, SystemClock};
use crate::video::SimulatedVideo;
use render::{
    render_help, render_separator_line, render_status_bar, Screen, StatusInfo, TerminalFieldTable,
    TerminalGraph, TerminalSeekBar,
};

/// Pacing of animation frames while playing
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Longest wait for input when nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A simulated video to attach to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoOptions {
    /// Length of the video in seconds
    pub duration: f64,
    /// Initial video offset in seconds
    pub offset: f64,
}

/// Play `log` in the terminal until the user quits.
///
/// Presets are stored in the configured presets directory.
#[cfg(not(tarpaulin_include))]
pub fn play_session(
    log: Rc<dyn LogSource>,
    video: Option<VideoOptions>,
    config: &Config,
) -> Result<()> {
    let clock: Rc<dyn Clock> = Rc::new(SystemClock::new());
    let (cols, rows) = crossterm::terminal::size().context("Failed to read terminal size")?;
    let screen = Screen::shared(cols, rows);
    let frames = FrameFlag::new();
    let presets_dir = config.presets_dir()?;
    debug!(dir = %presets_dir.display(), "preset storage");

    let mut session = PlaybackSession::new(
        config.session_settings(),
        Collaborators {
            clock: Rc::clone(&clock),
            frames: Box::new(frames.clone()),
            renderer: Box::new(TerminalGraph::new(
                Rc::clone(&screen),
                Rc::clone(&log),
                config.graph_window(),
            )),
            seek_bar: Box::new(TerminalSeekBar::new(Rc::clone(&screen))),
            field_table: Box::new(TerminalFieldTable::new(Rc::clone(&screen), log.min_time())),
            storage: Box::new(FilePresetStorage::new(presets_dir)),
        },
    );
    session.select_log(log);

    if let Some(video) = video {
        session.attach_video(Box::new(SimulatedVideo::new(Rc::clone(&clock), video.duration)));
        session.set_video_offset(video.offset);
    }

    let _guard = TerminalGuard::enter()?;
    run_loop(&mut session, &screen, &frames)
}

/// Main event loop: animation frames, timers, preset events and input.
#[cfg(not(tarpaulin_include))]
fn run_loop(
    session: &mut PlaybackSession,
    screen: &Rc<RefCell<Screen>>,
    frames: &FrameFlag,
) -> Result<()> {
    let mut ui = UiState::new();
    let mut stdout = io::stdout();

    loop {
        if ui.needs_full_redraw {
            ui.needs_full_redraw = false;
            ui.needs_status = true;
            {
                let mut screen = screen.borrow_mut();
                let layout = screen.layout();
                screen.clear();
                render_separator_line(&mut screen, layout.cols, layout.separator_row);
            }
            session.invalidate();
        }

        if ui.show_help {
            if ui.needs_status {
                ui.needs_status = false;
                render_help(&mut screen.borrow_mut());
            }
        } else {
            if frames.take() {
                session.on_animation_frame();
                ui.needs_status = true;
            }
            session.poll_timers();
            session.pump_events();

            if ui.needs_status {
                ui.needs_status = false;
                let info = StatusInfo::from_session(session);
                render_status_bar(&mut screen.borrow_mut(), &info, ui.message.as_deref());
            }
        }

        let output = screen.borrow_mut().take_output();
        if !output.is_empty() {
            write!(stdout, "{}", output)?;
            stdout.flush()?;
        }

        let timeout = if frames.is_requested() {
            FRAME_INTERVAL
        } else {
            session
                .time_until_next_deadline()
                .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL))
        };

        if event::poll(timeout)? {
            let layout = screen.borrow().layout();
            if input::handle_event(event::read()?, session, &mut ui, layout) == InputResult::Quit {
                break;
            }
        }
    }

    Ok(())
}
