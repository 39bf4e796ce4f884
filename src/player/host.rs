//! Terminal host plumbing: frame requests and terminal mode.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::sync::FrameRequester;

/// Frame request flag shared between the session and the event loop.
///
/// The session raises it; the loop takes it and runs one tick.
#[derive(Debug, Clone, Default)]
pub struct FrameFlag {
    requested: Rc<Cell<bool>>,
}

impl FrameFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }

    /// Clear the flag, returning whether a frame was requested.
    pub fn take(&self) -> bool {
        self.requested.replace(false)
    }
}

impl FrameRequester for FrameFlag {
    fn request_animation_frame(&mut self) {
        self.requested.set(true);
    }
}

/// Raw mode + alternate screen for as long as it lives.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    #[cfg(not(tarpaulin_include))]
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, EnableMouseCapture)?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}
