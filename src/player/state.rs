//! Player UI state
//!
//! Playback itself lives in the session; this is only what the terminal
//! host adds on top of it.

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the main
/// loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running
    Continue,
    /// Exit the player
    Quit,
}

#[derive(Debug, Default)]
pub struct UiState {
    /// Whether the help overlay is visible
    pub show_help: bool,
    /// One-off message shown in the status bar until the next key press
    pub message: Option<String>,
    /// True when the whole screen needs to be redrawn
    pub needs_full_redraw: bool,
    /// True when the status bar is stale
    pub needs_status: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            needs_full_redraw: true,
            needs_status: true,
            ..Self::default()
        }
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if !self.show_help {
            self.needs_full_redraw = true;
        }
    }

    pub fn show_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.needs_status = true;
    }
}
