//! Input handling for the terminal player.
//!
//! Keyboard and mouse events are dispatched to their handlers, which act on
//! the session and return control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use crossterm::event::Event;

use crate::player::render::ScreenLayout;
use crate::player::state::{InputResult, UiState};
use crate::sync::PlaybackSession;

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `session` - Session the input acts on
/// * `ui` - Player UI state
/// * `layout` - Current screen layout (for mouse hit testing)
pub fn handle_event(
    event: Event,
    session: &mut PlaybackSession,
    ui: &mut UiState,
    layout: ScreenLayout,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, session, ui),
        Event::Mouse(mouse) => handle_mouse_event(mouse, session, ui, layout),
        Event::Resize(cols, rows) => {
            session.resize(cols as u32, rows as u32);
            ui.needs_full_redraw = true;
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, etc.
    }
}
