//! Mouse input handling for the terminal player.
//!
//! Handles click-to-seek on the seek bar.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::player::render::{time_at_column, ScreenLayout};
use crate::player::state::{InputResult, UiState};
use crate::sync::PlaybackSession;

/// Handle a mouse event.
///
/// Currently handles:
/// - Left click or drag on the seek bar to seek to that position
pub fn handle_mouse_event(
    mouse: MouseEvent,
    session: &mut PlaybackSession,
    ui: &mut UiState,
    layout: ScreenLayout,
) -> InputResult {
    let pressed = matches!(
        mouse.kind,
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
    );

    if pressed && mouse.row == layout.seek_bar_row {
        if let Some(range) = session.log_range() {
            if let Some(time) = time_at_column(mouse.column, layout.cols, range) {
                session.set_current_time(time);
                ui.needs_status = true;
            }
        }
    }

    InputResult::Continue
}
