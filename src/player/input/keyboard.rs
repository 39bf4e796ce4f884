//! Keyboard input handling for the terminal player.
//!
//! Maps keys to session operations: transport, markers, sync, rate, zoom
//! and preset cycling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::player::render::format_log_time;
use crate::player::state::{InputResult, UiState};
use crate::sync::PlaybackSession;

/// Handle a keyboard event.
///
/// Every handled key clears the previous status message.
pub fn handle_key_event(
    key: KeyEvent,
    session: &mut PlaybackSession,
    ui: &mut UiState,
) -> InputResult {
    ui.message = None;
    ui.needs_status = true;

    // If help is showing, any key closes it
    if ui.show_help {
        ui.toggle_help();
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return InputResult::Quit
        }

        KeyCode::Char('?') => ui.toggle_help(),

        // === Transport ===
        KeyCode::Char(' ') => session.toggle_play_pause(),
        KeyCode::Char(',') | KeyCode::Char('<') => session.jump_back(),
        KeyCode::Char('.') | KeyCode::Char('>') => session.jump_forward(),
        KeyCode::Home => session.jump_to_log_start(),
        KeyCode::End => session.jump_to_log_end(),
        KeyCode::Char('[') => {
            if !session.jump_to_video_start() {
                ui.show_message("no video loaded");
            }
        }
        KeyCode::Char(']') => {
            if !session.jump_to_video_end() {
                ui.show_message("no video loaded");
            }
        }

        // === Rate and zoom ===
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if !session.step_playback_rate(1) {
                ui.show_message(format!("rate limit {}%", session.playback_rate()));
            }
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            if !session.step_playback_rate(-1) {
                ui.show_message(format!("rate limit {}%", session.playback_rate()));
            }
        }
        KeyCode::Char('z') => {
            if !session.step_graph_zoom(1) {
                ui.show_message(format!("zoom limit {}%", session.graph_zoom()));
            }
        }
        KeyCode::Char('x') => {
            if !session.step_graph_zoom(-1) {
                ui.show_message(format!("zoom limit {}%", session.graph_zoom()));
            }
        }

        // === Markers ===
        KeyCode::Char('i') => session.toggle_video_in_time(),
        KeyCode::Char('o') => session.toggle_video_out_time(),
        KeyCode::Char('e') => handle_export(session, ui),

        // === Sync ===
        KeyCode::Left => session.nudge_video_offset(-1),
        KeyCode::Right => session.nudge_video_offset(1),
        KeyCode::Char('s') => {
            if session.sync_video_here() {
                ui.show_message(format!("offset {}", session.video_offset_label()));
            } else {
                ui.show_message("no video loaded");
            }
        }

        // === Presets ===
        KeyCode::Char('g') => {
            session.graph_presets_mut().cycle_active(1);
            session.pump_events();
            if let Some(preset) = session.graph_presets().active() {
                ui.show_message(format!("graph preset: {}", preset.name));
            }
        }
        KeyCode::Char('l') => {
            session.layout_presets_mut().cycle_active(1);
            session.pump_events();
            if let Some(preset) = session.layout_presets().active() {
                ui.show_message(format!("layout preset: {}", preset.name));
            }
        }

        _ => {}
    }

    InputResult::Continue
}

/// Pause and show the export range in the status bar.
fn handle_export(session: &mut PlaybackSession, ui: &mut UiState) {
    let Some(request) = session.export_request() else {
        ui.show_message("no log loaded");
        return;
    };
    let origin = session.log_range().map_or(0, |range| range.min);

    info!(
        in_time = request.in_time,
        out_time = request.out_time,
        video_offset = request.video_offset,
        has_video = request.has_video,
        "export requested"
    );
    ui.show_message(format!(
        "export {} → {} offset {}{}",
        format_log_time(request.in_time - origin),
        format_log_time(request.out_time - origin),
        session.video_offset_label(),
        if request.has_video { "" } else { " (no video)" }
    ));
}
