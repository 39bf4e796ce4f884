//! Help overlay rendering for the terminal player.
//!
//! Displays a centered help box with all available keyboard shortcuts.

use crate::player::render::screen::{move_to, Screen};

/// Help text lines for the help overlay.
pub const HELP_LINES: &[&str] = &[
    "╔═══════════════════════════════════════════╗",
    "║           flightsync player help          ║",
    "╠═══════════════════════════════════════════╣",
    "║  Playback                                 ║",
    "║    Space      Play / Pause                ║",
    "║    , / .      Jump back / forward         ║",
    "║    Home/End   Log start / end             ║",
    "║    [ / ]      Video start / end           ║",
    "║    + / -      Playback rate up / down     ║",
    "║    click      Seek on the seek bar        ║",
    "║                                           ║",
    "║  Sync                                     ║",
    "║    <- / ->    Nudge video offset          ║",
    "║    s          Sync video here             ║",
    "║                                           ║",
    "║  Export range                             ║",
    "║    i / o      Toggle in / out marker      ║",
    "║    e          Show export range           ║",
    "║                                           ║",
    "║  View                                     ║",
    "║    z / x      Zoom in / out               ║",
    "║    g / l      Next graph / layout preset  ║",
    "║    ?          Show this help              ║",
    "║    q / Esc    Quit player                 ║",
    "║                                           ║",
    "║          Press any key to close           ║",
    "╚═══════════════════════════════════════════╝",
];

/// Width of the help box (for centering calculations).
pub const HELP_BOX_WIDTH: usize = 45;

/// Calculate the starting row for centering the help box.
///
/// # Arguments
/// * `term_height` - Terminal height in rows
pub fn calc_help_start_row(term_height: u16) -> u16 {
    let box_height = HELP_LINES.len() as u16;
    (term_height.saturating_sub(box_height)) / 2
}

/// Calculate the starting column for centering the help box.
///
/// # Arguments
/// * `term_width` - Terminal width in columns
pub fn calc_help_start_col(term_width: u16) -> u16 {
    ((term_width as usize).saturating_sub(HELP_BOX_WIDTH) / 2) as u16
}

/// Render the help overlay.
///
/// Clears the screen and draws the centered help box.
pub fn render_help(screen: &mut Screen) {
    let layout = screen.layout();
    let start_row = calc_help_start_row(layout.rows);
    let col = calc_help_start_col(layout.cols);

    let mut output = String::from("\x1b[2J\x1b[32m");
    for (i, line) in HELP_LINES.iter().enumerate() {
        output.push_str(&move_to(start_row + i as u16, col));
        output.push_str(line);
    }
    output.push_str("\x1b[0m");
    screen.write(&output);
}
