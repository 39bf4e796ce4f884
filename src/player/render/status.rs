//! Status bar rendering for the terminal player.
//!
//! Displays playback state, rate, zoom, video offset, markers and presets,
//! followed by either a message or the main shortcuts.

use crate::player::render::screen::{move_to, Screen};
use crate::player::render::seek_bar::format_log_time;
use crate::sync::{PlaybackSession, PlaybackState};

/// Everything the status bar shows, captured from a session.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusInfo {
    pub state: PlaybackState,
    pub rate: u32,
    pub zoom: u32,
    pub offset_label: String,
    /// Video position in seconds, when a video is attached
    pub video_time: Option<f64>,
    /// In/out markers relative to the log start
    pub in_time: Option<i64>,
    pub out_time: Option<i64>,
    pub graph_preset: Option<String>,
    pub layout_preset: Option<String>,
}

impl StatusInfo {
    pub fn from_session(session: &PlaybackSession) -> Self {
        let origin = session.log_range().map_or(0, |range| range.min);
        let markers = session.markers();

        Self {
            state: session.state(),
            rate: session.playback_rate(),
            zoom: session.graph_zoom(),
            offset_label: session.video_offset_label(),
            video_time: session.video_time(),
            in_time: markers.in_time().map(|t| t - origin),
            out_time: markers.out_time().map(|t| t - origin),
            graph_preset: session.graph_presets().active().map(|p| p.name.clone()),
            layout_preset: session.layout_presets().active().map(|p| p.name.clone()),
        }
    }
}

/// Output with its visible width tracked by hand, since escape codes take
/// no columns.
#[derive(Default)]
struct StatusLine {
    output: String,
    visible_len: usize,
}

impl StatusLine {
    fn push(&mut self, color: &str, text: &str) {
        self.output.push_str(color);
        self.output.push_str(text);
        self.visible_len += text.chars().count();
    }
}

fn marker_text(time: Option<i64>) -> String {
    time.map_or_else(|| "--:--.---".to_string(), format_log_time)
}

/// Render a separator line.
///
/// # Arguments
/// * `screen` - Screen to draw on
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
pub fn render_separator_line(screen: &mut Screen, width: u16, row: u16) {
    // Build line as string to minimize syscalls
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&move_to(row, 0));
    output.push_str("\x1b[90m");
    output.extend(std::iter::repeat('─').take(width as usize));
    output.push_str("\x1b[0m");
    screen.write(&output);
}

/// Render the status/controls bar.
///
/// # Arguments
/// * `screen` - Screen to draw on
/// * `info` - Values to show
/// * `message` - Shown instead of the shortcut hints when present
pub fn render_status_bar(screen: &mut Screen, info: &StatusInfo, message: Option<&str>) {
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const YELLOW: &str = "\x1b[33m";
    const CYAN: &str = "\x1b[36m";
    const MAGENTA: &str = "\x1b[35m";
    const RESET: &str = "\x1b[0m";

    let layout = screen.layout();
    let mut line = StatusLine::default();
    line.output.push_str(&move_to(layout.status_row, 0));

    // ▶ and ⏸ are double-width
    let icon = match info.state {
        PlaybackState::Paused => " ▶  ",
        PlaybackState::Playing => " ⏸  ",
    };
    line.push(WHITE, icon);
    line.visible_len += 1;

    line.push(DARK_GREY, "rate:");
    line.push(WHITE, &format!("{}% ", info.rate));
    line.push(DARK_GREY, "zoom:");
    line.push(WHITE, &format!("{}% ", info.zoom));

    if let Some(video_time) = info.video_time {
        line.push(DARK_GREY, "vid:");
        line.push(WHITE, &format!("{:.2}s ", video_time));
        line.push(DARK_GREY, "off:");
        line.push(WHITE, &format!("{} ", info.offset_label));
    }

    if info.in_time.is_some() || info.out_time.is_some() {
        line.push(
            YELLOW,
            &format!("[{} {}] ", marker_text(info.in_time), marker_text(info.out_time)),
        );
    }

    if let Some(graph) = &info.graph_preset {
        line.push(MAGENTA, &format!("g:{} ", graph));
    }
    if let Some(layout_name) = &info.layout_preset {
        line.push(MAGENTA, &format!("l:{} ", layout_name));
    }

    line.push(DARK_GREY, "│ ");
    match message {
        Some(message) => line.push(WHITE, message),
        None => {
            let play_action = match info.state {
                PlaybackState::Paused => ":play ",
                PlaybackState::Playing => ":pause ",
            };
            for (key, action) in [("space", play_action), ("i/o", ":mark "), ("?", ":hlp "), ("q", ":quit")] {
                line.push(CYAN, key);
                line.push(DARK_GREY, action);
            }
        }
    }

    // Pad to full width to overwrite any leftover content
    let padding = (layout.cols as usize).saturating_sub(line.visible_len);
    let mut output = line.output;
    output.extend(std::iter::repeat(' ').take(padding));

    output.push_str(RESET);
    screen.write(&output);
}
