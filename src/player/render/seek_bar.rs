//! Seek bar rendering for the terminal player.
//!
//! Displays the position in the log with in/out marker indicators.

use crate::player::render::screen::{move_to, SharedScreen};
use crate::sync::{LogTimeRange, SeekBar};

/// Columns taken by the padding and time display (` MM:SS.mmm/MM:SS.mmm `)
const TIME_DISPLAY_WIDTH: usize = 22;
/// Column where the bar starts
pub const BAR_START: u16 = 1;

/// Format log time in microseconds as `MM:SS.mmm`.
///
/// # Arguments
/// * `micros` - Time in microseconds, usually relative to the log start
pub fn format_log_time(micros: i64) -> String {
    let sign = if micros < 0 { "-" } else { "" };
    let total_ms = micros.unsigned_abs() / 1000;
    let mins = total_ms / 60_000;
    let secs = (total_ms / 1000) % 60;
    let ms = total_ms % 1000;
    format!("{}{:02}:{:02}.{:03}", sign, mins, secs, ms)
}

/// Width of the bar for a terminal `width` columns wide.
pub fn bar_width(width: u16) -> usize {
    (width as usize).saturating_sub(BAR_START as usize + TIME_DISPLAY_WIDTH)
}

/// Log time under `column` of the bar, or `None` outside it.
///
/// # Arguments
/// * `column` - Clicked terminal column (0-indexed)
/// * `width` - Terminal width
/// * `range` - Time range of the log
pub fn time_at_column(column: u16, width: u16, range: LogTimeRange) -> Option<i64> {
    let bar_width = bar_width(width);
    if column < BAR_START || column >= BAR_START + bar_width as u16 {
        return None;
    }
    let ratio = (column - BAR_START) as f64 / bar_width as f64;
    Some(range.min + (ratio * range.duration() as f64).round() as i64)
}

/// Build the seek bar character array.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `current` - Current log time
/// * `range` - Time range of the log
/// * `in_time` / `out_time` - Optional export markers
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where filled_count is the number of
/// positions before the playhead.
pub fn build_seek_bar_chars(
    bar_width: usize,
    current: i64,
    range: LogTimeRange,
    in_time: Option<i64>,
    out_time: Option<i64>,
) -> (Vec<char>, usize) {
    let duration = range.duration();
    let position = |time: i64| -> f64 {
        if duration > 0 {
            ((time - range.min) as f64 / duration as f64).clamp(0.0, 1.0)
        } else {
            1.0
        }
    };

    let filled = (bar_width as f64 * position(current)) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];

    if filled < bar_width {
        bar[filled] = '⏺';
    }

    for (time, symbol) in [(in_time, '['), (out_time, ']')] {
        let Some(time) = time else { continue };
        let index = ((position(time) * bar_width as f64) as usize).min(bar_width.saturating_sub(1));
        if index < bar_width && bar[index] != '⏺' {
            bar[index] = symbol;
        }
    }

    (bar, filled)
}

/// Seek bar drawn on the shared screen.
pub struct TerminalSeekBar {
    screen: SharedScreen,
    range: Option<LogTimeRange>,
    current: i64,
    in_time: Option<i64>,
    out_time: Option<i64>,
}

impl TerminalSeekBar {
    pub fn new(screen: SharedScreen) -> Self {
        Self {
            screen,
            range: None,
            current: 0,
            in_time: None,
            out_time: None,
        }
    }
}

impl SeekBar for TerminalSeekBar {
    fn set_current_time(&mut self, time: i64) {
        self.current = time;
    }

    fn set_time_range(&mut self, range: LogTimeRange, current: i64) {
        self.range = Some(range);
        self.current = current;
    }

    fn set_in_time(&mut self, time: Option<i64>) {
        self.in_time = time;
    }

    fn set_out_time(&mut self, time: Option<i64>) {
        self.out_time = time;
    }

    fn resize(&mut self, _width: u32, _height: u32) {}

    fn repaint(&mut self) {
        let Some(range) = self.range else {
            return;
        };
        let mut screen = self.screen.borrow_mut();
        let layout = screen.layout();
        let width = layout.cols;

        let bar_width = bar_width(width);
        let (bar, filled) =
            build_seek_bar_chars(bar_width, self.current, range, self.in_time, self.out_time);

        let time_display = format!(
            " {}/{}",
            format_log_time(self.current - range.min),
            format_log_time(range.duration())
        );

        const GREEN: &str = "\x1b[32m";
        const YELLOW: &str = "\x1b[33m";
        const WHITE: &str = "\x1b[97m";
        const DARK_GREY: &str = "\x1b[90m";
        const GREY: &str = "\x1b[37m";

        // Build line as string to minimize syscalls
        let mut output = String::with_capacity(width as usize * 4);
        output.push_str(&move_to(layout.seek_bar_row, 0));
        output.push_str("\x1b[48;5;236m ");

        output.push_str(GREEN);
        for (i, &c) in bar.iter().enumerate() {
            let marker = c == '[' || c == ']';
            if i < filled {
                if marker {
                    output.push_str(YELLOW);
                    output.push(c);
                    output.push_str(GREEN);
                } else {
                    output.push('━');
                }
            } else if i == filled {
                output.push_str(WHITE);
                output.push(c);
            } else if marker {
                output.push_str(YELLOW);
                output.push(c);
            } else {
                output.push_str(DARK_GREY);
                output.push(c);
            }
        }

        output.push_str(GREY);
        output.push_str(&time_display);

        let used_width = BAR_START as usize + bar_width + time_display.chars().count();
        let remaining = (width as usize).saturating_sub(used_width);
        output.extend(std::iter::repeat(' ').take(remaining));

        output.push_str("\x1b[0m");
        screen.write(&output);
    }
}
