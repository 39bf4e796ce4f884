//! Rendering components for the terminal player.
//!
//! The graph, seek bar and field values panel implement the session's
//! drawing collaborators; all of them write to one shared [`Screen`].

mod graph;
mod help;
mod screen;
mod seek_bar;
mod status;
mod values;

pub use graph::{sparkline, TerminalGraph};
pub use help::{calc_help_start_col, calc_help_start_row, render_help, HELP_BOX_WIDTH, HELP_LINES};
pub use screen::{fit, move_to, Screen, ScreenLayout, SharedScreen};
pub use seek_bar::{bar_width, build_seek_bar_chars, format_log_time, time_at_column, TerminalSeekBar};
pub use status::{render_separator_line, render_status_bar, StatusInfo};
pub use values::{format_field_value, TerminalFieldTable};
