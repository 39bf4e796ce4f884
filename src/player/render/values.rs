//! Field values panel for the terminal player.

use crate::player::render::screen::{fit, move_to, ScreenLayout, SharedScreen};
use crate::player::render::seek_bar::format_log_time;
use crate::sync::FieldTable;

const NAME_WIDTH: usize = 16;

/// Format one decoded field value.
///
/// Whole numbers are shown as integers, everything else with two decimals.
/// Absent values read `(absent)`.
pub fn format_field_value(value: Option<f64>) -> String {
    match value {
        None => "(absent)".to_string(),
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
            format!("{}", v as i64)
        }
        Some(v) => format!("{:.2}", v),
    }
}

/// Field table drawn in the right-hand panel of the shared screen.
pub struct TerminalFieldTable {
    screen: SharedScreen,
    /// Log start, so the header shows time relative to it
    origin: i64,
}

impl TerminalFieldTable {
    pub fn new(screen: SharedScreen, origin: i64) -> Self {
        Self { screen, origin }
    }
}

impl FieldTable for TerminalFieldTable {
    fn show_values(&mut self, time: i64, names: &[String], frame: Option<&[Option<f64>]>) {
        let mut screen = self.screen.borrow_mut();
        let layout = screen.layout();
        let Some(col) = layout.values_col else {
            return;
        };
        let width = ScreenLayout::VALUES_WIDTH as usize;
        let value_width = width.saturating_sub(NAME_WIDTH + 2);

        let mut output = String::new();
        output.push_str(&move_to(0, col));
        output.push_str("\x1b[1m");
        output.push_str(&fit(&format!(" Values @ {}", format_log_time(time - self.origin)), width));
        output.push_str("\x1b[0m");

        let mut rows = names.iter().enumerate();
        for row in 1..layout.graph_rows {
            output.push_str(&move_to(row, col));
            match rows.next() {
                Some((index, name)) => {
                    let value = frame.and_then(|values| values.get(index).copied().flatten());
                    let value = match frame {
                        Some(_) => format_field_value(value),
                        None => String::new(),
                    };
                    output.push_str(" \x1b[90m");
                    output.push_str(&fit(name, NAME_WIDTH));
                    output.push_str("\x1b[97m ");
                    output.push_str(&format!("{:>w$}", value, w = value_width));
                    output.push_str("\x1b[0m");
                }
                None => output.push_str(&" ".repeat(width)),
            }
        }

        screen.write(&output);
    }
}
