//! Shared off-screen output buffer and screen geometry.
//!
//! Every drawing collaborator appends ANSI output to the same [`Screen`];
//! the host flushes it to the terminal once per loop iteration.

use std::cell::RefCell;
use std::rc::Rc;

pub type SharedScreen = Rc<RefCell<Screen>>;

/// Where each part of the player goes for a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub cols: u16,
    pub rows: u16,
    /// Width of the graph area, starting at column 0
    pub graph_cols: u16,
    /// Height of the graph area, starting at row 0
    pub graph_rows: u16,
    /// First column of the field values panel, if there is room for one
    pub values_col: Option<u16>,
    pub separator_row: u16,
    pub seek_bar_row: u16,
    pub status_row: u16,
}

impl ScreenLayout {
    /// Separator + seek bar + status bar
    pub const CHROME_LINES: u16 = 3;
    pub const VALUES_WIDTH: u16 = 30;
    pub const MIN_COLS_FOR_VALUES: u16 = 70;

    pub fn new(cols: u16, rows: u16) -> Self {
        let graph_rows = rows.saturating_sub(Self::CHROME_LINES);
        let (graph_cols, values_col) = if cols >= Self::MIN_COLS_FOR_VALUES {
            let graph_cols = cols - Self::VALUES_WIDTH;
            (graph_cols, Some(graph_cols))
        } else {
            (cols, None)
        };

        Self {
            cols,
            rows,
            graph_cols,
            graph_rows,
            values_col,
            separator_row: rows.saturating_sub(3),
            seek_bar_row: rows.saturating_sub(2),
            status_row: rows.saturating_sub(1),
        }
    }
}

#[derive(Debug)]
pub struct Screen {
    layout: ScreenLayout,
    output: String,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            layout: ScreenLayout::new(cols, rows),
            output: String::with_capacity(cols as usize * rows as usize * 4),
        }
    }

    pub fn shared(cols: u16, rows: u16) -> SharedScreen {
        Rc::new(RefCell::new(Self::new(cols, rows)))
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    /// Adopt a new terminal size and clear everything drawn so far.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.layout = ScreenLayout::new(cols, rows);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.output.push_str("\x1b[2J");
    }

    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn is_dirty(&self) -> bool {
        !self.output.is_empty()
    }

    /// Hand over everything written since the last call.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

/// Cursor movement to a 0-indexed cell.
pub fn move_to(row: u16, col: u16) -> String {
    format!("\x1b[{};{}H", row + 1, col + 1)
}

/// Pad or cut `text` to exactly `width` characters.
pub fn fit(text: &str, width: usize) -> String {
    let mut fitted: String = text.chars().take(width).collect();
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat(' ').take(width - len));
    fitted
}
