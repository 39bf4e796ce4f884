//! Graph rendering for the terminal player.
//!
//! Each configured graph becomes a label row followed by one sparkline row
//! per field. The window is centered on the current time; its length is the
//! configured window divided by the zoom factor.

use std::rc::Rc;
use std::time::Duration;

use crate::player::render::screen::{fit, move_to, SharedScreen};
use crate::player::render::seek_bar::format_log_time;
use crate::sync::{GraphConfig, GraphDefinition, LayoutConfig, LogSource, Renderer};

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const LABEL_WIDTH: usize = 14;

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const WHITE: &str = "\x1b[97m";
const DARK_GREY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Scale `values` into sparkline blocks. Absent values are blank; a flat
/// series sits in the middle.
pub fn sparkline(values: &[Option<f64>]) -> String {
    let present = values.iter().flatten().filter(|v| v.is_finite());
    let (min, max) = present.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });

    values
        .iter()
        .map(|value| match value {
            Some(v) if v.is_finite() => {
                if max > min {
                    let level = ((v - min) / (max - min) * (SPARK.len() - 1) as f64).round();
                    SPARK[level as usize]
                } else {
                    SPARK[SPARK.len() / 2]
                }
            }
            _ => ' ',
        })
        .collect()
}

/// Column of `time` in a plot starting at `start`, or `None` when off-plot.
fn column_of(time: i64, start: i64, window: i64, width: usize) -> Option<usize> {
    if window <= 0 || time < start {
        return None;
    }
    let column = ((time - start) as i128 * width as i128 / window as i128) as usize;
    (column < width).then_some(column)
}

/// Renderer drawing the log around the current time as sparklines.
pub struct TerminalGraph {
    screen: SharedScreen,
    log: Rc<dyn LogSource>,
    /// Visible window at 100% zoom, in microseconds
    window: i64,
    zoom: f64,
    in_time: Option<i64>,
    out_time: Option<i64>,
    graphs: Vec<GraphDefinition>,
    show_legend: bool,
}

impl TerminalGraph {
    pub fn new(screen: SharedScreen, log: Rc<dyn LogSource>, window: Duration) -> Self {
        Self {
            screen,
            log,
            window: (window.as_micros() as i64).max(1),
            zoom: 1.0,
            in_time: None,
            out_time: None,
            graphs: Vec::new(),
            show_legend: true,
        }
    }

    /// Visible time span at the current zoom, in microseconds.
    pub fn visible_window(&self) -> i64 {
        ((self.window as f64 / self.zoom).round() as i64).max(1)
    }

    fn ruler(&self, time: i64, start: i64, window: i64, width: usize) -> String {
        let mut ruler = vec![' '; width];
        for (marker, symbol) in [(self.in_time, '['), (self.out_time, ']')] {
            if let Some(column) = marker.and_then(|t| column_of(t, start, window, width)) {
                ruler[column] = symbol;
            }
        }
        if let Some(column) = column_of(time, start, window, width) {
            ruler[column] = '▼';
        }
        ruler.into_iter().collect()
    }
}

impl Renderer for TerminalGraph {
    fn render(&mut self, time: i64) {
        let mut screen = self.screen.borrow_mut();
        let layout = screen.layout();
        let width = layout.graph_cols as usize;
        let label_width = LABEL_WIDTH.min(width / 3);
        let plot_width = width - label_width;
        if plot_width == 0 || layout.graph_rows == 0 {
            return;
        }

        let window = self.visible_window();
        let start = time - window / 2;
        let frames: Vec<Option<Vec<Option<f64>>>> = (0..plot_width)
            .map(|c| {
                let t = start + (c as i128 * window as i128 / plot_width as i128) as i64;
                self.log.frame_at(t)
            })
            .collect();
        let names = self.log.field_names();

        // Build all rows as one string to minimize syscalls
        let mut output = String::with_capacity(width * layout.graph_rows as usize * 4);
        let mut row: u16 = 0;

        output.push_str(&move_to(row, 0));
        output.push_str(WHITE);
        output.push_str(&fit(&format_log_time(time - self.log.min_time()), label_width));
        output.push_str(YELLOW);
        output.push_str(&self.ruler(time, start, window, plot_width));
        output.push_str(RESET);
        row += 1;

        'graphs: for graph in &self.graphs {
            if self.show_legend {
                if row >= layout.graph_rows {
                    break;
                }
                output.push_str(&move_to(row, 0));
                output.push_str(BOLD);
                output.push_str(&fit(&graph.label, width));
                output.push_str(RESET);
                row += 1;
            }

            for field in &graph.fields {
                if row >= layout.graph_rows {
                    break 'graphs;
                }
                let index = names.iter().position(|name| name == field);
                let values: Vec<Option<f64>> = frames
                    .iter()
                    .map(|frame| {
                        let frame = frame.as_ref()?;
                        frame.get(index?).copied().flatten()
                    })
                    .collect();

                output.push_str(&move_to(row, 0));
                output.push_str(DARK_GREY);
                output.push_str(&fit(field, label_width));
                output.push_str(GREEN);
                output.push_str(&sparkline(&values));
                output.push_str(RESET);
                row += 1;
            }
        }

        let blank = " ".repeat(width);
        for r in row..layout.graph_rows {
            output.push_str(&move_to(r, 0));
            output.push_str(&blank);
        }

        screen.write(&output);
    }

    fn resize(&mut self, width: u32, height: u32) {
        let cols = u16::try_from(width).unwrap_or(u16::MAX);
        let rows = u16::try_from(height).unwrap_or(u16::MAX);
        self.screen.borrow_mut().resize(cols, rows);
    }

    fn set_graph_zoom(&mut self, zoom: f64) {
        if zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    fn set_in_time(&mut self, time: Option<i64>) {
        self.in_time = time;
    }

    fn set_out_time(&mut self, time: Option<i64>) {
        self.out_time = time;
    }

    fn set_display_config(&mut self, layout: &LayoutConfig) {
        self.show_legend = layout
            .get("showLegend")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
    }

    fn set_graph_config(&mut self, config: &GraphConfig) {
        self.graphs = config.graphs().to_vec();
    }
}
