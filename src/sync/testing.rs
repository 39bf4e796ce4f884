//! Recording collaborators for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::sync::collaborators::{FieldTable, FrameRequester, LogSource, Renderer, SeekBar, VideoSource};
use crate::sync::graph_config::GraphConfig;
use crate::sync::layout::LayoutConfig;
use crate::sync::time_domain::LogTimeRange;

/// Counts animation frame requests.
pub struct CountingFrames {
    count: Rc<Cell<usize>>,
}

impl CountingFrames {
    pub fn new() -> (Self, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        (
            Self {
                count: Rc::clone(&count),
            },
            count,
        )
    }
}

impl FrameRequester for CountingFrames {
    fn request_animation_frame(&mut self) {
        self.count.set(self.count.get() + 1);
    }
}

#[derive(Debug, Default)]
pub struct VideoState {
    pub position: f64,
    pub duration: Option<f64>,
    pub playing: bool,
    pub rate: f64,
}

/// Video whose position only changes when set.
pub struct FakeVideo {
    state: Rc<RefCell<VideoState>>,
}

impl FakeVideo {
    pub fn new(duration: Option<f64>) -> (Self, Rc<RefCell<VideoState>>) {
        let state = Rc::new(RefCell::new(VideoState {
            duration,
            rate: 1.0,
            ..VideoState::default()
        }));
        (
            Self {
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl VideoSource for FakeVideo {
    fn current_time(&self) -> f64 {
        self.state.borrow().position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.state.borrow_mut().position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.state.borrow().duration
    }

    fn play(&mut self) {
        self.state.borrow_mut().playing = true;
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.state.borrow_mut().rate = rate;
    }
}

#[derive(Debug, Default)]
pub struct RendererLog {
    pub renders: Vec<i64>,
    pub resizes: Vec<(u32, u32)>,
    pub zooms: Vec<f64>,
    pub in_times: Vec<Option<i64>>,
    pub out_times: Vec<Option<i64>>,
    pub display_configs: Vec<LayoutConfig>,
    pub graph_configs: Vec<GraphConfig>,
}

pub struct RecordingRenderer {
    log: Rc<RefCell<RendererLog>>,
}

impl RecordingRenderer {
    pub fn new() -> (Self, Rc<RefCell<RendererLog>>) {
        let log = Rc::new(RefCell::new(RendererLog::default()));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }

    pub fn log(&self) -> Rc<RefCell<RendererLog>> {
        Rc::clone(&self.log)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, time: i64) {
        self.log.borrow_mut().renders.push(time);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.log.borrow_mut().resizes.push((width, height));
    }

    fn set_graph_zoom(&mut self, zoom: f64) {
        self.log.borrow_mut().zooms.push(zoom);
    }

    fn set_in_time(&mut self, time: Option<i64>) {
        self.log.borrow_mut().in_times.push(time);
    }

    fn set_out_time(&mut self, time: Option<i64>) {
        self.log.borrow_mut().out_times.push(time);
    }

    fn set_display_config(&mut self, layout: &LayoutConfig) {
        self.log.borrow_mut().display_configs.push(layout.clone());
    }

    fn set_graph_config(&mut self, config: &GraphConfig) {
        self.log.borrow_mut().graph_configs.push(config.clone());
    }
}

#[derive(Debug, Default)]
pub struct SeekBarLog {
    pub current_times: Vec<i64>,
    pub ranges: Vec<(LogTimeRange, i64)>,
    pub in_times: Vec<Option<i64>>,
    pub out_times: Vec<Option<i64>>,
    pub repaints: usize,
}

pub struct RecordingSeekBar {
    log: Rc<RefCell<SeekBarLog>>,
}

impl RecordingSeekBar {
    pub fn new() -> (Self, Rc<RefCell<SeekBarLog>>) {
        let log = Rc::new(RefCell::new(SeekBarLog::default()));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl SeekBar for RecordingSeekBar {
    fn set_current_time(&mut self, time: i64) {
        self.log.borrow_mut().current_times.push(time);
    }

    fn set_time_range(&mut self, range: LogTimeRange, current: i64) {
        self.log.borrow_mut().ranges.push((range, current));
    }

    fn set_in_time(&mut self, time: Option<i64>) {
        self.log.borrow_mut().in_times.push(time);
    }

    fn set_out_time(&mut self, time: Option<i64>) {
        self.log.borrow_mut().out_times.push(time);
    }

    fn resize(&mut self, _width: u32, _height: u32) {}

    fn repaint(&mut self) {
        self.log.borrow_mut().repaints += 1;
    }
}

/// Records the time of every field table update.
pub struct RecordingFieldTable {
    updates: Rc<RefCell<Vec<(i64, Option<Vec<Option<f64>>>)>>>,
}

impl RecordingFieldTable {
    #[allow(clippy::type_complexity)]
    pub fn new() -> (Self, Rc<RefCell<Vec<(i64, Option<Vec<Option<f64>>>)>>>) {
        let updates = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                updates: Rc::clone(&updates),
            },
            updates,
        )
    }
}

impl FieldTable for RecordingFieldTable {
    fn show_values(&mut self, time: i64, _names: &[String], frame: Option<&[Option<f64>]>) {
        self.updates
            .borrow_mut()
            .push((time, frame.map(|values| values.to_vec())));
    }
}

/// Log with one field whose value equals the time in milliseconds.
pub struct RampLog {
    range: LogTimeRange,
    fields: Vec<String>,
}

impl RampLog {
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            range: LogTimeRange::new(min, max),
            fields: vec!["ramp".to_string()],
        }
    }

    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }
}

impl LogSource for RampLog {
    fn min_time(&self) -> i64 {
        self.range.min
    }

    fn max_time(&self) -> i64 {
        self.range.max
    }

    fn field_names(&self) -> &[String] {
        &self.fields
    }

    fn frame_at(&self, time: i64) -> Option<Vec<Option<f64>>> {
        if !self.range.contains(time) {
            return None;
        }
        Some(vec![Some(time as f64 / 1000.0); self.fields.len()])
    }
}
