//! Capabilities the session consumes from the surrounding application.
//!
//! The session owns one of each (boxed) and is the only caller. None of these
//! calls may fail from the session's point of view; implementations deal with
//! their own errors.

use serde_json::Value;

use crate::storage::StorageError;
use crate::sync::graph_config::GraphConfig;
use crate::sync::layout::LayoutConfig;
use crate::sync::time_domain::LogTimeRange;

/// A decoded flight log.
pub trait LogSource {
    /// First timestamp in the log, in microseconds.
    fn min_time(&self) -> i64;

    /// Last timestamp in the log, in microseconds.
    fn max_time(&self) -> i64;

    /// Names of the main frame fields, in frame order.
    fn field_names(&self) -> &[String];

    /// Field values of the frame in effect at `time`, in the order of
    /// [`field_names`](Self::field_names). `None` entries are absent values.
    fn frame_at(&self, time: i64) -> Option<Vec<Option<f64>>>;

    fn range(&self) -> LogTimeRange {
        LogTimeRange::new(self.min_time(), self.max_time())
    }
}

/// An externally clocked video element.
pub trait VideoSource {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Length in seconds, `None` while unknown.
    fn duration(&self) -> Option<f64>;

    /// Start playing. Completion is not awaited.
    fn play(&mut self);

    fn pause(&mut self);

    /// Playback speed factor (1.0 = normal).
    fn set_playback_rate(&mut self, rate: f64);
}

/// The graph renderer.
pub trait Renderer {
    fn render(&mut self, time: i64);

    fn resize(&mut self, width: u32, height: u32);

    /// Zoom factor (1.0 = 100 %).
    fn set_graph_zoom(&mut self, zoom: f64);

    fn set_in_time(&mut self, time: Option<i64>);

    fn set_out_time(&mut self, time: Option<i64>);

    /// New layout for the display.
    fn set_display_config(&mut self, layout: &LayoutConfig);

    /// Graph configuration adapted to the selected log.
    fn set_graph_config(&mut self, config: &GraphConfig);
}

/// The seek bar under the graph.
///
/// User seeks on the bar are forwarded by the host to
/// [`PlaybackSession::set_current_time`](crate::sync::PlaybackSession::set_current_time).
pub trait SeekBar {
    fn set_current_time(&mut self, time: i64);

    fn set_time_range(&mut self, range: LogTimeRange, current: i64);

    fn set_in_time(&mut self, time: Option<i64>);

    fn set_out_time(&mut self, time: Option<i64>);

    fn resize(&mut self, width: u32, height: u32);

    fn repaint(&mut self);
}

/// Table of decoded field values at the current time.
pub trait FieldTable {
    fn show_values(&mut self, time: i64, names: &[String], frame: Option<&[Option<f64>]>);
}

/// The host's per-frame animation callback.
///
/// After `request_animation_frame` the host must call
/// [`PlaybackSession::on_animation_frame`](crate::sync::PlaybackSession::on_animation_frame)
/// once, on its next frame.
pub trait FrameRequester {
    fn request_animation_frame(&mut self);
}

/// Persistence for serialized preset sets. Blobs are opaque here.
pub trait PresetStorage {
    fn persist(&mut self, key: &str, blob: &Value) -> Result<(), StorageError>;

    fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;
}
