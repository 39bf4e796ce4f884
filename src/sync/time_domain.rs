//! Conversion between log time and media time.
//!
//! Log time is measured in microseconds from an origin defined by the flight
//! log. Media time is measured in seconds from the start of the attached
//! video. The two are related by the log's start time and a user-adjustable
//! video offset.

/// Microseconds in one second of media time.
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Bounds of the currently selected log, in microseconds.
///
/// Supplied by the log source. `max >= min` is assumed; a log reporting
/// otherwise must be rejected before it reaches the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTimeRange {
    pub min: i64,
    pub max: i64,
}

impl LogTimeRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Length of the log in microseconds.
    pub fn duration(&self) -> i64 {
        self.max - self.min
    }

    pub fn contains(&self, time: i64) -> bool {
        time >= self.min && time <= self.max
    }

    /// Clamp `time` into `[min, max]`.
    pub fn clamp(&self, time: i64) -> i64 {
        time.max(self.min).min(self.max)
    }
}

/// Mapping between media time and log time.
///
/// Only the offset lives here; the log range is passed in because it changes
/// whenever another log is selected while the offset is kept for the session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeDomain {
    offset: f64,
}

impl TimeDomain {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// Video offset in seconds, at full precision.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Convert a video position (seconds) to log time (microseconds).
    pub fn to_log_time(&self, media_seconds: f64, range: &LogTimeRange) -> i64 {
        ((media_seconds - self.offset) * MICROS_PER_SECOND + range.min as f64).round() as i64
    }

    /// Convert log time (microseconds) to a video position (seconds).
    pub fn to_media_time(&self, log_time: i64, range: &LogTimeRange) -> f64 {
        (log_time - range.min) as f64 / MICROS_PER_SECOND + self.offset
    }
}

/// Format an offset for display.
///
/// Non-negative values get a leading `+` to emphasize that this is an offset.
/// Values that need more than two decimals are rounded to two; anything
/// shorter is shown as-is (`+2`, `+1.5`, `-0.07`).
pub fn format_offset(offset: f64) -> String {
    // Avoid "-0" for a negative zero
    let offset = if offset == 0.0 { 0.0 } else { offset };
    let sign = if offset >= 0.0 { "+" } else { "" };
    let rounded = format!("{:.2}", offset);

    if rounded.parse::<f64>().ok() == Some(offset) {
        format!("{}{}", sign, offset)
    } else {
        format!("{}{}", sign, rounded)
    }
}

/// Parse offset text typed by the user.
///
/// Returns `None` for anything that is not a finite number, in which case the
/// caller keeps the previous offset.
pub fn parse_offset(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
