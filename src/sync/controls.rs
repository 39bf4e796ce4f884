//! Clamped percentage controls for playback rate and graph zoom.
//!
//! Requests outside the allowed range are ignored: the previous value stays
//! and no error is raised.

pub const PLAYBACK_MIN_RATE: u32 = 5;
pub const PLAYBACK_MAX_RATE: u32 = 300;
pub const PLAYBACK_DEFAULT_RATE: u32 = 100;
pub const PLAYBACK_RATE_STEP: u32 = 5;

pub const GRAPH_MIN_ZOOM: u32 = 10;
pub const GRAPH_MAX_ZOOM: u32 = 1000;
pub const GRAPH_DEFAULT_ZOOM: u32 = 100;
pub const GRAPH_ZOOM_STEP: u32 = 10;

/// An integer percentage bounded to `[min, max]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentControl {
    value: u32,
    min: u32,
    max: u32,
    step: u32,
}

impl PercentControl {
    pub const fn new(min: u32, max: u32, default: u32, step: u32) -> Self {
        Self {
            value: default,
            min,
            max,
            step,
        }
    }

    /// Playback rate control: 5 % to 300 %, default 100 %.
    pub const fn playback_rate() -> Self {
        Self::new(
            PLAYBACK_MIN_RATE,
            PLAYBACK_MAX_RATE,
            PLAYBACK_DEFAULT_RATE,
            PLAYBACK_RATE_STEP,
        )
    }

    /// Graph zoom control: 10 % to 1000 %, default 100 %.
    pub const fn graph_zoom() -> Self {
        Self::new(GRAPH_MIN_ZOOM, GRAPH_MAX_ZOOM, GRAPH_DEFAULT_ZOOM, GRAPH_ZOOM_STEP)
    }

    /// Same control with a different step for [`stepped`](Self::stepped).
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Value as a factor (100 % = 1.0).
    pub fn factor(&self) -> f64 {
        self.value as f64 / 100.0
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn accepts(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Set a new value. Returns `false`, leaving the old value, when `value`
    /// is out of range.
    pub fn set(&mut self, value: u32) -> bool {
        if !self.accepts(value) {
            return false;
        }
        self.value = value;
        true
    }

    /// The value one step up (`direction > 0`) or down, before range checks.
    pub fn stepped(&self, direction: i32) -> Option<u32> {
        match direction.signum() {
            1 => self.value.checked_add(self.step),
            -1 => self.value.checked_sub(self.step),
            _ => Some(self.value),
        }
    }
}
