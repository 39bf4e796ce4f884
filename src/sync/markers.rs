//! In/out bookmarks for export range selection.
//!
//! Each bound is independently optional. No ordering is enforced between
//! them; an inverted range is for the exporter to reject.

use crate::sync::time_domain::LogTimeRange;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeMarker {
    in_time: Option<i64>,
    out_time: Option<i64>,
}

impl RangeMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_time(&self) -> Option<i64> {
        self.in_time
    }

    pub fn out_time(&self) -> Option<i64> {
        self.out_time
    }

    pub fn set_in_time(&mut self, time: Option<i64>) {
        self.in_time = time;
    }

    pub fn set_out_time(&mut self, time: Option<i64>) {
        self.out_time = time;
    }

    /// The in-marker after pressing the "in" key at `current`: cleared when it
    /// already sits at `current`, otherwise moved there.
    pub fn toggled_in(&self, current: i64) -> Option<i64> {
        toggled(self.in_time, current)
    }

    /// Same as [`toggled_in`](Self::toggled_in) for the out-marker.
    pub fn toggled_out(&self, current: i64) -> Option<i64> {
        toggled(self.out_time, current)
    }

    /// Export bounds, with absent markers replaced by the log's ends.
    pub fn export_bounds(&self, range: &LogTimeRange) -> (i64, i64) {
        (
            self.in_time.unwrap_or(range.min),
            self.out_time.unwrap_or(range.max),
        )
    }
}

fn toggled(marker: Option<i64>, current: i64) -> Option<i64> {
    if marker == Some(current) {
        None
    } else {
        Some(current)
    }
}
