//! Generated log for demos and headless runs.

use crate::sync::{LogSource, LogTimeRange};

const MOTORS: usize = 4;
const AXES: usize = 3;

/// A log whose frames are computed on demand from smooth waveforms.
///
/// Fields follow the usual flight controller naming (`motor[i]`,
/// `gyroADC[i]`, `axisP[i]`) so graph presets have something to match.
#[derive(Debug, Clone)]
pub struct SyntheticLog {
    range: LogTimeRange,
    field_names: Vec<String>,
}

impl SyntheticLog {
    /// A log starting at time zero and lasting `duration_secs`.
    pub fn new(duration_secs: f64) -> Self {
        let max = (duration_secs.max(0.0) * 1_000_000.0).round() as i64;

        let field_names = (0..MOTORS)
            .map(|i| format!("motor[{i}]"))
            .chain((0..AXES).map(|i| format!("gyroADC[{i}]")))
            .chain((0..AXES).map(|i| format!("axisP[{i}]")))
            .collect();

        Self {
            range: LogTimeRange::new(0, max),
            field_names,
        }
    }

    fn value(&self, field: usize, time: i64) -> f64 {
        let t = time as f64 / 1_000_000.0;
        match field {
            i if i < MOTORS => {
                let phase = i as f64 * 0.7;
                (1400.0 + 250.0 * (t * 1.3 + phase).sin()).round()
            }
            i if i < MOTORS + AXES => {
                let axis = (i - MOTORS) as f64;
                120.0 * (t * (2.0 + axis)).sin()
            }
            i => {
                let axis = (i - MOTORS - AXES) as f64;
                35.0 * (t * (2.0 + axis) + 0.4).sin()
            }
        }
    }
}

impl LogSource for SyntheticLog {
    fn min_time(&self) -> i64 {
        self.range.min
    }

    fn max_time(&self) -> i64 {
        self.range.max
    }

    fn field_names(&self) -> &[String] {
        &self.field_names
    }

    fn frame_at(&self, time: i64) -> Option<Vec<Option<f64>>> {
        if !self.range.contains(time) {
            return None;
        }
        Some(
            (0..self.field_names.len())
                .map(|field| Some(self.value(field, time)))
                .collect(),
        )
    }
}
