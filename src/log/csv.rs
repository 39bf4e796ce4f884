//! CSV flight log reader.
//!
//! The format is the one produced by blackbox CSV exports: a header line of
//! field names, one of which is the frame time in microseconds (`time (us)`
//! or `time`), followed by one line per decoded frame. Every other column,
//! `loopIteration` included, is a field. Empty cells are absent values.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::error::LogLoadError;
use crate::sync::LogSource;

#[derive(Debug, Clone)]
struct Frame {
    time: i64,
    values: Vec<Option<f64>>,
}

/// A fully decoded log held in memory.
#[derive(Debug, Clone)]
pub struct CsvLog {
    field_names: Vec<String>,
    frames: Vec<Frame>,
}

impl CsvLog {
    /// Read a CSV log from a file.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, LogLoadError> {
        let file = File::open(path.as_ref())?;
        let log = Self::parse_reader(BufReader::new(file))?;
        debug!(
            path = %path.as_ref().display(),
            frames = log.frames.len(),
            "loaded csv log"
        );
        Ok(log)
    }

    pub fn parse_str(content: &str) -> Result<Self, LogLoadError> {
        Self::parse_reader(content.as_bytes())
    }

    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self, LogLoadError> {
        let mut lines = reader.lines();

        let header = lines.next().ok_or(LogLoadError::Empty)??;
        let mut field_names: Vec<String> =
            header.split(',').map(|c| c.trim().to_string()).collect();
        let time_column = field_names
            .iter()
            .position(|name| is_time_column(name))
            .ok_or(LogLoadError::MissingTimeColumn)?;
        field_names.remove(time_column);

        let mut frames: Vec<Frame> = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            let line_num = index + 2;
            if line.trim().is_empty() {
                continue;
            }

            let frame = parse_row(&line, time_column, field_names.len(), line_num)?;
            if let Some(last) = frames.last() {
                if frame.time < last.time {
                    return Err(LogLoadError::TimeNotMonotonic {
                        line: line_num,
                        time: frame.time,
                    });
                }
            }
            frames.push(frame);
        }

        if frames.is_empty() {
            return Err(LogLoadError::NoFrames);
        }

        Ok(Self {
            field_names,
            frames,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// `time`, `time (us)` and the like, in any case.
fn is_time_column(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name == "time" || name.starts_with("time (")
}

fn parse_row(
    line: &str,
    time_column: usize,
    field_count: usize,
    line_num: usize,
) -> Result<Frame, LogLoadError> {
    let mut cells: Vec<&str> = line.split(',').map(str::trim).collect();
    if time_column >= cells.len() {
        return Err(LogLoadError::invalid_row(line_num, "missing time"));
    }

    let time = cells
        .remove(time_column)
        .parse::<i64>()
        .map_err(|_| LogLoadError::invalid_row(line_num, "time is not an integer"))?;

    let values = cells
        .into_iter()
        .map(|cell| {
            if cell.is_empty() {
                Ok(None)
            } else {
                cell.parse::<f64>()
                    .map(Some)
                    .map_err(|_| LogLoadError::invalid_row(line_num, format!("bad value {cell:?}")))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != field_count {
        return Err(LogLoadError::invalid_row(
            line_num,
            format!("expected {} values, found {}", field_count, values.len()),
        ));
    }

    Ok(Frame { time, values })
}

impl LogSource for CsvLog {
    fn min_time(&self) -> i64 {
        self.frames.first().map_or(0, |f| f.time)
    }

    fn max_time(&self) -> i64 {
        self.frames.last().map_or(0, |f| f.time)
    }

    fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// The last frame at or before `time`.
    fn frame_at(&self, time: i64) -> Option<Vec<Option<f64>>> {
        if time < self.min_time() || time > self.max_time() {
            return None;
        }
        let index = self.frames.partition_point(|f| f.time <= time);
        index
            .checked_sub(1)
            .and_then(|i| self.frames.get(i))
            .map(|f| f.values.clone())
    }
}
