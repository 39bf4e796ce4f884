//! Subcommand handlers

pub mod config;
pub mod play;
pub mod simulate;

use std::rc::Rc;

use anyhow::{bail, Context, Result};
use tracing::info;

use flightsync::log::{CsvLog, SyntheticLog};
use flightsync::player::VideoOptions;
use flightsync::sync::LogSource;

use crate::cli::{LogArgs, VideoArgs};

/// Load the log file, or generate one when no file was given.
fn load_log(args: &LogArgs) -> Result<Rc<dyn LogSource>> {
    match &args.log {
        Some(path) => {
            let log = CsvLog::parse(path)
                .with_context(|| format!("Failed to load log {:?}", path))?;
            info!(frames = log.frame_count(), "loaded {:?}", path);
            Ok(Rc::new(log))
        }
        None => {
            if !args.duration.is_finite() || args.duration <= 0.0 {
                bail!("Log duration must be a positive number of seconds");
            }
            Ok(Rc::new(SyntheticLog::new(args.duration)))
        }
    }
}

fn video_options(args: &VideoArgs) -> Result<Option<VideoOptions>> {
    let Some(duration) = args.video_duration else {
        return Ok(None);
    };
    if !duration.is_finite() || duration <= 0.0 {
        bail!("Video duration must be a positive number of seconds");
    }
    if !args.video_offset.is_finite() {
        bail!("Video offset must be a finite number of seconds");
    }
    Ok(Some(VideoOptions {
        duration,
        offset: args.video_offset,
    }))
}
