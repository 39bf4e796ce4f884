//! Play command handler

use anyhow::Result;

use flightsync::player::play_session;
use flightsync::Config;

use crate::cli::PlayArgs;

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs) -> Result<()> {
    let config = Config::load()?;
    let log = super::load_log(&args.log)?;
    let video = super::video_options(&args.video)?;
    play_session(log, video, &config)
}
