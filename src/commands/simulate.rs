//! Simulate command handler
//!
//! Prints one `tick<TAB>STATE<TAB>time` line per tick, time in microseconds.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Result};

use flightsync::headless::{simulate, SimulationOptions};
use flightsync::Config;

use crate::cli::SimulateArgs;

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &SimulateArgs) -> Result<()> {
    if args.tick_ms == 0 {
        bail!("Tick length must be at least 1 ms");
    }

    let config = Config::load()?;
    let log = super::load_log(&args.log)?;
    let options = SimulationOptions {
        ticks: args.ticks,
        tick: Duration::from_millis(args.tick_ms),
        rate: args.rate,
        video: super::video_options(&args.video)?,
    };

    let records = simulate(log, config.session_settings(), &options);

    let mut out = io::stdout().lock();
    for record in records {
        writeln!(out, "{}", record)?;
    }
    out.flush()?;
    Ok(())
}
