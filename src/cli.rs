//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// Dev builds carry the commit hash, release builds only the date
#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("FLIGHTSYNC_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FLIGHTSYNC_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "flightsync")]
#[command(version = VERSION)]
#[command(about = "Play flight logs in sync with onboard video")]
#[command(
    long_about = "Plays a flight telemetry log as scrolling graphs in the terminal, \
optionally locked to a video through an adjustable time offset.\n\n\
Set RUST_LOG (e.g. RUST_LOG=flightsync=debug) for diagnostics on stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a log in the terminal
    Play(PlayArgs),

    /// Run playback headless and print the log time after every tick
    Simulate(SimulateArgs),

    /// Inspect the configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Where the log comes from.
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// CSV log to play (first column is time in microseconds)
    #[arg(long, value_name = "FILE", conflicts_with = "duration")]
    pub log: Option<PathBuf>,

    /// Length in seconds of the generated log used when no file is given
    #[arg(long, default_value_t = 60.0)]
    pub duration: f64,
}

/// Simulated video to sync against.
#[derive(Args, Debug, Clone)]
pub struct VideoArgs {
    /// Length of the video in seconds; enables video-driven playback
    #[arg(long, value_name = "SECONDS")]
    pub video_duration: Option<f64>,

    /// Seconds of video before the log starts (may be negative)
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true, default_value_t = 0.0)]
    pub video_offset: f64,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub video: VideoArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub video: VideoArgs,

    /// Number of ticks to run
    #[arg(long, default_value_t = 10)]
    pub ticks: u32,

    /// Wall time per tick in milliseconds
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Playback rate in percent (overrides the configured default)
    #[arg(long)]
    pub rate: Option<u32>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration as TOML
    Show,

    /// Print the configuration file path
    Path,
}
