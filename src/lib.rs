//! flightsync - keep a flight log and its onboard video in step
//!
//! The core lives in [`sync`]: a playback session that maps log time to
//! video time, drives playback from either source and schedules rendering
//! one frame at a time. The remaining modules supply concrete collaborators
//! for the command-line tool.

pub mod config;
pub mod headless;
pub mod log;
pub mod player;
pub mod storage;
pub mod sync;
pub mod video;

pub use config::Config;
pub use storage::{FilePresetStorage, MemoryPresetStorage, StorageError};
pub use sync::{PlaybackSession, PlaybackState, SessionSettings};
