//! Log/video time synchronization and playback scheduling.
//!
//! Everything here is single-threaded and clock-injected, so the same code
//! runs under a terminal host, a headless simulation and unit tests.
//!
//! # Architecture
//!
//! - `time_domain`: log time (µs) ⇄ video time (s) mapping
//! - `playback`: the playback clock and its time source
//! - `scheduler`: one-frame-at-a-time render scheduling plus throttled updates
//! - `markers`, `controls`: in/out markers, rate and zoom bounds
//! - `presets`, `graph_config`, `layout`, `binding`: preset sets and how
//!   their changes reach the renderer and storage
//! - `session`: [`PlaybackSession`], the aggregate hosts talk to
//!
//! # Usage
//!
//! ```no_run
//! use flightsync::sync::PlaybackSession;
//!
//! // Host loop body: run a fired frame, then deliver timers and preset events.
//! fn on_frame(session: &mut PlaybackSession) {
//!     session.on_animation_frame();
//!     session.poll_timers();
//!     session.pump_events();
//! }
//! ```

pub mod binding;
pub mod clock;
pub mod collaborators;
pub mod controls;
pub mod graph_config;
pub mod layout;
pub mod markers;
pub mod playback;
pub mod presets;
pub mod scheduler;
pub mod session;
mod throttle;
pub mod time_domain;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collaborators::{
    FieldTable, FrameRequester, LogSource, PresetStorage, Renderer, SeekBar, VideoSource,
};
pub use controls::PercentControl;
pub use graph_config::{GraphConfig, GraphDefinition, GraphPreset};
pub use layout::LayoutConfig;
pub use markers::RangeMarker;
pub use playback::{PlaybackClock, PlaybackState};
pub use presets::{Preset, PresetEvent, PresetSet};
pub use scheduler::RenderScheduler;
pub use session::{Collaborators, ExportRequest, PlaybackSession, SessionSettings};
pub use throttle::Throttle;
pub use time_domain::{format_offset, parse_offset, LogTimeRange, TimeDomain};
