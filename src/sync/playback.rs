//! Playback clock.
//!
//! Owns the authoritative current log time and the PAUSED/PLAYING state.
//! Time comes from one of two sources: integration of wall-clock deltas when
//! only a log is loaded, or the attached video's own position.

use std::time::Duration;

use tracing::{debug, info};

use crate::sync::collaborators::VideoSource;
use crate::sync::controls::PLAYBACK_DEFAULT_RATE;
use crate::sync::time_domain::{LogTimeRange, TimeDomain, MICROS_PER_SECOND};

/// Whether playback is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

impl PlaybackState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paused => "PAUSED",
            Self::Playing => "PLAYING",
        }
    }
}

/// Where the current time comes from.
pub enum TimeSource {
    /// Integrate wall-clock deltas scaled by the playback rate.
    LogDriven,
    /// Read the video's position on every tick.
    VideoDriven(Box<dyn VideoSource>),
}

/// Result of advancing the clock by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Integration passed the end of the log; time was clamped and playback
    /// paused.
    ReachedEnd,
}

/// Two-state playback clock.
pub struct PlaybackClock {
    state: PlaybackState,
    current_time: i64,
    /// Wall time of the previous integration step
    last_tick: Option<Duration>,
    /// Playback rate in percent
    rate: u32,
    domain: TimeDomain,
    range: Option<LogTimeRange>,
    source: TimeSource,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(PLAYBACK_DEFAULT_RATE)
    }
}

impl PlaybackClock {
    pub fn new(rate: u32) -> Self {
        Self {
            state: PlaybackState::Paused,
            current_time: 0,
            last_tick: None,
            rate,
            domain: TimeDomain::default(),
            range: None,
            source: TimeSource::LogDriven,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current log time in microseconds.
    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    pub fn range(&self) -> Option<LogTimeRange> {
        self.range
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn domain(&self) -> &TimeDomain {
        &self.domain
    }

    pub fn has_video(&self) -> bool {
        matches!(self.source, TimeSource::VideoDriven(_))
    }

    /// Current video position in seconds.
    pub fn video_time(&self) -> Option<f64> {
        match &self.source {
            TimeSource::VideoDriven(video) => Some(video.current_time()),
            TimeSource::LogDriven => None,
        }
    }

    pub fn video_duration(&self) -> Option<f64> {
        match &self.source {
            TimeSource::VideoDriven(video) => video.duration(),
            TimeSource::LogDriven => None,
        }
    }

    /// Use a new log's bounds. Starts at the beginning of the log, or at the
    /// video's position when a video is attached.
    pub fn set_range(&mut self, range: LogTimeRange) {
        self.range = Some(range);
        if self.has_video() {
            self.sync_to_video();
        } else {
            self.current_time = range.min;
        }
    }

    /// Make `video` the time source. The current playback rate is applied to
    /// it and playback is paused. Returns the previously attached video.
    pub fn attach_video(
        &mut self,
        mut video: Box<dyn VideoSource>,
        now: Duration,
    ) -> Option<Box<dyn VideoSource>> {
        video.set_playback_rate(self.rate as f64 / 100.0);
        let previous = std::mem::replace(&mut self.source, TimeSource::VideoDriven(video));
        info!("video attached, time now follows the video");
        self.set_state(PlaybackState::Paused, now);
        self.sync_to_video();

        match previous {
            TimeSource::VideoDriven(old) => Some(old),
            TimeSource::LogDriven => None,
        }
    }

    /// Return to log-driven time.
    pub fn detach_video(&mut self) -> Option<Box<dyn VideoSource>> {
        match std::mem::replace(&mut self.source, TimeSource::LogDriven) {
            TimeSource::VideoDriven(video) => {
                info!("video detached");
                Some(video)
            }
            TimeSource::LogDriven => None,
        }
    }

    /// Switch state. The integration reference restarts at `now` so a long
    /// pause does not turn into a jump.
    pub fn set_state(&mut self, state: PlaybackState, now: Duration) {
        if self.state != state {
            debug!(state = state.label(), time = self.current_time, "playback state change");
        }
        self.state = state;
        self.last_tick = Some(now);

        if let TimeSource::VideoDriven(video) = &mut self.source {
            match state {
                PlaybackState::Playing => video.play(),
                PlaybackState::Paused => video.pause(),
            }
        }
    }

    /// Recompute the current time for a tick at `now`.
    pub fn advance(&mut self, now: Duration) -> TickOutcome {
        let Some(range) = self.range else {
            return TickOutcome::Continue;
        };
        let mut outcome = TickOutcome::Continue;

        if let Some(media) = self.video_time() {
            self.current_time = self.domain.to_log_time(media, &range);
        } else if self.is_playing() {
            let delta = match self.last_tick {
                Some(last) => integrate(now.saturating_sub(last), self.rate),
                None => 0,
            };
            self.current_time += delta;

            if self.current_time > range.max {
                self.current_time = range.max;
                info!(time = range.max, "reached end of log, pausing");
                self.set_state(PlaybackState::Paused, now);
                outcome = TickOutcome::ReachedEnd;
            }
        }

        if self.is_playing() {
            self.last_tick = Some(now);
        }
        outcome
    }

    /// Move to `target` log time.
    ///
    /// With a video attached the video is repositioned and the time is read
    /// back from it. The target is not clamped to the log range.
    pub fn seek_to(&mut self, target: i64) {
        match (&mut self.source, self.range) {
            (TimeSource::VideoDriven(video), Some(range)) => {
                video.set_current_time(self.domain.to_media_time(target, &range));
                self.sync_to_video();
            }
            _ => self.current_time = target,
        }
    }

    /// Move the video to `seconds` and follow it. No-op without a video.
    pub fn seek_video(&mut self, seconds: f64) -> bool {
        let TimeSource::VideoDriven(video) = &mut self.source else {
            return false;
        };
        video.set_current_time(seconds);
        self.sync_to_video();
        true
    }

    /// Set the playback rate in percent. Range checks are the caller's job.
    pub fn set_rate(&mut self, rate: u32) {
        self.rate = rate;
        if let TimeSource::VideoDriven(video) = &mut self.source {
            video.set_playback_rate(rate as f64 / 100.0);
        }
    }

    /// Change the video offset. The current time only follows on the next
    /// synchronization.
    pub fn set_video_offset(&mut self, offset: f64) {
        self.domain.set_offset(offset);
    }

    fn sync_to_video(&mut self) {
        if let (Some(range), Some(media)) = (self.range, self.video_time()) {
            self.current_time = self.domain.to_log_time(media, &range);
        }
    }
}

/// Log microseconds covered by `elapsed` wall time at `rate` percent.
fn integrate(elapsed: Duration, rate: u32) -> i64 {
    (elapsed.as_micros() as f64 * rate as f64 / 100.0).floor() as i64
}

/// Microseconds of log time as seconds of media time.
pub(crate) fn micros_to_seconds(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_SECOND
}
