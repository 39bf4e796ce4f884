//! A stand-in video element.
//!
//! [`SimulatedVideo`] keeps a media position that advances with a [`Clock`]
//! while playing, the same way a decoded video would, so the session can be
//! exercised with a video-driven time source without any decoding.

use std::rc::Rc;
use std::time::Duration;

use crate::sync::{Clock, VideoSource};

pub struct SimulatedVideo {
    clock: Rc<dyn Clock>,
    duration: f64,
    rate: f64,
    playing: bool,
    /// Media position at `anchor_at`
    anchor_position: f64,
    anchor_at: Duration,
}

impl SimulatedVideo {
    /// A paused video of `duration` seconds positioned at its start.
    pub fn new(clock: Rc<dyn Clock>, duration: f64) -> Self {
        let anchor_at = clock.now();
        Self {
            clock,
            duration: duration.max(0.0),
            rate: 1.0,
            playing: false,
            anchor_position: 0.0,
            anchor_at,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn reanchor(&mut self) {
        self.anchor_position = self.current_time();
        self.anchor_at = self.clock.now();
    }
}

impl VideoSource for SimulatedVideo {
    fn current_time(&self) -> f64 {
        if !self.playing {
            return self.anchor_position;
        }
        let elapsed = self.clock.now().saturating_sub(self.anchor_at).as_secs_f64();
        (self.anchor_position + elapsed * self.rate).clamp(0.0, self.duration)
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.anchor_position = seconds.clamp(0.0, self.duration);
        self.anchor_at = self.clock.now();
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }

    fn play(&mut self) {
        if !self.playing {
            self.reanchor();
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        if self.playing {
            self.reanchor();
            self.playing = false;
        }
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.reanchor();
        self.rate = rate;
    }
}
