//! Trailing-edge rate limiter.
//!
//! Used for the cheap-but-frequent side effects of a render tick: the first
//! call of a burst opens a window, further calls inside the window are
//! folded into it, and the effect runs once when the window closes. The
//! result is at most one run per interval and always one run after the burst.
//!
//! There is no timer here. The owner reports calls with [`Throttle::call`]
//! and asks [`Throttle::poll`] whether a window has closed, using whatever
//! [`Clock`](crate::sync::Clock) it runs on.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    deadline: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register a call at `now`.
    ///
    /// Returns `true` when the effect should run right away, which only
    /// happens if an open window has already expired.
    pub fn call(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            Some(_) => false,
            None => {
                self.deadline = Some(now + self.interval);
                false
            }
        }
    }

    /// Returns `true` once when the pending window has closed by `now`.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending call will be due, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
