//! Cooperative render scheduling.
//!
//! Keeps at most one animation frame outstanding and rate-limits the side
//! effects of a tick. The tick itself lives in
//! [`PlaybackSession::on_animation_frame`](crate::sync::PlaybackSession::on_animation_frame);
//! this type only tracks what is scheduled and what is due.

use std::time::Duration;

use tracing::trace;

use crate::sync::collaborators::FrameRequester;
use crate::sync::throttle::Throttle;

/// Minimum spacing of seek bar repaints while playing.
pub const SEEK_BAR_REPAINT_INTERVAL: Duration = Duration::from_millis(200);
/// Minimum spacing of field value table updates.
pub const FIELD_VALUES_INTERVAL: Duration = Duration::from_millis(250);

/// Side effects whose rate-limit window has closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueEffects {
    pub seek_bar_repaint: bool,
    pub field_values: bool,
}

impl DueEffects {
    pub fn any(&self) -> bool {
        self.seek_bar_repaint || self.field_values
    }
}

pub struct RenderScheduler {
    frames: Box<dyn FrameRequester>,
    frame_queued: bool,
    seek_bar_repaint: Throttle,
    field_values: Throttle,
    render_count: u64,
}

impl RenderScheduler {
    pub fn new(frames: Box<dyn FrameRequester>) -> Self {
        Self::with_intervals(frames, SEEK_BAR_REPAINT_INTERVAL, FIELD_VALUES_INTERVAL)
    }

    pub fn with_intervals(
        frames: Box<dyn FrameRequester>,
        seek_bar_repaint: Duration,
        field_values: Duration,
    ) -> Self {
        Self {
            frames,
            frame_queued: false,
            seek_bar_repaint: Throttle::new(seek_bar_repaint),
            field_values: Throttle::new(field_values),
            render_count: 0,
        }
    }

    /// Request a tick. Does nothing when one is already queued.
    ///
    /// Returns `true` if a frame was requested.
    pub fn invalidate(&mut self) -> bool {
        if self.frame_queued {
            return false;
        }
        self.frame_queued = true;
        self.frames.request_animation_frame();
        true
    }

    pub fn is_frame_queued(&self) -> bool {
        self.frame_queued
    }

    /// Keep the loop running: queue the next frame from inside a tick.
    pub fn reschedule(&mut self) {
        self.frame_queued = true;
        self.frames.request_animation_frame();
    }

    /// End the loop after the current tick.
    pub fn finish_frame(&mut self) {
        self.frame_queued = false;
    }

    pub fn record_render(&mut self) {
        self.render_count += 1;
        trace!(renders = self.render_count, "graph rendered");
    }

    /// Number of graph renders so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Report a field value update request. `true` means run it now.
    pub fn throttle_field_values(&mut self, now: Duration) -> bool {
        self.field_values.call(now)
    }

    /// Report a seek bar repaint request. `true` means run it now.
    pub fn throttle_seek_bar_repaint(&mut self, now: Duration) -> bool {
        self.seek_bar_repaint.call(now)
    }

    /// Collect trailing calls whose window has closed by `now`.
    pub fn poll(&mut self, now: Duration) -> DueEffects {
        DueEffects {
            seek_bar_repaint: self.seek_bar_repaint.poll(now),
            field_values: self.field_values.poll(now),
        }
    }

    /// Earliest time a pending trailing call becomes due.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.seek_bar_repaint.deadline(), self.field_values.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::testing::CountingFrames;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn invalidate_twice_requests_one_frame() {
        let (frames, count) = CountingFrames::new();
        let mut scheduler = RenderScheduler::new(Box::new(frames));

        assert!(scheduler.invalidate());
        assert!(!scheduler.invalidate());
        assert_eq!(count.get(), 1);
        assert!(scheduler.is_frame_queued());
    }

    #[test]
    fn invalidate_after_finish_requests_again() {
        let (frames, count) = CountingFrames::new();
        let mut scheduler = RenderScheduler::new(Box::new(frames));

        scheduler.invalidate();
        scheduler.finish_frame();
        assert!(!scheduler.is_frame_queued());

        assert!(scheduler.invalidate());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn reschedule_keeps_frame_queued() {
        let (frames, count) = CountingFrames::new();
        let mut scheduler = RenderScheduler::new(Box::new(frames));

        scheduler.invalidate();
        scheduler.reschedule();
        assert!(scheduler.is_frame_queued());
        assert!(!scheduler.invalidate());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn next_deadline_is_earliest_pending() {
        let (frames, _count) = CountingFrames::new();
        let mut scheduler = RenderScheduler::new(Box::new(frames));
        assert_eq!(scheduler.next_deadline(), None);

        scheduler.throttle_field_values(ms(0));
        assert_eq!(scheduler.next_deadline(), Some(ms(250)));

        scheduler.throttle_seek_bar_repaint(ms(10));
        assert_eq!(scheduler.next_deadline(), Some(ms(210)));
    }

    #[test]
    fn poll_reports_due_effects_once() {
        let (frames, _count) = CountingFrames::new();
        let mut scheduler = RenderScheduler::new(Box::new(frames));
        scheduler.throttle_field_values(ms(0));
        scheduler.throttle_seek_bar_repaint(ms(0));

        let due = scheduler.poll(ms(220));
        assert!(due.seek_bar_repaint);
        assert!(!due.field_values);

        let due = scheduler.poll(ms(260));
        assert_eq!(
            due,
            DueEffects {
                seek_bar_repaint: false,
                field_values: true
            }
        );
        assert!(!scheduler.poll(ms(1000)).any());
    }
}
