//! The playback session: one owned aggregate for everything that has to
//! agree on "where we are".
//!
//! The session owns the playback clock, in/out markers, rate and zoom
//! controls, preset sets and the boxed collaborators. Hosts drive it with
//! three calls:
//!
//! - [`on_animation_frame`](PlaybackSession::on_animation_frame) whenever a
//!   requested frame fires
//! - [`poll_timers`](PlaybackSession::poll_timers) to deliver trailing
//!   rate-limited updates
//! - [`pump_events`](PlaybackSession::pump_events) to apply preset changes

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::sync::binding::{
    apply_graph_preset, BindingTargets, PresetBinding, GRAPH_PRESETS_KEY, LAYOUT_PRESETS_KEY,
};
use crate::sync::clock::Clock;
use crate::sync::collaborators::{
    FieldTable, FrameRequester, LogSource, PresetStorage, Renderer, SeekBar, VideoSource,
};
use crate::sync::controls::{
    PercentControl, GRAPH_DEFAULT_ZOOM, GRAPH_ZOOM_STEP, PLAYBACK_DEFAULT_RATE, PLAYBACK_RATE_STEP,
};
use crate::sync::graph_config::{GraphConfig, GraphPreset};
use crate::sync::layout::{default_layout, fix_up, LayoutConfig};
use crate::sync::markers::RangeMarker;
use crate::sync::playback::{micros_to_seconds, PlaybackClock, PlaybackState};
use crate::sync::presets::{Preset, PresetSet};
use crate::sync::scheduler::{RenderScheduler, FIELD_VALUES_INTERVAL, SEEK_BAR_REPAINT_INTERVAL};
use crate::sync::time_domain::{format_offset, parse_offset, LogTimeRange};

/// Small jump length for the back/forward buttons, in microseconds.
pub const SMALL_JUMP_TIME: i64 = 100 * 1000;

/// Tunables of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Initial playback rate in percent
    pub playback_rate: u32,
    pub rate_step: u32,
    /// Initial graph zoom in percent
    pub graph_zoom: u32,
    pub zoom_step: u32,
    /// Back/forward jump in microseconds
    pub small_jump: i64,
    /// Video offset nudges are 1/`sync_step_fps` seconds
    pub sync_step_fps: f64,
    pub seek_bar_repaint: Duration,
    pub field_values: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            playback_rate: PLAYBACK_DEFAULT_RATE,
            rate_step: PLAYBACK_RATE_STEP,
            graph_zoom: GRAPH_DEFAULT_ZOOM,
            zoom_step: GRAPH_ZOOM_STEP,
            small_jump: SMALL_JUMP_TIME,
            sync_step_fps: 15.0,
            seek_bar_repaint: SEEK_BAR_REPAINT_INTERVAL,
            field_values: FIELD_VALUES_INTERVAL,
        }
    }
}

/// External capabilities handed to a session.
pub struct Collaborators {
    pub clock: Rc<dyn Clock>,
    pub frames: Box<dyn FrameRequester>,
    pub renderer: Box<dyn Renderer>,
    pub seek_bar: Box<dyn SeekBar>,
    pub field_table: Box<dyn FieldTable>,
    pub storage: Box<dyn PresetStorage>,
}

/// Parameters for the video exporter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRequest {
    pub in_time: i64,
    pub out_time: i64,
    pub video_offset: f64,
    pub has_video: bool,
}

pub struct PlaybackSession {
    settings: SessionSettings,
    clock: Rc<dyn Clock>,
    scheduler: RenderScheduler,
    playback: PlaybackClock,
    markers: RangeMarker,
    rate: PercentControl,
    zoom: PercentControl,
    log: Option<Rc<dyn LogSource>>,
    renderer: Box<dyn Renderer>,
    seek_bar: Box<dyn SeekBar>,
    field_table: Box<dyn FieldTable>,
    graph_presets: PresetSet<GraphPreset>,
    layout_presets: PresetSet<LayoutConfig>,
    graph_config: GraphConfig,
    binding: PresetBinding,
}

impl PlaybackSession {
    /// Create a session. Preset sets start with a "Default" entry and are
    /// then replaced by whatever the storage holds.
    pub fn new(settings: SessionSettings, collaborators: Collaborators) -> Self {
        let Collaborators {
            clock,
            frames,
            mut renderer,
            seek_bar,
            field_table,
            storage,
        } = collaborators;

        let mut rate = PercentControl::playback_rate().with_step(settings.rate_step);
        if !rate.set(settings.playback_rate) {
            warn!(rate = settings.playback_rate, "configured playback rate out of range, using default");
        }
        let mut zoom = PercentControl::graph_zoom().with_step(settings.zoom_step);
        if !zoom.set(settings.graph_zoom) {
            warn!(zoom = settings.graph_zoom, "configured graph zoom out of range, using default");
        }

        let mut graph_presets = PresetSet::new();
        graph_presets.add(Preset::new("Default", GraphPreset::example()), true);
        PresetBinding::restore(storage.as_ref(), GRAPH_PRESETS_KEY, &mut graph_presets);

        let template = default_layout();
        let mut layout_presets = PresetSet::new();
        layout_presets.set_validator(move |preset: &mut Preset<LayoutConfig>| {
            fix_up(&mut preset.content, &template)
        });
        layout_presets.add(Preset::new("Default", default_layout()), true);
        PresetBinding::restore(storage.as_ref(), LAYOUT_PRESETS_KEY, &mut layout_presets);

        let binding = PresetBinding::attach(&mut graph_presets, &mut layout_presets, storage);

        if let Some(layout) = layout_presets.active() {
            renderer.set_display_config(&layout.content);
        }
        renderer.set_graph_zoom(zoom.factor());

        let scheduler =
            RenderScheduler::with_intervals(frames, settings.seek_bar_repaint, settings.field_values);
        let playback = PlaybackClock::new(rate.value());

        Self {
            settings,
            clock,
            scheduler,
            playback,
            markers: RangeMarker::new(),
            rate,
            zoom,
            log: None,
            renderer,
            seek_bar,
            field_table,
            graph_presets,
            layout_presets,
            graph_config: GraphConfig::new(),
            binding,
        }
    }

    // === Render loop ===

    /// Request one more tick. Idempotent while a tick is pending.
    pub fn invalidate(&mut self) {
        self.scheduler.invalidate();
    }

    pub fn is_frame_queued(&self) -> bool {
        self.scheduler.is_frame_queued()
    }

    /// One tick: synchronize time, render, then run rate-limited updates.
    /// Keeps itself scheduled while playing.
    pub fn on_animation_frame(&mut self) {
        let now = self.clock.now();

        if self.log.is_none() {
            self.scheduler.finish_frame();
            return;
        }

        self.playback.advance(now);
        let time = self.playback.current_time();

        self.renderer.render(time);
        self.scheduler.record_render();
        self.seek_bar.set_current_time(time);

        if self.scheduler.throttle_field_values(now) {
            self.show_field_values();
        }

        if self.playback.is_playing() {
            if self.scheduler.throttle_seek_bar_repaint(now) {
                self.seek_bar.repaint();
            }
            self.scheduler.reschedule();
        } else {
            self.seek_bar.repaint();
            self.scheduler.finish_frame();
        }
    }

    /// Deliver trailing updates whose rate-limit window has closed.
    pub fn poll_timers(&mut self) {
        let due = self.scheduler.poll(self.clock.now());
        if due.field_values {
            self.show_field_values();
        }
        if due.seek_bar_repaint {
            self.seek_bar.repaint();
        }
    }

    /// How long until [`poll_timers`](Self::poll_timers) has work to do.
    pub fn time_until_next_deadline(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Apply pending preset notifications.
    pub fn pump_events(&mut self) {
        let field_names = self
            .log
            .as_ref()
            .map(|log| log.field_names())
            .unwrap_or(&[]);

        let needs_redraw = self.binding.process(BindingTargets {
            graph_presets: &self.graph_presets,
            layout_presets: &self.layout_presets,
            graph_config: &mut self.graph_config,
            field_names,
            renderer: &mut *self.renderer,
        });

        if needs_redraw {
            self.invalidate();
        }
    }

    /// Number of graph renders so far.
    pub fn render_count(&self) -> u64 {
        self.scheduler.render_count()
    }

    // === Media ===

    /// Show `log`. Clears in/out markers, adapts the active graph preset to
    /// the log's fields, rewinds to the start (or follows the video) and
    /// pauses.
    pub fn select_log(&mut self, log: Rc<dyn LogSource>) {
        let range = log.range();
        info!(
            min = range.min,
            max = range.max,
            fields = log.field_names().len(),
            "log selected"
        );
        self.log = Some(log);

        self.set_video_in_time(None);
        self.set_video_out_time(None);

        self.playback.set_range(range);

        let field_names = self
            .log
            .as_ref()
            .map(|log| log.field_names())
            .unwrap_or(&[]);
        apply_graph_preset(
            &self.graph_presets,
            &mut self.graph_config,
            field_names,
            &mut *self.renderer,
        );
        if let Some(layout) = self.layout_presets.active() {
            self.renderer.set_display_config(&layout.content);
        }

        self.seek_bar
            .set_time_range(range, self.playback.current_time());
        self.seek_bar.repaint();

        self.set_state(PlaybackState::Paused);
        self.renderer.set_graph_zoom(self.zoom.factor());
        self.invalidate();
    }

    pub fn has_log(&self) -> bool {
        self.log.is_some()
    }

    pub fn log(&self) -> Option<&Rc<dyn LogSource>> {
        self.log.as_ref()
    }

    pub fn log_range(&self) -> Option<LogTimeRange> {
        self.playback.range()
    }

    /// Make `video` the time source. Returns the previously attached one.
    pub fn attach_video(&mut self, video: Box<dyn VideoSource>) -> Option<Box<dyn VideoSource>> {
        let previous = self.playback.attach_video(video, self.clock.now());
        self.invalidate();
        previous
    }

    pub fn detach_video(&mut self) -> Option<Box<dyn VideoSource>> {
        let video = self.playback.detach_video();
        self.invalidate();
        video
    }

    pub fn has_video(&self) -> bool {
        self.playback.has_video()
    }

    pub fn video_time(&self) -> Option<f64> {
        self.playback.video_time()
    }

    // === Transport ===

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn set_state(&mut self, state: PlaybackState) {
        self.playback.set_state(state, self.clock.now());
        self.invalidate();
    }

    pub fn toggle_play_pause(&mut self) {
        let next = match self.state() {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        };
        self.set_state(next);
    }

    /// Current log time in microseconds.
    pub fn current_time(&self) -> i64 {
        self.playback.current_time()
    }

    /// Seek to `time`. Not clamped to the log range.
    pub fn set_current_time(&mut self, time: i64) {
        self.playback.seek_to(time);
        self.invalidate();
    }

    /// Seek requested by dragging the graph. The drag distance is doubled.
    pub fn seek_by_graph_drag(&mut self, offset: i64) {
        let offset = offset.saturating_mul(2);
        match self.playback.video_time() {
            Some(media) => {
                self.playback.seek_video(media + micros_to_seconds(offset));
            }
            None => self.playback.seek_to(self.playback.current_time().saturating_add(offset)),
        }
        self.invalidate();
    }

    pub fn jump_back(&mut self) {
        self.jump_by(-self.settings.small_jump);
    }

    pub fn jump_forward(&mut self) {
        self.jump_by(self.settings.small_jump);
    }

    pub fn jump_to_log_start(&mut self) {
        if let Some(range) = self.playback.range() {
            self.set_current_time(range.min);
            self.set_state(PlaybackState::Paused);
        }
    }

    pub fn jump_to_log_end(&mut self) {
        if let Some(range) = self.playback.range() {
            self.set_current_time(range.max);
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Rewind the video to its start. No-op without a video.
    pub fn jump_to_video_start(&mut self) -> bool {
        if !self.playback.seek_video(0.0) {
            return false;
        }
        self.set_state(PlaybackState::Paused);
        true
    }

    /// Move to the video's last frame. No-op without a video or while its
    /// duration is unknown.
    pub fn jump_to_video_end(&mut self) -> bool {
        let Some(duration) = self
            .playback
            .video_duration()
            .filter(|d| d.is_finite() && *d > 0.0)
        else {
            return false;
        };
        self.playback.seek_video(duration);
        self.set_state(PlaybackState::Paused);
        true
    }

    fn jump_by(&mut self, delta: i64) {
        match self.playback.video_time() {
            Some(media) => {
                self.playback.seek_video(media + micros_to_seconds(delta));
            }
            None => self.playback.seek_to(self.playback.current_time().saturating_add(delta)),
        }
        self.set_state(PlaybackState::Paused);
    }

    // === Video offset ===

    pub fn video_offset(&self) -> f64 {
        self.playback.domain().offset()
    }

    /// Offset formatted for display, e.g. `+1.5` or `-0.07`.
    pub fn video_offset_label(&self) -> String {
        format_offset(self.video_offset())
    }

    pub fn set_video_offset(&mut self, offset: f64) {
        self.playback.set_video_offset(offset);
        debug!(offset = %format_offset(offset), "video offset changed");
        self.invalidate();
    }

    /// Set the offset from user-typed text. Unparsable text keeps the
    /// previous offset and returns `false`.
    pub fn set_video_offset_text(&mut self, text: &str) -> bool {
        match parse_offset(text) {
            Some(offset) => {
                self.playback.set_video_offset(offset);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    /// Shift the offset by one sync step (1/fps seconds) in `direction`.
    pub fn nudge_video_offset(&mut self, direction: i32) {
        let step = 1.0 / self.settings.sync_step_fps;
        self.set_video_offset(self.video_offset() + direction.signum() as f64 * step);
    }

    /// Align the log start with the video's current position.
    pub fn sync_video_here(&mut self) -> bool {
        let Some(media) = self.playback.video_time() else {
            return false;
        };
        self.set_video_offset(media);
        true
    }

    // === In/out markers ===

    pub fn markers(&self) -> RangeMarker {
        self.markers
    }

    pub fn set_video_in_time(&mut self, time: Option<i64>) {
        self.markers.set_in_time(time);
        self.seek_bar.set_in_time(time);
        self.renderer.set_in_time(time);
        self.invalidate();
    }

    pub fn set_video_out_time(&mut self, time: Option<i64>) {
        self.markers.set_out_time(time);
        self.seek_bar.set_out_time(time);
        self.renderer.set_out_time(time);
        self.invalidate();
    }

    /// Set the in-marker at the current time, or clear it if it is already
    /// there.
    pub fn toggle_video_in_time(&mut self) {
        let time = self.markers.toggled_in(self.current_time());
        self.set_video_in_time(time);
    }

    /// Out-marker counterpart of [`toggle_video_in_time`](Self::toggle_video_in_time).
    pub fn toggle_video_out_time(&mut self) {
        let time = self.markers.toggled_out(self.current_time());
        self.set_video_out_time(time);
    }

    /// Pause and describe the range to export. Absent markers fall back to
    /// the log's ends. `None` without a log.
    pub fn export_request(&mut self) -> Option<ExportRequest> {
        let range = self.playback.range()?;
        self.set_state(PlaybackState::Paused);
        let (in_time, out_time) = self.markers.export_bounds(&range);

        Some(ExportRequest {
            in_time,
            out_time,
            video_offset: self.video_offset(),
            has_video: self.has_video(),
        })
    }

    // === Rate and zoom ===

    pub fn playback_rate(&self) -> u32 {
        self.rate.value()
    }

    /// Set the playback rate in percent. Out-of-range values are ignored.
    pub fn set_playback_rate(&mut self, rate: u32) -> bool {
        if !self.rate.set(rate) {
            debug!(rate, "playback rate out of range, ignored");
            return false;
        }
        self.playback.set_rate(rate);
        true
    }

    pub fn step_playback_rate(&mut self, direction: i32) -> bool {
        match self.rate.stepped(direction) {
            Some(rate) => self.set_playback_rate(rate),
            None => false,
        }
    }

    pub fn graph_zoom(&self) -> u32 {
        self.zoom.value()
    }

    /// Set the graph zoom in percent. Out-of-range values are ignored.
    pub fn set_graph_zoom(&mut self, zoom: u32) -> bool {
        if !self.zoom.set(zoom) {
            debug!(zoom, "graph zoom out of range, ignored");
            return false;
        }
        self.renderer.set_graph_zoom(self.zoom.factor());
        self.invalidate();
        true
    }

    pub fn step_graph_zoom(&mut self, direction: i32) -> bool {
        match self.zoom.stepped(direction) {
            Some(zoom) => self.set_graph_zoom(zoom),
            None => false,
        }
    }

    // === Display ===

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.log.is_none() {
            return;
        }
        self.renderer.resize(width, height);
        self.seek_bar.resize(width, height);
        self.invalidate();
    }

    pub fn graph_config(&self) -> &GraphConfig {
        &self.graph_config
    }

    pub fn graph_presets(&self) -> &PresetSet<GraphPreset> {
        &self.graph_presets
    }

    /// Mutations publish events; call [`pump_events`](Self::pump_events)
    /// afterwards.
    pub fn graph_presets_mut(&mut self) -> &mut PresetSet<GraphPreset> {
        &mut self.graph_presets
    }

    pub fn layout_presets(&self) -> &PresetSet<LayoutConfig> {
        &self.layout_presets
    }

    /// Mutations publish events; call [`pump_events`](Self::pump_events)
    /// afterwards.
    pub fn layout_presets_mut(&mut self) -> &mut PresetSet<LayoutConfig> {
        &mut self.layout_presets
    }

    fn show_field_values(&mut self) {
        let Some(log) = &self.log else {
            return;
        };
        let time = self.playback.current_time();
        let frame = log.frame_at(time);
        self.field_table
            .show_values(time, log.field_names(), frame.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPresetStorage;
    use crate::sync::clock::ManualClock;
    use crate::sync::graph_config::GraphDefinition;
    use crate::sync::testing::{
        CountingFrames, FakeVideo, RampLog, RecordingFieldTable, RecordingRenderer,
        RecordingSeekBar, RendererLog, SeekBarLog, VideoState,
    };
    use std::cell::{Cell, RefCell};

    type FieldUpdates = Rc<RefCell<Vec<(i64, Option<Vec<Option<f64>>>)>>>;

    struct Fixture {
        session: PlaybackSession,
        clock: ManualClock,
        frames: Rc<Cell<usize>>,
        renderer: Rc<RefCell<RendererLog>>,
        seek_bar: Rc<RefCell<SeekBarLog>>,
        fields: FieldUpdates,
        storage: MemoryPresetStorage,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_storage(MemoryPresetStorage::new())
        }

        fn with_storage(storage: MemoryPresetStorage) -> Self {
            let clock = ManualClock::new();
            let (frames, frame_count) = CountingFrames::new();
            let (renderer, renderer_log) = RecordingRenderer::new();
            let (seek_bar, seek_bar_log) = RecordingSeekBar::new();
            let (field_table, fields) = RecordingFieldTable::new();

            let session = PlaybackSession::new(
                SessionSettings::default(),
                Collaborators {
                    clock: Rc::new(clock.clone()),
                    frames: Box::new(frames),
                    renderer: Box::new(renderer),
                    seek_bar: Box::new(seek_bar),
                    field_table: Box::new(field_table),
                    storage: Box::new(storage.clone()),
                },
            );

            Self {
                session,
                clock,
                frames: frame_count,
                renderer: renderer_log,
                seek_bar: seek_bar_log,
                fields,
                storage,
            }
        }

        /// Fixture with a ten second log selected and its first frame drawn.
        fn with_log() -> Self {
            let mut fx = Self::new();
            fx.session.select_log(Rc::new(RampLog::new(0, 10_000_000)));
            fx.session.on_animation_frame();
            fx
        }

        fn tick_after(&mut self, ms: u64) {
            self.clock.advance(Duration::from_millis(ms));
            self.session.on_animation_frame();
        }

        fn attach_video(&mut self, duration: f64) -> Rc<RefCell<VideoState>> {
            let (video, state) = FakeVideo::new(Some(duration));
            self.session.attach_video(Box::new(video));
            state
        }
    }

    #[test]
    fn new_session_is_paused_with_default_presets() {
        let fx = Fixture::new();
        assert_eq!(fx.session.state(), PlaybackState::Paused);
        assert!(!fx.session.has_log());
        assert_eq!(fx.session.playback_rate(), 100);
        assert_eq!(fx.session.graph_zoom(), 100);
        assert_eq!(fx.session.graph_presets().active().map(|p| p.name.as_str()), Some("Default"));
        assert_eq!(fx.session.layout_presets().len(), 1);
        assert_eq!(fx.renderer.borrow().zooms, vec![1.0]);
    }

    #[test]
    fn tick_without_log_does_nothing() {
        let mut fx = Fixture::new();
        fx.session.invalidate();
        fx.session.on_animation_frame();
        assert!(fx.renderer.borrow().renders.is_empty());
        assert!(!fx.session.is_frame_queued());
    }

    #[test]
    fn select_log_rewinds_pauses_and_clears_markers() {
        let mut fx = Fixture::with_log();
        fx.session.set_current_time(4_000_000);
        fx.session.toggle_video_in_time();

        fx.session.select_log(Rc::new(RampLog::new(2_000_000, 3_000_000)));

        assert_eq!(fx.session.current_time(), 2_000_000);
        assert_eq!(fx.session.state(), PlaybackState::Paused);
        assert_eq!(fx.session.markers().in_time(), None);
        assert_eq!(fx.seek_bar.borrow().in_times.last(), Some(&None));
        assert_eq!(
            fx.seek_bar.borrow().ranges.last(),
            Some(&(LogTimeRange::new(2_000_000, 3_000_000), 2_000_000))
        );
    }

    #[test]
    fn select_log_adapts_graphs_to_log_fields() {
        let mut fx = Fixture::new();
        fx.session.select_log(Rc::new(
            RampLog::new(0, 1_000_000).with_fields(&["motor[0]", "motor[1]", "gyroADC[0]"]),
        ));

        let labels: Vec<_> = fx
            .session
            .graph_config()
            .graphs()
            .iter()
            .map(|g| g.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Motors", "Gyros", "Gyro + PID roll"]);
        assert_eq!(fx.session.graph_config().graphs()[0].fields, vec!["motor[0]", "motor[1]"]);
    }

    #[test]
    fn one_tick_after_play_advances_by_elapsed_time() {
        let mut fx = Fixture::with_log();
        fx.session.set_state(PlaybackState::Playing);
        fx.tick_after(500);

        assert_eq!(fx.session.current_time(), 500_000);
        assert_eq!(fx.renderer.borrow().renders.last(), Some(&500_000));
        assert_eq!(fx.seek_bar.borrow().current_times.last(), Some(&500_000));
    }

    #[test]
    fn playing_keeps_frames_coming_and_pause_stops_them() {
        let mut fx = Fixture::with_log();
        fx.session.set_state(PlaybackState::Playing);
        fx.tick_after(16);
        assert!(fx.session.is_frame_queued());

        fx.session.set_state(PlaybackState::Paused);
        fx.tick_after(16);
        assert!(!fx.session.is_frame_queued());
        assert_eq!(fx.session.current_time(), 16_000);
    }

    #[test]
    fn invalidate_twice_requests_single_frame() {
        let mut fx = Fixture::with_log();
        let before = fx.frames.get();
        fx.session.invalidate();
        fx.session.invalidate();
        assert_eq!(fx.frames.get(), before + 1);
    }

    #[test]
    fn reaching_end_of_log_pauses_at_max() {
        let mut fx = Fixture::new();
        fx.session.select_log(Rc::new(RampLog::new(0, 1_000_000)));
        fx.session.on_animation_frame();
        fx.session.set_state(PlaybackState::Playing);
        fx.tick_after(2_000);

        assert_eq!(fx.session.current_time(), 1_000_000);
        assert_eq!(fx.session.state(), PlaybackState::Paused);
        assert!(!fx.session.is_frame_queued());
    }

    #[test]
    fn rate_scales_log_driven_playback() {
        let mut fx = Fixture::with_log();
        assert!(fx.session.set_playback_rate(50));
        fx.session.set_state(PlaybackState::Playing);
        fx.tick_after(1_000);
        assert_eq!(fx.session.current_time(), 500_000);
    }

    #[test]
    fn out_of_range_rate_is_ignored() {
        let mut fx = Fixture::new();
        assert!(!fx.session.set_playback_rate(301));
        assert!(!fx.session.set_playback_rate(4));
        assert_eq!(fx.session.playback_rate(), 100);
        assert!(fx.session.set_playback_rate(300));
        assert!(!fx.session.step_playback_rate(1));
        assert_eq!(fx.session.playback_rate(), 300);
    }

    #[test]
    fn zoom_changes_reach_renderer() {
        let mut fx = Fixture::new();
        assert!(fx.session.set_graph_zoom(250));
        assert!(!fx.session.set_graph_zoom(5));
        assert!(fx.session.step_graph_zoom(-1));
        assert_eq!(fx.session.graph_zoom(), 240);
        assert_eq!(fx.renderer.borrow().zooms, vec![1.0, 2.5, 2.4]);
    }

    #[test]
    fn field_values_arrive_once_window_closes() {
        let mut fx = Fixture::with_log();
        assert!(fx.fields.borrow().is_empty());
        assert_eq!(fx.session.time_until_next_deadline(), Some(Duration::from_millis(250)));

        fx.clock.advance(Duration::from_millis(250));
        fx.session.poll_timers();

        assert_eq!(*fx.fields.borrow(), vec![(0, Some(vec![Some(0.0)]))]);
        assert_eq!(fx.session.time_until_next_deadline(), None);
    }

    #[test]
    fn seek_bar_repaints_are_throttled_while_playing() {
        let mut fx = Fixture::with_log();
        let paused_repaints = fx.seek_bar.borrow().repaints;
        fx.session.set_state(PlaybackState::Playing);
        for _ in 0..10 {
            fx.tick_after(16);
        }
        assert_eq!(fx.seek_bar.borrow().repaints, paused_repaints);

        fx.clock.advance(Duration::from_millis(100));
        fx.session.poll_timers();
        assert_eq!(fx.seek_bar.borrow().repaints, paused_repaints + 1);
    }

    #[test]
    fn in_and_out_markers_toggle_at_current_time() {
        let mut fx = Fixture::with_log();
        fx.session.set_current_time(2_000_000);
        fx.session.toggle_video_in_time();
        fx.session.set_current_time(5_000_000);
        fx.session.toggle_video_out_time();

        assert_eq!(fx.session.markers().in_time(), Some(2_000_000));
        assert_eq!(fx.session.markers().out_time(), Some(5_000_000));
        assert_eq!(fx.renderer.borrow().out_times.last(), Some(&Some(5_000_000)));

        fx.session.toggle_video_out_time();
        assert_eq!(fx.session.markers().out_time(), None);
    }

    #[test]
    fn export_request_pauses_and_falls_back_to_log_range() {
        let mut fx = Fixture::with_log();
        fx.session.set_current_time(3_000_000);
        fx.session.toggle_video_in_time();
        fx.session.set_state(PlaybackState::Playing);

        let request = fx.session.export_request();

        assert_eq!(fx.session.state(), PlaybackState::Paused);
        assert_eq!(
            request,
            Some(ExportRequest {
                in_time: 3_000_000,
                out_time: 10_000_000,
                video_offset: 0.0,
                has_video: false,
            })
        );
    }

    #[test]
    fn export_request_needs_a_log() {
        let mut fx = Fixture::new();
        assert_eq!(fx.session.export_request(), None);
    }

    #[test]
    fn jumps_move_by_small_step_and_pause() {
        let mut fx = Fixture::with_log();
        fx.session.set_current_time(1_000_000);
        fx.session.set_state(PlaybackState::Playing);
        fx.session.jump_forward();
        assert_eq!(fx.session.current_time(), 1_100_000);
        assert_eq!(fx.session.state(), PlaybackState::Paused);

        fx.session.jump_back();
        fx.session.jump_back();
        assert_eq!(fx.session.current_time(), 900_000);

        fx.session.jump_to_log_end();
        assert_eq!(fx.session.current_time(), 10_000_000);
        fx.session.jump_to_log_start();
        assert_eq!(fx.session.current_time(), 0);
    }

    #[test]
    fn video_jumps_are_noops_without_video() {
        let mut fx = Fixture::with_log();
        fx.session.set_current_time(1_000_000);
        assert!(!fx.session.jump_to_video_start());
        assert!(!fx.session.jump_to_video_end());
        assert!(!fx.session.sync_video_here());
        assert_eq!(fx.session.current_time(), 1_000_000);
    }

    #[test]
    fn video_drives_time_through_offset() {
        let mut fx = Fixture::with_log();
        let video = fx.attach_video(30.0);
        fx.session.set_video_offset(2.0);

        video.borrow_mut().position = 5.0;
        fx.session.on_animation_frame();
        assert_eq!(fx.session.current_time(), 3_000_000);

        fx.session.set_current_time(4_000_000);
        assert_eq!(video.borrow().position, 6.0);
    }

    #[test]
    fn attached_video_follows_rate_and_transport() {
        let mut fx = Fixture::with_log();
        fx.session.set_playback_rate(200);
        let video = fx.attach_video(30.0);
        assert_eq!(video.borrow().rate, 2.0);

        fx.session.toggle_play_pause();
        assert!(video.borrow().playing);
        fx.session.jump_to_video_end();
        assert!(!video.borrow().playing);
        assert_eq!(video.borrow().position, 30.0);
    }

    #[test]
    fn sync_here_uses_video_position_as_offset() {
        let mut fx = Fixture::with_log();
        let video = fx.attach_video(30.0);
        video.borrow_mut().position = 1.5;

        assert!(fx.session.sync_video_here());
        assert_eq!(fx.session.video_offset(), 1.5);
        assert_eq!(fx.session.video_offset_label(), "+1.5");
        fx.session.on_animation_frame();
        assert_eq!(fx.session.current_time(), 0);
    }

    #[test]
    fn offset_text_and_nudges() {
        let mut fx = Fixture::with_log();
        assert!(fx.session.set_video_offset_text("-0.25"));
        assert_eq!(fx.session.video_offset(), -0.25);
        assert!(!fx.session.set_video_offset_text("abc"));
        assert_eq!(fx.session.video_offset(), -0.25);

        fx.session.set_video_offset(0.0);
        fx.session.nudge_video_offset(1);
        fx.session.nudge_video_offset(1);
        fx.session.nudge_video_offset(1);
        assert!((fx.session.video_offset() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn graph_drag_seeks_double_distance() {
        let mut fx = Fixture::with_log();
        fx.session.set_current_time(1_000_000);
        fx.session.seek_by_graph_drag(250_000);
        assert_eq!(fx.session.current_time(), 1_500_000);
    }

    #[test]
    fn extreme_graph_drag_saturates() {
        let mut fx = Fixture::with_log();
        fx.session.seek_by_graph_drag(i64::MAX);
        assert_eq!(fx.session.current_time(), i64::MAX);

        fx.session.set_current_time(0);
        fx.session.seek_by_graph_drag(i64::MIN);
        assert_eq!(fx.session.current_time(), i64::MIN);
    }

    #[test]
    fn resize_before_log_is_ignored() {
        let mut fx = Fixture::new();
        fx.session.resize(80, 24);
        assert!(fx.renderer.borrow().resizes.is_empty());

        fx.session.select_log(Rc::new(RampLog::new(0, 1_000_000)));
        fx.session.resize(80, 24);
        assert_eq!(fx.renderer.borrow().resizes, vec![(80, 24)]);
    }

    #[test]
    fn preset_edits_persist_and_redraw_after_pump() {
        let mut fx = Fixture::with_log();
        fx.session.graph_presets_mut().add(
            Preset::new(
                "Gyro only",
                GraphPreset {
                    graphs: vec![GraphDefinition::new("Gyro", &["ramp"])],
                },
            ),
            true,
        );
        assert!(fx.storage.get(GRAPH_PRESETS_KEY).is_none());

        fx.session.pump_events();

        assert!(fx.storage.get(GRAPH_PRESETS_KEY).is_some());
        assert_eq!(fx.session.graph_config().graphs()[0].label, "Gyro");
        assert!(fx.session.is_frame_queued());
    }

    #[test]
    fn stored_presets_are_restored_without_write_back() {
        let mut first = Fixture::with_log();
        first.session.graph_presets_mut().add(
            Preset::new("Second", GraphPreset { graphs: Vec::new() }),
            true,
        );
        first.session.pump_events();
        let stored = first.storage.get(GRAPH_PRESETS_KEY);

        let storage = MemoryPresetStorage::new();
        if let Some(blob) = stored.clone() {
            storage.clone().persist(GRAPH_PRESETS_KEY, &blob).unwrap();
        }
        let mut second = Fixture::with_storage(storage);
        second.session.pump_events();

        assert_eq!(second.session.graph_presets().len(), 2);
        assert_eq!(
            second.session.graph_presets().active().map(|p| p.name.as_str()),
            Some("Second")
        );
        assert_eq!(second.storage.get(GRAPH_PRESETS_KEY), stored);
    }

    #[test]
    fn restored_layouts_are_fixed_up() {
        let storage = MemoryPresetStorage::new();
        storage
            .clone()
            .persist(
                LAYOUT_PRESETS_KEY,
                &serde_json::json!({
                    "active": 0,
                    "presets": [{ "name": "Old", "content": {} }]
                }),
            )
            .unwrap();

        let fx = Fixture::with_storage(storage);
        let layout = fx.session.layout_presets().active().map(|p| p.content.clone());
        assert_eq!(layout, Some(default_layout()));
    }

    #[test]
    fn updated_active_layout_is_fixed_up_before_display() {
        let mut fx = Fixture::with_log();
        fx.session
            .layout_presets_mut()
            .update_content(0, serde_json::json!({ "showCraft": false }));
        fx.session.pump_events();

        let shown = fx.renderer.borrow().display_configs.last().cloned();
        let shown = shown.unwrap();
        assert_eq!(shown["showCraft"], serde_json::json!(false));
        assert_eq!(shown["showSticks"], serde_json::json!(true));
        assert_eq!(shown["sticks"], default_layout()["sticks"]);
        assert_eq!(
            fx.session.layout_presets().active().map(|p| p.content.clone()),
            Some(shown)
        );
    }
}
