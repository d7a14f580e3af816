//! The playlist transport.
//!
//! Owns the tracks, solo/mute sets and position state, and turns transport
//! commands into per-track scheduling. Every command that stops playback
//! waits for all outstanding segment completions before anything new is
//! scheduled, so a restart never overlaps a stale segment.

use crate::config::{PlaylistConfig, SeekStyle};
use crate::engine::{
    join_all, AudioBuffer, AudioContext, Completion, FadeShape, OfflineAudioContext,
};
use crate::events::{EventBus, PlaylistEvent};
use crate::loader::{Loader, TrackInfo};
use crate::peaks::{MinMaxPeaks, PeakExtractor};
use crate::playout::Playout;
use crate::recorder::Recorder;
use crate::render::{Encoder, RenderGuard, RenderRequest, RenderTask};
use crate::track::{InteractionState, ScheduleOptions, Track, TrackDetails, TrackId};
use crate::transport::frame_loop::{FrameLoop, FrameTick};
use crate::transport::{PlayState, SoloMute, TimeSelection, TransportState};
use crate::{Error, Result};
use crossbeam_channel::Receiver;
use futures_util::future::try_join_all;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Completion of one `play` call: done once every scheduled track segment
/// has ended or been stopped.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    completions: Vec<Completion>,
}

impl Playback {
    pub fn is_finished(&self) -> bool {
        self.completions.iter().all(Completion::is_done)
    }

    pub async fn finished(self) {
        join_all(self.completions).await;
    }
}

pub struct Playlist {
    config: PlaylistConfig,
    context: AudioContext,
    tracks: Vec<Track>,
    solo_mute: SoloMute,
    state: TransportState,
    frame_loop: FrameLoop,
    playout_promises: Vec<Completion>,
    active_track: Option<TrackId>,
    interaction: InteractionState,
    master_gain: f32,
    fade_type: FadeShape,
    samples_per_pixel: usize,
    zoom_index: usize,
    loader: Option<Arc<dyn Loader>>,
    encoder: Option<Arc<dyn Encoder>>,
    recorder: Option<Box<dyn Recorder>>,
    recording_track: Option<TrackId>,
    peaks: Arc<dyn PeakExtractor>,
    rendering: Arc<AtomicBool>,
    events: EventBus,
}

impl Playlist {
    pub fn new(config: PlaylistConfig) -> Result<Self> {
        let context = AudioContext::new(config.sample_rate);
        Self::with_context(config, context)
    }

    /// Build on an existing live context, e.g. one already attached to an
    /// output device.
    pub fn with_context(config: PlaylistConfig, context: AudioContext) -> Result<Self> {
        config.validate()?;

        let zoom_index = config
            .zoom_levels
            .iter()
            .position(|z| *z == config.samples_per_pixel)
            .unwrap_or_default();

        Ok(Self {
            solo_mute: SoloMute::new(config.exclusive_solo),
            master_gain: config.master_gain,
            fade_type: config.fade_type,
            samples_per_pixel: config.samples_per_pixel,
            zoom_index,
            context,
            tracks: Vec::new(),
            state: TransportState::default(),
            frame_loop: FrameLoop::default(),
            playout_promises: Vec::new(),
            active_track: None,
            interaction: InteractionState::Cursor,
            loader: None,
            encoder: None,
            recorder: None,
            recording_track: None,
            peaks: Arc::new(MinMaxPeaks),
            rendering: Arc::new(AtomicBool::new(false)),
            events: EventBus::new(),
            config,
        })
    }

    pub fn config(&self) -> &PlaylistConfig {
        &self.config
    }

    pub fn context(&self) -> &AudioContext {
        &self.context
    }

    pub fn set_loader(&mut self, loader: Arc<dyn Loader>) {
        self.loader = Some(loader);
    }

    pub fn set_encoder(&mut self, encoder: Arc<dyn Encoder>) {
        self.encoder = Some(encoder);
    }

    pub fn set_recorder(&mut self, recorder: Box<dyn Recorder>) {
        self.recorder = Some(recorder);
    }

    pub fn set_peak_extractor(&mut self, extractor: Arc<dyn PeakExtractor>) {
        self.peaks = extractor;
    }

    pub fn set_exclusive_solo(&mut self, exclusive: bool) {
        self.config.exclusive_solo = exclusive;
        self.solo_mute.set_exclusive(exclusive);
    }

    pub fn set_seek_style(&mut self, style: SeekStyle) {
        self.config.seek_style = style;
    }

    pub fn set_mono(&mut self, mono: bool) {
        self.config.mono = mono;
    }

    /// Subscribe to playlist notifications. Every subscriber receives every
    /// event emitted after it subscribed; a subscriber that falls
    /// [`EVENT_CAPACITY`](crate::events::EVENT_CAPACITY) events behind misses
    /// the newest ones until it catches up.
    pub fn events(&self) -> Receiver<PlaylistEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    fn track_mut(&mut self, id: TrackId) -> Result<&mut Track> {
        self.tracks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(Error::TrackNotFound(id))
    }

    fn ensure_track(&self, id: TrackId) -> Result<()> {
        self.track(id).map(|_| ()).ok_or(Error::TrackNotFound(id))
    }

    pub fn transport(&self) -> &TransportState {
        &self.state
    }

    pub fn solo_mute(&self) -> &SoloMute {
        &self.solo_mute
    }

    /// True while any track has a segment in flight.
    pub fn is_playing(&self) -> bool {
        self.tracks.iter().any(Track::is_playing)
    }

    pub fn play_state(&self) -> PlayState {
        self.state.play_state(self.is_playing())
    }

    /// Playlist position in seconds.
    pub fn current_time(&self) -> f64 {
        self.state
            .current_time(self.context.current_time(), self.is_playing())
    }

    /// Device time since playback last started.
    pub fn elapsed_time(&self) -> f64 {
        self.context.current_time() - self.state.last_play
    }

    pub fn duration(&self) -> f64 {
        self.state.duration
    }

    pub fn cursor(&self) -> f64 {
        self.state.cursor
    }

    pub fn time_selection(&self) -> TimeSelection {
        self.state.selection
    }

    pub fn is_segment_selection(&self) -> bool {
        self.state.selection.is_segment()
    }

    pub fn playback_seconds(&self) -> f64 {
        self.state.playback_seconds
    }

    pub fn scroll_left(&self) -> f64 {
        self.state.scroll_left
    }

    /// Width of the visible timeline in seconds, as measured by the host.
    pub fn set_view_duration(&mut self, seconds: f64) {
        self.state.view_duration = seconds;
    }

    pub fn active_track(&self) -> Option<TrackId> {
        self.active_track
    }

    pub fn set_active_track(&mut self, id: Option<TrackId>) {
        self.active_track = id;
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    pub fn fade_type(&self) -> FadeShape {
        self.fade_type
    }

    pub fn samples_per_pixel(&self) -> usize {
        self.samples_per_pixel
    }

    pub fn zoom_index(&self) -> usize {
        self.zoom_index
    }

    pub fn state(&self) -> InteractionState {
        self.interaction
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering.load(std::sync::atomic::Ordering::Acquire)
    }

    pub fn recording_track(&self) -> Option<TrackId> {
        self.recording_track
    }

    pub fn should_track_play(&self, id: TrackId) -> bool {
        self.solo_mute.should_play(id)
    }

    /// Serializable description of every track, in playlist order.
    pub fn info(&self) -> Vec<TrackDetails> {
        self.tracks
            .iter()
            .map(|track| {
                let mut details = track.details();
                details.muted = self.solo_mute.is_muted(track.id());
                details.soloed = self.solo_mute.is_soloed(track.id());
                details
            })
            .collect()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load every source concurrently and append the tracks. Nothing is
    /// added unless every source loads.
    pub async fn load(&mut self, infos: Vec<TrackInfo>) -> Result<Vec<TrackId>> {
        let loader = self
            .loader
            .clone()
            .ok_or_else(|| Error::Load("no loader configured".into()))?;

        let buffers = try_join_all(infos.iter().map(|info| loader.load(&info.src))).await?;
        self.events.emit(PlaylistEvent::AudioSourcesLoaded);

        let mut tracks = Vec::with_capacity(buffers.len());
        for (info, buffer) in infos.iter().zip(buffers) {
            tracks.push(self.build_track(info, buffer)?);
        }

        let mut ids = Vec::with_capacity(tracks.len());
        for (info, track) in infos.iter().zip(tracks) {
            let id = track.id();
            if let Some(selection) = info.selected {
                self.active_track = Some(id);
                self.state
                    .set_time_selection(selection.start, Some(selection.end));
            }
            if info.muted {
                self.solo_mute.toggle_mute(id);
            }
            if info.soloed {
                self.solo_mute.toggle_solo(id);
            }
            ids.push(id);
            self.tracks.push(track);
        }

        self.adjust_duration();
        tracing::debug!(tracks = ids.len(), duration = self.state.duration, "sources loaded");
        self.events.emit(PlaylistEvent::AudioSourcesRendered);
        Ok(ids)
    }

    fn build_track(&self, info: &TrackInfo, buffer: AudioBuffer) -> Result<Track> {
        let playout = Playout::new(self.context.handle(), buffer.clone());
        let cue_in = info.cuein.unwrap_or(0.0);
        let cue_out = info.cueout.unwrap_or_else(|| buffer.duration());

        let mut track = Track::new(buffer);
        track.set_src(info.src.clone());
        track.set_name(info.name.clone().unwrap_or_else(|| "Untitled".into()));
        track.set_enabled_states(info.states);
        track.set_cues(cue_in, cue_out)?;
        if let Some(fade) = info.fade_in {
            track.set_fade_in(fade.duration, fade.shape)?;
        }
        if let Some(fade) = info.fade_out {
            track.set_fade_out(fade.duration, fade.shape)?;
        }
        track.set_state(self.interaction);
        track.set_start_time(info.start);
        track.set_master_gain_level(self.master_gain);
        track.set_playout(playout);
        track.set_gain_level(info.gain.unwrap_or(1.0))?;

        match &info.peaks {
            Some(peaks) => track.set_peak_data(peaks.clone()),
            None => {
                track.calculate_peaks(self.samples_per_pixel, self.config.mono, self.peaks.as_ref())
            }
        }
        Ok(track)
    }

    /// Recompute the playlist length from the track end times.
    pub fn adjust_duration(&mut self) {
        self.state.duration = self
            .tracks
            .iter()
            .map(Track::end_time)
            .fold(0.0, f64::max);
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Start playback at `start` (default: pause position, then cursor) up
    /// to `end` (default: selection end, then each track's end). Restarts
    /// if already playing.
    pub async fn play(&mut self, start: Option<f64>, end: Option<f64>) -> Playback {
        if self.is_playing() {
            let (from, _) = self.state.resolve_window(start, end);
            return self.restart_play_from(from, end).await;
        }
        self.schedule_all(start, end)
    }

    async fn restart_play_from(&mut self, start: f64, end: Option<f64>) -> Playback {
        self.frame_loop.stop();
        for track in &mut self.tracks {
            track.schedule_stop();
        }
        join_all(std::mem::take(&mut self.playout_promises)).await;
        self.schedule_all(Some(start), end)
    }

    fn schedule_all(&mut self, start: Option<f64>, end: Option<f64>) -> Playback {
        let (from, to) = self.state.resolve_window(start, end);
        let now = self.context.current_time();
        let master_gain = self.master_gain;

        // An explicit start overrides a stale pause position in current_time().
        self.state.last_seeked = start.map(|_| from);

        let mut completions = Vec::with_capacity(self.tracks.len());
        for track in &mut self.tracks {
            track.set_state(InteractionState::Cursor);
            let should_play = self.solo_mute.should_play(track.id());
            completions.push(track.schedule_play(
                now,
                from,
                to,
                ScheduleOptions {
                    should_play,
                    master_gain,
                    offline: false,
                },
            ));
        }

        self.state.last_play = now;
        self.state.paused = false;
        self.playout_promises = completions.clone();
        self.frame_loop.start(from, now);

        tracing::debug!(start = from, end = ?to, now, "play");
        Playback { completions }
    }

    pub async fn pause(&mut self) {
        if !self.is_playing() {
            join_all(self.playout_promises.clone()).await;
            return;
        }

        self.state.paused_at = Some(self.current_time());
        self.state.paused = true;
        tracing::debug!(paused_at = ?self.state.paused_at, "pause");
        self.playback_reset().await;
    }

    /// Stop playback (and recording) and forget the pause position.
    ///
    /// Playback is always reset; a recorder failure is reported afterwards.
    pub async fn stop(&mut self) -> Result<()> {
        let recorder = self.stop_recorder();

        self.state.paused_at = None;
        self.state.paused = false;
        self.state.playback_seconds = 0.0;
        tracing::debug!("stop");
        self.playback_reset().await;
        recorder
    }

    fn stop_recorder(&mut self) -> Result<()> {
        match self.recorder.as_mut() {
            Some(recorder) if recorder.is_recording() => recorder.stop(),
            _ => Ok(()),
        }
    }

    async fn playback_reset(&mut self) {
        self.state.last_seeked = None;
        self.frame_loop.stop();

        let state = self.interaction;
        for track in &mut self.tracks {
            track.schedule_stop();
            track.set_state(state);
        }

        join_all(self.playout_promises.clone()).await;
    }

    /// Move to `start`. While playing this restarts from `start`; otherwise
    /// it sets the pause position, the selection and the active track.
    pub async fn seek(&mut self, start: f64, end: Option<f64>, track: Option<TrackId>) -> Result<()> {
        if let Some(id) = track {
            self.ensure_track(id)?;
        }

        if self.is_playing() {
            self.state.last_seeked = Some(start);
            self.state.paused_at = None;
            self.restart_play_from(start, None).await;
            return Ok(());
        }

        self.active_track = track.or_else(|| self.tracks.first().map(Track::id));
        self.state.paused_at = Some(start);
        self.state.set_time_selection(start, end);
        if self.config.seek_style == SeekStyle::Fill {
            self.state.playback_seconds = start;
        }
        Ok(())
    }

    /// A user selection: seek, then report the new playhead when stopped.
    pub async fn select(&mut self, start: f64, end: Option<f64>, track: Option<TrackId>) -> Result<()> {
        let playing = self.is_playing();
        self.seek(start, end, track).await?;
        if !playing {
            self.events.emit(PlaylistEvent::TimeUpdate(start));
        }
        Ok(())
    }

    pub async fn rewind(&mut self) -> Result<()> {
        self.stop().await?;
        self.state.scroll_left = 0.0;
        self.events.emit(PlaylistEvent::Select {
            start: 0.0,
            end: 0.0,
        });
        self.select(0.0, Some(0.0), None).await
    }

    pub async fn fast_forward(&mut self) -> Result<()> {
        self.stop().await?;
        let duration = self.state.duration;
        self.state.scroll_left = if self.state.view_duration < duration {
            duration - self.state.view_duration
        } else {
            0.0
        };
        self.events.emit(PlaylistEvent::Select {
            start: duration,
            end: duration,
        });
        self.select(duration, Some(duration), None).await
    }

    /// Stop and drop every track.
    pub async fn clear(&mut self) -> Result<()> {
        let stopped = self.stop().await;

        self.tracks.clear();
        self.solo_mute.clear();
        self.playout_promises.clear();
        self.active_track = None;
        self.recording_track = None;

        self.state.cursor = 0.0;
        self.state.playback_seconds = 0.0;
        self.state.duration = 0.0;
        self.state.scroll_left = 0.0;

        self.seek(0.0, Some(0.0), None).await?;
        stopped
    }

    /// Start the recorder and play the existing tracks from zero so the take
    /// lines up with them. A "Recording" track is appended for the take.
    pub async fn record(&mut self) -> Result<()> {
        let timeslice = self.config.record_timeslice_ms;
        let recorder = self.recorder.as_mut().ok_or(Error::RecorderUnavailable)?;
        if recorder.is_recording() {
            tracing::debug!("record ignored: already recording");
            return Ok(());
        }
        recorder.start(timeslice)?;

        if self.is_playing() {
            self.playback_reset().await;
        }

        let now = self.context.current_time();
        let master_gain = self.master_gain;
        let mut completions = Vec::with_capacity(self.tracks.len());
        for track in &mut self.tracks {
            track.set_state(InteractionState::None);
            let should_play = self.solo_mute.should_play(track.id());
            completions.push(track.schedule_play(
                now,
                0.0,
                None,
                ScheduleOptions {
                    should_play,
                    master_gain,
                    offline: false,
                },
            ));
        }
        self.playout_promises = completions;
        self.state.paused_at = None;
        self.state.paused = false;
        self.state.last_seeked = Some(0.0);
        self.state.last_play = now;

        let mut take = Track::new(AudioBuffer::empty(self.config.sample_rate as u32));
        take.set_name("Recording");
        self.recording_track = Some(take.id());
        self.tracks.push(take);

        tracing::debug!(timeslice_ms = timeslice, "recording started");
        Ok(())
    }

    /// Install the decoded recording so far on the recording track.
    pub fn ingest_recording(&mut self, buffer: AudioBuffer) -> Result<()> {
        let id = self
            .recording_track
            .ok_or_else(|| Error::Recorder("no recording in progress".into()))?;

        let playout = Playout::new(self.context.handle(), buffer.clone());
        let samples_per_pixel = self.samples_per_pixel;
        let mono = self.config.mono;
        let extractor = Arc::clone(&self.peaks);

        let track = self.track_mut(id)?;
        track.set_buffer(buffer);
        track.set_playout(playout);
        track.calculate_peaks(samples_per_pixel, mono, extractor.as_ref());

        self.adjust_duration();
        Ok(())
    }

    /// Drive the playhead. Call once per display frame; does nothing unless
    /// playback armed the loop.
    pub fn on_frame(&mut self) {
        let now = self.context.current_time();
        let playing = self.is_playing();

        match self.frame_loop.tick(now, playing) {
            None => {}
            Some(FrameTick::Advanced(position)) => {
                self.state.playback_seconds = position;
                self.events.emit(PlaylistEvent::TimeUpdate(position));
            }
            Some(FrameTick::Ended(position)) => {
                if position >= self.state.audible_end() {
                    tracing::debug!(position, "finished");
                    self.events.emit(PlaylistEvent::Finished);
                }
                self.state.paused_at = None;
                self.state.paused = false;
                self.state.last_seeked = None;
                self.state.playback_seconds = 0.0;
                self.set_state(self.interaction);
            }
        }
    }

    // =========================================================================
    // Track commands
    // =========================================================================

    pub fn solo_track(&mut self, id: TrackId) -> Result<()> {
        self.ensure_track(id)?;
        self.solo_mute.toggle_solo(id);
        self.adjust_track_playout();
        Ok(())
    }

    pub fn mute_track(&mut self, id: TrackId) -> Result<()> {
        self.ensure_track(id)?;
        self.solo_mute.toggle_mute(id);
        self.adjust_track_playout();
        Ok(())
    }

    /// Push the current solo/mute resolution to every live playout.
    fn adjust_track_playout(&mut self) {
        for track in &mut self.tracks {
            track.set_should_play(self.solo_mute.should_play(track.id()));
        }
    }

    /// Move a track along the timeline by `delta` seconds.
    pub fn shift_track(&mut self, id: TrackId, delta: f64) -> Result<()> {
        let track = self.track_mut(id)?;
        track.set_start_time(track.start_time() + delta);
        self.adjust_duration();
        Ok(())
    }

    pub fn set_track_gain(&mut self, id: TrackId, gain: f32) -> Result<()> {
        self.track_mut(id)?.set_gain_level(gain)
    }

    pub fn set_master_gain(&mut self, gain: f32) -> Result<()> {
        if !gain.is_finite() || gain < 0.0 {
            return Err(Error::InvalidGain(gain));
        }
        self.master_gain = gain;
        for track in &mut self.tracks {
            track.set_master_gain_level(gain);
        }
        Ok(())
    }

    pub fn set_fade_in(&mut self, id: TrackId, duration: f64) -> Result<()> {
        let shape = self.fade_type;
        self.track_mut(id)?.set_fade_in(duration, shape)
    }

    pub fn set_fade_out(&mut self, id: TrackId, duration: f64) -> Result<()> {
        let shape = self.fade_type;
        self.track_mut(id)?.set_fade_out(duration, shape)
    }

    /// Shape used by subsequent fade commands.
    pub fn set_fade_type(&mut self, shape: FadeShape) {
        self.fade_type = shape;
    }

    /// Trim the active track to the current selection and reset the
    /// selection to zero.
    pub fn trim_active_track(&mut self) -> Result<()> {
        let id = self.active_track.ok_or(Error::NoActiveTrack)?;
        let selection = self.state.selection;
        let samples_per_pixel = self.samples_per_pixel;
        let mono = self.config.mono;
        let extractor = Arc::clone(&self.peaks);

        let track = self.track_mut(id)?;
        track.trim(selection.start, selection.end);
        track.calculate_peaks(samples_per_pixel, mono, extractor.as_ref());

        self.state.set_time_selection(0.0, Some(0.0));
        self.adjust_duration();
        Ok(())
    }

    pub fn set_state(&mut self, state: InteractionState) {
        self.interaction = state;
        for track in &mut self.tracks {
            track.set_state(state);
        }
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    /// Switch to `samples_per_pixel`, which must be one of the zoom levels,
    /// and recompute peaks.
    pub fn set_zoom(&mut self, samples_per_pixel: usize) -> Result<()> {
        let index = self
            .config
            .zoom_levels
            .iter()
            .position(|z| *z == samples_per_pixel)
            .ok_or_else(|| {
                Error::InvalidConfig(format!("{samples_per_pixel} is not a zoom level"))
            })?;

        self.samples_per_pixel = samples_per_pixel;
        self.zoom_index = index;

        let mono = self.config.mono;
        for track in &mut self.tracks {
            track.calculate_peaks(samples_per_pixel, mono, self.peaks.as_ref());
        }
        Ok(())
    }

    /// One zoom level closer. Returns whether the zoom changed.
    pub fn zoom_in(&mut self) -> bool {
        let index = self.zoom_index.saturating_sub(1);
        self.zoom_to_index(index)
    }

    /// One zoom level further out. Returns whether the zoom changed.
    pub fn zoom_out(&mut self) -> bool {
        let last = self.config.zoom_levels.len().saturating_sub(1);
        let index = (self.zoom_index + 1).min(last);
        self.zoom_to_index(index)
    }

    fn zoom_to_index(&mut self, index: usize) -> bool {
        match self.config.zoom_levels.get(index).copied() {
            Some(zoom) if zoom != self.samples_per_pixel => self.set_zoom(zoom).is_ok(),
            _ => false,
        }
    }

    // =========================================================================
    // Offline render
    // =========================================================================

    /// Schedule every track on a fresh offline context exactly as live
    /// playback from zero would. Returns `None` while another render is in
    /// flight.
    pub fn start_offline_render(&mut self, request: RenderRequest) -> Option<RenderTask> {
        let Some(guard) = RenderGuard::acquire(&self.rendering) else {
            tracing::debug!("offline render already in progress");
            return None;
        };

        let rate = self.config.render_sample_rate;
        let length = (self.state.duration * rate as f64).trunc() as usize;
        let context = OfflineAudioContext::new(2, length, rate);
        let now = context.current_time();

        for track in &mut self.tracks {
            track.set_offline_playout(Playout::new(context.handle(), track.buffer().clone()));
            let should_play = self.solo_mute.should_play(track.id());
            track.schedule_play(
                now,
                0.0,
                None,
                ScheduleOptions {
                    should_play,
                    master_gain: request.master_gain,
                    offline: true,
                },
            );
        }

        tracing::debug!(kind = ?request.kind, frames = length, rate, "offline render scheduled");
        Some(RenderTask::new(
            context,
            request,
            self.encoder.clone(),
            self.events.clone(),
            guard,
        ))
    }
}

impl std::fmt::Debug for Playlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playlist")
            .field("tracks", &self.tracks.len())
            .field("state", &self.state)
            .field("master_gain", &self.master_gain)
            .field("rendering", &self.is_rendering())
            .finish_non_exhaustive()
    }
}
