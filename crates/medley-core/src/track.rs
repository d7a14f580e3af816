//! A single playlist track: one buffer placed on the shared timeline.

use crate::engine::{AudioBuffer, Completion, Fade, FadeAutomation, FadeKind, FadeShape};
use crate::peaks::{PeakExtractor, PeakRequest, Peaks};
use crate::playout::{Playout, PlayoutSegment};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Slack when validating cue points against a buffer duration.
const CUE_EPSILON: f64 = 1e-9;

static NEXT_TRACK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique track identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(u64);

impl TrackId {
    fn next() -> Self {
        Self(NEXT_TRACK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which interactions apply to a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledStates {
    pub cursor: bool,
    pub fadein: bool,
    pub fadeout: bool,
    pub select: bool,
    pub shift: bool,
}

impl Default for EnabledStates {
    fn default() -> Self {
        Self {
            cursor: true,
            fadein: true,
            fadeout: true,
            select: true,
            shift: true,
        }
    }
}

/// Interaction mode of the playlist, mirrored on each track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    #[default]
    Cursor,
    Select,
    FadeIn,
    FadeOut,
    Shift,
    None,
}

impl EnabledStates {
    pub fn allows(&self, state: InteractionState) -> bool {
        match state {
            InteractionState::Cursor => self.cursor,
            InteractionState::Select => self.select,
            InteractionState::FadeIn => self.fadein,
            InteractionState::FadeOut => self.fadeout,
            InteractionState::Shift => self.shift,
            InteractionState::None => true,
        }
    }
}

/// Per-call scheduling options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleOptions {
    pub should_play: bool,
    pub master_gain: f32,
    /// Use the offline playout instead of the live one.
    pub offline: bool,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            should_play: true,
            master_gain: 1.0,
            offline: false,
        }
    }
}

/// Serializable snapshot of a track's timing and settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDetails {
    pub src: Option<String>,
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub cuein: f64,
    pub cueout: f64,
    pub gain: f32,
    pub states: EnabledStates,
    pub fade_in: Option<Fade>,
    pub fade_out: Option<Fade>,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub soloed: bool,
}

pub struct Track {
    id: TrackId,
    name: String,
    src: Option<String>,
    buffer: AudioBuffer,
    start_time: f64,
    cue_in: f64,
    cue_out: f64,
    gain: f32,
    master_gain: f32,
    fade_in: Option<Fade>,
    fade_out: Option<Fade>,
    enabled_states: EnabledStates,
    state: InteractionState,
    peaks: Option<Peaks>,
    playout: Option<Playout>,
    offline_playout: Option<Playout>,
}

impl Track {
    /// A track playing the whole of `buffer` from time zero.
    pub fn new(buffer: AudioBuffer) -> Self {
        let cue_out = buffer.duration();
        Self {
            id: TrackId::next(),
            name: "Untitled".into(),
            src: None,
            buffer,
            start_time: 0.0,
            cue_in: 0.0,
            cue_out,
            gain: 1.0,
            master_gain: 1.0,
            fade_in: None,
            fade_out: None,
            enabled_states: EnabledStates::default(),
            state: InteractionState::default(),
            peaks: None,
            playout: None,
            offline_playout: None,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn set_src(&mut self, src: impl Into<String>) {
        self.src = Some(src.into());
    }

    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    /// Replace the buffer (a growing recording) and reset cues to all of it.
    pub fn set_buffer(&mut self, buffer: AudioBuffer) {
        self.cue_in = 0.0;
        self.cue_out = buffer.duration();
        self.buffer = buffer;
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn set_start_time(&mut self, start: f64) {
        self.start_time = start;
    }

    pub fn cue_in(&self) -> f64 {
        self.cue_in
    }

    pub fn cue_out(&self) -> f64 {
        self.cue_out
    }

    pub fn set_cues(&mut self, cue_in: f64, cue_out: f64) -> Result<()> {
        let duration = self.buffer.duration();
        if !(cue_in >= 0.0 && cue_in < cue_out && cue_out <= duration + CUE_EPSILON) {
            return Err(Error::InvalidCues {
                cue_in,
                cue_out,
                duration,
            });
        }
        self.cue_in = cue_in;
        self.cue_out = cue_out.min(duration);
        Ok(())
    }

    /// Playable length in seconds.
    pub fn duration(&self) -> f64 {
        self.cue_out - self.cue_in
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration()
    }

    pub fn gain_level(&self) -> f32 {
        self.gain
    }

    pub fn set_gain_level(&mut self, level: f32) -> Result<()> {
        if !level.is_finite() || level < 0.0 {
            return Err(Error::InvalidGain(level));
        }
        self.gain = level;
        if let Some(playout) = self.playout.as_mut() {
            playout.set_volume_gain(level);
        }
        Ok(())
    }

    pub fn master_gain_level(&self) -> f32 {
        self.master_gain
    }

    pub fn set_master_gain_level(&mut self, level: f32) {
        self.master_gain = level;
        if let Some(playout) = self.playout.as_mut() {
            playout.set_master_gain(level);
        }
    }

    /// Gate the live playout without touching its schedule.
    pub fn set_should_play(&mut self, should_play: bool) {
        if let Some(playout) = self.playout.as_mut() {
            playout.set_should_play(should_play);
        }
    }

    pub fn fade_in(&self) -> Option<Fade> {
        self.fade_in
    }

    pub fn fade_out(&self) -> Option<Fade> {
        self.fade_out
    }

    pub fn set_fade_in(&mut self, duration: f64, shape: FadeShape) -> Result<()> {
        self.fade_in = Some(Self::checked_fade(duration, shape)?);
        Ok(())
    }

    pub fn set_fade_out(&mut self, duration: f64, shape: FadeShape) -> Result<()> {
        self.fade_out = Some(Self::checked_fade(duration, shape)?);
        Ok(())
    }

    pub fn remove_fade_in(&mut self) {
        self.fade_in = None;
    }

    pub fn remove_fade_out(&mut self) {
        self.fade_out = None;
    }

    fn checked_fade(duration: f64, shape: FadeShape) -> Result<Fade> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(Error::InvalidFade(duration));
        }
        Ok(Fade::new(duration, shape))
    }

    pub fn enabled_states(&self) -> EnabledStates {
        self.enabled_states
    }

    pub fn set_enabled_states(&mut self, states: EnabledStates) {
        self.enabled_states = states;
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Adopt the playlist's interaction state; disabled interactions become `None`.
    pub fn set_state(&mut self, state: InteractionState) {
        self.state = if self.enabled_states.allows(state) {
            state
        } else {
            InteractionState::None
        };
    }

    pub fn peaks(&self) -> Option<&Peaks> {
        self.peaks.as_ref()
    }

    pub fn set_peak_data(&mut self, peaks: Peaks) {
        self.peaks = Some(peaks);
    }

    /// Recompute display peaks over the cue range. Frames are counted at the
    /// buffer's own rate, which may differ from the context's.
    pub fn calculate_peaks(
        &mut self,
        samples_per_pixel: usize,
        mono: bool,
        extractor: &dyn PeakExtractor,
    ) {
        let rate = self.buffer.sample_rate() as f64;
        let request = PeakRequest {
            samples_per_pixel,
            mono,
            start_frame: (self.cue_in * rate).round() as usize,
            end_frame: (self.cue_out * rate).round() as usize,
        };
        self.peaks = Some(extractor.extract(&self.buffer, request));
    }

    pub fn playout(&self) -> Option<&Playout> {
        self.playout.as_ref()
    }

    /// Bind the live playout, carrying over this track's gain settings.
    pub fn set_playout(&mut self, mut playout: Playout) {
        playout.set_volume_gain(self.gain);
        playout.set_master_gain(self.master_gain);
        self.playout = Some(playout);
    }

    pub fn set_offline_playout(&mut self, playout: Playout) {
        self.offline_playout = Some(playout);
    }

    pub fn offline_playout(&self) -> Option<&Playout> {
        self.offline_playout.as_ref()
    }

    /// Keep only the part of the track inside the playlist-time window
    /// `[start, end]`. Does nothing unless the window overlaps the track with
    /// one bound inside it, so the cues never collapse to an empty region.
    pub fn trim(&mut self, start: f64, end: f64) {
        if end <= start {
            return;
        }

        let track_start = self.start_time;
        let track_end = self.end_time();
        let offset = self.cue_in - track_start;

        // A bound sitting exactly on the far edge would leave an empty region.
        let touches_start = track_start <= start && start < track_end;
        let touches_end = track_start < end && end <= track_end;
        if !(touches_start || touches_end) {
            return;
        }

        let cue_in = start.max(track_start) + offset;
        let cue_out = end.min(track_end) + offset;
        let duration = self.buffer.duration();

        self.cue_in = cue_in.clamp(0.0, duration);
        self.cue_out = cue_out.clamp(self.cue_in, duration);
        if start > track_start {
            self.start_time = start;
        }
    }

    /// Schedule the part of this track that falls in the playlist window
    /// `[start, end)`, aligned so device time `now` is playlist time `start`.
    pub fn schedule_play(
        &mut self,
        now: f64,
        start: f64,
        end: Option<f64>,
        options: ScheduleOptions,
    ) -> Completion {
        let duration = self.duration();

        // Nothing to play in this window: the track is already "stopped".
        if self.end_time() <= start || end.is_some_and(|e| e < self.start_time) {
            return Completion::resolved();
        }

        let segment = end.map(|e| e - start);
        let mut when = now;
        let offset;
        let play_duration;

        if self.start_time >= start {
            offset = 0.0;
            let delay = self.start_time - start;
            when += delay;
            play_duration = match segment {
                Some(seg) => (seg - delay).min(duration),
                None => duration,
            };
        } else {
            offset = start - self.start_time;
            play_duration = match segment {
                Some(seg) => seg.min(duration - offset),
                None => duration - offset,
            };
        }

        let fades = self.fade_automation(now, start - self.start_time);
        let gain = self.gain;
        let cue_in = self.cue_in;
        let id = self.id;

        let playout = if options.offline {
            self.offline_playout.as_mut()
        } else {
            self.playout.as_mut()
        };
        let Some(playout) = playout else {
            tracing::warn!(track = %id, offline = options.offline, "no playout bound; skipping");
            return Completion::resolved();
        };

        playout.set_volume_gain(gain);
        playout.set_should_play(options.should_play);
        playout.set_master_gain(options.master_gain);

        tracing::debug!(
            track = %id,
            when,
            offset = offset + cue_in,
            duration = play_duration,
            should_play = options.should_play,
            "schedule play"
        );

        playout.schedule_play(PlayoutSegment {
            when,
            offset: offset + cue_in,
            duration: play_duration,
            fades,
        })
    }

    /// Place the fades that are still ahead of (or around) `rel_pos`, the
    /// cursor relative to this track's start, on the device clock.
    fn fade_automation(&self, now: f64, rel_pos: f64) -> Vec<FadeAutomation> {
        let duration = self.duration();
        let regions = [
            self.fade_in.map(|f| (FadeKind::In, f, 0.0, f.duration)),
            self.fade_out
                .map(|f| (FadeKind::Out, f, duration - f.duration, duration)),
        ];

        regions
            .into_iter()
            .flatten()
            .filter(|(_, _, _, fade_end)| rel_pos < *fade_end)
            .map(|(kind, fade, fade_start, fade_end)| FadeAutomation {
                kind,
                shape: fade.shape,
                start: now + (fade_start - rel_pos),
                duration: fade_end - fade_start,
            })
            .collect()
    }

    pub fn schedule_stop(&mut self) {
        if let Some(playout) = self.playout.as_mut() {
            playout.schedule_stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playout.as_ref().is_some_and(Playout::is_playing)
    }

    pub fn details(&self) -> TrackDetails {
        TrackDetails {
            src: self.src.clone(),
            name: self.name.clone(),
            start: self.start_time,
            end: self.end_time(),
            cuein: self.cue_in,
            cueout: self.cue_out,
            gain: self.gain,
            states: self.enabled_states,
            fade_in: self.fade_in,
            fade_out: self.fade_out,
            muted: false,
            soloed: false,
        }
    }
}

impl std::fmt::Debug for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("start_time", &self.start_time)
            .field("cue_in", &self.cue_in)
            .field("cue_out", &self.cue_out)
            .field("gain", &self.gain)
            .finish_non_exhaustive()
    }
}
