//! Track playout controller.
//!
//! Owns the scheduling of one buffer on one engine: the sound source, its
//! volume / solo-mute / master gain stages and its fade automation. A track
//! holds one for live playback and, while rendering, another bound to the
//! offline context.

use crate::engine::{
    AudioBuffer, Completion, EngineHandle, FadeAutomation, GainStage, VoiceId, VoiceSpec,
};

/// One scheduled window of a buffer, already resolved to device time and
/// buffer offsets.
#[derive(Debug, Clone, Default)]
pub struct PlayoutSegment {
    /// Device time the segment starts sounding.
    pub when: f64,
    /// Seconds into the buffer.
    pub offset: f64,
    /// Seconds to play.
    pub duration: f64,
    pub fades: Vec<FadeAutomation>,
}

pub struct Playout {
    engine: EngineHandle,
    buffer: AudioBuffer,
    voice: Option<VoiceId>,
    volume: f32,
    should_play: bool,
    master: f32,
    disposed: bool,
}

impl Playout {
    pub fn new(engine: &EngineHandle, buffer: AudioBuffer) -> Self {
        Self {
            engine: engine.clone(),
            buffer,
            voice: None,
            volume: 1.0,
            should_play: true,
            master: 1.0,
            disposed: false,
        }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    pub fn set_volume_gain(&mut self, level: f32) {
        self.volume = level;
        self.apply(GainStage::Volume, level);
    }

    pub fn set_should_play(&mut self, should_play: bool) {
        self.should_play = should_play;
        self.apply(GainStage::ShouldPlay, if should_play { 1.0 } else { 0.0 });
    }

    pub fn set_master_gain(&mut self, level: f32) {
        self.master = level;
        self.apply(GainStage::Master, level);
    }

    fn apply(&self, stage: GainStage, value: f32) {
        if let Some(id) = self.voice {
            self.engine.set_gain(id, stage, value);
        }
    }

    /// Start `segment` with the current gain settings. Any segment still
    /// running on this controller is stopped first, so at most one is ever
    /// audible. A disposed controller returns an already-resolved completion.
    pub fn schedule_play(&mut self, segment: PlayoutSegment) -> Completion {
        if self.disposed {
            tracing::debug!("schedule_play on disposed playout ignored");
            return Completion::resolved();
        }

        self.schedule_stop();

        let (id, completion) = self.engine.schedule(VoiceSpec {
            buffer: self.buffer.clone(),
            when: segment.when,
            offset: segment.offset,
            duration: segment.duration,
            volume: self.volume,
            should_play: self.should_play,
            master: self.master,
            fades: segment.fades,
        });
        self.voice = Some(id);
        completion
    }

    /// Halt the running segment, if any. Idempotent.
    pub fn schedule_stop(&mut self) {
        if let Some(id) = self.voice.take() {
            self.engine.stop(id);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.voice.is_some_and(|id| self.engine.is_active(id))
    }

    /// Stop and retire this controller.
    pub fn dispose(&mut self) {
        self.schedule_stop();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for Playout {
    fn drop(&mut self) {
        self.schedule_stop();
    }
}
