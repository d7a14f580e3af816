//! Voice mixing graph shared by the live and offline contexts.
//!
//! Both contexts render through [`Graph::render`], so a live mix and an
//! offline render of the same schedule produce identical samples.

use super::buffer::AudioBuffer;
use super::completion::{Completion, CompletionSender};
use super::fade::{automation_gain, FadeAutomation};

/// Identifier of a scheduled voice within one graph.
pub(crate) type VoiceId = u64;

/// Gain stages applied in series to every voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainStage {
    /// Per-track volume.
    Volume,
    /// Solo/mute gate (0 or 1).
    ShouldPlay,
    /// Playlist master volume.
    Master,
}

/// Everything needed to start one voice.
#[derive(Debug, Clone)]
pub(crate) struct VoiceSpec {
    pub buffer: AudioBuffer,
    /// Device time the voice starts sounding.
    pub when: f64,
    /// Seconds into the buffer.
    pub offset: f64,
    /// Seconds to play.
    pub duration: f64,
    pub volume: f32,
    pub should_play: bool,
    pub master: f32,
    pub fades: Vec<FadeAutomation>,
}

struct Voice {
    id: VoiceId,
    buffer: AudioBuffer,
    start_frame: u64,
    end_frame: u64,
    /// Read position in buffer frames at `start_frame`.
    offset_pos: f64,
    /// Buffer frames advanced per device frame.
    step: f64,
    volume: f32,
    should_play: f32,
    master: f32,
    fades: Vec<FadeAutomation>,
    done: Option<CompletionSender>,
}

impl Voice {
    fn gain_at(&self, time: f64) -> f32 {
        self.volume * self.should_play * self.master * automation_gain(&self.fades, time)
    }

    #[inline]
    fn read(data: &[f32], pos: f64, step: f64) -> f32 {
        if step == 1.0 {
            return data.get(pos as usize).copied().unwrap_or(0.0);
        }
        let i = pos.floor() as usize;
        let frac = (pos - pos.floor()) as f32;
        let a = data.get(i).copied().unwrap_or(0.0);
        let b = data.get(i + 1).copied().unwrap_or(0.0);
        a + (b - a) * frac
    }

    fn complete(&mut self) {
        if let Some(done) = self.done.take() {
            done.complete();
        }
    }
}

/// Mixing graph with a frame-counting device clock.
pub struct Graph {
    sample_rate: f64,
    frame: u64,
    voices: Vec<Voice>,
    next_id: VoiceId,
}

impl Graph {
    pub(crate) fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            frame: 0,
            voices: Vec::new(),
            next_id: 0,
        }
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Device clock in seconds.
    #[inline]
    pub fn current_time(&self) -> f64 {
        self.frame as f64 / self.sample_rate
    }

    #[inline]
    pub fn current_frame(&self) -> u64 {
        self.frame
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub(crate) fn schedule(&mut self, spec: VoiceSpec) -> (VoiceId, Completion) {
        let id = self.next_id;
        self.next_id += 1;

        let (done, completion) = Completion::pair();

        let buffer_rate = spec.buffer.sample_rate() as f64;
        let step = buffer_rate / self.sample_rate;
        let offset_pos = (spec.offset.max(0.0) * buffer_rate).round();
        let available = (spec.buffer.len() as f64 - offset_pos).max(0.0) / step;
        let frames = (spec.duration.max(0.0) * self.sample_rate)
            .round()
            .min(available.floor()) as u64;

        // A start time in the past sounds immediately, like a late source start.
        let start_frame = ((spec.when.max(0.0) * self.sample_rate).round() as u64).max(self.frame);

        if frames == 0 {
            done.complete();
            return (id, completion);
        }

        self.voices.push(Voice {
            id,
            buffer: spec.buffer,
            start_frame,
            end_frame: start_frame + frames,
            offset_pos,
            step,
            volume: spec.volume,
            should_play: if spec.should_play { 1.0 } else { 0.0 },
            master: spec.master,
            fades: spec.fades,
            done: Some(done),
        });

        (id, completion)
    }

    /// Stop a voice now. Returns false if it was not active.
    pub(crate) fn stop(&mut self, id: VoiceId) -> bool {
        match self.voices.iter().position(|v| v.id == id) {
            Some(index) => {
                let mut voice = self.voices.swap_remove(index);
                voice.complete();
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_active(&self, id: VoiceId) -> bool {
        self.voices.iter().any(|v| v.id == id)
    }

    pub(crate) fn set_gain(&mut self, id: VoiceId, stage: GainStage, value: f32) {
        if let Some(voice) = self.voices.iter_mut().find(|v| v.id == id) {
            match stage {
                GainStage::Volume => voice.volume = value,
                GainStage::ShouldPlay => voice.should_play = value,
                GainStage::Master => voice.master = value,
            }
        }
    }

    /// Mix all voices into `left`/`right` (added to existing content) and
    /// advance the clock by `left.len()` frames.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        let frames = left.len().min(right.len());
        let block_start = self.frame;
        let block_end = block_start + frames as u64;

        for voice in &mut self.voices {
            let Some((src_l, src_r)) = voice.buffer.stereo_pair() else {
                continue;
            };

            let from = voice.start_frame.max(block_start);
            let to = voice.end_frame.min(block_end);
            for frame in from..to {
                let pos = voice.offset_pos + (frame - voice.start_frame) as f64 * voice.step;
                let gain = voice.gain_at(frame as f64 / self.sample_rate);
                let i = (frame - block_start) as usize;
                left[i] += Voice::read(src_l, pos, voice.step) * gain;
                right[i] += Voice::read(src_r, pos, voice.step) * gain;
            }
        }

        self.frame = block_end;

        let mut i = 0;
        while i < self.voices.len() {
            if self.voices[i].end_frame <= block_end {
                let mut voice = self.voices.swap_remove(i);
                voice.complete();
            } else {
                i += 1;
            }
        }
    }

    /// Complete every remaining voice without rendering it.
    pub(crate) fn finish_all(&mut self) {
        for mut voice in self.voices.drain(..) {
            voice.complete();
        }
    }
}
