//! Live and offline audio contexts.

use super::buffer::AudioBuffer;
use super::completion::Completion;
use super::graph::{GainStage, Graph, VoiceId, VoiceSpec};
use crate::{Error, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared handle to a context's graph. Playouts hold one of these; it stays
/// valid (and harmless) after the context itself is gone.
#[derive(Clone)]
pub struct EngineHandle {
    graph: Arc<Mutex<Graph>>,
}

impl EngineHandle {
    fn new(sample_rate: f64) -> Self {
        Self {
            graph: Arc::new(Mutex::new(Graph::new(sample_rate))),
        }
    }

    pub fn current_time(&self) -> f64 {
        self.graph.lock().current_time()
    }

    pub fn sample_rate(&self) -> f64 {
        self.graph.lock().sample_rate()
    }

    pub fn active_voices(&self) -> usize {
        self.graph.lock().active_voices()
    }

    pub(crate) fn schedule(&self, spec: VoiceSpec) -> (VoiceId, Completion) {
        self.graph.lock().schedule(spec)
    }

    pub(crate) fn stop(&self, id: VoiceId) -> bool {
        self.graph.lock().stop(id)
    }

    pub(crate) fn is_active(&self, id: VoiceId) -> bool {
        self.graph.lock().is_active(id)
    }

    pub(crate) fn set_gain(&self, id: VoiceId, stage: GainStage, value: f32) {
        self.graph.lock().set_gain(id, stage, value);
    }

    /// Whether two handles drive the same graph.
    pub fn same_engine(&self, other: &EngineHandle) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph)
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let graph = self.graph.lock();
        f.debug_struct("EngineHandle")
            .field("sample_rate", &graph.sample_rate())
            .field("current_time", &graph.current_time())
            .field("voices", &graph.active_voices())
            .finish()
    }
}

/// Real-time context. The device clock advances only as [`process`] is
/// called by the output callback (or by a test driving it by hand).
///
/// [`process`]: AudioContext::process
#[derive(Clone, Debug)]
pub struct AudioContext {
    engine: EngineHandle,
}

impl AudioContext {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            engine: EngineHandle::new(sample_rate),
        }
    }

    pub fn handle(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn current_time(&self) -> f64 {
        self.engine.current_time()
    }

    pub fn sample_rate(&self) -> f64 {
        self.engine.sample_rate()
    }

    /// Device callback: fill `left`/`right` with the mix and advance the clock.
    pub fn process(&self, left: &mut [f32], right: &mut [f32]) {
        left.fill(0.0);
        right.fill(0.0);
        self.engine.graph.lock().render(left, right);
    }

    /// Render `frames` frames and return them, for monitoring and tests.
    pub fn render_frames(&self, frames: usize) -> (Vec<f32>, Vec<f32>) {
        let mut left = vec![0.0; frames];
        let mut right = vec![0.0; frames];
        self.process(&mut left, &mut right);
        (left, right)
    }
}

/// Faster-than-real-time context of fixed length.
#[derive(Debug)]
pub struct OfflineAudioContext {
    engine: EngineHandle,
    channels: usize,
    length: usize,
    sample_rate: u32,
    rendered: AtomicBool,
}

impl OfflineAudioContext {
    pub fn new(channels: usize, length: usize, sample_rate: u32) -> Self {
        Self {
            engine: EngineHandle::new(sample_rate as f64),
            channels,
            length,
            sample_rate,
            rendered: AtomicBool::new(false),
        }
    }

    pub fn handle(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn current_time(&self) -> f64 {
        self.engine.current_time()
    }

    /// Length in frames.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Render the whole scheduled graph. Every voice is completed when this
    /// returns, whether it finished inside the render window or not.
    pub async fn start_rendering(&self) -> Result<AudioBuffer> {
        if self.length == 0 {
            return Err(Error::Render("offline context has zero length".into()));
        }
        if self.channels == 0 || self.channels > 2 {
            return Err(Error::Render(format!(
                "unsupported offline channel count {}",
                self.channels
            )));
        }
        if self.rendered.swap(true, Ordering::AcqRel) {
            return Err(Error::Render("offline context already rendered".into()));
        }

        let mut left = vec![0.0f32; self.length];
        let mut right = vec![0.0f32; self.length];
        {
            let mut graph = self.engine.graph.lock();
            graph.render(&mut left, &mut right);
            graph.finish_all();
        }

        let channels = if self.channels == 1 {
            vec![left.iter().zip(&right).map(|(l, r)| (l + r) * 0.5).collect()]
        } else {
            vec![left, right]
        };

        Ok(AudioBuffer::new(channels, self.sample_rate))
    }
}
