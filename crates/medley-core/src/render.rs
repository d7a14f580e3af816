//! Offline render coordination.
//!
//! A render replays the live scheduling decisions against an
//! [`OfflineAudioContext`] and hands the result back as a buffer or, through
//! an [`Encoder`], as an encoded file. Only one render runs at a time.

use crate::engine::{AudioBuffer, OfflineAudioContext};
use crate::events::{EventBus, PlaylistEvent};
use crate::{Error, Result};
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    /// The raw mixed buffer.
    #[default]
    Buffer,
    /// A WAV file produced by the encoder.
    Wav,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub kind: RenderKind,
    /// Master gain for the render; live master volume is not applied.
    pub master_gain: f32,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            kind: RenderKind::Buffer,
            master_gain: 1.0,
        }
    }
}

impl RenderRequest {
    pub fn buffer() -> Self {
        Self::default()
    }

    pub fn wav() -> Self {
        Self {
            kind: RenderKind::Wav,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum RenderOutput {
    Buffer(AudioBuffer),
    Wav(Vec<u8>),
}

impl RenderOutput {
    pub fn kind(&self) -> RenderKind {
        match self {
            RenderOutput::Buffer(_) => RenderKind::Buffer,
            RenderOutput::Wav(_) => RenderKind::Wav,
        }
    }
}

/// Turns rendered channel data into an encoded payload.
pub trait Encoder: Send + Sync {
    fn encode<'a>(&'a self, buffer: &'a AudioBuffer) -> BoxFuture<'a, Result<Vec<u8>>>;
}

/// Clears the in-progress flag when the render ends, however it ends.
#[derive(Debug)]
pub(crate) struct RenderGuard(Arc<AtomicBool>);

impl RenderGuard {
    /// Claim the flag. `None` if a render already holds it.
    pub(crate) fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self(Arc::clone(flag)))
    }
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A scheduled offline render, ready to run.
pub struct RenderTask {
    context: OfflineAudioContext,
    request: RenderRequest,
    encoder: Option<Arc<dyn Encoder>>,
    events: EventBus,
    _guard: RenderGuard,
}

impl RenderTask {
    pub(crate) fn new(
        context: OfflineAudioContext,
        request: RenderRequest,
        encoder: Option<Arc<dyn Encoder>>,
        events: EventBus,
        guard: RenderGuard,
    ) -> Self {
        Self {
            context,
            request,
            encoder,
            events,
            _guard: guard,
        }
    }

    pub fn request(&self) -> RenderRequest {
        self.request
    }

    /// Length of the render in frames.
    pub fn length(&self) -> usize {
        self.context.length()
    }

    /// Render, encode if requested, and notify listeners.
    pub async fn run(self) -> Result<RenderOutput> {
        let result = self.render().await;
        match &result {
            Ok(output) => {
                tracing::debug!(kind = ?output.kind(), "offline render finished");
                self.events
                    .emit(PlaylistEvent::AudioRenderingFinished(output.clone()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "offline render failed");
                self.events
                    .emit(PlaylistEvent::AudioRenderingFailed(e.to_string()));
            }
        }
        result
    }

    async fn render(&self) -> Result<RenderOutput> {
        let buffer = self.context.start_rendering().await?;
        match self.request.kind {
            RenderKind::Buffer => Ok(RenderOutput::Buffer(buffer)),
            RenderKind::Wav => {
                let encoder = self
                    .encoder
                    .as_ref()
                    .ok_or_else(|| Error::Encoding("no encoder configured".into()))?;
                Ok(RenderOutput::Wav(encoder.encode(&buffer).await?))
            }
        }
    }
}

impl std::fmt::Debug for RenderTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTask")
            .field("request", &self.request)
            .field("length", &self.context.length())
            .field("has_encoder", &self.encoder.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive_and_releases() {
        let flag = Arc::new(AtomicBool::new(false));
        let guard = RenderGuard::acquire(&flag).unwrap();
        assert!(RenderGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(RenderGuard::acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn test_failure_emits_and_releases() {
        let flag = Arc::new(AtomicBool::new(false));
        let events = EventBus::new();
        let rx = events.subscribe();

        let task = RenderTask::new(
            OfflineAudioContext::new(2, 0, 44100),
            RenderRequest::buffer(),
            None,
            events,
            RenderGuard::acquire(&flag).unwrap(),
        );
        assert!(task.run().await.is_err());
        assert!(!flag.load(Ordering::Acquire));
        assert!(matches!(
            rx.try_recv(),
            Ok(PlaylistEvent::AudioRenderingFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_wav_without_encoder_fails() {
        let flag = Arc::new(AtomicBool::new(false));
        let task = RenderTask::new(
            OfflineAudioContext::new(2, 10, 44100),
            RenderRequest::wav(),
            None,
            EventBus::new(),
            RenderGuard::acquire(&flag).unwrap(),
        );
        assert!(matches!(task.run().await, Err(Error::Encoding(_))));
    }
}
