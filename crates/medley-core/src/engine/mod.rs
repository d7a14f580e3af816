//! Sample-accurate audio engine model.
//!
//! - [`AudioBuffer`]: immutable decoded audio
//! - [`AudioContext`]: live context driven by the device callback
//! - [`OfflineAudioContext`]: fixed-length faster-than-real-time render
//! - [`Completion`]: resolves when a scheduled segment ends or is stopped

mod buffer;
mod completion;
mod context;
mod fade;
mod graph;

pub use buffer::AudioBuffer;
pub use completion::{join_all, Completion};
pub use context::{AudioContext, EngineHandle, OfflineAudioContext};
pub use fade::{Fade, FadeAutomation, FadeKind, FadeShape};
pub use graph::{GainStage, Graph};

pub(crate) use graph::{VoiceId, VoiceSpec};
