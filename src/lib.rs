//! # Medley - Multitrack Playlist Engine
//!
//! Synchronized multitrack playback with solo/mute, fades, trimming,
//! seeking and offline mixdown.
//!
//! ## Architecture
//!
//! Medley is an umbrella crate that coordinates:
//! - **medley-core** - Playout scheduling, transport state machine, offline rendering
//! - **medley-export** - WAV source loading and WAV export encoding
//!
//! ## Quick Start
//!
//! ```ignore
//! use medley::prelude::*;
//!
//! let mut playlist = medley::builder().root("sessions/take1").build()?;
//! playlist.load(vec![TrackInfo::new("drums.wav"), TrackInfo::new("bass.wav")]).await?;
//!
//! // Play from 4s, pause, resume where we left off
//! playlist.play(Some(4.0), None).await;
//! playlist.pause().await;
//! let playback = playlist.play(None, None).await;
//!
//! // Mix everything down to a WAV file
//! if let Some(task) = playlist.start_offline_render(RenderRequest::wav()) {
//!     if let RenderOutput::Wav(bytes) = task.run().await? {
//!         std::fs::write("mix.wav", bytes)?;
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - WAV loading and export
//! - `wav` - WAV via hound
//! - `cpal` - Drive the live context from a hardware output device

/// Re-export of medley-core for direct access
pub use medley_core as core;

/// Re-export of medley-export for direct access
pub use medley_export as export;

pub use medley_core::{
    AudioBuffer, AudioContext, Completion, EnabledStates, Encoder, Fade, FadeShape,
    InteractionState, Loader, MemoryLoader, OfflineAudioContext, PeakExtractor, Peaks,
    PlayState, Playback, Playlist, PlaylistConfig, PlaylistEvent, Receiver, Recorder,
    RenderKind, RenderOutput, RenderRequest, RenderTask, SeekStyle, TimeSelection, Track,
    TrackDetails, TrackId, TrackInfo, TransportState,
};

#[cfg(feature = "cpal")]
pub use medley_core::AudioOutput;

pub use medley_export::{BitDepth, ExportError};

#[cfg(feature = "wav")]
pub use medley_export::{WavEncoder, WavLoader};

mod builder;
mod error;

pub use builder::MedleyBuilder;
pub use error::{Error, Result};

/// Start configuring a playlist.
pub fn builder() -> MedleyBuilder {
    MedleyBuilder::default()
}

pub mod prelude {
    //! Common imports.
    pub use crate::{
        builder, AudioBuffer, BitDepth, Error, FadeShape, InteractionState, MedleyBuilder,
        PlayState, Playback, Playlist, PlaylistConfig, PlaylistEvent, RenderKind, RenderOutput,
        RenderRequest, Result, SeekStyle, TimeSelection, TrackId, TrackInfo,
    };
}
