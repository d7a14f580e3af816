//! Multitrack playlist transport: synchronized playback, solo/mute, fades,
//! trimming and offline rendering.
//!
//! # Primary API
//!
//! - [`Playlist`]: track collection and transport commands
//! - [`Track`]: one buffer placed on the timeline
//! - [`Playout`]: schedules one track on one engine
//! - [`AudioContext`] / [`OfflineAudioContext`]: live and offline engines
//! - [`RenderTask`]: a scheduled offline render
//!
//! # Collaborators
//!
//! [`Loader`], [`Encoder`], [`Recorder`] and [`PeakExtractor`] are the seams
//! to decoding, export encoding, capture and waveform display.
//!
//! # Feature-gated APIs
//!
//! - `"cpal"`: [`AudioOutput`] drives a live context from an output device
//!
//! # Example
//!
//! ```ignore
//! use medley_core::prelude::*;
//!
//! let mut playlist = Playlist::new(PlaylistConfig::default())?;
//! playlist.set_loader(loader);
//! playlist.load(vec![TrackInfo::new("vocals.wav")]).await?;
//!
//! let playback = playlist.play(None, None).await;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod loader;
pub mod peaks;
mod playlist;
pub mod playout;
pub mod recorder;
pub mod render;
pub mod track;
pub mod transport;

#[cfg(feature = "cpal")]
mod output;

pub use config::{PlaylistConfig, SeekStyle};
pub use engine::{
    join_all, AudioBuffer, AudioContext, Completion, EngineHandle, Fade, FadeAutomation,
    FadeKind, FadeShape, GainStage, OfflineAudioContext,
};
pub use error::{Error, Result};
pub use events::PlaylistEvent;
pub use loader::{Loader, MemoryLoader, TrackInfo};
pub use peaks::{MinMaxPeaks, PeakExtractor, PeakRequest, Peaks};
pub use playlist::{Playback, Playlist};
pub use playout::{Playout, PlayoutSegment};
pub use recorder::Recorder;
pub use render::{Encoder, RenderKind, RenderOutput, RenderRequest, RenderTask};
pub use track::{
    EnabledStates, InteractionState, ScheduleOptions, Track, TrackDetails, TrackId,
};
pub use transport::{PlayState, SoloMute, TimeSelection, TransportState};

#[cfg(feature = "cpal")]
pub use output::AudioOutput;

pub use crossbeam_channel::Receiver;
pub use futures_util::future::BoxFuture;

pub mod prelude {
    //! Common imports.
    pub use crate::{
        AudioBuffer, AudioContext, Completion, Encoder, Error, Fade, FadeShape, Loader,
        OfflineAudioContext, PlayState, Playback, Playlist, PlaylistConfig, PlaylistEvent,
        Recorder, RenderKind, RenderOutput, RenderRequest, Result, SeekStyle, TimeSelection,
        Track, TrackId, TrackInfo,
    };
}
