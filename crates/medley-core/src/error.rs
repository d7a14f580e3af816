//! Error types for medley-core.

use crate::track::TrackId;
use thiserror::Error;

/// Error type for medley-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid cues: cue_in={cue_in}, cue_out={cue_out} (buffer is {duration}s)")]
    InvalidCues {
        cue_in: f64,
        cue_out: f64,
        duration: f64,
    },

    #[error("Invalid gain: {0}. Must be finite and non-negative")]
    InvalidGain(f32),

    #[error("Invalid fade duration: {0}")]
    InvalidFade(f64),

    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    #[error("No active track")]
    NoActiveTrack,

    #[error("Load failed: {0}")]
    Load(String),

    #[error("No recorder attached")]
    RecorderUnavailable,

    #[error("Recorder error: {0}")]
    Recorder(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[cfg(feature = "cpal")]
    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    #[cfg(feature = "cpal")]
    #[error("Audio device not available")]
    DeviceNotAvailable(#[from] cpal::DefaultStreamConfigError),

    #[cfg(feature = "cpal")]
    #[error("Failed to build audio stream")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[cfg(feature = "cpal")]
    #[error("Failed to play audio stream")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[cfg(feature = "cpal")]
    #[error("Failed to enumerate devices")]
    DevicesError(#[from] cpal::DevicesError),

    #[cfg(feature = "cpal")]
    #[error("Failed to get device name")]
    DeviceNameError(#[from] cpal::DeviceNameError),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
