//! Integration test modules for medley
//!
//! - transport: Play/pause/seek/stop and solo/mute through a live context
//! - render: Offline mixdown and its agreement with live playback
//! - export: WAV loading and WAV export through the builder

#[cfg(feature = "wav")]
pub mod export;
pub mod render;
pub mod transport;
