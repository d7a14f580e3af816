//! # Medley Export
//!
//! Codec collaborators for the medley playlist engine:
//! - **Export encoding**: [`WavEncoder`] turns offline renders into WAV files
//! - **Source loading**: [`WavLoader`] decodes WAV sources for `Playlist::load`
//! - **Format helpers**: [`format::wav`] in-memory and file encode/decode
//!
//! ## Note
//!
//! This crate is typically not used directly. The main `medley` crate wires
//! both collaborators into a playlist:
//!
//! ```ignore
//! use medley::prelude::*;
//!
//! let mut playlist = medley::builder().root("sessions/take1").build()?;
//! playlist.load(vec![TrackInfo::new("drums.wav")]).await?;
//!
//! if let Some(task) = playlist.start_offline_render(RenderRequest::wav()) {
//!     let RenderOutput::Wav(bytes) = task.run().await? else { unreachable!() };
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `wav` (default): WAV via hound (pure Rust)

pub mod error;
mod options;

pub mod format;

#[cfg(feature = "wav")]
mod wav_encoder;
#[cfg(feature = "wav")]
mod wav_loader;

pub use error::{ExportError, Result};
pub use options::BitDepth;

#[cfg(feature = "wav")]
pub use format::wav::{decode_wav_file, decode_wav_memory, encode_buffer, WavConfig};
#[cfg(feature = "wav")]
pub use wav_encoder::WavEncoder;
#[cfg(feature = "wav")]
pub use wav_loader::WavLoader;
