//! Recording collaborator.

use crate::Result;

/// Captures input audio. The playlist only starts and stops it; decoded
/// chunks come back through [`Playlist::ingest_recording`].
///
/// [`Playlist::ingest_recording`]: crate::Playlist::ingest_recording
pub trait Recorder: Send {
    /// Begin capturing, delivering a chunk every `timeslice_ms`.
    fn start(&mut self, timeslice_ms: u32) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    fn is_recording(&self) -> bool;
}
