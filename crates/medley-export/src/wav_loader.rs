//! WAV source loading for playlists.

use crate::format::wav::decode_wav_file;
use medley_core::{AudioBuffer, BoxFuture, Loader};
use std::path::{Path, PathBuf};

/// Loads `src` descriptors as WAV file paths, optionally relative to a root.
#[derive(Debug, Clone, Default)]
pub struct WavLoader {
    root: Option<PathBuf>,
}

impl WavLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative sources against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, src: &str) -> PathBuf {
        match &self.root {
            Some(root) if Path::new(src).is_relative() => root.join(src),
            _ => PathBuf::from(src),
        }
    }
}

/// Decoding runs on tokio's blocking pool, so the loads of a batch proceed in
/// parallel. Must be polled inside a tokio runtime.
impl Loader for WavLoader {
    fn load<'a>(&'a self, src: &'a str) -> BoxFuture<'a, medley_core::Result<AudioBuffer>> {
        Box::pin(async move {
            let path = self.resolve(src);
            let decode_path = path.clone();
            let buffer = tokio::task::spawn_blocking(move || decode_wav_file(&decode_path))
                .await
                .map_err(|e| medley_core::Error::Load(format!("{}: {e}", path.display())))?
                .map_err(|e| medley_core::Error::Load(format!("{}: {e}", path.display())))?;
            log::debug!(
                "loaded {} ({} ch, {:.3}s)",
                path.display(),
                buffer.number_of_channels(),
                buffer.duration()
            );
            Ok(buffer)
        })
    }
}
