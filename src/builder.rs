//! Builder for configuring and constructing a [`Playlist`].

use crate::Result;
use medley_core::{AudioContext, FadeShape, Playlist, PlaylistConfig, Recorder, SeekStyle};
use medley_export::BitDepth;
use std::path::PathBuf;

#[cfg(feature = "wav")]
use std::sync::Arc;
#[cfg(feature = "wav")]
use medley_export::{WavEncoder, WavLoader};

/// With the `wav` feature, the built playlist loads track sources as WAV
/// files (relative to [`root`](Self::root) when set) and exports
/// `RenderRequest::wav()` renders through hound.
///
/// # Example
///
/// ```ignore
/// use medley::prelude::*;
///
/// let mut playlist = medley::builder()
///     .root("sessions/take1")
///     .exclusive_solo(true)
///     .build()?;
///
/// playlist.load(vec![TrackInfo::new("drums.wav"), TrackInfo::new("bass.wav")]).await?;
/// let playback = playlist.play(None, None).await;
/// ```
#[derive(Default)]
pub struct MedleyBuilder {
    config: PlaylistConfig,
    root: Option<PathBuf>,
    bit_depth: BitDepth,
    context: Option<AudioContext>,
    recorder: Option<Box<dyn Recorder>>,
}

impl MedleyBuilder {
    /// Start from a complete configuration, e.g. one deserialized from disk.
    pub fn config(mut self, config: PlaylistConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 44100
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Default: 44100
    pub fn render_sample_rate(mut self, sample_rate: u32) -> Self {
        self.config.render_sample_rate = sample_rate;
        self
    }

    /// Zoom levels and the initial level; the initial level must be one of them.
    pub fn zoom(mut self, levels: Vec<usize>, samples_per_pixel: usize) -> Self {
        self.config.zoom_levels = levels;
        self.config.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn mono(mut self, mono: bool) -> Self {
        self.config.mono = mono;
        self
    }

    pub fn exclusive_solo(mut self, exclusive: bool) -> Self {
        self.config.exclusive_solo = exclusive;
        self
    }

    pub fn seek_style(mut self, style: SeekStyle) -> Self {
        self.config.seek_style = style;
        self
    }

    pub fn fade_type(mut self, shape: FadeShape) -> Self {
        self.config.fade_type = shape;
        self
    }

    /// Default: 1.0
    pub fn master_gain(mut self, gain: f32) -> Self {
        self.config.master_gain = gain;
        self
    }

    /// Directory relative track sources are resolved against.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Bit depth of WAV exports. Default: 16-bit PCM
    pub fn bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Use an existing live context instead of creating one at `sample_rate`.
    pub fn context(mut self, context: AudioContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn recorder(mut self, recorder: Box<dyn Recorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn build(self) -> Result<Playlist> {
        let context = self
            .context
            .unwrap_or_else(|| AudioContext::new(self.config.sample_rate));
        let mut playlist = Playlist::with_context(self.config, context)?;

        #[cfg(feature = "wav")]
        {
            let loader = match self.root {
                Some(root) => WavLoader::with_root(root),
                None => WavLoader::new(),
            };
            playlist.set_loader(Arc::new(loader));
            playlist.set_encoder(Arc::new(WavEncoder::new(self.bit_depth)));
        }
        #[cfg(not(feature = "wav"))]
        let _ = (self.root, self.bit_depth);

        if let Some(recorder) = self.recorder {
            playlist.set_recorder(recorder);
        }

        tracing::debug!(
            sample_rate = playlist.context().sample_rate(),
            render_sample_rate = playlist.config().render_sample_rate,
            "playlist built"
        );
        Ok(playlist)
    }
}
