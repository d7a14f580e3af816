//! Playlist configuration.

use crate::engine::FadeShape;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a seek while stopped is reflected in the displayed playback position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeekStyle {
    /// Only the cursor line moves.
    #[default]
    Line,
    /// The played region is filled up to the seek position.
    Fill,
}

/// Configuration for a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    /// Live context sample rate (Hz).
    pub sample_rate: f64,
    /// Current zoom, in samples per waveform pixel.
    pub samples_per_pixel: usize,
    /// Available zoom levels, ascending.
    pub zoom_levels: Vec<usize>,
    /// Extract peaks as a single mixed channel.
    pub mono: bool,
    /// Soloing a track replaces the solo set instead of adding to it.
    pub exclusive_solo: bool,
    pub seek_style: SeekStyle,
    /// Shape used by fade commands.
    pub fade_type: FadeShape,
    pub master_gain: f32,
    /// Offline render sample rate (Hz).
    pub render_sample_rate: u32,
    /// Recorder chunk interval.
    pub record_timeslice_ms: u32,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            samples_per_pixel: 4096,
            zoom_levels: vec![512, 1024, 2048, 4096],
            mono: true,
            exclusive_solo: false,
            seek_style: SeekStyle::Line,
            fade_type: FadeShape::Logarithmic,
            master_gain: 1.0,
            render_sample_rate: 44100,
            record_timeslice_ms: 300,
        }
    }
}

impl PlaylistConfig {
    pub fn validate(&self) -> Result<()> {
        if !(8000.0..=384000.0).contains(&self.sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        if !(8000..=384000).contains(&self.render_sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "render_sample_rate {} out of range (8000-384000 Hz)",
                self.render_sample_rate
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(Error::InvalidConfig("samples_per_pixel must be > 0".into()));
        }
        if self.zoom_levels.is_empty() {
            return Err(Error::InvalidConfig("zoom_levels must not be empty".into()));
        }
        if self.zoom_levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidConfig(
                "zoom_levels must be strictly ascending".into(),
            ));
        }
        if !self.zoom_levels.contains(&self.samples_per_pixel) {
            return Err(Error::InvalidConfig(format!(
                "samples_per_pixel {} is not one of the zoom levels",
                self.samples_per_pixel
            )));
        }
        if !self.master_gain.is_finite() || self.master_gain < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "master_gain {} must be finite and non-negative",
                self.master_gain
            )));
        }
        Ok(())
    }
}
