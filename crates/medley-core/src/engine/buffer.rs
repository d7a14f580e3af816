//! Decoded, immutable audio data.

use std::sync::Arc;

/// Planar f32 audio at a fixed sample rate.
///
/// Cloning is cheap: channel data is shared, so a live and an offline playout
/// can read the same buffer without copying it.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    channels: Arc<[Vec<f32>]>,
    sample_rate: u32,
    frames: usize,
}

impl AudioBuffer {
    /// Build a buffer from planar channels. Channels are truncated to the
    /// shortest one.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        let channels: Vec<Vec<f32>> = channels
            .into_iter()
            .map(|mut ch| {
                ch.truncate(frames);
                ch
            })
            .collect();

        Self {
            channels: channels.into(),
            sample_rate,
            frames,
        }
    }

    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(vec![samples], sample_rate)
    }

    pub fn stereo(left: Vec<f32>, right: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(vec![left, right], sample_rate)
    }

    /// A zero-length buffer, used by a recording track before its first chunk.
    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    /// Length in frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Duration in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    /// Samples of one channel, or `None` if the channel does not exist.
    pub fn channel_data(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    /// Left/right pair for mixing. Mono feeds both sides.
    pub(crate) fn stereo_pair(&self) -> Option<(&[f32], &[f32])> {
        match self.channels.len() {
            0 => None,
            1 => Some((&self.channels[0], &self.channels[0])),
            _ => Some((&self.channels[0], &self.channels[1])),
        }
    }
}
