//! Waveform peak extraction.
//!
//! Peaks are display data only; they are computed after a load or trim and
//! never on the playback path.

use crate::engine::AudioBuffer;
use serde::{Deserialize, Serialize};

/// Min/max pairs per pixel, one vector per channel, laid out
/// `[min0, max0, min1, max1, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Peaks {
    /// Number of pixels.
    pub length: usize,
    pub samples_per_pixel: usize,
    pub data: Vec<Vec<f32>>,
}

/// What part of a buffer to summarise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakRequest {
    pub samples_per_pixel: usize,
    /// Merge all channels into one.
    pub mono: bool,
    pub start_frame: usize,
    pub end_frame: usize,
}

/// Peak extraction collaborator.
pub trait PeakExtractor: Send + Sync {
    fn extract(&self, buffer: &AudioBuffer, request: PeakRequest) -> Peaks;
}

/// Plain min/max summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxPeaks;

impl MinMaxPeaks {
    fn channel_peaks(samples: &[f32], samples_per_pixel: usize) -> Vec<f32> {
        let mut out = Vec::with_capacity(samples.len().div_ceil(samples_per_pixel) * 2);
        for block in samples.chunks(samples_per_pixel) {
            let (min, max) = block
                .iter()
                .fold((0.0f32, 0.0f32), |(lo, hi), s| (lo.min(*s), hi.max(*s)));
            out.push(min);
            out.push(max);
        }
        out
    }
}

impl PeakExtractor for MinMaxPeaks {
    fn extract(&self, buffer: &AudioBuffer, request: PeakRequest) -> Peaks {
        let spp = request.samples_per_pixel.max(1);
        let end = request.end_frame.min(buffer.len());
        let start = request.start_frame.min(end);

        let mut data: Vec<Vec<f32>> = (0..buffer.number_of_channels())
            .filter_map(|ch| buffer.channel_data(ch))
            .map(|samples| Self::channel_peaks(&samples[start..end], spp))
            .collect();

        if request.mono && data.len() > 1 {
            let channels = data.len() as f32;
            let merged = (0..data[0].len())
                .map(|i| data.iter().map(|ch| ch[i]).sum::<f32>() / channels)
                .collect();
            data = vec![merged];
        }

        Peaks {
            length: data.first().map_or(0, |ch| ch.len() / 2),
            samples_per_pixel: spp,
            data,
        }
    }
}
