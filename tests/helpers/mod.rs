//! Test helpers and fixtures for medley integration tests
//!
//! Playlists run at a low but valid sample rate and are driven by hand
//! through `AudioContext::render_frames`, so every test is deterministic and
//! needs no audio hardware.
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `TIME_EPSILON` (1e-9): Transport positions in seconds
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)

#![allow(dead_code)]

pub mod tolerances;

use medley::prelude::*;
use medley::MemoryLoader;
use std::sync::Arc;

/// Test sample rate, the lowest the config accepts.
pub const TEST_SAMPLE_RATE: u32 = 8000;

pub fn test_config() -> PlaylistConfig {
    PlaylistConfig {
        sample_rate: TEST_SAMPLE_RATE as f64,
        render_sample_rate: TEST_SAMPLE_RATE,
        ..Default::default()
    }
}

/// Frames covering `seconds` at the test rate.
pub fn frames(seconds: f64) -> usize {
    (seconds * TEST_SAMPLE_RATE as f64).round() as usize
}

/// Constant-level mono buffer; makes per-track contributions easy to read off a mix.
pub fn dc(seconds: f64, level: f32) -> AudioBuffer {
    AudioBuffer::mono(vec![level; frames(seconds)], TEST_SAMPLE_RATE)
}

/// Sine buffer at the test rate.
pub fn sine(frequency: f64, seconds: f64, amplitude: f32) -> AudioBuffer {
    AudioBuffer::mono(
        generate_sine(frequency, TEST_SAMPLE_RATE as f64, frames(seconds))
            .into_iter()
            .map(|s| s * amplitude)
            .collect(),
        TEST_SAMPLE_RATE,
    )
}

/// One track to load: source buffer plus timeline start.
pub struct Source {
    pub buffer: AudioBuffer,
    pub start: f64,
}

impl Source {
    pub fn at(start: f64, buffer: AudioBuffer) -> Self {
        Self { buffer, start }
    }
}

/// Build a playlist over an in-memory loader and load `sources` in order.
pub async fn test_playlist(config: PlaylistConfig, sources: Vec<Source>) -> (Playlist, Vec<TrackId>) {
    let loader = MemoryLoader::new();
    let mut infos = Vec::new();
    for (i, source) in sources.into_iter().enumerate() {
        let src = format!("source-{i}");
        loader.insert(src.clone(), source.buffer);
        infos.push(TrackInfo {
            start: source.start,
            ..TrackInfo::new(src)
        });
    }

    let mut playlist = medley::builder()
        .config(config)
        .build()
        .expect("Failed to create test playlist");
    playlist.set_loader(Arc::new(loader));
    let ids = playlist.load(infos).await.expect("Failed to load sources");
    (playlist, ids)
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}

/// Check if a signal is silent (all samples below threshold).
pub fn is_silent(samples: &[f32]) -> bool {
    peak(samples) < tolerances::SILENCE_THRESHOLD
}
