//! WAV encoding and decoding using hound
//!
//! Writes 16-bit, 24-bit, and 32-bit float WAV; reads any PCM or float WAV
//! hound understands.

use crate::error::{ExportError, Result};
use crate::options::BitDepth;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use medley_core::AudioBuffer;
use std::io::{Read, Seek, Write};
use std::path::Path;

/// Layout of a WAV stream: rate, sample encoding and channel count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavConfig {
    pub sample_rate: u32,
    pub bit_depth: BitDepth,
    pub channels: u16,
}

impl Default for WavConfig {
    /// CD-quality stereo.
    fn default() -> Self {
        Self::for_channels(2, 44100, BitDepth::Int16)
    }
}

impl WavConfig {
    pub fn for_channels(channels: u16, sample_rate: u32, bit_depth: BitDepth) -> Self {
        Self {
            sample_rate,
            bit_depth,
            channels,
        }
    }

    pub fn mono(sample_rate: u32, bit_depth: BitDepth) -> Self {
        Self::for_channels(1, sample_rate, bit_depth)
    }

    /// Same rate and channel count as `buffer`.
    pub fn matching(buffer: &AudioBuffer, bit_depth: BitDepth) -> Self {
        Self::for_channels(
            buffer.number_of_channels() as u16,
            buffer.sample_rate(),
            bit_depth,
        )
    }

    fn spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bit_depth.bits(),
            sample_format: match self.bit_depth {
                BitDepth::Float32 => SampleFormat::Float,
                BitDepth::Int16 | BitDepth::Int24 => SampleFormat::Int,
            },
        }
    }
}

/// Encode planar channels (one equal-length slice per channel, nominal
/// range -1..1) to WAV bytes. `config.channels` must match `channels.len()`.
pub fn encode_wav_memory(channels: &[&[f32]], config: &WavConfig) -> Result<Vec<u8>> {
    let mut bytes = std::io::Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut bytes, config.spec())
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    write_interleaved(&mut writer, channels, config)?;
    writer
        .finalize()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    Ok(bytes.into_inner())
}

/// Encode planar channels to a WAV file
pub fn encode_wav_file(channels: &[&[f32]], path: &Path, config: &WavConfig) -> Result<()> {
    let mut writer = WavWriter::create(path, config.spec())?;
    write_interleaved(&mut writer, channels, config)?;
    writer.finalize()?;
    Ok(())
}

/// Encode a rendered buffer, keeping its sample rate and channel count
pub fn encode_buffer(buffer: &AudioBuffer, bit_depth: BitDepth) -> Result<Vec<u8>> {
    let channels: Vec<&[f32]> = (0..buffer.number_of_channels())
        .filter_map(|ch| buffer.channel_data(ch))
        .collect();
    if channels.is_empty() {
        return Err(ExportError::InvalidData("buffer has no channels".into()));
    }

    encode_wav_memory(&channels, &WavConfig::matching(buffer, bit_depth))
}

fn write_interleaved<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    channels: &[&[f32]],
    config: &WavConfig,
) -> Result<()> {
    if channels.is_empty() || channels.len() != config.channels as usize {
        return Err(ExportError::InvalidData(format!(
            "expected {} channels, got {}",
            config.channels,
            channels.len()
        )));
    }

    let frames = channels[0].len();
    if channels.iter().any(|ch| ch.len() != frames) {
        return Err(ExportError::InvalidData(
            "Channels have different lengths".into(),
        ));
    }

    for frame in 0..frames {
        for channel in channels {
            let sample = channel[frame];
            let written = match config.bit_depth {
                BitDepth::Int16 => writer.write_sample(quantize(sample, 16) as i16),
                BitDepth::Int24 => writer.write_sample(quantize(sample, 24)),
                BitDepth::Float32 => writer.write_sample(sample),
            };
            written.map_err(|e| ExportError::Encoding(e.to_string()))?;
        }
    }

    Ok(())
}

/// Decode WAV bytes into a planar buffer
pub fn decode_wav_memory(bytes: &[u8]) -> Result<AudioBuffer> {
    decode(WavReader::new(std::io::Cursor::new(bytes))?)
}

/// Decode a WAV file into a planar buffer
pub fn decode_wav_file(path: &Path) -> Result<AudioBuffer> {
    decode(WavReader::open(path)?)
}

fn decode<R: Read>(reader: WavReader<R>) -> Result<AudioBuffer> {
    let spec = reader.spec();
    let channel_count = spec.channels as usize;
    if channel_count == 0 {
        return Err(ExportError::InvalidData("WAV has no channels".into()));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let frames = interleaved.len() / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for frame in interleaved.chunks_exact(channel_count) {
        for (channel, sample) in channels.iter_mut().zip(frame) {
            channel.push(*sample);
        }
    }

    Ok(AudioBuffer::new(channels, spec.sample_rate))
}

/// Clip to -1..1 and scale to a signed integer of `bits` bits. Full scale is
/// symmetric, so -1.0 maps to `-(2^(bits-1) - 1)`.
#[inline]
fn quantize(sample: f32, bits: u32) -> i32 {
    let full_scale = ((1i64 << (bits - 1)) - 1) as f32;
    (sample.clamp(-1.0, 1.0) * full_scale) as i32
}
