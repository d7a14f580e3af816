//! CPAL output driving a live [`AudioContext`].

use crate::engine::AudioContext;
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Wrapper to hold `cpal::Stream` in a `Send` context.
///
/// # Safety
/// `cpal::Stream` is `!Send` due to platform internals. The stream is only
/// created, kept and dropped by its owning `AudioOutput`, which hosts keep
/// on one thread or behind a mutex.
struct StreamHandle(#[allow(dead_code)] cpal::Stream);

unsafe impl Send for StreamHandle {}

/// Plays a live context through an output device. The device callback is
/// the context's clock.
pub struct AudioOutput {
    sample_rate: f64,
    channels: usize,
    device_index: Option<usize>,
    stream: Option<StreamHandle>,
}

impl AudioOutput {
    /// Open the default device, or the device at `device_index`.
    pub fn new(device_index: Option<usize>) -> Result<Self> {
        let device = find_device(device_index)?;
        let config = device.default_output_config()?;

        Ok(Self {
            sample_rate: config.sample_rate().0 as f64,
            channels: config.channels() as usize,
            device_index,
            stream: None,
        })
    }

    /// Start pulling audio from `context`. Its sample rate must match the
    /// device's.
    pub fn start(&mut self, context: AudioContext) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        if context.sample_rate() != self.sample_rate {
            return Err(Error::InvalidConfig(format!(
                "context runs at {} Hz but the device runs at {} Hz",
                context.sample_rate(),
                self.sample_rate
            )));
        }

        let device = find_device(self.device_index)?;
        let config = device.default_output_config()?;

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), context)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), context)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), context)?,
            format => {
                return Err(Error::InvalidConfig(format!(
                    "Unsupported sample format: {format:?}"
                )));
            }
        };

        stream.play()?;
        self.stream = Some(StreamHandle(stream));
        tracing::debug!(sample_rate = self.sample_rate, channels = self.channels, "output started");
        Ok(())
    }

    /// Drop the stream. The context clock stops advancing.
    pub fn stop(&mut self) {
        self.stream = None;
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    pub fn device_name(&self) -> Result<String> {
        Ok(find_device(self.device_index)?.name()?)
    }

    pub fn list_devices() -> Result<Vec<String>> {
        cpal::default_host()
            .output_devices()?
            .enumerate()
            .map(|(i, d)| Ok(format!("{i}: {}", d.name()?)))
            .collect()
    }
}

fn find_device(index: Option<usize>) -> Result<cpal::Device> {
    let host = cpal::default_host();

    match index {
        Some(i) => {
            let devices: Vec<_> = host.output_devices()?.collect();
            let count = devices.len();
            devices.into_iter().nth(i).ok_or_else(|| {
                Error::InvalidDevice(format!("Device index {i} out of range ({count} available)"))
            })
        }
        None => host
            .default_output_device()
            .ok_or_else(|| Error::InvalidDevice("No output device available".into())),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    context: AudioContext,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;

    // Grow on the first callback, then stable.
    let mut left = Vec::<f32>::new();
    let mut right = Vec::<f32>::new();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let frames = data.len() / channels;
                if left.len() < frames {
                    left.resize(frames, 0.0);
                    right.resize(frames, 0.0);
                }

                context.process(&mut left[..frames], &mut right[..frames]);
                interleave(data, channels, &left[..frames], &right[..frames]);
            }));

            if result.is_err() {
                silence(data);
            }
        },
        |err| tracing::warn!(%err, "output stream error"),
        None,
    )?;

    Ok(stream)
}

/// Interleave the stereo mix into the device buffer. Mono devices get the
/// average of both sides; channels past the second stay silent.
#[inline]
fn interleave<T: cpal::SizedSample + cpal::FromSample<f32>>(
    data: &mut [T],
    channels: usize,
    left: &[f32],
    right: &[f32],
) {
    for (frame, out) in data.chunks_mut(channels).enumerate() {
        let (l, r) = (left[frame], right[frame]);
        if channels == 1 {
            out[0] = T::from_sample((l + r) * 0.5);
            continue;
        }
        for (ch, sample) in out.iter_mut().enumerate() {
            *sample = T::from_sample(match ch {
                0 => l,
                1 => r,
                _ => 0.0,
            });
        }
    }
}

#[inline]
fn silence<T: cpal::SizedSample + cpal::FromSample<f32>>(data: &mut [T]) {
    data.fill(T::from_sample(0.0));
}
