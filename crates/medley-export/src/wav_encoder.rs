//! WAV export for offline renders.

use crate::format::wav::encode_buffer;
use crate::options::BitDepth;
use medley_core::{AudioBuffer, BoxFuture, Encoder};

/// Encodes rendered mixes as WAV at the render's sample rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder {
    bit_depth: BitDepth,
}

impl WavEncoder {
    pub fn new(bit_depth: BitDepth) -> Self {
        Self { bit_depth }
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }
}

impl Encoder for WavEncoder {
    fn encode<'a>(&'a self, buffer: &'a AudioBuffer) -> BoxFuture<'a, medley_core::Result<Vec<u8>>> {
        Box::pin(async move {
            let bytes = encode_buffer(buffer, self.bit_depth)
                .map_err(|e| medley_core::Error::Encoding(e.to_string()))?;
            log::debug!(
                "encoded {} frames as {}-bit WAV ({} bytes)",
                buffer.len(),
                self.bit_depth.bits(),
                bytes.len()
            );
            Ok(bytes)
        })
    }
}
