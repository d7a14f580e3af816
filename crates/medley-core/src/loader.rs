//! Audio source loading.

use crate::engine::{AudioBuffer, Fade};
use crate::peaks::Peaks;
use crate::track::EnabledStates;
use crate::transport::TimeSelection;
use crate::{Error, Result};
use futures_util::future::BoxFuture;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Decodes a source descriptor into a buffer.
pub trait Loader: Send + Sync {
    fn load<'a>(&'a self, src: &'a str) -> BoxFuture<'a, Result<AudioBuffer>>;
}

/// Describes one track to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackInfo {
    pub src: String,
    pub name: Option<String>,
    /// Playlist position of the track start, in seconds.
    pub start: f64,
    pub cuein: Option<f64>,
    pub cueout: Option<f64>,
    pub gain: Option<f32>,
    pub muted: bool,
    pub soloed: bool,
    #[serde(alias = "fadeIn")]
    pub fade_in: Option<Fade>,
    #[serde(alias = "fadeOut")]
    pub fade_out: Option<Fade>,
    /// Makes this the active track with the given selection.
    pub selected: Option<TimeSelection>,
    pub states: EnabledStates,
    /// Precomputed peaks; recomputed on load when absent.
    pub peaks: Option<Peaks>,
}

impl TrackInfo {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }
}

/// Serves buffers that were decoded elsewhere, keyed by source name.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    buffers: RwLock<HashMap<String, AudioBuffer>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, src: impl Into<String>, buffer: AudioBuffer) {
        self.buffers.write().insert(src.into(), buffer);
    }
}

impl Loader for MemoryLoader {
    fn load<'a>(&'a self, src: &'a str) -> BoxFuture<'a, Result<AudioBuffer>> {
        let result = self
            .buffers
            .read()
            .get(src)
            .cloned()
            .ok_or_else(|| Error::Load(format!("unknown source: {src}")));
        Box::pin(async move { result })
    }
}
