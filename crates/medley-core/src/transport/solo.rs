//! Solo and mute resolution.

use crate::track::TrackId;

/// Solo and mute membership, kept in toggle order.
#[derive(Debug, Clone, Default)]
pub struct SoloMute {
    soloed: Vec<TrackId>,
    muted: Vec<TrackId>,
    exclusive: bool,
}

impl SoloMute {
    pub fn new(exclusive: bool) -> Self {
        Self {
            exclusive,
            ..Default::default()
        }
    }

    pub fn exclusive(&self) -> bool {
        self.exclusive
    }

    pub fn set_exclusive(&mut self, exclusive: bool) {
        self.exclusive = exclusive;
    }

    /// Un-solo if soloed; otherwise solo, replacing the set in exclusive mode.
    pub fn toggle_solo(&mut self, id: TrackId) {
        if let Some(index) = self.soloed.iter().position(|t| *t == id) {
            self.soloed.remove(index);
        } else if self.exclusive {
            self.soloed = vec![id];
        } else {
            self.soloed.push(id);
        }
    }

    pub fn toggle_mute(&mut self, id: TrackId) {
        if let Some(index) = self.muted.iter().position(|t| *t == id) {
            self.muted.remove(index);
        } else {
            self.muted.push(id);
        }
    }

    pub fn is_soloed(&self, id: TrackId) -> bool {
        self.soloed.contains(&id)
    }

    pub fn is_muted(&self, id: TrackId) -> bool {
        self.muted.contains(&id)
    }

    pub fn soloed(&self) -> &[TrackId] {
        &self.soloed
    }

    pub fn muted(&self) -> &[TrackId] {
        &self.muted
    }

    /// Any solo silences every non-soloed track; mutes only count without solos.
    pub fn should_play(&self, id: TrackId) -> bool {
        if self.soloed.is_empty() {
            !self.is_muted(id)
        } else {
            self.is_soloed(id)
        }
    }

    pub fn clear(&mut self) {
        self.soloed.clear();
        self.muted.clear();
    }
}
