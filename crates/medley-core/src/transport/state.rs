//! Transport position state.

use serde::{Deserialize, Serialize};

/// Selected range on the timeline, in seconds. `start == end` is a point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSelection {
    pub start: f64,
    pub end: f64,
}

impl TimeSelection {
    /// A selection from `start` to `end`, or a point at `start`.
    pub fn new(start: f64, end: Option<f64>) -> Self {
        Self {
            start,
            end: end.unwrap_or(start),
        }
    }

    pub fn point(at: f64) -> Self {
        Self::new(at, None)
    }

    pub fn is_segment(&self) -> bool {
        self.start != self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Position bookkeeping owned by the playlist.
///
/// Whether playback is running is not stored here: it is derived from the
/// tracks' playouts and passed in where needed.
#[derive(Debug, Clone, Default)]
pub struct TransportState {
    /// Last explicit seek position.
    pub(crate) cursor: f64,
    pub(crate) paused_at: Option<f64>,
    /// Set by pause, cleared by stop and play. A stopped seek also sets
    /// `paused_at`, so that alone does not mean paused.
    pub(crate) paused: bool,
    /// Seek performed while playing.
    pub(crate) last_seeked: Option<f64>,
    /// Device time playback last started.
    pub(crate) last_play: f64,
    pub(crate) selection: TimeSelection,
    /// Position shown by the playhead.
    pub(crate) playback_seconds: f64,
    pub(crate) duration: f64,
    pub(crate) scroll_left: f64,
    pub(crate) view_duration: f64,
}

impl TransportState {
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn paused_at(&self) -> Option<f64> {
        self.paused_at
    }

    pub fn last_seeked(&self) -> Option<f64> {
        self.last_seeked
    }

    pub fn last_play(&self) -> f64 {
        self.last_play
    }

    pub fn selection(&self) -> TimeSelection {
        self.selection
    }

    pub fn playback_seconds(&self) -> f64 {
        self.playback_seconds
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    pub fn view_duration(&self) -> f64 {
        self.view_duration
    }

    /// Position playback is measured from.
    pub fn anchor(&self) -> f64 {
        self.last_seeked.or(self.paused_at).unwrap_or(self.cursor)
    }

    /// Playlist position at device time `now`. Only advances while playing.
    pub fn current_time(&self, now: f64, playing: bool) -> f64 {
        if playing {
            self.anchor() + (now - self.last_play)
        } else {
            self.paused_at.unwrap_or(self.cursor)
        }
    }

    pub fn play_state(&self, playing: bool) -> PlayState {
        match (playing, self.paused) {
            (true, _) => PlayState::Playing,
            (false, true) => PlayState::Paused,
            (false, false) => PlayState::Stopped,
        }
    }

    /// Set the selection and move the cursor to its start.
    pub(crate) fn set_time_selection(&mut self, start: f64, end: Option<f64>) {
        self.selection = TimeSelection::new(start, end);
        self.cursor = start;
    }

    /// Where a `play(start, end)` request actually starts and stops.
    ///
    /// Start falls back to the pause position, then the cursor. End falls
    /// back to the selection end when a segment ahead of the start is
    /// selected; `None` lets each track play to its own end.
    pub fn resolve_window(&self, start: Option<f64>, end: Option<f64>) -> (f64, Option<f64>) {
        let start = start.or(self.paused_at).unwrap_or(self.cursor);
        let end = end.or_else(|| {
            (self.selection.is_segment() && self.selection.end > start)
                .then_some(self.selection.end)
        });
        (start, end)
    }

    /// Where the frame loop reports `finished`.
    pub fn audible_end(&self) -> f64 {
        if self.selection.is_segment() {
            self.selection.end
        } else {
            self.duration
        }
    }
}
