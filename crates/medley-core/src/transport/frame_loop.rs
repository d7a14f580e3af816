//! Per-frame playhead updates.
//!
//! The loop only drives notifications. It is armed when playback starts and
//! disarmed on any transition out of playing.

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FrameTick {
    /// Still playing; playhead moved to this position.
    Advanced(f64),
    /// Playback ended on its own; the loop has disarmed itself.
    Ended(f64),
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    position: f64,
    last_draw: f64,
}

#[derive(Debug, Default)]
pub(crate) struct FrameLoop {
    armed: Option<Armed>,
}

impl FrameLoop {
    pub(crate) fn start(&mut self, position: f64, now: f64) {
        self.armed = Some(Armed {
            position,
            last_draw: now,
        });
    }

    pub(crate) fn stop(&mut self) {
        self.armed = None;
    }

    pub(crate) fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// Advance by the device time elapsed since the previous frame.
    pub(crate) fn tick(&mut self, now: f64, playing: bool) -> Option<FrameTick> {
        let armed = self.armed.as_mut()?;
        let position = armed.position + (now - armed.last_draw);

        if playing {
            armed.position = position;
            armed.last_draw = now;
            Some(FrameTick::Advanced(position))
        } else {
            self.armed = None;
            Some(FrameTick::Ended(position))
        }
    }
}
