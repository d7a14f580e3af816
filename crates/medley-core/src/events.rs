//! Notifications emitted by the playlist.

use crate::render::RenderOutput;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;

/// Events a subscriber may fall behind by before new ones are dropped for it.
pub const EVENT_CAPACITY: usize = 8192;

#[derive(Debug, Clone)]
pub enum PlaylistEvent {
    /// Playhead position in seconds.
    TimeUpdate(f64),
    /// Playback reached the end of the selection or playlist.
    Finished,
    Select { start: f64, end: f64 },
    AudioRenderingFinished(RenderOutput),
    AudioRenderingFailed(String),
    AudioSourcesLoaded,
    AudioSourcesRendered,
}

/// Broadcast to every live subscriber, each through its own bounded channel.
/// Subscribers that dropped their receiver are pruned on the next emit.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventBus {
    subscribers: Arc<Mutex<Vec<Sender<PlaylistEvent>>>>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&self) -> Receiver<PlaylistEvent> {
        let (tx, rx) = crossbeam_channel::bounded(EVENT_CAPACITY);
        self.subscribers.lock().push(tx);
        rx
    }

    pub(crate) fn emit(&self, event: PlaylistEvent) {
        self.subscribers
            .lock()
            .retain(|tx| match tx.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    tracing::trace!(?event, "subscriber full, event dropped");
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            });
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_sees_every_event() {
        let bus = EventBus::new();
        let ui = bus.subscribe();
        let meter = bus.subscribe();

        for i in 0..10 {
            bus.emit(PlaylistEvent::TimeUpdate(i as f64));
        }
        bus.emit(PlaylistEvent::Finished);

        assert_eq!(ui.try_iter().count(), 11);
        assert_eq!(meter.try_iter().count(), 11);
    }

    #[test]
    fn test_no_subscribers_queues_nothing() {
        let bus = EventBus::new();
        for _ in 0..10_000 {
            bus.emit(PlaylistEvent::TimeUpdate(0.0));
        }
        let late = bus.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_slow_subscriber_is_bounded() {
        let bus = EventBus::new();
        let slow = bus.subscribe();
        for _ in 0..EVENT_CAPACITY + 100 {
            bus.emit(PlaylistEvent::TimeUpdate(0.0));
        }
        assert_eq!(slow.len(), EVENT_CAPACITY);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(PlaylistEvent::Finished);
        assert_eq!(bus.subscriber_count(), 1);
        assert!(matches!(kept.try_recv(), Ok(PlaylistEvent::Finished)));
    }
}
