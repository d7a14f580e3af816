//! Completion handles for scheduled segments.

use tokio::sync::watch;

/// Resolves when a scheduled segment finishes, is stopped, or its engine goes
/// away. Clones observe the same segment, so the transport can keep one copy
/// for restart joins while handing another to the caller.
#[derive(Debug, Clone)]
pub struct Completion {
    rx: Option<watch::Receiver<bool>>,
}

impl Completion {
    pub(crate) fn pair() -> (CompletionSender, Completion) {
        let (tx, rx) = watch::channel(false);
        (CompletionSender(tx), Completion { rx: Some(rx) })
    }

    /// A completion that is already done.
    pub fn resolved() -> Self {
        Self { rx: None }
    }

    pub fn is_done(&self) -> bool {
        match &self.rx {
            None => true,
            Some(rx) => *rx.borrow() || rx.has_changed().is_err(),
        }
    }

    /// Wait for the segment to end. Never fails: a dropped engine counts as done.
    pub async fn wait(self) {
        if let Some(mut rx) = self.rx {
            let _ = rx.wait_for(|done| *done).await;
        }
    }
}

/// Engine-side half of a [`Completion`].
#[derive(Debug)]
pub(crate) struct CompletionSender(watch::Sender<bool>);

impl CompletionSender {
    pub(crate) fn complete(self) {
        let _ = self.0.send(true);
    }
}

/// Wait for every completion. All segments were dispatched before the join,
/// so no segment waits on another.
pub async fn join_all<I>(completions: I)
where
    I: IntoIterator<Item = Completion>,
{
    futures_util::future::join_all(completions.into_iter().map(Completion::wait)).await;
}
