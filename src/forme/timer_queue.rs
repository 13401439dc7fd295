//! Cancellable delayed delivery of events into a session's inbox.

use std::time::Duration;

use tokio::{
    sync::mpsc::{UnboundedSender, WeakUnboundedSender},
    task::AbortHandle,
    time::sleep,
};

/// Handle to one scheduled delivery.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    abort: AbortHandle,
}

impl TimerHandle {
    /// Cancel this delivery if it has not fired yet.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the delivery already happened or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// Registry of pending deliveries created by one owner.
///
/// Events are sent through a weak sender so pending timers never keep the
/// inbox alive on their own. Dropping the queue cancels everything it still
/// tracks.
pub struct TimerQueue<E> {
    inbox: WeakUnboundedSender<E>,
    pending: Vec<TimerHandle>,
}

impl<E: Send + 'static> TimerQueue<E> {
    /// Create a queue delivering into `inbox`.
    pub fn new(inbox: &UnboundedSender<E>) -> Self {
        Self {
            inbox: inbox.downgrade(),
            pending: Vec::new(),
        }
    }

    /// Deliver `event` after `delay`.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        self.pending.retain(|handle| !handle.is_finished());

        let inbox = self.inbox.clone();
        let task = tokio::spawn(async move {
            sleep(delay).await;
            if let Some(inbox) = inbox.upgrade() {
                let _ = inbox.send(event);
            }
        });

        let handle = TimerHandle {
            abort: task.abort_handle(),
        };
        self.pending.push(handle.clone());
        handle
    }

    /// Cancel every delivery still pending and forget them. Safe to call repeatedly.
    pub fn cancel_all(&mut self) {
        for handle in self.pending.drain(..) {
            handle.cancel();
        }
    }

    /// Number of deliveries that have not fired yet.
    pub fn pending(&self) -> usize {
        self.pending
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl<E> Drop for TimerQueue<E> {
    fn drop(&mut self) {
        for handle in self.pending.drain(..) {
            handle.cancel();
        }
    }
}
