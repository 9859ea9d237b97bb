//! Bounded click event queue shared by the redirect path and the click workers.
//!
//! Producers call [`ClickQueue::try_enqueue`], which never waits: the event is
//! either accepted or dropped on the spot. Consumers call
//! [`ClickQueue::dequeue`], which suspends until an event arrives or the queue
//! is closed and drained.
//!
//! The queue is built once by the server's composition root and shared through
//! an `Arc`; there is no global instance.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use tokio::sync::{Mutex, mpsc};

use crate::domain::click_event::ClickEvent;

/// Why an event was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The buffer is at capacity.
    Full,
    /// The queue has been closed for shutdown.
    Closed,
}

/// Result of a non-blocking enqueue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Accepted,
    Dropped(DropReason),
}

impl EnqueueOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EnqueueOutcome::Accepted)
    }
}

/// Fixed-capacity multi-producer, multi-consumer FIFO of [`ClickEvent`]s.
///
/// Built on a bounded `tokio::sync::mpsc` channel. The single sender sits
/// behind a short-lived read lock so that [`ClickQueue::close`] can drop it;
/// the receiver sits behind an async mutex so any number of workers can take
/// turns receiving. Each accepted event is handed to exactly one consumer.
pub struct ClickQueue {
    sender: RwLock<Option<mpsc::Sender<ClickEvent>>>,
    receiver: Mutex<mpsc::Receiver<ClickEvent>>,
    capacity: usize,
    // Incremented before a send, so it never lags behind the receiver.
    buffered: AtomicUsize,
}

impl ClickQueue {
    /// Creates a queue holding at most `capacity` events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Configuration validation rejects that value
    /// before the queue is built.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "click queue capacity must be at least 1");

        let (sender, receiver) = mpsc::channel(capacity);

        Self {
            sender: RwLock::new(Some(sender)),
            receiver: Mutex::new(receiver),
            capacity,
            buffered: AtomicUsize::new(0),
        }
    }

    /// Offers an event to the queue without waiting.
    ///
    /// Returns [`EnqueueOutcome::Accepted`] if the event was buffered, or
    /// [`EnqueueOutcome::Dropped`] if the queue is full or closed. The event is
    /// discarded in the dropped case; logging it is up to the caller.
    pub fn try_enqueue(&self, event: ClickEvent) -> EnqueueOutcome {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);

        let Some(sender) = guard.as_ref() else {
            return EnqueueOutcome::Dropped(DropReason::Closed);
        };

        self.buffered.fetch_add(1, Ordering::AcqRel);
        match sender.try_send(event) {
            Ok(()) => EnqueueOutcome::Accepted,
            Err(err) => {
                self.buffered.fetch_sub(1, Ordering::AcqRel);
                match err {
                    mpsc::error::TrySendError::Full(_) => EnqueueOutcome::Dropped(DropReason::Full),
                    mpsc::error::TrySendError::Closed(_) => {
                        EnqueueOutcome::Dropped(DropReason::Closed)
                    }
                }
            }
        }
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the queue is closed and every buffered event has been
    /// handed out. Only the calling task waits; producers are never blocked.
    pub async fn dequeue(&self) -> Option<ClickEvent> {
        let event = self.receiver.lock().await.recv().await;
        if event.is_some() {
            self.buffered.fetch_sub(1, Ordering::AcqRel);
        }
        event
    }

    /// Closes the queue to producers.
    ///
    /// Later [`ClickQueue::try_enqueue`] calls are dropped with
    /// [`DropReason::Closed`]. Events already buffered are still handed out by
    /// [`ClickQueue::dequeue`], after which it returns `None`.
    ///
    /// Returns `false` if the queue was already closed.
    pub fn close(&self) -> bool {
        self.sender
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    /// Returns true once [`ClickQueue::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Maximum number of buffered events.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots right now, or zero when closed.
    pub fn available(&self) -> usize {
        self.sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, |sender| sender.capacity())
    }

    /// Number of events buffered and not yet handed out.
    ///
    /// Still counts after [`ClickQueue::close`], until the buffer is drained.
    pub fn len(&self) -> usize {
        self.buffered.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ClickQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickQueue")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
