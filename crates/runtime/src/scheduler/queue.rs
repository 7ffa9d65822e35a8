//! Shared readiness queue.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::Notify;

use battle_core::ActorId;

use super::lock;

/// FIFO of actors whose turn timers have expired.
///
/// Producers are the scheduler's dispatcher; there is a single consumer that
/// awaits [`dequeue_next_ready`](Self::dequeue_next_ready). An actor may be
/// queued more than once. The lock is never held across an await.
#[derive(Debug, Default)]
pub struct TurnQueue {
    entries: Mutex<VecDeque<ActorId>>,
    ready: Notify,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, actor: ActorId) {
        lock(&self.entries).push_back(actor);
        self.ready.notify_one();
    }

    /// Waits until an actor is ready and removes the earliest one.
    ///
    /// Suspends indefinitely if nothing is ever scheduled.
    pub async fn dequeue_next_ready(&self) -> ActorId {
        loop {
            let notified = self.ready.notified();
            if let Some(actor) = self.try_dequeue() {
                return actor;
            }
            notified.await;
        }
    }

    /// Removes the earliest ready actor without waiting.
    pub fn try_dequeue(&self) -> Option<ActorId> {
        lock(&self.entries).pop_front()
    }

    /// Removes the earliest entry for `actor`. Returns false (and changes
    /// nothing) if the actor is not queued.
    pub fn remove(&self, actor: ActorId) -> bool {
        let mut entries = lock(&self.entries);
        match entries.iter().position(|&queued| queued == actor) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        lock(&self.entries).contains(&actor)
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }

    /// Queued actors, earliest first.
    pub fn snapshot(&self) -> Vec<ActorId> {
        lock(&self.entries).iter().copied().collect()
    }
}
