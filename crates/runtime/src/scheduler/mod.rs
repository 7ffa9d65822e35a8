//! Weighted turn scheduler.
//!
//! [`TurnScheduler::wait_turn`] arms a one-shot timer for an actor; when it
//! expires the actor is appended to the shared [`TurnQueue`]. Heavier actors
//! wait longer. All timers are driven by a single dispatcher task, so expiry
//! order is deterministic: earlier deadline first, arming order on ties.
//!
//! Each actor has at most one pending timer. Arming again replaces the
//! pending one, so an actor is enqueued once per wait no matter how often it
//! was re-armed in between.

mod queue;
mod timers;

pub use queue::TurnQueue;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use battle_core::{Actor, ActorId, CombatConfig};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::TurnEvent;
use timers::TimerTable;

/// Scheduling failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A controlled actor without a weapon has no weight to derive a delay from.
    #[error("actor {actor} has no speed source (no weapon equipped)")]
    NoSpeedSource { actor: ActorId },

    #[error("turn scheduler has been shut down")]
    Closed,
}

/// Locks `mutex`, recovering the data if a holder panicked. None of the
/// guarded sections leave their data half-updated.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Shared {
    timers: Mutex<TimerTable>,
    wake: Notify,
    queue: Arc<TurnQueue>,
    events: broadcast::Sender<TurnEvent>,
}

/// Owns the turn timers and the dispatcher task that fires them.
///
/// Must be created inside a tokio runtime. Dropping the scheduler aborts the
/// dispatcher; [`shutdown`](Self::shutdown) stops it gracefully.
pub struct TurnScheduler {
    shared: Arc<Shared>,
    combat: CombatConfig,
    time_unit: Duration,
    dispatcher: Option<JoinHandle<()>>,
}

impl TurnScheduler {
    pub fn spawn(queue: Arc<TurnQueue>, config: &RuntimeConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer_size.max(1));
        let shared = Arc::new(Shared {
            timers: Mutex::new(TimerTable::default()),
            wake: Notify::new(),
            queue,
            events,
        });
        let dispatcher = tokio::spawn(dispatch(Arc::clone(&shared)));

        Self {
            shared,
            combat: config.combat,
            time_unit: config.time_unit,
            dispatcher: Some(dispatcher),
        }
    }

    pub fn queue(&self) -> &Arc<TurnQueue> {
        &self.shared.queue
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TurnEvent> {
        self.shared.events.subscribe()
    }

    /// Arms the actor's turn timer and returns the delay until it fires.
    ///
    /// The delay is `max(1, speed / 10)` time units, where speed is the
    /// equipped weapon's weight (controlled) or the innate weight
    /// (autonomous). Any timer already pending for the actor is replaced.
    pub fn wait_turn(&self, actor: &Actor) -> std::result::Result<Duration, SchedulerError> {
        let id = actor.id();
        let speed = actor
            .speed()
            .ok_or(SchedulerError::NoSpeedSource { actor: id })?;
        let delay_units = self.combat.delay_units(speed);
        let delay = self.time_unit.saturating_mul(delay_units);

        let rearmed = {
            let mut timers = lock(&self.shared.timers);
            if timers.is_closed() {
                return Err(SchedulerError::Closed);
            }
            timers.arm(id, deadline_after(delay))
        };
        self.shared.wake.notify_one();

        debug!(
            target: "battle::scheduler",
            actor = %id,
            speed,
            delay_units,
            rearmed,
            "turn timer armed"
        );
        let _ = self.shared.events.send(TurnEvent::Armed {
            actor: id,
            delay_units,
            rearmed,
        });
        Ok(delay)
    }

    /// Disarms the actor's pending timer. Returns false if none was pending.
    pub fn cancel(&self, actor: ActorId) -> bool {
        let cancelled = lock(&self.shared.timers).cancel(actor);
        if cancelled {
            debug!(target: "battle::scheduler", actor = %actor, "turn timer cancelled");
            let _ = self.shared.events.send(TurnEvent::Cancelled { actor });
        }
        cancelled
    }

    pub fn is_armed(&self, actor: ActorId) -> bool {
        lock(&self.shared.timers).is_armed(actor)
    }

    /// Number of pending timers.
    pub fn armed_count(&self) -> usize {
        lock(&self.shared.timers).armed_count()
    }

    /// Removes the actor's earliest queue entry; a no-op if it is not queued.
    pub fn remove_from_queue(&self, actor: ActorId) -> bool {
        let removed = self.shared.queue.remove(actor);
        debug!(target: "battle::scheduler", actor = %actor, removed, "queue removal");
        removed
    }

    /// Waits for the next ready actor. See [`TurnQueue::dequeue_next_ready`].
    pub async fn dequeue_next_ready(&self) -> ActorId {
        self.shared.queue.dequeue_next_ready().await
    }

    /// Drops all pending timers and waits for the dispatcher to stop.
    /// Actors already queued stay queued; later arming fails with
    /// [`SchedulerError::Closed`].
    pub async fn shutdown(&mut self) -> Result<()> {
        self.close();
        if let Some(handle) = self.dispatcher.take() {
            handle.await.map_err(RuntimeError::WorkerJoin)?;
        }
        Ok(())
    }

    fn close(&self) {
        lock(&self.shared.timers).close();
        self.shared.wake.notify_one();
    }
}

impl Drop for TurnScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.dispatcher.take() {
            self.close();
            handle.abort();
        }
    }
}

/// Upper bound for a pending deadline, used when `now + delay` is not
/// representable.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn deadline_after(delay: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(delay)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

async fn dispatch(shared: Arc<Shared>) {
    debug!(target: "battle::scheduler", "dispatcher started");

    loop {
        let next_deadline = {
            let mut timers = lock(&shared.timers);
            if timers.is_closed() {
                break;
            }
            // Pushing under the timer lock keeps queue order equal to expiry
            // order.
            timers.expire(Instant::now(), |actor| {
                shared.queue.push(actor);
                debug!(target: "battle::scheduler", actor = %actor, "actor ready");
                let _ = shared.events.send(TurnEvent::Ready { actor });
            })
        };

        match next_deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = time::sleep_until(deadline) => {}
                    _ = shared.wake.notified() => {}
                }
            }
            None => shared.wake.notified().await,
        }
    }

    debug!(target: "battle::scheduler", "dispatcher stopped");
}
