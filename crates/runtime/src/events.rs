//! Turn events published by the scheduler.

use serde::{Deserialize, Serialize};

use battle_core::ActorId;

/// Turn lifecycle notifications.
///
/// Events are best-effort: they are dropped when nobody is subscribed and
/// lagging subscribers may miss some.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A timer was armed for the actor. `rearmed` is true if it replaced a
    /// pending timer.
    Armed {
        actor: ActorId,
        delay_units: u32,
        rearmed: bool,
    },
    /// The actor's timer expired and it was appended to the turn queue.
    Ready { actor: ActorId },
    /// A pending timer was cancelled before it fired.
    Cancelled { actor: ActorId },
}
