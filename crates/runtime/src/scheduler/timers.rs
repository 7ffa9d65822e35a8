//! Timer table drained by the dispatcher task.
//!
//! Every armed wait becomes a heap entry tagged with a sequence number. The
//! `armed` map records the one live sequence per actor, so re-arming or
//! cancelling simply makes older entries stale; stale entries are discarded
//! when they reach the top of the heap.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tokio::time::Instant;

use battle_core::ActorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PendingTimer {
    deadline: Instant,
    seq: u64,
    actor: ActorId,
}

#[derive(Debug, Default)]
pub(super) struct TimerTable {
    pending: BinaryHeap<Reverse<PendingTimer>>,
    armed: HashMap<ActorId, u64>,
    next_seq: u64,
    closed: bool,
}

impl TimerTable {
    /// Arms a timer for `actor`, invalidating any pending one.
    /// Returns true if a pending timer was replaced.
    pub(super) fn arm(&mut self, actor: ActorId, deadline: Instant) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(PendingTimer {
            deadline,
            seq,
            actor,
        }));
        self.armed.insert(actor, seq).is_some()
    }

    /// Disarms the pending timer of `actor`, if any.
    pub(super) fn cancel(&mut self, actor: ActorId) -> bool {
        self.armed.remove(&actor).is_some()
    }

    pub(super) fn is_armed(&self, actor: ActorId) -> bool {
        self.armed.contains_key(&actor)
    }

    pub(super) fn armed_count(&self) -> usize {
        self.armed.len()
    }

    pub(super) fn close(&mut self) {
        self.closed = true;
        self.pending.clear();
        self.armed.clear();
    }

    pub(super) const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fires every live timer due at `now`, in `(deadline, seq)` order, and
    /// returns the deadline of the next live timer.
    pub(super) fn expire(&mut self, now: Instant, mut fire: impl FnMut(ActorId)) -> Option<Instant> {
        while let Some(Reverse(head)) = self.pending.peek().copied() {
            let live = self.armed.get(&head.actor) == Some(&head.seq);
            if live && head.deadline > now {
                return Some(head.deadline);
            }

            self.pending.pop();
            if live {
                self.armed.remove(&head.actor);
                fire(head.actor);
            }
        }
        None
    }
}
