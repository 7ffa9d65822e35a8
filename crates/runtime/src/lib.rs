//! Async turn scheduling and encounter orchestration for active-time battles.
//!
//! This crate drives the validated model from `battle-core` in real time.
//! Actors wait a weight-derived delay before becoming ready; ready actors are
//! handed out one at a time through a shared queue.
//!
//! Modules are organized by responsibility:
//! - [`scheduler`] owns turn timers, the dispatcher task and the ready queue
//! - [`encounter`] hosts one battle: roster, sides and attack resolution
//! - [`events`] defines the notifications published while scheduling
//! - [`config`] and [`error`] carry the runtime settings and error surface
pub mod config;
pub mod encounter;
pub mod error;
pub mod events;
pub mod scheduler;

pub use config::RuntimeConfig;
pub use encounter::{Encounter, EncounterSnapshot};
pub use error::{Result, RuntimeError};
pub use events::TurnEvent;
pub use scheduler::{SchedulerError, TurnQueue, TurnScheduler};
