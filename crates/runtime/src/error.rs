//! Unified error types surfaced by the runtime API.
//!
//! Wraps model failures from `battle-core` and scheduler coordination failures
//! so drivers can bubble them up with consistent context.

use thiserror::Error;

use battle_core::{
    ActorClass, ActorId, CombatError, EquipDenied, ErrorSeverity, GameError, IntegrityViolation,
};

use crate::scheduler::SchedulerError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Integrity(#[from] IntegrityViolation),

    #[error(transparent)]
    EquipDenied(#[from] EquipDenied),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("actor {0} is not part of this encounter")]
    UnknownActor(ActorId),

    #[error("party incomplete: {present} of {required} members present")]
    PartyIncomplete { required: i32, present: i32 },

    #[error("a {class} actor cannot join as {role}")]
    WrongRole {
        class: ActorClass,
        role: &'static str,
    },

    #[error("actor {0} is defeated")]
    Defeated(ActorId),

    #[error("encounter already started")]
    AlreadyStarted,

    #[error("encounter has not started")]
    NotStarted,

    #[error("scheduler dispatcher join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Integrity(inner) => inner.severity(),
            Self::EquipDenied(inner) => inner.severity(),
            Self::Combat(inner) => inner.severity(),
            Self::Scheduler(SchedulerError::NoSpeedSource { .. }) => ErrorSeverity::Validation,
            Self::Scheduler(SchedulerError::Closed) => ErrorSeverity::Internal,
            Self::UnknownActor(_)
            | Self::PartyIncomplete { .. }
            | Self::WrongRole { .. }
            | Self::Defeated(_)
            | Self::AlreadyStarted
            | Self::NotStarted => ErrorSeverity::Validation,
            Self::WorkerJoin(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Integrity(inner) => inner.error_code(),
            Self::EquipDenied(inner) => inner.error_code(),
            Self::Combat(inner) => inner.error_code(),
            Self::Scheduler(SchedulerError::NoSpeedSource { .. }) => "no_speed_source",
            Self::Scheduler(SchedulerError::Closed) => "scheduler_closed",
            Self::UnknownActor(_) => "unknown_actor",
            Self::PartyIncomplete { .. } => "party_incomplete",
            Self::WrongRole { .. } => "wrong_role",
            Self::Defeated(_) => "defeated",
            Self::AlreadyStarted => "already_started",
            Self::NotStarted => "not_started",
            Self::WorkerJoin(_) => "worker_join",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActorClass, WeaponKind};

    #[test]
    fn wrapped_core_errors_keep_their_classification() {
        let denied = RuntimeError::from(EquipDenied {
            class: ActorClass::WhiteMage,
            kind: WeaponKind::Sword,
        });
        assert_eq!(denied.severity(), ErrorSeverity::Recoverable);
        assert_eq!(denied.error_code(), "equip_denied");
        assert_eq!(denied.to_string(), "white_mage cannot equip a sword");
    }

    #[test]
    fn orchestration_errors_are_validation_failures() {
        let err = RuntimeError::PartyIncomplete {
            required: 4,
            present: 2,
        };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.to_string(), "party incomplete: 2 of 4 members present");

        let closed = RuntimeError::from(SchedulerError::Closed);
        assert!(closed.severity().is_internal());
    }
}
