use crate::equip::EquipDenied;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::IntegrityViolation;

use super::ActorId;

/// Errors raised when mutating an actor outside of combat.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActorError {
    #[error(transparent)]
    Integrity(#[from] IntegrityViolation),

    /// The actor's class carries no mana pool.
    #[error("actor {actor} has no mana pool")]
    NoMana { actor: ActorId },
}

impl GameError for ActorError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Integrity(inner) => inner.severity(),
            Self::NoMana { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Integrity(inner) => inner.error_code(),
            Self::NoMana { .. } => "no_mana",
        }
    }
}

/// Reasons a stored actor record is refused when loaded back.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error(transparent)]
    Integrity(#[from] IntegrityViolation),

    #[error(transparent)]
    EquipDenied(#[from] EquipDenied),

    /// The record's pools or innate stats do not fit its class.
    #[error("actor {actor}: {reason}")]
    Inconsistent { actor: ActorId, reason: &'static str },
}

impl GameError for RestoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Integrity(inner) => inner.severity(),
            Self::EquipDenied(_) | Self::Inconsistent { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Integrity(inner) => inner.error_code(),
            Self::EquipDenied(inner) => inner.error_code(),
            Self::Inconsistent { .. } => "inconsistent_record",
        }
    }
}
