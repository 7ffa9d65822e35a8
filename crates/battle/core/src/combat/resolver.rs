use crate::config::CombatConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Actor, ActorId};
use crate::stats::IntegrityViolation;

/// Errors that can occur while resolving an attack.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    /// A controlled attacker has no weapon equipped.
    #[error("actor {actor} has no weapon equipped")]
    Unarmed { actor: ActorId },

    /// The target's HP would leave its bounds.
    #[error(transparent)]
    Integrity(#[from] IntegrityViolation),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unarmed { .. } => ErrorSeverity::Validation,
            Self::Integrity(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unarmed { .. } => "unarmed",
            Self::Integrity(inner) => inner.error_code(),
        }
    }
}

/// Result of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub attacker: ActorId,
    pub target: ActorId,
    /// Raw damage dealt by the attacker.
    pub damage: i32,
    /// HP the target lost after mitigation.
    pub taken: i32,
    pub hp_before: i32,
    pub hp_after: i32,
    /// True if the target is at 0 HP after the hit.
    pub defeated: bool,
}

/// Resolves `attacker` hitting `target` with the default combat rules.
pub fn attack(attacker: &Actor, target: &mut Actor) -> Result<AttackOutcome, CombatError> {
    attacker.attack_character(target)
}

/// Resolves `attacker` hitting `target` under `config`.
pub fn attack_with(
    attacker: &Actor,
    target: &mut Actor,
    config: &CombatConfig,
) -> Result<AttackOutcome, CombatError> {
    attacker.attack_character_with(target, config)
}
