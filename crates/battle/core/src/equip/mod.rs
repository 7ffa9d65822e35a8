//! Weapon/class compatibility.
//!
//! Whether a class may wield a weapon depends only on the weapon's kind. The
//! rules live in one flat table ([`matrix`]) keyed by class, so adding a class
//! or a weapon family is a single-row or single-column edit.

mod matrix;

pub use matrix::{WeaponKinds, allowed_kinds, compatible};

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Actor, ActorClass, Weapon, WeaponKind};

/// An equip attempt paired a class with a weapon kind it cannot use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{class} cannot equip a {kind}")]
pub struct EquipDenied {
    pub class: ActorClass,
    pub kind: WeaponKind,
}

impl GameError for EquipDenied {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "equip_denied"
    }
}

/// Checks the matrix without touching any actor.
pub fn check(class: ActorClass, kind: WeaponKind) -> Result<(), EquipDenied> {
    if compatible(kind, class) {
        Ok(())
    } else {
        Err(EquipDenied { class, kind })
    }
}

/// Equips `weapon` on `actor` if the matrix allows it.
///
/// Returns the previously equipped weapon on success. On denial the actor is
/// left exactly as it was; choosing a fallback weapon is up to the caller.
pub fn equip(actor: &mut Actor, weapon: Weapon) -> Result<Option<Weapon>, EquipDenied> {
    check(actor.class(), weapon.kind())?;
    Ok(actor.replace_weapon(weapon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActorId;

    #[test]
    fn denied_equip_keeps_current_weapon() {
        let mut engineer = Actor::engineer(ActorId(1), "Cid", 80, 10).unwrap();
        let axe = Weapon::axe("Hatchet", 30, 25).unwrap();
        engineer.equip(axe.clone()).unwrap();

        let err = engineer
            .equip(Weapon::staff("Rod", 4, 40, 3).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            EquipDenied {
                class: ActorClass::Engineer,
                kind: WeaponKind::Staff
            }
        );
        assert_eq!(err.to_string(), "engineer cannot equip a staff");
        assert_eq!(engineer.equipped_weapon(), Some(&axe));
    }

    #[test]
    fn equip_returns_replaced_weapon() {
        let mut thief = Actor::thief(ActorId(2), "Locke", 70, 5).unwrap();
        let knife = Weapon::knife("Dirk", 8, 12).unwrap();
        let bow = Weapon::bow("Shortbow", 12, 18).unwrap();

        assert_eq!(thief.equip(knife.clone()), Ok(None));
        assert_eq!(thief.equip(bow.clone()), Ok(Some(knife)));
        assert_eq!(thief.equipped_weapon(), Some(&bow));
    }

    #[test]
    fn autonomous_actors_never_equip() {
        let mut goblin = Actor::enemy(ActorId(3), "Goblin", 10, 10, 0, 3).unwrap();
        let err = goblin.equip(Weapon::sword("Rusty", 5, 10).unwrap()).unwrap_err();
        assert_eq!(err.class, ActorClass::Autonomous);
        assert!(goblin.equipped_weapon().is_none());
        assert!(err.severity().is_recoverable());
    }
}
