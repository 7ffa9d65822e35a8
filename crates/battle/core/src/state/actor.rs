use core::fmt;

use crate::combat::{self, AttackOutcome, CombatError};
use crate::config::CombatConfig;
use crate::equip::{self, EquipDenied};
use crate::stats::{IntegrityViolation, ResourceKind, ResourceMeter, guard};

use super::{ActorClass, ActorError, ActorId, Weapon};
#[cfg(feature = "serde")]
use super::RestoreError;

/// Unvalidated construction parameters for an [`Actor`].
///
/// Fields that the chosen class does not use are ignored: `max_mp` only
/// matters for mages, `weight` and `attack` only for autonomous actors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorParams {
    pub name: String,
    pub class: ActorClass,
    pub max_hp: i32,
    pub defense: i32,
    pub max_mp: i32,
    pub weight: i32,
    pub attack: i32,
}

impl ActorParams {
    /// Parameters for a weapon-wielding class. Mages start with an empty mana
    /// pool unless [`with_max_mp`](Self::with_max_mp) is used.
    pub fn controlled(
        class: ActorClass,
        name: impl Into<String>,
        max_hp: i32,
        defense: i32,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            max_hp,
            defense,
            max_mp: 0,
            weight: 0,
            attack: 0,
        }
    }

    /// Parameters for an autonomous actor (enemy).
    pub fn autonomous(
        name: impl Into<String>,
        weight: i32,
        max_hp: i32,
        defense: i32,
        attack: i32,
    ) -> Self {
        Self {
            name: name.into(),
            class: ActorClass::Autonomous,
            max_hp,
            defense,
            max_mp: 0,
            weight,
            attack,
        }
    }

    pub fn with_max_mp(mut self, max_mp: i32) -> Self {
        self.max_mp = max_mp;
        self
    }
}

/// Intrinsic speed and damage of an autonomous actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Innate {
    pub weight: i32,
    pub attack: i32,
}

/// A combatant.
///
/// One record covers every class; behaviour is gated on capabilities:
/// - `weapon` is only ever set for controlled classes (see [`equip`])
/// - `mana` exists only for mages
/// - `innate` exists only for autonomous actors
///
/// A deserialized actor is rebuilt through [`construct`](Self::construct)
/// and [`equip`](Self::equip), so stored records obey the same bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ActorRecord")
)]
pub struct Actor {
    id: ActorId,
    name: String,
    class: ActorClass,
    hp: ResourceMeter,
    defense: i32,
    weapon: Option<Weapon>,
    mana: Option<ResourceMeter>,
    innate: Option<Innate>,
}

impl Actor {
    /// Validates `params` and builds the actor with full HP and MP.
    ///
    /// Fails on the first bound violation; no actor exists on failure.
    pub fn construct(id: ActorId, params: ActorParams) -> Result<Self, IntegrityViolation> {
        let ActorParams {
            name,
            class,
            max_hp,
            defense,
            max_mp,
            weight,
            attack,
        } = params;

        let hp = ResourceMeter::full(ResourceKind::Hp, max_hp)?;
        let defense = guard::at_least(defense, 0, "Defense")?;

        let mana = if class.is_magic() {
            Some(ResourceMeter::full(ResourceKind::Mp, max_mp)?)
        } else {
            None
        };

        let innate = if class.is_controlled() {
            None
        } else {
            Some(Innate {
                weight: guard::at_least(weight, 1, "Weight")?,
                attack: guard::at_least(attack, 1, "Attack")?,
            })
        };

        Ok(Self {
            id,
            name,
            class,
            hp,
            defense,
            weapon: None,
            mana,
            innate,
        })
    }

    pub fn engineer(
        id: ActorId,
        name: impl Into<String>,
        max_hp: i32,
        defense: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::construct(id, ActorParams::controlled(ActorClass::Engineer, name, max_hp, defense))
    }

    pub fn knight(
        id: ActorId,
        name: impl Into<String>,
        max_hp: i32,
        defense: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::construct(id, ActorParams::controlled(ActorClass::Knight, name, max_hp, defense))
    }

    pub fn thief(
        id: ActorId,
        name: impl Into<String>,
        max_hp: i32,
        defense: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::construct(id, ActorParams::controlled(ActorClass::Thief, name, max_hp, defense))
    }

    pub fn black_mage(
        id: ActorId,
        name: impl Into<String>,
        max_hp: i32,
        max_mp: i32,
        defense: i32,
    ) -> Result<Self, IntegrityViolation> {
        let params = ActorParams::controlled(ActorClass::BlackMage, name, max_hp, defense)
            .with_max_mp(max_mp);
        Self::construct(id, params)
    }

    pub fn white_mage(
        id: ActorId,
        name: impl Into<String>,
        max_hp: i32,
        max_mp: i32,
        defense: i32,
    ) -> Result<Self, IntegrityViolation> {
        let params = ActorParams::controlled(ActorClass::WhiteMage, name, max_hp, defense)
            .with_max_mp(max_mp);
        Self::construct(id, params)
    }

    pub fn enemy(
        id: ActorId,
        name: impl Into<String>,
        weight: i32,
        max_hp: i32,
        defense: i32,
        attack: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::construct(id, ActorParams::autonomous(name, weight, max_hp, defense, attack))
    }

    pub const fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn class(&self) -> ActorClass {
        self.class
    }

    pub const fn max_hp(&self) -> i32 {
        self.hp.maximum()
    }

    pub const fn current_hp(&self) -> i32 {
        self.hp.current()
    }

    pub const fn defense(&self) -> i32 {
        self.defense
    }

    pub fn max_mp(&self) -> Option<i32> {
        self.mana.map(|mana| mana.maximum())
    }

    pub fn current_mp(&self) -> Option<i32> {
        self.mana.map(|mana| mana.current())
    }

    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub const fn innate(&self) -> Option<Innate> {
        self.innate
    }

    /// Assigns current HP within `[0, max_hp]`. On failure the value is kept.
    pub fn set_current_hp(&mut self, value: i32) -> Result<(), IntegrityViolation> {
        self.hp.set_current(value)
    }

    /// Assigns current MP within `[0, max_mp]`. On failure the value is kept.
    pub fn set_current_mp(&mut self, value: i32) -> Result<(), ActorError> {
        let mana = self
            .mana
            .as_mut()
            .ok_or(ActorError::NoMana { actor: self.id })?;
        mana.set_current(value)?;
        Ok(())
    }

    /// Equips `weapon` if the class allows its kind, returning the weapon it
    /// replaced. A denied equip leaves the current weapon untouched.
    pub fn equip(&mut self, weapon: Weapon) -> Result<Option<Weapon>, EquipDenied> {
        equip::equip(self, weapon)
    }

    /// Removes and returns the equipped weapon.
    pub fn unequip(&mut self) -> Option<Weapon> {
        self.weapon.take()
    }

    pub(crate) fn replace_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon.replace(weapon)
    }

    /// Speed used for turn scheduling: the equipped weapon's weight for
    /// controlled actors, the innate weight for autonomous ones. `None` while
    /// a controlled actor is unarmed.
    pub fn speed(&self) -> Option<i32> {
        match (&self.innate, &self.weapon) {
            (Some(innate), _) => Some(innate.weight),
            (None, Some(weapon)) => Some(weapon.weight()),
            (None, None) => None,
        }
    }

    /// Damage this actor deals per attack, if it can attack at all.
    pub fn effective_damage(&self) -> Option<i32> {
        match (&self.innate, &self.weapon) {
            (Some(innate), _) => Some(innate.attack),
            (None, Some(weapon)) => Some(weapon.damage()),
            (None, None) => None,
        }
    }

    pub const fn is_defeated(&self) -> bool {
        self.hp.is_empty()
    }

    /// Takes an attack of raw `damage` with the default combat rules.
    ///
    /// Returns the HP actually lost. See [`combat::damage_taken`].
    pub fn receive_attack(&mut self, damage: i32) -> Result<i32, IntegrityViolation> {
        self.receive_attack_with(damage, &CombatConfig::DEFAULT)
    }

    /// Takes an attack of raw `damage` under `config`.
    ///
    /// The new HP goes through the validated setter: a hit that would push HP
    /// below zero fails with [`IntegrityViolation`] and leaves HP unchanged.
    pub fn receive_attack_with(
        &mut self,
        damage: i32,
        config: &CombatConfig,
    ) -> Result<i32, IntegrityViolation> {
        let taken = combat::damage_taken(damage, self.defense, config);
        self.set_current_hp(self.current_hp().saturating_sub(taken))?;
        Ok(taken)
    }

    /// Attacks `target` with the default combat rules.
    pub fn attack_character(&self, target: &mut Actor) -> Result<AttackOutcome, CombatError> {
        self.attack_character_with(target, &CombatConfig::DEFAULT)
    }

    /// Attacks `target` with this actor's effective damage under `config`.
    pub fn attack_character_with(
        &self,
        target: &mut Actor,
        config: &CombatConfig,
    ) -> Result<AttackOutcome, CombatError> {
        let damage = self
            .effective_damage()
            .ok_or(CombatError::Unarmed { actor: self.id })?;

        let hp_before = target.current_hp();
        let taken = target.receive_attack_with(damage, config)?;

        Ok(AttackOutcome {
            attacker: self.id,
            target: target.id,
            damage,
            taken,
            hp_before,
            hp_after: target.current_hp(),
            defeated: target.is_defeated(),
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ActorRecord {
    id: ActorId,
    name: String,
    class: ActorClass,
    hp: ResourceMeter,
    defense: i32,
    weapon: Option<Weapon>,
    mana: Option<ResourceMeter>,
    innate: Option<Innate>,
}

#[cfg(feature = "serde")]
impl TryFrom<ActorRecord> for Actor {
    type Error = RestoreError;

    fn try_from(record: ActorRecord) -> Result<Self, Self::Error> {
        let ActorRecord {
            id,
            name,
            class,
            hp,
            defense,
            weapon,
            mana,
            innate,
        } = record;
        let inconsistent = |reason: &'static str| RestoreError::Inconsistent { actor: id, reason };

        if hp.kind() != ResourceKind::Hp {
            return Err(inconsistent("hp is not an HP pool"));
        }
        if mana.is_some() != class.is_magic()
            || mana.is_some_and(|pool| pool.kind() != ResourceKind::Mp)
        {
            return Err(inconsistent("mana pool does not match the class"));
        }
        if innate.is_some() == class.is_controlled() {
            return Err(inconsistent("innate stats do not match the class"));
        }

        let params = ActorParams {
            name,
            class,
            max_hp: hp.maximum(),
            defense,
            max_mp: mana.map_or(0, |pool| pool.maximum()),
            weight: innate.map_or(0, |stats| stats.weight),
            attack: innate.map_or(0, |stats| stats.attack),
        };
        let mut actor = Self::construct(id, params)?;
        // both pools were validated on their own and share the checked maximum
        actor.hp = hp;
        actor.mana = mana;
        if let Some(weapon) = weapon {
            actor.equip(weapon)?;
        }
        Ok(actor)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' {} (hp {}/{}, defense {}",
            self.class,
            self.name,
            self.id,
            self.hp.current(),
            self.hp.maximum(),
            self.defense
        )?;
        if let Some(mana) = &self.mana {
            write!(f, ", mp {}/{}", mana.current(), mana.maximum())?;
        }
        if let Some(innate) = &self.innate {
            write!(f, ", weight {}, attack {}", innate.weight, innate.attack)?;
        }
        if self.class.is_controlled() {
            match &self.weapon {
                Some(weapon) => write!(f, ", wielding {weapon}")?,
                None => write!(f, ", unarmed")?,
            }
        }
        write!(f, ")")
    }
}
