use core::fmt;

use crate::stats::{IntegrityViolation, guard};

/// Weapon families. The kind alone decides which classes may equip it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponKind {
    Axe,
    Bow,
    Knife,
    Staff,
    Sword,
}

/// An immutable weapon.
///
/// `weight` is the wielder's speed once equipped, so it is validated to be at
/// least 1. Equality is by value: two weapons with identical fields are the
/// same weapon.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "WeaponRecord")
)]
pub struct Weapon {
    name: String,
    kind: WeaponKind,
    damage: i32,
    weight: i32,
    magic_damage: Option<i32>,
}

impl Weapon {
    /// Creates a non-magical weapon of the given kind.
    pub fn new(
        kind: WeaponKind,
        name: impl Into<String>,
        damage: i32,
        weight: i32,
    ) -> Result<Self, IntegrityViolation> {
        Ok(Self {
            name: name.into(),
            kind,
            damage,
            weight: guard::at_least(weight, 1, "Weight")?,
            magic_damage: None,
        })
    }

    /// Creates a weapon that also deals magic damage.
    pub fn magic(
        kind: WeaponKind,
        name: impl Into<String>,
        damage: i32,
        weight: i32,
        magic_damage: i32,
    ) -> Result<Self, IntegrityViolation> {
        let mut weapon = Self::new(kind, name, damage, weight)?;
        weapon.magic_damage = Some(magic_damage);
        Ok(weapon)
    }

    pub fn axe(
        name: impl Into<String>,
        damage: i32,
        weight: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::new(WeaponKind::Axe, name, damage, weight)
    }

    pub fn bow(
        name: impl Into<String>,
        damage: i32,
        weight: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::new(WeaponKind::Bow, name, damage, weight)
    }

    pub fn knife(
        name: impl Into<String>,
        damage: i32,
        weight: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::new(WeaponKind::Knife, name, damage, weight)
    }

    pub fn sword(
        name: impl Into<String>,
        damage: i32,
        weight: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::new(WeaponKind::Sword, name, damage, weight)
    }

    /// Staves are the only magic weapons.
    pub fn staff(
        name: impl Into<String>,
        damage: i32,
        weight: i32,
        magic_damage: i32,
    ) -> Result<Self, IntegrityViolation> {
        Self::magic(WeaponKind::Staff, name, damage, weight, magic_damage)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub const fn damage(&self) -> i32 {
        self.damage
    }

    pub const fn weight(&self) -> i32 {
        self.weight
    }

    pub const fn magic_damage(&self) -> Option<i32> {
        self.magic_damage
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' (damage {}, weight {}",
            self.kind, self.name, self.damage, self.weight
        )?;
        if let Some(magic) = self.magic_damage {
            write!(f, ", magic damage {magic}")?;
        }
        write!(f, ")")
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct WeaponRecord {
    name: String,
    kind: WeaponKind,
    damage: i32,
    weight: i32,
    magic_damage: Option<i32>,
}

#[cfg(feature = "serde")]
impl TryFrom<WeaponRecord> for Weapon {
    type Error = IntegrityViolation;

    fn try_from(record: WeaponRecord) -> Result<Self, Self::Error> {
        let WeaponRecord {
            name,
            kind,
            damage,
            weight,
            magic_damage,
        } = record;
        match magic_damage {
            Some(magic_damage) => Self::magic(kind, name, damage, weight, magic_damage),
            None => Self::new(kind, name, damage, weight),
        }
    }
}
