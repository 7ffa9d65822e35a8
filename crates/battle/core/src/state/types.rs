use core::fmt;

/// Unique identifier for an actor taking part in an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Combat class of an actor.
///
/// The five player-directed classes fight with weapons; `Autonomous` actors
/// (enemies) use their innate weight and attack instead.
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
pub enum ActorClass {
    Engineer,
    Knight,
    Thief,
    BlackMage,
    WhiteMage,
    Autonomous,
}

impl ActorClass {
    /// The player-directed classes, in table order.
    pub const CONTROLLED: [Self; 5] = [
        Self::Engineer,
        Self::Knight,
        Self::Thief,
        Self::BlackMage,
        Self::WhiteMage,
    ];

    /// Returns true for classes that must equip a weapon to act.
    pub const fn is_controlled(self) -> bool {
        !matches!(self, Self::Autonomous)
    }

    /// Returns true for classes that own a mana pool.
    pub const fn is_magic(self) -> bool {
        matches!(self, Self::BlackMage | Self::WhiteMage)
    }
}
