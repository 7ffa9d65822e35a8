use bitflags::bitflags;

use crate::state::{ActorClass, WeaponKind};

bitflags! {
    /// Set of weapon kinds, one bit per [`WeaponKind`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct WeaponKinds: u8 {
        const AXE   = 1 << 0;
        const BOW   = 1 << 1;
        const KNIFE = 1 << 2;
        const STAFF = 1 << 3;
        const SWORD = 1 << 4;
    }
}

impl WeaponKinds {
    pub const fn of(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Axe => Self::AXE,
            WeaponKind::Bow => Self::BOW,
            WeaponKind::Knife => Self::KNIFE,
            WeaponKind::Staff => Self::STAFF,
            WeaponKind::Sword => Self::SWORD,
        }
    }
}

/// Weapon kinds each class may wield.
///
/// | class      | axe | bow | knife | staff | sword |
/// |------------|-----|-----|-------|-------|-------|
/// | engineer   |  x  |  x  |       |       |       |
/// | knight     |  x  |     |   x   |       |   x   |
/// | thief      |     |  x  |   x   |       |   x   |
/// | black_mage |     |     |   x   |   x   |       |
/// | white_mage |     |     |       |   x   |       |
/// | autonomous |     |     |       |       |       |
pub const fn allowed_kinds(class: ActorClass) -> WeaponKinds {
    match class {
        ActorClass::Engineer => WeaponKinds::AXE.union(WeaponKinds::BOW),
        ActorClass::Knight => WeaponKinds::AXE
            .union(WeaponKinds::KNIFE)
            .union(WeaponKinds::SWORD),
        ActorClass::Thief => WeaponKinds::BOW
            .union(WeaponKinds::KNIFE)
            .union(WeaponKinds::SWORD),
        ActorClass::BlackMage => WeaponKinds::KNIFE.union(WeaponKinds::STAFF),
        ActorClass::WhiteMage => WeaponKinds::STAFF,
        ActorClass::Autonomous => WeaponKinds::empty(),
    }
}

/// Returns true if `class` may wield a weapon of `kind`.
pub const fn compatible(kind: WeaponKind, class: ActorClass) -> bool {
    allowed_kinds(class).contains(WeaponKinds::of(kind))
}
