use crate::stats::{IntegrityViolation, guard};

/// Combat balance parameters.
///
/// Defaults reproduce the canonical rules: a turn delay of `speed / 10` time
/// units (never below one) and `(damage - defense / 3) / 10` damage taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    speed_divisor: i32,
    min_delay_units: i32,
    defense_divisor: i32,
    damage_divisor: i32,
}

impl CombatConfig {
    // ===== canonical defaults =====
    pub const SPEED_DIVISOR: i32 = 10;
    pub const MIN_DELAY_UNITS: i32 = 1;
    pub const DEFENSE_DIVISOR: i32 = 3;
    pub const DAMAGE_DIVISOR: i32 = 10;

    pub const DEFAULT: Self = Self {
        speed_divisor: Self::SPEED_DIVISOR,
        min_delay_units: Self::MIN_DELAY_UNITS,
        defense_divisor: Self::DEFENSE_DIVISOR,
        damage_divisor: Self::DAMAGE_DIVISOR,
    };

    /// Builds a custom configuration. Every divisor and the minimum delay must
    /// be at least 1.
    pub fn new(
        speed_divisor: i32,
        min_delay_units: i32,
        defense_divisor: i32,
        damage_divisor: i32,
    ) -> Result<Self, IntegrityViolation> {
        Ok(Self {
            speed_divisor: guard::at_least(speed_divisor, 1, "Speed divisor")?,
            min_delay_units: guard::at_least(min_delay_units, 1, "Minimum delay")?,
            defense_divisor: guard::at_least(defense_divisor, 1, "Defense divisor")?,
            damage_divisor: guard::at_least(damage_divisor, 1, "Damage divisor")?,
        })
    }

    pub const fn speed_divisor(&self) -> i32 {
        self.speed_divisor
    }

    pub const fn min_delay_units(&self) -> i32 {
        self.min_delay_units
    }

    pub const fn defense_divisor(&self) -> i32 {
        self.defense_divisor
    }

    pub const fn damage_divisor(&self) -> i32 {
        self.damage_divisor
    }

    /// Number of time units an actor with the given speed waits for its turn.
    ///
    /// Formula: `max(min_delay_units, speed / speed_divisor)`
    pub fn delay_units(&self, speed: i32) -> u32 {
        let units = (speed / self.speed_divisor).max(self.min_delay_units);
        // min_delay_units >= 1, so the cast never wraps
        units as u32
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
