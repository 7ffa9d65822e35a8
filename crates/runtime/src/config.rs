//! Runtime configuration shared by the scheduler and the encounter.

use std::time::Duration;

use battle_core::stats::guard;
use battle_core::{CombatConfig, IntegrityViolation};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Balance parameters (damage formula, turn delay divisor).
    pub combat: CombatConfig,
    /// Wall-clock length of one delay unit.
    pub time_unit: Duration,
    /// Party members required before an encounter may begin.
    pub party_size: i32,
    /// Maximum number of enemies in one encounter.
    pub max_enemies: i32,
    /// Capacity of the turn event broadcast channel.
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);
    pub const DEFAULT_PARTY_SIZE: i32 = 4;
    pub const DEFAULT_MAX_ENEMIES: i32 = 8;
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn with_party_size(mut self, party_size: i32) -> Self {
        self.party_size = party_size;
        self
    }

    pub fn with_max_enemies(mut self, max_enemies: i32) -> Self {
        self.max_enemies = max_enemies;
        self
    }

    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    pub fn with_event_buffer_size(mut self, event_buffer_size: usize) -> Self {
        self.event_buffer_size = event_buffer_size;
        self
    }

    /// Checks the roster limits: a party needs at least one member and the
    /// enemy cap cannot be negative.
    pub fn validate(&self) -> Result<(), IntegrityViolation> {
        guard::at_least(self.party_size, 1, "Party size")?;
        guard::at_least(self.max_enemies, 0, "Max enemies")?;
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            time_unit: Self::DEFAULT_TIME_UNIT,
            party_size: Self::DEFAULT_PARTY_SIZE,
            max_enemies: Self::DEFAULT_MAX_ENEMIES,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}
