//! Damage calculation.

use crate::config::CombatConfig;

/// HP lost by a target with `defense` when hit for `damage`.
///
/// # Formula
///
/// ```text
/// taken = (damage - defense / defense_divisor) / damage_divisor
/// ```
///
/// Both divisions truncate toward zero. With the default divisors (3 and 10)
/// a 100-damage hit against 30 defense takes `(100 - 10) / 10 = 9` HP.
pub fn damage_taken(damage: i32, defense: i32, config: &CombatConfig) -> i32 {
    let mitigation = defense / config.defense_divisor();
    damage.saturating_sub(mitigation) / config.damage_divisor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_hit() {
        assert_eq!(damage_taken(100, 30, &CombatConfig::default()), 9);
    }

    #[test]
    fn divisions_truncate() {
        let config = CombatConfig::default();
        // 31 / 3 = 10, (105 - 10) / 10 = 9
        assert_eq!(damage_taken(105, 31, &config), 9);
        // (9 - 0) / 10 = 0
        assert_eq!(damage_taken(9, 0, &config), 0);
    }

    #[test]
    fn weak_hits_against_heavy_armor_go_negative() {
        // (10 - 100) / 10 = -9
        assert_eq!(damage_taken(10, 300, &CombatConfig::default()), -9);
    }

    #[test]
    fn divisors_are_configurable() {
        let halved = CombatConfig::new(10, 1, 2, 10).unwrap();
        // (100 - 15) / 10 = 8
        assert_eq!(damage_taken(100, 30, &halved), 8);
    }
}
