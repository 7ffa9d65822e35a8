//! Combat resolution.
//!
//! # Core Functions
//!
//! - [`damage_taken`]: mitigated damage formula
//! - [`attack`]: resolve one attack between two actors
//!
//! Resolution never clamps: a hit that would take HP below zero (or a weak hit
//! whose mitigated value is negative and would overheal) fails with
//! [`IntegrityViolation`](crate::stats::IntegrityViolation) and the target is
//! left untouched.

pub mod damage;
pub mod resolver;

pub use damage::damage_taken;
pub use resolver::{AttackOutcome, CombatError, attack, attack_with};
