//! Validated combat model for active-time battles.
//!
//! `battle-core` defines the canonical rules of an encounter: bounded actor and
//! weapon stats, the weapon/class compatibility matrix, and the damage formula.
//! Everything here is synchronous and side-effect free apart from mutating the
//! actors handed in; scheduling lives in the `battle-runtime` crate.
//!
//! Modules are organized leaves first:
//! - [`stats`] guards every bounded numeric attribute
//! - [`state`] holds the [`Actor`] and [`Weapon`] records
//! - [`equip`] decides which weapon kinds each class may wield
//! - [`combat`] resolves attacks between actors
pub mod combat;
pub mod config;
pub mod equip;
pub mod error;
pub mod state;
pub mod stats;

pub use combat::{AttackOutcome, CombatError, attack, attack_with, damage_taken};
pub use config::CombatConfig;
pub use equip::{EquipDenied, WeaponKinds, compatible};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Actor, ActorClass, ActorError, ActorId, ActorParams, Innate, RestoreError, Weapon,
    WeaponKind,
};
pub use stats::{IntegrityViolation, ResourceKind, ResourceMeter, StatBound};
