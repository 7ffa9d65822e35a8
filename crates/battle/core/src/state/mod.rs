//! Actor and weapon records.
//!
//! An encounter is made of [`Actor`]s. Player-directed classes fight with an
//! equipped [`Weapon`]; autonomous actors carry their own speed and attack in
//! [`Innate`]. Mages additionally own a mana pool.

mod actor;
mod error;
mod types;
mod weapon;

pub use actor::{Actor, ActorParams, Innate};
pub use error::{ActorError, RestoreError};
pub use types::{ActorClass, ActorId};
pub use weapon::{Weapon, WeaponKind};
