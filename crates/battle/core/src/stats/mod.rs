//! Bounded stats.
//!
//! Every mutable numeric attribute of the model is written through
//! [`guard`]. A failed check returns [`IntegrityViolation`] and leaves the
//! previous value in place; nothing is clamped.

pub mod guard;
pub mod resources;

pub use guard::{IntegrityViolation, StatBound, at_least, in_range};
pub use resources::{ResourceKind, ResourceMeter};
