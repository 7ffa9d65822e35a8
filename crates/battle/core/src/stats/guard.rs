//! Bounds-checking primitives shared by every validated field.

use core::fmt;

use crate::error::{ErrorSeverity, GameError};

/// The predicate a stat must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatBound {
    /// `value >= min`
    AtLeast(i32),
    /// `min <= value <= max`
    InRange { min: i32, max: i32 },
}

impl StatBound {
    /// Returns true if `value` satisfies this bound.
    pub const fn admits(&self, value: i32) -> bool {
        match *self {
            Self::AtLeast(min) => value >= min,
            Self::InRange { min, max } => value >= min && value <= max,
        }
    }
}

impl fmt::Display for StatBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(min) => write!(f, "at least {min}"),
            Self::InRange { min, max } => write!(f, "between {min} and {max}"),
        }
    }
}

/// A stat was assigned a value outside its bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be {bound}, got {value}")]
pub struct IntegrityViolation {
    /// Human-readable stat label (e.g. "Current HP").
    pub field: &'static str,
    /// The rejected value.
    pub value: i32,
    /// The bound the value failed.
    pub bound: StatBound,
}

impl GameError for IntegrityViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "integrity_violation"
    }
}

/// Checks `value >= min`, returning the value on success.
pub fn at_least(value: i32, min: i32, field: &'static str) -> Result<i32, IntegrityViolation> {
    check(value, StatBound::AtLeast(min), field)
}

/// Checks `min <= value <= max`, returning the value on success.
pub fn in_range(
    value: i32,
    min: i32,
    max: i32,
    field: &'static str,
) -> Result<i32, IntegrityViolation> {
    check(value, StatBound::InRange { min, max }, field)
}

fn check(value: i32, bound: StatBound, field: &'static str) -> Result<i32, IntegrityViolation> {
    if bound.admits(value) {
        Ok(value)
    } else {
        Err(IntegrityViolation {
            field,
            value,
            bound,
        })
    }
}
