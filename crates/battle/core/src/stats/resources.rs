//! Resource pools (HP, MP).
//!
//! A pool stores its maximum and current value. The maximum is fixed at
//! construction; the current value starts full and is re-validated against
//! the maximum on every write.

use super::guard::{self, IntegrityViolation};

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Health points.
    Hp,
    /// Magic points (mana).
    Mp,
}

impl ResourceKind {
    /// Smallest admissible maximum for this pool.
    pub const fn min_maximum(self) -> i32 {
        match self {
            Self::Hp => 1,
            Self::Mp => 0,
        }
    }

    pub const fn max_label(self) -> &'static str {
        match self {
            Self::Hp => "Max HP",
            Self::Mp => "Max MP",
        }
    }

    pub const fn current_label(self) -> &'static str {
        match self {
            Self::Hp => "Current HP",
            Self::Mp => "Current MP",
        }
    }
}

/// A bounded pool: `min_maximum <= maximum` and `0 <= current <= maximum`.
///
/// Deserialization goes through the same checks as [`full`](Self::full) and
/// [`set_current`](Self::set_current).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MeterRecord")
)]
pub struct ResourceMeter {
    kind: ResourceKind,
    current: i32,
    maximum: i32,
}

impl ResourceMeter {
    /// Creates a full pool, validating the maximum.
    pub fn full(kind: ResourceKind, maximum: i32) -> Result<Self, IntegrityViolation> {
        let maximum = guard::at_least(maximum, kind.min_maximum(), kind.max_label())?;
        Ok(Self {
            kind,
            current: maximum,
            maximum,
        })
    }

    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub const fn current(&self) -> i32 {
        self.current
    }

    pub const fn maximum(&self) -> i32 {
        self.maximum
    }

    /// Assigns the current value. On failure the previous value is kept.
    pub fn set_current(&mut self, value: i32) -> Result<(), IntegrityViolation> {
        self.current = guard::in_range(value, 0, self.maximum, self.kind.current_label())?;
        Ok(())
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MeterRecord {
    kind: ResourceKind,
    current: i32,
    maximum: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<MeterRecord> for ResourceMeter {
    type Error = IntegrityViolation;

    fn try_from(record: MeterRecord) -> Result<Self, Self::Error> {
        let mut meter = Self::full(record.kind, record.maximum)?;
        meter.set_current(record.current)?;
        Ok(meter)
    }
}
