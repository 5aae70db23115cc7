//! Domain primitives for treasure search.
//!
//! Values in this module are only constructed through the validators in
//! [`validation`], so holding one means the input already passed the domain
//! constraints.

pub mod box_filter;
pub mod distance;
pub mod validation;

use serde::Serialize;
use std::fmt;

/// Caller-assigned treasure identifier.
///
/// # Examples
///
/// ```rust
/// use treasure_hunt::domain::TreasureId;
///
/// let id = TreasureId::new(100);
/// assert_eq!(id.value(), 100);
/// assert_eq!(id.to_string(), "100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreasureId(i32);

impl TreasureId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TreasureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TreasureId> for i32 {
    fn from(id: TreasureId) -> Self {
        id.0
    }
}

impl From<i32> for TreasureId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for TreasureId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

/// A latitude/longitude pair in degrees, inside `[-90, 90]` x `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Permitted search radii.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RadiusClass {
    OneKm,
    TenKm,
}

impl RadiusClass {
    #[must_use]
    pub const fn km(self) -> f64 {
        match self {
            Self::OneKm => 1.0,
            Self::TenKm => 10.0,
        }
    }

    /// The literal query token for this radius.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneKm => "1",
            Self::TenKm => "10",
        }
    }
}

impl fmt::Display for RadiusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.as_str())
    }
}

/// Prize amount inside the accepted `[10, 30]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrizeValue(u32);

impl PrizeValue {
    /// Returns the amount as stored in `money_values.amt`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn amt(&self) -> i32 {
        // Bounded by `prize::MAX_VALUE`, well inside i32.
        self.0 as i32
    }

    pub(crate) const fn new_unchecked(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PrizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PrizeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasure_id_roundtrip() {
        let id = TreasureId::from(105);
        assert_eq!(i32::from(id), 105);
        assert_eq!(serde_json::to_string(&id).unwrap(), "105");
    }

    #[test]
    fn test_radius_class_km() {
        assert!((RadiusClass::OneKm.km() - 1.0).abs() < f64::EPSILON);
        assert!((RadiusClass::TenKm.km() - 10.0).abs() < f64::EPSILON);
        assert_eq!(RadiusClass::TenKm.to_string(), "10 km");
    }
}
