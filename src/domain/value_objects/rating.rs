//! # Rating Value Object
//!
//! Integer review score in the range 1..=5.

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated review rating.
///
/// # Invariants
///
/// - Rating is always within 1..=5
///
/// # Examples
///
/// ```
/// use booking_engine::domain::value_objects::rating::Rating;
///
/// let rating = Rating::new(5).unwrap();
/// assert_eq!(rating.get(), 5);
///
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: u8 = 1;
    /// Highest allowed rating.
    pub const MAX: u8 = 5;

    /// Creates a new rating.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRating`] if the value is outside 1..=5.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::InvalidRating(format!(
                "rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_range() {
        for value in 1..=5 {
            assert_eq!(Rating::new(value).unwrap().get(), value);
        }
    }

    #[test]
    fn rejects_zero() {
        assert!(matches!(
            Rating::new(0),
            Err(DomainError::InvalidRating(_))
        ));
    }

    #[test]
    fn rejects_above_max() {
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(255).is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(Rating::new(4).unwrap().to_string(), "4/5");
    }

    #[test]
    fn serde_roundtrip() {
        let rating = Rating::new(3).unwrap();
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(json, "3");
        let deserialized: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(rating, deserialized);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
