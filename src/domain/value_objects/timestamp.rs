//! # Timestamp Value Object
//!
//! Millisecond-precision instant used for all lifecycle timestamps.
//!
//! This module provides the [`Timestamp`] type, a thin wrapper around epoch
//! milliseconds. Domain decision functions receive the current time as a
//! `Timestamp` parameter; they never sample the wall clock themselves (see
//! [`Clock`](super::clock::Clock)).
//!
//! # Examples
//!
//! ```
//! use booking_engine::domain::value_objects::timestamp::Timestamp;
//!
//! let now = Timestamp::from_millis(1_700_000_000_000).unwrap();
//! let later = now.add_secs(3600);
//!
//! assert_eq!(later.millis_since(now), 3_600_000);
//! assert!(later.is_after(now));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// An instant in time, stored as non-negative milliseconds since the Unix
/// epoch.
///
/// # Invariants
///
/// - The inner value is always >= 0
///
/// # Examples
///
/// ```
/// use booking_engine::domain::value_objects::timestamp::Timestamp;
///
/// let ts = Timestamp::from_millis(1_700_000_000_000).unwrap();
/// assert_eq!(ts.as_millis(), 1_700_000_000_000);
///
/// // Negative instants are rejected
/// assert!(Timestamp::from_millis(-1).is_none());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// Returns the current wall-clock time.
    ///
    /// Only infrastructure code should call this; domain logic receives
    /// `now` as a parameter.
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self(millis)
    }

    /// Creates a timestamp from epoch milliseconds.
    ///
    /// Returns `None` if the value is negative.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Option<Self> {
        if millis < 0 { None } else { Some(Self(millis)) }
    }

    /// Creates a timestamp from epoch seconds.
    ///
    /// Returns `None` if the value is negative or overflows.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Option<Self> {
        match secs.checked_mul(1000) {
            Some(millis) => Self::from_millis(millis),
            None => None,
        }
    }

    /// Returns the epoch milliseconds.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns a timestamp `secs` seconds later (saturating, clamped at the
    /// epoch for negative results).
    #[must_use]
    pub const fn add_secs(self, secs: i64) -> Self {
        self.add_millis(secs.saturating_mul(1000))
    }

    /// Returns a timestamp `millis` milliseconds later (saturating, clamped
    /// at the epoch for negative results).
    #[must_use]
    pub const fn add_millis(self, millis: i64) -> Self {
        let v = self.0.saturating_add(millis);
        if v < 0 { Self(0) } else { Self(v) }
    }

    /// Returns the signed number of milliseconds from `other` to `self`.
    ///
    /// Positive when `self` is later than `other`.
    #[inline]
    #[must_use]
    pub const fn millis_since(self, other: Self) -> i64 {
        self.0 - other.0
    }

    /// Returns true if `self` is strictly after `other`.
    #[inline]
    #[must_use]
    pub const fn is_after(self, other: Self) -> bool {
        self.0 > other.0
    }

    /// Returns true if `self` is strictly before `other`.
    #[inline]
    #[must_use]
    pub const fn is_before(self, other: Self) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
