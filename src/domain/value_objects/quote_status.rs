//! # Quote Status
//!
//! Quote lifecycle states.
//!
//! A quote is `proposed` when created, terminal once `accepted` or
//! `declined`, and becomes `expired` when its validity window passes
//! un-actioned. Expiry is evaluated lazily at read time (no background
//! process owns time in this scope), so an expired quote may still carry
//! `Proposed` in storage until an operation reads through it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a quote.
///
/// # Examples
///
/// ```
/// use booking_engine::domain::value_objects::quote_status::QuoteStatus;
///
/// assert!(!QuoteStatus::Proposed.is_terminal());
/// assert!(QuoteStatus::Accepted.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum QuoteStatus {
    /// Awaiting the customer's decision.
    #[default]
    Proposed = 0,

    /// Accepted by the customer (terminal).
    Accepted = 1,

    /// Declined by the customer (terminal).
    Declined = 2,

    /// Validity window passed un-actioned (terminal).
    Expired = 3,
}

impl QuoteStatus {
    /// Returns true once the quote can no longer be actioned.
    ///
    /// `Accepted` and `Declined` are final decisions; `Expired` quotes are
    /// never revived; re-proposal requires a brand-new quote.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Proposed)
    }

    /// Returns true while the quote awaits a decision.
    #[inline]
    #[must_use]
    pub const fn is_proposed(&self) -> bool {
        matches!(self, Self::Proposed)
    }

    /// Returns the numeric value of this status.
    #[inline]
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Proposed => "proposed",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}
