//! # Quote Entity
//!
//! A worker's proposed price and terms for a booking.
//!
//! Quotes live inside the [`Booking`](super::booking::Booking) aggregate.
//! A quote is `proposed` when created and terminal once `accepted` or
//! `declined`. Expiry is a lazily-evaluated read-time predicate: a quote
//! whose `valid_until` has passed un-actioned is stamped `expired` the next
//! time an operation reads through it, never by a background timer.
//!
//! # Examples
//!
//! ```
//! use booking_engine::domain::entities::quote::Quote;
//! use booking_engine::domain::value_objects::{Amount, Timestamp};
//!
//! let now = Timestamp::from_millis(1_000).unwrap();
//! let quote = Quote::new(
//!     Amount::new(5000.0).unwrap(),
//!     "Materials and labour",
//!     Some(now.add_secs(3600)),
//!     now,
//! );
//!
//! assert!(quote.status().is_proposed());
//! assert!(!quote.is_expired(now));
//! assert!(quote.is_expired(now.add_secs(3601)));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::money::Amount;
use crate::domain::value_objects::quote_status::QuoteStatus;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::QuoteId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted length for a decline reason.
///
/// Reasons are attached for audit/display and are never validated beyond
/// length and encoding.
pub const MAX_REASON_LEN: usize = 500;

/// A worker's proposed price/terms for a booking.
///
/// # Invariants
///
/// - `Accepted` and `Declined` are final; an `Expired` quote is never
///   revived (re-proposal requires a brand-new quote)
/// - Only a live (`Proposed`, not past `valid_until`) quote can be
///   accepted or declined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier for this quote.
    id: QuoteId,
    /// Proposed price.
    amount: Amount,
    /// Free-text terms.
    details: String,
    /// When the quote was proposed.
    proposed_at: Timestamp,
    /// Optional validity deadline; absent means the quote never expires.
    valid_until: Option<Timestamp>,
    /// Current quote status.
    status: QuoteStatus,
    /// Reason attached on decline, if any.
    decline_reason: Option<String>,
}

impl Quote {
    /// Creates a new proposed quote.
    #[must_use]
    pub fn new(
        amount: Amount,
        details: impl Into<String>,
        valid_until: Option<Timestamp>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: QuoteId::new_v4(),
            amount,
            details: details.into(),
            proposed_at: now,
            valid_until,
            status: QuoteStatus::Proposed,
            decline_reason: None,
        }
    }

    // ========== Accessors ==========

    /// Returns the quote ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the proposed amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Returns the free-text terms.
    #[inline]
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns when the quote was proposed.
    #[inline]
    #[must_use]
    pub fn proposed_at(&self) -> Timestamp {
        self.proposed_at
    }

    /// Returns the validity deadline, if any.
    #[inline]
    #[must_use]
    pub fn valid_until(&self) -> Option<Timestamp> {
        self.valid_until
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    /// Returns the decline reason, if any.
    #[inline]
    #[must_use]
    pub fn decline_reason(&self) -> Option<&str> {
        self.decline_reason.as_deref()
    }

    // ========== Expiry ==========

    /// Returns true if the validity window has passed at `now`.
    ///
    /// Strict comparison: a quote is still actionable at exactly
    /// `valid_until`.
    #[inline]
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        match self.valid_until {
            Some(deadline) => now.is_after(deadline),
            None => false,
        }
    }

    /// Returns true while the quote is proposed and within its validity
    /// window at `now`.
    #[inline]
    #[must_use]
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.status.is_proposed() && !self.is_expired(now)
    }

    /// Stamps a proposed quote as expired.
    ///
    /// Called by the aggregate when an operation reads through a proposed
    /// quote whose window has passed. Quotes in any other status are left
    /// untouched.
    pub(crate) fn mark_expired(&mut self) {
        if self.status.is_proposed() {
            self.status = QuoteStatus::Expired;
        }
    }

    // ========== Decisions ==========

    /// Marks the quote as accepted.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotFound`] when the quote is no longer
    /// proposed.
    pub(crate) fn accept(&mut self) -> DomainResult<()> {
        if !self.status.is_proposed() {
            return Err(DomainError::QuoteNotFound(format!(
                "quote {} is {}, not proposed",
                self.id, self.status
            )));
        }
        self.status = QuoteStatus::Accepted;
        Ok(())
    }

    /// Marks the quote as declined, attaching an optional reason.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotFound`] when the quote is no longer
    /// proposed, or [`DomainError::ValidationError`] when the reason exceeds
    /// [`MAX_REASON_LEN`].
    pub(crate) fn decline(&mut self, reason: Option<String>) -> DomainResult<()> {
        if !self.status.is_proposed() {
            return Err(DomainError::QuoteNotFound(format!(
                "quote {} is {}, not proposed",
                self.id, self.status
            )));
        }
        if let Some(text) = &reason
            && text.chars().count() > MAX_REASON_LEN
        {
            return Err(DomainError::ValidationError(format!(
                "decline reason exceeds {} characters",
                MAX_REASON_LEN
            )));
        }
        self.status = QuoteStatus::Declined;
        self.decline_reason = reason;
        Ok(())
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quote({} {} [{}])", self.id, self.amount, self.status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn t(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn proposed_quote(valid_until: Option<Timestamp>) -> Quote {
        Quote::new(
            Amount::new(5000.0).unwrap(),
            "Parts and labour",
            valid_until,
            t(1_000),
        )
    }

    mod expiry {
        use super::*;

        #[test]
        fn no_deadline_never_expires() {
            let quote = proposed_quote(None);
            assert!(!quote.is_expired(t(i64::MAX - 1)));
        }

        #[test]
        fn expiry_is_strict() {
            let deadline = t(10_000);
            let quote = proposed_quote(Some(deadline));

            // Still actionable at exactly the deadline.
            assert!(!quote.is_expired(deadline));
            assert!(quote.is_expired(deadline.add_millis(1)));
        }

        #[test]
        fn is_live_requires_proposed_and_unexpired() {
            let deadline = t(10_000);
            let mut quote = proposed_quote(Some(deadline));
            assert!(quote.is_live(t(5_000)));
            assert!(!quote.is_live(t(10_001)));

            quote.accept().unwrap();
            assert!(!quote.is_live(t(5_000)));
        }

        #[test]
        fn mark_expired_only_touches_proposed() {
            let mut quote = proposed_quote(Some(t(10_000)));
            quote.accept().unwrap();
            quote.mark_expired();
            assert_eq!(quote.status(), QuoteStatus::Accepted);

            let mut quote = proposed_quote(Some(t(10_000)));
            quote.mark_expired();
            assert_eq!(quote.status(), QuoteStatus::Expired);
        }
    }

    mod decisions {
        use super::*;

        #[test]
        fn accept_from_proposed() {
            let mut quote = proposed_quote(None);
            assert!(quote.accept().is_ok());
            assert_eq!(quote.status(), QuoteStatus::Accepted);
        }

        #[test]
        fn accept_twice_fails() {
            let mut quote = proposed_quote(None);
            quote.accept().unwrap();
            assert!(matches!(
                quote.accept(),
                Err(DomainError::QuoteNotFound(_))
            ));
        }

        #[test]
        fn decline_attaches_reason() {
            let mut quote = proposed_quote(None);
            quote.decline(Some("too expensive".to_string())).unwrap();
            assert_eq!(quote.status(), QuoteStatus::Declined);
            assert_eq!(quote.decline_reason(), Some("too expensive"));
        }

        #[test]
        fn decline_without_reason() {
            let mut quote = proposed_quote(None);
            quote.decline(None).unwrap();
            assert_eq!(quote.status(), QuoteStatus::Declined);
            assert!(quote.decline_reason().is_none());
        }

        #[test]
        fn decline_rejects_oversized_reason() {
            let mut quote = proposed_quote(None);
            let reason = "x".repeat(MAX_REASON_LEN + 1);
            assert!(matches!(
                quote.decline(Some(reason)),
                Err(DomainError::ValidationError(_))
            ));
            // Quote untouched on failure.
            assert_eq!(quote.status(), QuoteStatus::Proposed);
        }

        #[test]
        fn decline_after_accept_fails() {
            let mut quote = proposed_quote(None);
            quote.accept().unwrap();
            assert!(quote.decline(None).is_err());
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn roundtrip() {
            let mut quote = proposed_quote(Some(t(10_000)));
            quote.decline(Some("found someone else".to_string())).unwrap();

            let json = serde_json::to_string(&quote).unwrap();
            let deserialized: Quote = serde_json::from_str(&json).unwrap();
            assert_eq!(quote, deserialized);
        }
    }
}
