//! # Domain Errors
//!
//! Typed domain error definitions.
//!
//! This module provides the [`DomainError`] enum for representing
//! domain-level errors with numeric error codes. Every error is local,
//! synchronous, and non-retryable as-is: a caller must re-fetch current
//! state and re-decide before retrying.
//!
//! # Error Code Ranges
//!
//! - **1000-1999**: Validation errors
//! - **2000-2999**: Transition/state errors
//! - **3000-3999**: Quote errors
//! - **4000-4999**: Policy errors
//! - **5000-5999**: Review errors
//!
//! # Examples
//!
//! ```
//! use booking_engine::domain::errors::DomainError;
//!
//! let error = DomainError::InvalidAmount("amount must be positive".to_string());
//! assert_eq!(error.code(), 1001);
//! assert_eq!(error.category(), "validation");
//! ```

use crate::domain::value_objects::actor::ActorRole;
use crate::domain::value_objects::booking_status::BookingStatus;
use thiserror::Error;

/// Domain-level error with numeric error codes.
///
/// Provides typed errors for domain operations with consistent
/// error codes for logging and API responses.
///
/// # Error Code Ranges
///
/// | Range | Category |
/// |-------|----------|
/// | 1000-1999 | Validation errors |
/// | 2000-2999 | Transition/state errors |
/// | 3000-3999 | Quote errors |
/// | 4000-4999 | Policy errors |
/// | 5000-5999 | Review errors |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (1000-1999)
    // ========================================================================
    /// Invalid quote amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid review rating.
    #[error("invalid rating: {0}")]
    InvalidRating(String),

    /// Requested schedule is invalid (in the past, or not representable).
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Booking description is missing or blank.
    #[error("description must not be empty")]
    MissingDescription,

    /// Invalid timestamp value.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Generic validation error.
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========================================================================
    // Transition/State Errors (2000-2999)
    // ========================================================================
    /// Requested status is not reachable from the current status.
    #[error("illegal transition from {from} to {to}")]
    IllegalTransition {
        /// The current status.
        from: BookingStatus,
        /// The requested target status.
        to: BookingStatus,
    },

    /// Actor role is not permitted on this transition edge.
    #[error("{actor} is not authorized to move a booking from {from} to {to}")]
    UnauthorizedActor {
        /// The requesting actor role.
        actor: ActorRole,
        /// The current status.
        from: BookingStatus,
        /// The requested target status.
        to: BookingStatus,
    },

    /// Operation not allowed in the booking's current status.
    #[error("wrong status: {0}")]
    WrongStatus(String),

    // ========================================================================
    // Quote Errors (3000-3999)
    // ========================================================================
    /// Quote validity window has passed.
    #[error("quote expired: {0}")]
    QuoteExpired(String),

    /// Named quote does not exist or is not the current proposed quote.
    #[error("quote not found: {0}")]
    QuoteNotFound(String),

    /// A live proposed quote is already outstanding.
    #[error("a proposed quote is already outstanding: {0}")]
    QuoteAlreadyProposed(String),

    // ========================================================================
    // Policy Errors (4000-4999)
    // ========================================================================
    /// Too close to the scheduled time for the requested change.
    #[error("too close to the scheduled time: more than {required_lead_secs}s of lead required")]
    TooCloseToSchedule {
        /// Minimum lead time in seconds for the operation.
        required_lead_secs: i64,
    },

    // ========================================================================
    // Review Errors (5000-5999)
    // ========================================================================
    /// Booking already carries a review.
    #[error("booking already reviewed: {0}")]
    AlreadyReviewed(String),

    /// Booking is not completed, so it cannot be reviewed.
    #[error("booking not completed: {0}")]
    NotCompleted(String),

    /// Actor is not permitted to perform this operation.
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl DomainError {
    /// Returns the numeric error code.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_engine::domain::errors::DomainError;
    ///
    /// assert_eq!(DomainError::MissingDescription.code(), 1004);
    /// assert_eq!(
    ///     DomainError::QuoteExpired("q-1".to_string()).code(),
    ///     3001
    /// );
    /// ```
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            // Validation errors (1000-1999)
            Self::InvalidAmount(_) => 1001,
            Self::InvalidRating(_) => 1002,
            Self::InvalidSchedule(_) => 1003,
            Self::MissingDescription => 1004,
            Self::InvalidTimestamp(_) => 1005,
            Self::ValidationError(_) => 1099,

            // Transition/state errors (2000-2999)
            Self::IllegalTransition { .. } => 2001,
            Self::UnauthorizedActor { .. } => 2002,
            Self::WrongStatus(_) => 2003,

            // Quote errors (3000-3999)
            Self::QuoteExpired(_) => 3001,
            Self::QuoteNotFound(_) => 3002,
            Self::QuoteAlreadyProposed(_) => 3003,

            // Policy errors (4000-4999)
            Self::TooCloseToSchedule { .. } => 4001,

            // Review errors (5000-5999)
            Self::AlreadyReviewed(_) => 5001,
            Self::NotCompleted(_) => 5002,
            Self::Forbidden(_) => 5003,
        }
    }

    /// Returns the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.code() {
            1000..=1999 => "validation",
            2000..=2999 => "state",
            3000..=3999 => "quote",
            4000..=4999 => "policy",
            5000..=5999 => "review",
            _ => "unknown",
        }
    }

    /// Returns true if this is a validation error.
    #[inline]
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self.code(), 1000..=1999)
    }

    /// Returns true if this is a transition/state error.
    #[inline]
    #[must_use]
    pub const fn is_state_error(&self) -> bool {
        matches!(self.code(), 2000..=2999)
    }

    /// Returns true if this is a quote error.
    #[inline]
    #[must_use]
    pub const fn is_quote_error(&self) -> bool {
        matches!(self.code(), 3000..=3999)
    }

    /// Returns true if this is a policy error.
    #[inline]
    #[must_use]
    pub const fn is_policy_error(&self) -> bool {
        matches!(self.code(), 4000..=4999)
    }

    /// Returns true if this is a review error.
    #[inline]
    #[must_use]
    pub const fn is_review_error(&self) -> bool {
        matches!(self.code(), 5000..=5999)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
