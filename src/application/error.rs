//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures that can occur during use case execution:
//! validation failures, domain rule violations, optimistic-concurrency
//! conflicts, and infrastructure errors. All are surfaced to the transport
//! layer as structured rejections; none are retryable without re-fetching
//! current state.

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::traits::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Booking not found.
    #[error("booking not found: {0}")]
    BookingNotFound(String),

    /// The booking changed since the caller's snapshot was read.
    ///
    /// The caller must re-fetch and re-decide; a transition that was legal
    /// against the stale snapshot may be illegal against the current one.
    #[error("stale state: expected version {expected}, stored version {actual}")]
    StaleState {
        /// Version the caller based its request on.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// Request validation failed.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Domain error.
    #[error(transparent)]
    DomainError(#[from] DomainError),

    /// Repository error.
    #[error("repository error: {0}")]
    RepositoryError(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a booking not found error.
    #[must_use]
    pub fn booking_not_found(id: impl Into<String>) -> Self {
        Self::BookingNotFound(id.into())
    }

    /// Creates a stale state error.
    #[must_use]
    pub const fn stale_state(expected: u64, actual: u64) -> Self {
        Self::StaleState { expected, actual }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Creates a repository error.
    #[must_use]
    pub fn repository(message: impl Into<String>) -> Self {
        Self::RepositoryError(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for an optimistic-concurrency conflict.
    #[inline]
    #[must_use]
    pub const fn is_stale_state(&self) -> bool {
        matches!(self, Self::StaleState { .. })
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // A save-time conflict is the same condition as a failed
            // version precondition; surface both as StaleState.
            RepositoryError::VersionConflict {
                attempted, current, ..
            } => Self::StaleState {
                expected: attempted,
                actual: current,
            },
            RepositoryError::NotFound { id, .. } => Self::BookingNotFound(id),
            RepositoryError::Storage(message) => Self::RepositoryError(message),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
