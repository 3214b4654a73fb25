//! # Repository Port
//!
//! Storage contract consumed by the application layer.
//!
//! Every `save` is version-checked: a write based on a stale read must be
//! rejected, never silently applied, so that at most one of two racing
//! transitions wins.

use crate::domain::entities::booking::Booking;
use crate::domain::value_objects::{BookingId, CustomerId, WorkerId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Persistence-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Optimistic-concurrency conflict: the stored version has advanced
    /// past the snapshot the write was based on.
    #[error(
        "version conflict on {entity} {id}: attempted {attempted}, stored {current}"
    )]
    VersionConflict {
        /// Entity kind.
        entity: &'static str,
        /// Entity identifier.
        id: String,
        /// Version the caller attempted to write.
        attempted: u64,
        /// Version currently stored.
        current: u64,
    },

    /// Backend failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates a version-conflict error.
    #[must_use]
    pub fn version_conflict(
        entity: &'static str,
        id: impl Into<String>,
        attempted: u64,
        current: u64,
    ) -> Self {
        Self::VersionConflict {
            entity,
            id: id.into(),
            attempted,
            current,
        }
    }

    /// Returns true for a version conflict.
    #[inline]
    #[must_use]
    pub const fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage port for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync + fmt::Debug {
    /// Saves a booking, rejecting writes whose version does not advance the
    /// stored one.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::VersionConflict`] on a stale write, or a backend
    /// failure.
    async fn save(&self, booking: &Booking) -> RepositoryResult<()>;

    /// Returns the booking with the given ID, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn get(&self, id: &BookingId) -> RepositoryResult<Option<Booking>>;

    /// Returns all bookings for a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_by_customer(&self, customer: &CustomerId) -> RepositoryResult<Vec<Booking>>;

    /// Returns all bookings for a worker.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_by_worker(&self, worker: &WorkerId) -> RepositoryResult<Vec<Booking>>;

    /// Returns all bookings in a non-terminal status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_active(&self) -> RepositoryResult<Vec<Booking>>;

    /// Deletes the booking with the given ID, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    async fn delete(&self, id: &BookingId) -> RepositoryResult<bool>;

    /// Returns the number of stored bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn count(&self) -> RepositoryResult<u64>;
}
