//! # In-Memory Booking Repository
//!
//! In-memory implementation of [`BookingRepository`].
//!
//! This implementation uses a thread-safe `HashMap` for storage, making it
//! suitable for unit tests and single-process deployments without database
//! dependencies. The save-time version gate is the authoritative stale-write
//! guard: a snapshot whose version does not advance the stored one is
//! rejected.
//!
//! # Examples
//!
//! ```
//! use booking_engine::infrastructure::persistence::InMemoryBookingRepository;
//!
//! let repo = InMemoryBookingRepository::new();
//! assert!(repo.is_empty());
//! ```

use crate::domain::entities::booking::Booking;
use crate::domain::value_objects::{BookingId, CustomerId, WorkerId};
use crate::infrastructure::persistence::traits::{
    BookingRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`BookingRepository`].
///
/// # Thread Safety
///
/// Uses `Arc<RwLock<HashMap>>` for thread-safe access; clones share the
/// same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    storage: Arc<RwLock<HashMap<BookingId, Booking>>>,
}

impl InMemoryBookingRepository {
    /// Creates a new empty in-memory booking repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bookings in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        // Use try_read to avoid blocking in sync context
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all bookings from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;

        // Reject writes that do not advance the stored version.
        if let Some(existing) = storage.get(&booking.id())
            && existing.version() >= booking.version()
        {
            return Err(RepositoryError::version_conflict(
                "Booking",
                booking.id().to_string(),
                booking.version(),
                existing.version(),
            ));
        }

        storage.insert(booking.id(), booking.clone());
        Ok(())
    }

    async fn get(&self, id: &BookingId) -> RepositoryResult<Option<Booking>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_by_customer(&self, customer: &CustomerId) -> RepositoryResult<Vec<Booking>> {
        let storage = self.storage.read().await;
        let bookings: Vec<Booking> = storage
            .values()
            .filter(|b| b.customer_ref() == customer)
            .cloned()
            .collect();
        Ok(bookings)
    }

    async fn find_by_worker(&self, worker: &WorkerId) -> RepositoryResult<Vec<Booking>> {
        let storage = self.storage.read().await;
        let bookings: Vec<Booking> = storage
            .values()
            .filter(|b| b.worker_ref() == worker)
            .cloned()
            .collect();
        Ok(bookings)
    }

    async fn find_active(&self) -> RepositoryResult<Vec<Booking>> {
        let storage = self.storage.read().await;
        let active: Vec<Booking> = storage
            .values()
            .filter(|b| b.status().is_active())
            .cloned()
            .collect();
        Ok(active)
    }

    async fn delete(&self, id: &BookingId) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.remove(id).is_some())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::actor::ActorRole;
    use crate::domain::value_objects::timestamp::Timestamp;

    fn t(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn create_test_booking(customer: &str) -> Booking {
        Booking::request(
            CustomerId::new(customer),
            WorkerId::new("work-1"),
            t(1_000_000),
            "Hang some shelves",
            t(0),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryBookingRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn save_and_get() {
        let repo = InMemoryBookingRepository::new();
        let booking = create_test_booking("cust-1");
        let id = booking.id();

        repo.save(&booking).await.unwrap();

        let retrieved = repo.get(&id).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().id(), id);
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let repo = InMemoryBookingRepository::new();
        let id = BookingId::new_v4();

        let result = repo.get(&id).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn save_rejects_stale_version() {
        let repo = InMemoryBookingRepository::new();
        let mut booking = create_test_booking("cust-1");
        let stale = booking.clone();

        repo.save(&booking).await.unwrap();

        booking.cancel(None, ActorRole::Customer, t(10)).unwrap();
        repo.save(&booking).await.unwrap();

        // Writing the version-1 snapshot back must fail and leave the
        // stored state untouched.
        let err = repo.save(&stale).await.unwrap_err();
        assert!(err.is_version_conflict());

        let stored = repo.get(&booking.id()).await.unwrap().unwrap();
        assert_eq!(stored.version(), booking.version());
    }

    #[tokio::test]
    async fn save_rejects_same_version_rewrite() {
        let repo = InMemoryBookingRepository::new();
        let booking = create_test_booking("cust-1");

        repo.save(&booking).await.unwrap();
        let err = repo.save(&booking).await.unwrap_err();
        assert!(err.is_version_conflict());
    }

    #[tokio::test]
    async fn find_by_customer() {
        let repo = InMemoryBookingRepository::new();

        repo.save(&create_test_booking("cust-1")).await.unwrap();
        repo.save(&create_test_booking("cust-1")).await.unwrap();
        repo.save(&create_test_booking("cust-2")).await.unwrap();

        let cust1 = repo
            .find_by_customer(&CustomerId::new("cust-1"))
            .await
            .unwrap();
        assert_eq!(cust1.len(), 2);

        let cust2 = repo
            .find_by_customer(&CustomerId::new("cust-2"))
            .await
            .unwrap();
        assert_eq!(cust2.len(), 1);
    }

    #[tokio::test]
    async fn find_by_worker() {
        let repo = InMemoryBookingRepository::new();
        repo.save(&create_test_booking("cust-1")).await.unwrap();

        let found = repo.find_by_worker(&WorkerId::new("work-1")).await.unwrap();
        assert_eq!(found.len(), 1);

        let none = repo.find_by_worker(&WorkerId::new("work-9")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn find_active_excludes_terminal() {
        let repo = InMemoryBookingRepository::new();

        let open = create_test_booking("cust-1");
        repo.save(&open).await.unwrap();

        let mut cancelled = create_test_booking("cust-2");
        cancelled.cancel(None, ActorRole::Customer, t(10)).unwrap();
        repo.save(&cancelled).await.unwrap();

        let active = repo.find_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id(), open.id());
    }

    #[tokio::test]
    async fn delete() {
        let repo = InMemoryBookingRepository::new();
        let booking = create_test_booking("cust-1");
        let id = booking.id();

        repo.save(&booking).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        let deleted = repo.delete(&id).await.unwrap();
        assert!(deleted);
        assert_eq!(repo.count().await.unwrap(), 0);

        // Delete again returns false
        let deleted_again = repo.delete(&id).await.unwrap();
        assert!(!deleted_again);
    }

    #[tokio::test]
    async fn clear() {
        let repo = InMemoryBookingRepository::new();

        repo.save(&create_test_booking("cust-1")).await.unwrap();
        repo.save(&create_test_booking("cust-2")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.clear().await;
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
