//! # Use Cases
//!
//! Application use cases implementing the engine's external operations.
//!
//! Each use case orchestrates domain objects to perform one operation:
//! load the booking, check the caller's version precondition, apply the
//! domain rules, persist the new snapshot, and publish a lifecycle event.
//!
//! Optimistic concurrency: every mutating request carries the version its
//! snapshot was read at. A mismatch fails with
//! [`ApplicationError::StaleState`](crate::application::error::ApplicationError)
//! before the aggregate is touched; the repository's save-time version gate
//! backstops the race between the check and the write. Nothing is retried
//! automatically.
//!
//! Event publishing is fire-and-forget: a publisher failure is logged and
//! never fails the operation.

pub mod cancel_booking;
pub mod complete_work;
pub mod propose_quote;
pub mod request_booking;
pub mod reschedule_booking;
pub mod respond_to_booking;
pub mod start_work;
pub mod submit_review;

#[cfg(test)]
mod tests;

pub use cancel_booking::CancelBookingUseCase;
pub use complete_work::CompleteWorkUseCase;
pub use propose_quote::ProposeQuoteUseCase;
pub use request_booking::RequestBookingUseCase;
pub use reschedule_booking::RescheduleBookingUseCase;
pub use respond_to_booking::RespondToBookingUseCase;
pub use start_work::StartWorkUseCase;
pub use submit_review::SubmitReviewUseCase;

use crate::domain::events::LifecycleEvent;
use async_trait::async_trait;
use std::fmt;

/// Publisher port for lifecycle events.
///
/// Implementations deliver events to the notification collaborator.
/// Delivery failures are the implementation's problem to report; use cases
/// treat publishing as fire-and-forget.
#[async_trait]
pub trait LifecycleEventPublisher: Send + Sync + fmt::Debug {
    /// Publishes a lifecycle event.
    ///
    /// # Errors
    ///
    /// Returns a description of the delivery failure.
    async fn publish(&self, event: LifecycleEvent) -> Result<(), String>;
}
