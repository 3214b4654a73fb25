//! # Complete Work Use Case
//!
//! Worker marks an in-progress booking as completed, stamping
//! `completed_at` and opening the review window.

use crate::application::dto::booking_dto::{BookingResponse, WorkProgressRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::use_cases::LifecycleEventPublisher;
use crate::domain::events::LifecycleEvent;
use crate::domain::value_objects::clock::Clock;
use crate::infrastructure::persistence::traits::BookingRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for completing work on a booking.
#[derive(Debug)]
pub struct CompleteWorkUseCase {
    booking_repository: Arc<dyn BookingRepository>,
    event_publisher: Arc<dyn LifecycleEventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CompleteWorkUseCase {
    /// Creates a new use case with all dependencies.
    #[must_use]
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        event_publisher: Arc<dyn LifecycleEventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            booking_repository,
            event_publisher,
            clock,
        }
    }

    /// Executes the complete-work use case.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is missing, the snapshot is stale,
    /// the transition is illegal, the actor is not the worker, or
    /// persistence fails.
    pub async fn execute(
        &self,
        request: WorkProgressRequest,
    ) -> ApplicationResult<BookingResponse> {
        let mut booking = self
            .booking_repository
            .get(&request.booking_id)
            .await?
            .ok_or_else(|| ApplicationError::booking_not_found(request.booking_id.to_string()))?;

        if booking.version() != request.expected_version {
            return Err(ApplicationError::stale_state(
                request.expected_version,
                booking.version(),
            ));
        }

        let now = self.clock.now();
        let from_status = booking.status();
        booking.complete_work(request.actor_role, now)?;

        self.booking_repository.save(&booking).await?;

        info!(booking_id = %booking.id(), "work completed");

        let event = LifecycleEvent::transition(
            booking.id(),
            from_status,
            booking.status(),
            request.actor_role,
            now,
        );
        if let Err(e) = self.event_publisher.publish(event).await {
            warn!(booking_id = %booking.id(), error = %e, "failed to publish lifecycle event");
        }

        Ok(BookingResponse::from(&booking))
    }
}
