//! # Cancel Booking Use Case
//!
//! Cancels a booking, subject to both the time-window policy and the
//! status state machine.
//!
//! The two checks are deliberately separate layers: the policy answers
//! "is there still enough lead time", the state machine answers "is the
//! transition legal and the actor allowed". A caller must pass both.

use crate::application::dto::booking_dto::{BookingResponse, CancelBookingRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::use_cases::LifecycleEventPublisher;
use crate::domain::events::LifecycleEvent;
use crate::domain::policy::cancellation::CancellationPolicy;
use crate::domain::value_objects::clock::Clock;
use crate::infrastructure::persistence::traits::BookingRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for cancelling a booking.
#[derive(Debug)]
pub struct CancelBookingUseCase {
    booking_repository: Arc<dyn BookingRepository>,
    event_publisher: Arc<dyn LifecycleEventPublisher>,
    clock: Arc<dyn Clock>,
    policy: CancellationPolicy,
}

impl CancelBookingUseCase {
    /// Creates a new use case with all dependencies.
    #[must_use]
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        event_publisher: Arc<dyn LifecycleEventPublisher>,
        clock: Arc<dyn Clock>,
        policy: CancellationPolicy,
    ) -> Self {
        Self {
            booking_repository,
            event_publisher,
            clock,
            policy,
        }
    }

    /// Executes the cancel-booking use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The booking does not exist (`BookingNotFound`)
    /// - The caller's snapshot is stale (`StaleState`)
    /// - The status is not cancellable (`WrongStatus`)
    /// - The window has closed (`TooCloseToSchedule`)
    /// - Persistence fails
    pub async fn execute(
        &self,
        request: CancelBookingRequest,
    ) -> ApplicationResult<BookingResponse> {
        // 1. Load the booking
        let mut booking = self
            .booking_repository
            .get(&request.booking_id)
            .await?
            .ok_or_else(|| ApplicationError::booking_not_found(request.booking_id.to_string()))?;

        // 2. Version precondition, before any mutation
        if booking.version() != request.expected_version {
            return Err(ApplicationError::stale_state(
                request.expected_version,
                booking.version(),
            ));
        }

        // 3. Policy window check, then the status machine
        let now = self.clock.now();
        self.policy.can_cancel(&booking, now)?;

        let from_status = booking.status();
        booking.cancel(request.reason.clone(), request.actor_role, now)?;

        // 4. Persist
        self.booking_repository.save(&booking).await?;

        info!(
            booking_id = %booking.id(),
            from = %from_status,
            actor = %request.actor_role,
            "booking cancelled"
        );

        // 5. Publish the transition, fire-and-forget
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
