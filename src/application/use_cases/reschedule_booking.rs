//! # Reschedule Booking Use Case
//!
//! Moves a booking to a new scheduled time, subject to the stricter
//! reschedule window. Status is unchanged, so no lifecycle event is
//! emitted.

use crate::application::dto::booking_dto::{BookingResponse, RescheduleBookingRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::policy::cancellation::CancellationPolicy;
use crate::domain::value_objects::clock::Clock;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::infrastructure::persistence::traits::BookingRepository;
use std::sync::Arc;
use tracing::info;

/// Use case for rescheduling a booking.
#[derive(Debug)]
pub struct RescheduleBookingUseCase {
    booking_repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    policy: CancellationPolicy,
}

impl RescheduleBookingUseCase {
    /// Creates a new use case with all dependencies.
    #[must_use]
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        policy: CancellationPolicy,
    ) -> Self {
        Self {
            booking_repository,
            clock,
            policy,
        }
    }

    /// Executes the reschedule-booking use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The new time is not a valid future instant (`InvalidSchedule`)
    /// - The booking does not exist (`BookingNotFound`)
    /// - The caller's snapshot is stale (`StaleState`)
    /// - The status is not reschedulable (`WrongStatus`)
    /// - The window has closed (`TooCloseToSchedule`)
    /// - Persistence fails
    pub async fn execute(
        &self,
        request: RescheduleBookingRequest,
    ) -> ApplicationResult<BookingResponse> {
        let new_scheduled_at = Timestamp::from_millis(request.new_scheduled_at_ms)
            .ok_or_else(|| {
                ApplicationError::validation("new_scheduled_at_ms must be non-negative")
            })?;

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
        self.policy.can_reschedule(&booking, now)?;
        booking.reschedule(new_scheduled_at, now)?;

        self.booking_repository.save(&booking).await?;

        info!(
            booking_id = %booking.id(),
            scheduled_at = %booking.scheduled_at(),
            "booking rescheduled"
        );

        Ok(BookingResponse::from(&booking))
    }
}
