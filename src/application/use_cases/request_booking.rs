//! # Request Booking Use Case
//!
//! Creates a new booking.
//!
//! This use case orchestrates booking creation:
//! - Request validation
//! - Aggregate construction (`quote_requested`, or `pending` for a direct
//!   booking)
//! - Persistence
//! - Lifecycle event publishing

use crate::application::dto::booking_dto::{BookingResponse, CreateBookingRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::use_cases::LifecycleEventPublisher;
use crate::domain::entities::booking::Booking;
use crate::domain::events::LifecycleEvent;
use crate::domain::value_objects::actor::ActorRole;
use crate::domain::value_objects::clock::Clock;
use crate::infrastructure::persistence::traits::BookingRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for creating a new booking.
#[derive(Debug)]
pub struct RequestBookingUseCase {
    booking_repository: Arc<dyn BookingRepository>,
    event_publisher: Arc<dyn LifecycleEventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RequestBookingUseCase {
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

    /// Executes the request-booking use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Request validation fails
    /// - The schedule is not in the future (`InvalidSchedule`)
    /// - The description is blank (`MissingDescription`)
    /// - Persistence fails
    pub async fn execute(
        &self,
        request: CreateBookingRequest,
    ) -> ApplicationResult<BookingResponse> {
        // 1. Validate request
        request.validate().map_err(ApplicationError::validation)?;

        // 2. Convert to domain types
        let (customer, worker, scheduled_at) = request
            .to_domain_types()
            .map_err(ApplicationError::validation)?;

        // 3. Create the aggregate at the requested entry point
        let now = self.clock.now();
        let booking = if request.direct {
            Booking::direct(customer, worker, scheduled_at, &request.description, now)?
        } else {
            Booking::request(customer, worker, scheduled_at, &request.description, now)?
        };

        // 4. Persist
        self.booking_repository.save(&booking).await?;

        info!(
            booking_id = %booking.id(),
            status = %booking.status(),
            "booking created"
        );

        // 5. Publish creation event, fire-and-forget
        let event = LifecycleEvent::created(
            booking.id(),
            booking.status(),
            ActorRole::Customer,
            now,
        );
        if let Err(e) = self.event_publisher.publish(event).await {
            warn!(booking_id = %booking.id(), error = %e, "failed to publish lifecycle event");
        }

        // 6. Return snapshot
        Ok(BookingResponse::from(&booking))
    }
}
