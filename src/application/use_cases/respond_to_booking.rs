//! # Respond To Booking Use Case
//!
//! Resolves the negotiation phase: accept a quote, decline a quote, or
//! decline the request outright.
//!
//! - `accept` requires a quote id and is customer-driven; the quote's
//!   acceptance and the booking's move to `accepted` are atomic.
//! - `decline` with a quote id declines the quote (customer); without one
//!   it declines the request itself (worker turning down the job).

use crate::application::dto::booking_dto::{
    BookingResponse, RespondDecision, RespondToBookingRequest,
};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::use_cases::LifecycleEventPublisher;
use crate::domain::events::LifecycleEvent;
use crate::domain::value_objects::clock::Clock;
use crate::infrastructure::persistence::traits::BookingRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for responding to a booking.
#[derive(Debug)]
pub struct RespondToBookingUseCase {
    booking_repository: Arc<dyn BookingRepository>,
    event_publisher: Arc<dyn LifecycleEventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RespondToBookingUseCase {
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

    /// Executes the respond-to-booking use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `accept` arrives without a quote id (`ValidationError`)
    /// - The booking does not exist (`BookingNotFound`)
    /// - The caller's snapshot is stale (`StaleState`)
    /// - The transition is illegal or the actor unauthorized
    /// - The quote is expired (`QuoteExpired`) or not current
    ///   (`QuoteNotFound`)
    /// - Persistence fails
    pub async fn execute(
        &self,
        request: RespondToBookingRequest,
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

        // 3. Apply the decision
        let now = self.clock.now();
        let from_status = booking.status();

        match request.decision {
            RespondDecision::Accept => {
                let quote_id = request.quote_id.ok_or_else(|| {
                    ApplicationError::validation("accept requires a quote_id")
                })?;
                booking.accept_quote(quote_id, request.actor_role, now)?;
            }
            RespondDecision::Decline => match request.quote_id {
                Some(quote_id) => {
                    booking.decline_quote(
                        quote_id,
                        request.reason.clone(),
                        request.actor_role,
                        now,
                    )?;
                }
                None => booking.decline_request(request.actor_role, now)?,
            },
        }

        // 4. Persist
        self.booking_repository.save(&booking).await?;

        info!(
            booking_id = %booking.id(),
            from = %from_status,
            to = %booking.status(),
            "booking responded"
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
