//! # Propose Quote Use Case
//!
//! Worker proposes a price for a booking in the negotiation phase.
//!
//! Proposing on a `quote_requested` booking moves it to `pending`; on a
//! booking already `pending` only the quote is added. A stale proposed
//! quote past its validity window is lazily expired on the way through.

use crate::application::dto::booking_dto::{BookingResponse, ProposeQuoteRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::use_cases::LifecycleEventPublisher;
use crate::domain::events::LifecycleEvent;
use crate::domain::value_objects::clock::Clock;
use crate::infrastructure::persistence::traits::BookingRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for proposing a quote.
#[derive(Debug)]
pub struct ProposeQuoteUseCase {
    booking_repository: Arc<dyn BookingRepository>,
    event_publisher: Arc<dyn LifecycleEventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ProposeQuoteUseCase {
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

    /// Executes the propose-quote use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The booking does not exist (`BookingNotFound`)
    /// - The caller's snapshot is stale (`StaleState`)
    /// - The booking is outside `quote_requested`/`pending` (`WrongStatus`)
    /// - A live proposed quote already exists (`QuoteAlreadyProposed`)
    /// - Persistence fails
    pub async fn execute(
        &self,
        request: ProposeQuoteRequest,
    ) -> ApplicationResult<BookingResponse> {
        // 1. Convert raw values to domain types
        let (amount, valid_until) = request
            .to_domain_types()
            .map_err(ApplicationError::validation)?;

        // 2. Load the booking
        let mut booking = self
            .booking_repository
            .get(&request.booking_id)
            .await?
            .ok_or_else(|| ApplicationError::booking_not_found(request.booking_id.to_string()))?;

        // 3. Version precondition, before any mutation
        if booking.version() != request.expected_version {
            return Err(ApplicationError::stale_state(
                request.expected_version,
                booking.version(),
            ));
        }

        // 4. Apply the domain rule
        let now = self.clock.now();
        let from_status = booking.status();
        let quote_id = booking.propose_quote(
            amount,
            &request.details,
            valid_until,
            request.actor_role,
            now,
        )?;

        // 5. Persist
        self.booking_repository.save(&booking).await?;

        info!(
            booking_id = %booking.id(),
            quote_id = %quote_id,
            status = %booking.status(),
            "quote proposed"
        );

        // 6. Publish the transition, if the status moved
        if booking.status() != from_status {
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
        }

        Ok(BookingResponse::from(&booking))
    }
}
