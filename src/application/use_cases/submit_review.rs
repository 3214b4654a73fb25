//! # Submit Review Use Case
//!
//! Attaches a customer review to a completed booking.
//!
//! The review gate enforces eligibility (completed, unreviewed, requester
//! is the booking's customer); the created review is returned for the
//! caller to persist and display; the booking stores only the reference.

use crate::application::dto::booking_dto::{SubmitReviewRequest, SubmitReviewResponse};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::review::Review;
use crate::domain::value_objects::clock::Clock;
use crate::domain::value_objects::{CustomerId, Rating};
use crate::infrastructure::persistence::traits::BookingRepository;
use std::sync::Arc;
use tracing::info;

/// Use case for reviewing a completed booking.
#[derive(Debug)]
pub struct SubmitReviewUseCase {
    booking_repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl SubmitReviewUseCase {
    /// Creates a new use case with all dependencies.
    #[must_use]
    pub fn new(booking_repository: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            booking_repository,
            clock,
        }
    }

    /// Executes the submit-review use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rating is outside 1..=5 (`InvalidRating`)
    /// - The booking does not exist (`BookingNotFound`)
    /// - The caller's snapshot is stale (`StaleState`)
    /// - The booking is not completed (`NotCompleted`)
    /// - A review is already attached (`AlreadyReviewed`)
    /// - The requester is not the booking's customer (`Forbidden`)
    /// - Persistence fails
    pub async fn execute(
        &self,
        request: SubmitReviewRequest,
    ) -> ApplicationResult<SubmitReviewResponse> {
        // 1. Validate the rating up front
        let rating = Rating::new(request.rating)?;

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

        // 4. Build the immutable review and attach through the gate
        let now = self.clock.now();
        let reviewer = CustomerId::new(&request.reviewer_id);
        let review = Review::new(
            booking.id(),
            rating,
            &request.comment,
            request.image_refs.clone(),
            now,
        );
        booking.attach_review(review.id(), &reviewer, now)?;

        // 5. Persist the booking; the review itself travels back to the
        //    caller, whose storage collaborator owns it
        self.booking_repository.save(&booking).await?;

        info!(
            booking_id = %booking.id(),
            review_id = %review.id(),
            rating = %review.rating(),
            "review attached"
        );

        Ok(SubmitReviewResponse {
            booking: (&booking).into(),
            review,
        })
    }
}
