//! # Booking DTOs
//!
//! Request/response types for booking lifecycle operations.
//!
//! Requests carry raw wire values (string ids, millisecond timestamps) plus
//! the caller's `expected_version` for optimistic concurrency, and validate
//! themselves before conversion to domain types. Responses are snapshots of
//! the mutated aggregate.

use crate::domain::entities::booking::Booking;
use crate::domain::entities::quote::Quote;
use crate::domain::entities::review::Review;
use crate::domain::value_objects::actor::ActorRole;
use crate::domain::value_objects::booking_status::BookingStatus;
use crate::domain::value_objects::quote_status::QuoteStatus;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{Amount, BookingId, CustomerId, QuoteId, ReviewId, WorkerId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Request to create a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Requesting customer.
    pub customer_id: String,
    /// Worker being booked.
    pub worker_id: String,
    /// Requested service time, epoch milliseconds.
    pub scheduled_at_ms: i64,
    /// What the customer wants done.
    pub description: String,
    /// When true the booking enters the lifecycle at `pending` (direct
    /// booking of a listed service) instead of `quote_requested`.
    #[serde(default)]
    pub direct: bool,
}

impl CreateBookingRequest {
    /// Creates a new quote-flow booking request.
    #[must_use]
    pub fn new(
        customer_id: impl Into<String>,
        worker_id: impl Into<String>,
        scheduled_at_ms: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            worker_id: worker_id.into(),
            scheduled_at_ms,
            description: description.into(),
            direct: false,
        }
    }

    /// Marks the request as a direct booking (`pending` entry point).
    #[must_use]
    pub fn direct(mut self) -> Self {
        self.direct = true;
        self
    }

    /// Validates the raw request.
    ///
    /// # Errors
    ///
    /// Returns a description of the first failing field.
    pub fn validate(&self) -> Result<(), String> {
        if self.customer_id.trim().is_empty() {
            return Err("customer_id must not be empty".to_string());
        }
        if self.worker_id.trim().is_empty() {
            return Err("worker_id must not be empty".to_string());
        }
        // Description emptiness is the aggregate's rule (MissingDescription).
        if Timestamp::from_millis(self.scheduled_at_ms).is_none() {
            return Err("scheduled_at_ms must be a non-negative epoch offset".to_string());
        }
        Ok(())
    }

    /// Converts the raw request to domain types.
    ///
    /// # Errors
    ///
    /// Returns a description of the failing field.
    pub fn to_domain_types(&self) -> Result<(CustomerId, WorkerId, Timestamp), String> {
        let scheduled_at = Timestamp::from_millis(self.scheduled_at_ms)
            .ok_or_else(|| "scheduled_at_ms must be a non-negative epoch offset".to_string())?;
        Ok((
            CustomerId::new(&self.customer_id),
            WorkerId::new(&self.worker_id),
            scheduled_at,
        ))
    }
}

/// Request to propose a quote on a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposeQuoteRequest {
    /// Target booking.
    pub booking_id: BookingId,
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Proposed price.
    pub amount: f64,
    /// Free-text terms.
    pub details: String,
    /// Optional validity deadline, epoch milliseconds.
    pub valid_until_ms: Option<i64>,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

impl ProposeQuoteRequest {
    /// Converts the raw amount and deadline to domain types.
    ///
    /// # Errors
    ///
    /// Returns a description of the failing field.
    pub fn to_domain_types(&self) -> Result<(Amount, Option<Timestamp>), String> {
        let amount = Amount::new(self.amount).map_err(|e| e.to_string())?;
        let valid_until = match self.valid_until_ms {
            Some(ms) => Some(
                Timestamp::from_millis(ms)
                    .ok_or_else(|| "valid_until_ms must be non-negative".to_string())?,
            ),
            None => None,
        };
        Ok((amount, valid_until))
    }
}

/// Decision on a pending booking or its quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespondDecision {
    /// Accept the named quote.
    Accept,
    /// Decline the quote (with a quote id) or the request itself (without).
    Decline,
}

/// Request to respond to a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondToBookingRequest {
    /// Target booking.
    pub booking_id: BookingId,
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Accept or decline.
    pub decision: RespondDecision,
    /// The quote being accepted/declined. Required for `accept`.
    pub quote_id: Option<QuoteId>,
    /// Optional decline reason, attached for audit/display.
    pub reason: Option<String>,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Request to start or complete work on a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkProgressRequest {
    /// Target booking.
    pub booking_id: BookingId,
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Request to cancel a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    /// Target booking.
    pub booking_id: BookingId,
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Optional cancellation reason.
    pub reason: Option<String>,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Request to move a booking to a new scheduled time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleBookingRequest {
    /// Target booking.
    pub booking_id: BookingId,
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// New service time, epoch milliseconds.
    pub new_scheduled_at_ms: i64,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Request to review a completed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    /// Target booking.
    pub booking_id: BookingId,
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Reviewing customer; must be the booking's own customer.
    pub reviewer_id: String,
    /// Star rating, 1..=5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// References to uploaded images, if any.
    #[serde(default)]
    pub image_refs: Vec<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Snapshot of a quote for responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteView {
    /// Quote identifier.
    pub id: QuoteId,
    /// Proposed price.
    pub amount: Amount,
    /// Free-text terms.
    pub details: String,
    /// When the quote was proposed.
    pub proposed_at: Timestamp,
    /// Optional validity deadline.
    pub valid_until: Option<Timestamp>,
    /// Quote status as stored (expiry is evaluated lazily).
    pub status: QuoteStatus,
    /// Reason attached on decline, if any.
    pub decline_reason: Option<String>,
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id(),
            amount: quote.amount(),
            details: quote.details().to_string(),
            proposed_at: quote.proposed_at(),
            valid_until: quote.valid_until(),
            status: quote.status(),
            decline_reason: quote.decline_reason().map(str::to_string),
        }
    }
}

/// Snapshot of a booking returned by every mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    /// Booking identifier.
    pub id: BookingId,
    /// Current status, wire encoding.
    pub status: BookingStatus,
    /// Human-readable status label, derived from the canonical enum.
    pub status_label: String,
    /// Requesting customer.
    pub customer_id: CustomerId,
    /// Worker booked.
    pub worker_id: WorkerId,
    /// What the customer asked for.
    pub description: String,
    /// Agreed/requested service time.
    pub scheduled_at: Timestamp,
    /// The most recent quote, if any.
    pub quote: Option<QuoteView>,
    /// Reason given on cancellation, if any.
    pub cancellation_reason: Option<String>,
    /// Attached review, if any.
    pub review_ref: Option<ReviewId>,
    /// Version for optimistic concurrency; echo this back on the next
    /// mutation.
    pub version: u64,
    /// When the booking was created.
    pub created_at: Timestamp,
    /// When the booking was last updated.
    pub updated_at: Timestamp,
    /// When work was completed, if it was.
    pub completed_at: Option<Timestamp>,
    /// When the booking was cancelled, if it was.
    pub cancelled_at: Option<Timestamp>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id(),
            status: booking.status(),
            status_label: booking.status().label().to_string(),
            customer_id: booking.customer_ref().clone(),
            worker_id: booking.worker_ref().clone(),
            description: booking.description().to_string(),
            scheduled_at: booking.scheduled_at(),
            quote: booking.current_quote().map(QuoteView::from),
            cancellation_reason: booking.cancellation_reason().map(str::to_string),
            review_ref: booking.review_ref(),
            version: booking.version(),
            created_at: booking.created_at(),
            updated_at: booking.updated_at(),
            completed_at: booking.completed_at(),
            cancelled_at: booking.cancelled_at(),
        }
    }
}

/// Response from the submit-review use case.
///
/// Carries the created review for the caller to persist and display; the
/// engine stores only the reference on the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    /// The updated booking snapshot.
    pub booking: BookingResponse,
    /// The newly created review.
    pub review: Review,
}
