//! # Booking Aggregate
//!
//! The central aggregate: a single requested service engagement between a
//! customer and a worker.
//!
//! # Status State Machine
//!
//! ```text
//! quote_requested → pending → accepted → in_progress → completed
//!        |             |          |            |
//!        ├── declined ←┘          |            |
//!        └── cancelled ←──────────┴────────────┘
//! ```
//!
//! All mutating methods take the current time as a parameter, validate
//! before touching any state, bump the optimistic-locking `version`, and
//! stamp `updated_at`. The aggregate never samples the wall clock and never
//! persists itself; callers receive the mutated snapshot and delegate
//! storage to a repository.
//!
//! # Examples
//!
//! ```
//! use booking_engine::domain::entities::booking::Booking;
//! use booking_engine::domain::value_objects::{
//!     ActorRole, Amount, BookingStatus, CustomerId, Timestamp, WorkerId,
//! };
//!
//! let now = Timestamp::from_millis(1_000).unwrap();
//! let mut booking = Booking::request(
//!     CustomerId::new("cust-1"),
//!     WorkerId::new("work-1"),
//!     now.add_secs(24 * 3600),
//!     "Repaint the kitchen",
//!     now,
//! )
//! .unwrap();
//!
//! let quote_id = booking
//!     .propose_quote(
//!         Amount::new(5000.0).unwrap(),
//!         "Paint and labour",
//!         None,
//!         ActorRole::Worker,
//!         now.add_secs(60),
//!     )
//!     .unwrap();
//! assert_eq!(booking.status(), BookingStatus::Pending);
//!
//! booking
//!     .accept_quote(quote_id, ActorRole::Customer, now.add_secs(120))
//!     .unwrap();
//! assert_eq!(booking.status(), BookingStatus::Accepted);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::policy::review;
use crate::domain::value_objects::actor::ActorRole;
use crate::domain::value_objects::booking_status::{self, BookingStatus, StampField, Transition};
use crate::domain::value_objects::money::Amount;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{BookingId, CustomerId, QuoteId, ReviewId, WorkerId};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::quote::{Quote, MAX_REASON_LEN};

/// A single requested service engagement between a customer and a worker.
///
/// # Invariants
///
/// - At most one quote is live (`proposed` and unexpired) at any time
/// - Accepting a quote moves the booking to `accepted` in the same call
/// - `completed_at`/`cancelled_at` are stamped exactly once, never before
///   `created_at`
/// - `review_ref` is set at most once and never cleared
/// - Every successful mutation bumps `version` and stamps `updated_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for this booking.
    id: BookingId,
    /// The requesting customer.
    customer_ref: CustomerId,
    /// The worker asked to perform the service.
    worker_ref: WorkerId,
    /// Current lifecycle status.
    status: BookingStatus,
    /// What the customer asked for.
    description: String,
    /// Agreed/requested service time.
    scheduled_at: Timestamp,
    /// Quote history, newest last. Old quotes are never revived.
    quotes: Vec<Quote>,
    /// Reason given on cancellation, if any.
    cancellation_reason: Option<String>,
    /// Set once a review is attached; never cleared.
    review_ref: Option<ReviewId>,
    /// Version for optimistic locking.
    version: u64,
    /// When this booking was created.
    created_at: Timestamp,
    /// When this booking was last updated.
    updated_at: Timestamp,
    /// Stamped when the booking reaches `completed`.
    completed_at: Option<Timestamp>,
    /// Stamped when the booking reaches `cancelled`.
    cancelled_at: Option<Timestamp>,
}

impl Booking {
    /// Creates a booking entering the lifecycle at `quote_requested`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidSchedule`] when `scheduled_at` is not in the
    ///   future
    /// - [`DomainError::MissingDescription`] when the description is blank
    pub fn request(
        customer_ref: CustomerId,
        worker_ref: WorkerId,
        scheduled_at: Timestamp,
        description: impl Into<String>,
        now: Timestamp,
    ) -> DomainResult<Self> {
        Self::create(
            BookingStatus::QuoteRequested,
            customer_ref,
            worker_ref,
            scheduled_at,
            description,
            now,
        )
    }

    /// Creates a booking entering the lifecycle at `pending`, for flows
    /// where the customer books a listed service directly instead of asking
    /// for a price first.
    ///
    /// # Errors
    ///
    /// Same as [`Booking::request`].
    pub fn direct(
        customer_ref: CustomerId,
        worker_ref: WorkerId,
        scheduled_at: Timestamp,
        description: impl Into<String>,
        now: Timestamp,
    ) -> DomainResult<Self> {
        Self::create(
            BookingStatus::Pending,
            customer_ref,
            worker_ref,
            scheduled_at,
            description,
            now,
        )
    }

    fn create(
        status: BookingStatus,
        customer_ref: CustomerId,
        worker_ref: WorkerId,
        scheduled_at: Timestamp,
        description: impl Into<String>,
        now: Timestamp,
    ) -> DomainResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::MissingDescription);
        }
        if !scheduled_at.is_after(now) {
            return Err(DomainError::InvalidSchedule(
                "scheduled time must be in the future".to_string(),
            ));
        }

        Ok(Self {
            id: BookingId::new_v4(),
            customer_ref,
            worker_ref,
            status,
            description,
            scheduled_at,
            quotes: Vec::new(),
            cancellation_reason: None,
            review_ref: None,
            version: 1,
            created_at: now,
            updated_at: now,
            completed_at: None,
            cancelled_at: None,
        })
    }

    // ========== Accessors ==========

    /// Returns the booking ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the customer reference.
    #[inline]
    #[must_use]
    pub fn customer_ref(&self) -> &CustomerId {
        &self.customer_ref
    }

    /// Returns the worker reference.
    #[inline]
    #[must_use]
    pub fn worker_ref(&self) -> &WorkerId {
        &self.worker_ref
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the scheduled service time.
    #[inline]
    #[must_use]
    pub fn scheduled_at(&self) -> Timestamp {
        self.scheduled_at
    }

    /// Returns the full quote history, newest last.
    #[inline]
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Returns the quote with the given ID, if present.
    #[must_use]
    pub fn quote(&self, quote_id: QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id() == quote_id)
    }

    /// Returns the most recent quote, if any.
    #[must_use]
    pub fn current_quote(&self) -> Option<&Quote> {
        self.quotes.last()
    }

    /// Returns the live quote (`proposed` and unexpired at `now`), if any.
    #[must_use]
    pub fn live_quote(&self, now: Timestamp) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.is_live(now))
    }

    /// Returns the cancellation reason, if any.
    #[inline]
    #[must_use]
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// Returns the attached review's ID, if any.
    #[inline]
    #[must_use]
    pub fn review_ref(&self) -> Option<ReviewId> {
        self.review_ref
    }

    /// Returns the version for optimistic locking.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns when this booking was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when this booking was last updated.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns when work was completed, if it was.
    #[inline]
    #[must_use]
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Returns when the booking was cancelled, if it was.
    #[inline]
    #[must_use]
    pub fn cancelled_at(&self) -> Option<Timestamp> {
        self.cancelled_at
    }

    /// Returns true if the booking is in a terminal status.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    // ========== Quote Negotiation ==========

    /// Proposes a new quote on the booking.
    ///
    /// Allowed while the booking is `quote_requested` or `pending` and no
    /// live proposed quote exists. A stale proposed quote past its validity
    /// window is lazily stamped `expired` first. Proposing on a
    /// `quote_requested` booking moves it to `pending`; on a `pending` one
    /// the status is unchanged.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Forbidden`] unless the actor is the worker or system
    /// - [`DomainError::WrongStatus`] outside `quote_requested`/`pending`
    /// - [`DomainError::InvalidTimestamp`] when `valid_until` is not after
    ///   `now`
    /// - [`DomainError::QuoteAlreadyProposed`] when a live quote exists
    pub fn propose_quote(
        &mut self,
        amount: Amount,
        details: impl Into<String>,
        valid_until: Option<Timestamp>,
        actor: ActorRole,
        now: Timestamp,
    ) -> DomainResult<QuoteId> {
        if !(actor.is_worker() || actor.is_system()) {
            return Err(DomainError::Forbidden(
                "only the worker may propose a quote".to_string(),
            ));
        }
        if !matches!(
            self.status,
            BookingStatus::QuoteRequested | BookingStatus::Pending
        ) {
            return Err(DomainError::WrongStatus(format!(
                "cannot propose a quote on a {} booking",
                self.status
            )));
        }
        if let Some(deadline) = valid_until
            && !deadline.is_after(now)
        {
            return Err(DomainError::InvalidTimestamp(
                "valid_until must be in the future".to_string(),
            ));
        }

        self.expire_stale_quotes(now);
        if let Some(live) = self.quotes.iter().find(|q| q.status().is_proposed()) {
            return Err(DomainError::QuoteAlreadyProposed(live.id().to_string()));
        }

        // Validate the status move before appending, so a failure cannot
        // leave a dangling quote behind.
        let move_to_pending = if self.status == BookingStatus::QuoteRequested {
            Some(booking_status::transition(
                self.status,
                BookingStatus::Pending,
                actor,
            )?)
        } else {
            None
        };

        let quote = Quote::new(amount, details, valid_until, now);
        let quote_id = quote.id();
        self.quotes.push(quote);

        match move_to_pending {
            Some(t) => self.apply(t, now),
            None => self.touch(now),
        }

        Ok(quote_id)
    }

    /// Accepts the named quote on behalf of the customer.
    ///
    /// The quote's acceptance and the booking's move to `accepted` happen in
    /// the same call; no intermediate state is observable.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Forbidden`] unless the actor is the customer or
    ///   system
    /// - [`DomainError::IllegalTransition`] when `accepted` is not reachable
    ///   from the current status
    /// - [`DomainError::QuoteNotFound`] when the named quote does not exist
    ///   or is not the current proposed quote
    /// - [`DomainError::QuoteExpired`] when its validity window has passed
    pub fn accept_quote(
        &mut self,
        quote_id: QuoteId,
        actor: ActorRole,
        now: Timestamp,
    ) -> DomainResult<()> {
        if !(actor.is_customer() || actor.is_system()) {
            return Err(DomainError::Forbidden(
                "only the customer may accept a quote".to_string(),
            ));
        }
        let t = booking_status::transition(self.status, BookingStatus::Accepted, actor)?;

        let idx = self
            .quotes
            .iter()
            .position(|q| q.id() == quote_id)
            .ok_or_else(|| DomainError::QuoteNotFound(quote_id.to_string()))?;

        if !self.quotes[idx].status().is_proposed() {
            return Err(DomainError::QuoteNotFound(format!(
                "quote {} is not the current proposed quote",
                quote_id
            )));
        }
        if self.quotes[idx].is_expired(now) {
            self.quotes[idx].mark_expired();
            return Err(DomainError::QuoteExpired(quote_id.to_string()));
        }

        self.quotes[idx].accept()?;
        self.apply(t, now);
        Ok(())
    }

    /// Declines the named quote on behalf of the customer.
    ///
    /// The booking transitions to `declined`; the reason is attached for
    /// audit/display and validated for length only.
    ///
    /// # Errors
    ///
    /// Mirrors [`Booking::accept_quote`], plus
    /// [`DomainError::ValidationError`] for an oversized reason.
    pub fn decline_quote(
        &mut self,
        quote_id: QuoteId,
        reason: Option<String>,
        actor: ActorRole,
        now: Timestamp,
    ) -> DomainResult<()> {
        if !(actor.is_customer() || actor.is_system()) {
            return Err(DomainError::Forbidden(
                "only the customer may decline a quote".to_string(),
            ));
        }
        let t = booking_status::transition(self.status, BookingStatus::Declined, actor)?;

        let idx = self
            .quotes
            .iter()
            .position(|q| q.id() == quote_id)
            .ok_or_else(|| DomainError::QuoteNotFound(quote_id.to_string()))?;

        if !self.quotes[idx].status().is_proposed() {
            return Err(DomainError::QuoteNotFound(format!(
                "quote {} is not the current proposed quote",
                quote_id
            )));
        }
        if self.quotes[idx].is_expired(now) {
            self.quotes[idx].mark_expired();
            return Err(DomainError::QuoteExpired(quote_id.to_string()));
        }

        self.quotes[idx].decline(reason)?;
        self.apply(t, now);
        Ok(())
    }

    /// Declines the booking request itself, without reference to a quote:
    /// the worker turning down the job.
    ///
    /// # Errors
    ///
    /// Propagates the state machine's legality and authorization checks.
    pub fn decline_request(&mut self, actor: ActorRole, now: Timestamp) -> DomainResult<()> {
        let t = booking_status::transition(self.status, BookingStatus::Declined, actor)?;
        self.apply(t, now);
        Ok(())
    }

    // ========== Work Progress ==========

    /// Marks work as started.
    ///
    /// # Errors
    ///
    /// Propagates the state machine's legality and authorization checks
    /// (worker-only edge).
    pub fn start_work(&mut self, actor: ActorRole, now: Timestamp) -> DomainResult<()> {
        let t = booking_status::transition(self.status, BookingStatus::InProgress, actor)?;
        self.apply(t, now);
        Ok(())
    }

    /// Marks work as completed, stamping `completed_at`.
    ///
    /// # Errors
    ///
    /// Propagates the state machine's legality and authorization checks
    /// (worker-only edge).
    pub fn complete_work(&mut self, actor: ActorRole, now: Timestamp) -> DomainResult<()> {
        let t = booking_status::transition(self.status, BookingStatus::Completed, actor)?;
        self.apply(t, now);
        Ok(())
    }

    // ========== Cancellation & Reschedule ==========

    /// Cancels the booking, stamping `cancelled_at` and storing the reason.
    ///
    /// The time-window rule lives in
    /// [`CancellationPolicy`](crate::domain::policy::cancellation::CancellationPolicy);
    /// callers must pass both the policy check and this transition.
    ///
    /// # Errors
    ///
    /// [`DomainError::ValidationError`] for an oversized reason, otherwise
    /// the state machine's legality and authorization checks.
    pub fn cancel(
        &mut self,
        reason: Option<String>,
        actor: ActorRole,
        now: Timestamp,
    ) -> DomainResult<()> {
        if let Some(text) = &reason
            && text.chars().count() > MAX_REASON_LEN
        {
            return Err(DomainError::ValidationError(format!(
                "cancellation reason exceeds {} characters",
                MAX_REASON_LEN
            )));
        }
        let t = booking_status::transition(self.status, BookingStatus::Cancelled, actor)?;
        self.cancellation_reason = reason;
        self.apply(t, now);
        Ok(())
    }

    /// Moves the booking to a new scheduled time. Status is unchanged.
    ///
    /// The stricter reschedule lead-time rule lives in the cancellation
    /// policy; callers must pass it first.
    ///
    /// # Errors
    ///
    /// - [`DomainError::WrongStatus`] on a terminal booking
    /// - [`DomainError::InvalidSchedule`] when the new time is not in the
    ///   future
    pub fn reschedule(&mut self, new_scheduled_at: Timestamp, now: Timestamp) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::WrongStatus(format!(
                "cannot reschedule a {} booking",
                self.status
            )));
        }
        if !new_scheduled_at.is_after(now) {
            return Err(DomainError::InvalidSchedule(
                "new scheduled time must be in the future".to_string(),
            ));
        }
        self.scheduled_at = new_scheduled_at;
        self.touch(now);
        Ok(())
    }

    // ========== Review ==========

    /// Attaches a review reference, one-way and irreversible.
    ///
    /// # Errors
    ///
    /// Propagates the review gate:
    /// [`DomainError::NotCompleted`], [`DomainError::AlreadyReviewed`],
    /// [`DomainError::Forbidden`].
    pub fn attach_review(
        &mut self,
        review_id: ReviewId,
        reviewer: &CustomerId,
        now: Timestamp,
    ) -> DomainResult<()> {
        review::ensure_eligible(self, reviewer)?;
        self.review_ref = Some(review_id);
        self.touch(now);
        Ok(())
    }

    // ========== Internals ==========

    fn apply(&mut self, t: Transition, now: Timestamp) {
        self.status = t.to;
        match t.stamp {
            Some(StampField::CompletedAt) => self.completed_at = Some(now),
            Some(StampField::CancelledAt) => self.cancelled_at = Some(now),
            None => {}
        }
        self.touch(now);
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
        self.version = self.version.saturating_add(1);
    }

    fn expire_stale_quotes(&mut self, now: Timestamp) {
        for quote in &mut self.quotes {
            if quote.status().is_proposed() && quote.is_expired(now) {
                quote.mark_expired();
            }
        }
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booking({} {} -> {} [{}])",
            self.id, self.customer_ref, self.worker_ref, self.status
        )
    }
}
