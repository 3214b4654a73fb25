//! # Review Eligibility Gate
//!
//! Determines when a completed booking may receive a review, and prevents
//! duplicates.
//!
//! A booking is reviewable iff it is `completed`, carries no review yet, and
//! the requester is the booking's own customer. Attachment is one-way:
//! `review_ref` is never cleared, so at most one review ever wins: a second
//! attempt fails regardless of interleaving.

use crate::domain::entities::booking::Booking;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::booking_status::BookingStatus;
use crate::domain::value_objects::CustomerId;

/// Checks review eligibility, returning the precise rejection.
///
/// # Errors
///
/// - [`DomainError::NotCompleted`] unless the booking is `completed`
/// - [`DomainError::AlreadyReviewed`] when a review is already attached
/// - [`DomainError::Forbidden`] when the requester is not the booking's
///   customer
///
/// # Examples
///
/// ```
/// use booking_engine::domain::policy::review;
/// use booking_engine::domain::value_objects::{CustomerId, Timestamp, WorkerId};
/// use booking_engine::domain::entities::Booking;
///
/// let now = Timestamp::from_millis(0).unwrap();
/// let booking = Booking::request(
///     CustomerId::new("cust-1"),
///     WorkerId::new("work-1"),
///     now.add_secs(3600),
///     "Assemble a wardrobe",
///     now,
/// )
/// .unwrap();
///
/// // Not completed yet.
/// assert!(!review::can_review(&booking, &CustomerId::new("cust-1")));
/// ```
pub fn ensure_eligible(booking: &Booking, reviewer: &CustomerId) -> DomainResult<()> {
    if booking.status() != BookingStatus::Completed {
        return Err(DomainError::NotCompleted(format!(
            "booking {} is {}",
            booking.id(),
            booking.status()
        )));
    }
    if let Some(existing) = booking.review_ref() {
        return Err(DomainError::AlreadyReviewed(format!(
            "booking {} already carries review {}",
            booking.id(),
            existing
        )));
    }
    if reviewer != booking.customer_ref() {
        return Err(DomainError::Forbidden(
            "only the booking's customer may review it".to_string(),
        ));
    }
    Ok(())
}

/// Convenience predicate over [`ensure_eligible`].
#[must_use]
pub fn can_review(booking: &Booking, reviewer: &CustomerId) -> bool {
    ensure_eligible(booking, reviewer).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::actor::ActorRole;
    use crate::domain::value_objects::money::Amount;
    use crate::domain::value_objects::timestamp::Timestamp;
    use crate::domain::value_objects::{ReviewId, WorkerId};

    fn t(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn completed_booking() -> Booking {
        let mut booking = Booking::request(
            CustomerId::new("cust-1"),
            WorkerId::new("work-1"),
            t(1_000_000),
            "Assemble a wardrobe",
            t(0),
        )
        .unwrap();
        let quote_id = booking
            .propose_quote(
                Amount::new(750.0).unwrap(),
                "Flat rate",
                None,
                ActorRole::Worker,
                t(1),
            )
            .unwrap();
        booking.accept_quote(quote_id, ActorRole::Customer, t(2)).unwrap();
        booking.start_work(ActorRole::Worker, t(3)).unwrap();
        booking.complete_work(ActorRole::Worker, t(4)).unwrap();
        booking
    }

    #[test]
    fn completed_unreviewed_customer_is_eligible() {
        let booking = completed_booking();
        assert!(ensure_eligible(&booking, &CustomerId::new("cust-1")).is_ok());
        assert!(can_review(&booking, &CustomerId::new("cust-1")));
    }

    #[test]
    fn not_completed_is_rejected() {
        let booking = Booking::request(
            CustomerId::new("cust-1"),
            WorkerId::new("work-1"),
            t(1_000_000),
            "Assemble a wardrobe",
            t(0),
        )
        .unwrap();

        assert!(matches!(
            ensure_eligible(&booking, &CustomerId::new("cust-1")),
            Err(DomainError::NotCompleted(_))
        ));
    }

    #[test]
    fn second_review_is_rejected() {
        let mut booking = completed_booking();
        let customer = CustomerId::new("cust-1");

        booking
            .attach_review(ReviewId::new_v4(), &customer, t(5))
            .unwrap();
        assert!(matches!(
            ensure_eligible(&booking, &customer),
            Err(DomainError::AlreadyReviewed(_))
        ));
    }

    #[test]
    fn foreign_customer_is_rejected() {
        let booking = completed_booking();
        assert!(matches!(
            ensure_eligible(&booking, &CustomerId::new("someone-else")),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn exactly_one_attach_wins() {
        let mut booking = completed_booking();
        let customer = CustomerId::new("cust-1");

        let first = booking.attach_review(ReviewId::new_v4(), &customer, t(5));
        let second = booking.attach_review(ReviewId::new_v4(), &customer, t(6));

        assert!(first.is_ok());
        assert!(matches!(second, Err(DomainError::AlreadyReviewed(_))));
    }
}
