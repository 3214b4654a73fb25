//! # Review Entity
//!
//! An immutable customer review of a completed booking.
//!
//! Reviews are created once per completed booking, by the customer only,
//! and never edited or deleted in this scope. Eligibility is enforced by
//! the review gate in [`policy::review`](crate::domain::policy::review).

use crate::domain::value_objects::rating::Rating;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{BookingId, ReviewId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer's review of a completed booking.
///
/// Immutable once created: the struct exposes accessors only.
///
/// # Examples
///
/// ```
/// use booking_engine::domain::entities::review::Review;
/// use booking_engine::domain::value_objects::{BookingId, Rating, Timestamp};
///
/// let review = Review::new(
///     BookingId::new_v4(),
///     Rating::new(5).unwrap(),
///     "Fast and tidy work",
///     vec![],
///     Timestamp::from_millis(1_000).unwrap(),
/// );
/// assert_eq!(review.rating().get(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier for this review.
    id: ReviewId,
    /// The booking being reviewed.
    booking_id: BookingId,
    /// Star rating, 1..=5.
    rating: Rating,
    /// Free-text comment.
    comment: String,
    /// References to uploaded images, if any.
    image_refs: Vec<String>,
    /// When the review was created.
    created_at: Timestamp,
}

impl Review {
    /// Creates a new review.
    #[must_use]
    pub fn new(
        booking_id: BookingId,
        rating: Rating,
        comment: impl Into<String>,
        image_refs: Vec<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: ReviewId::new_v4(),
            booking_id,
            rating,
            comment: comment.into(),
            image_refs,
            created_at: now,
        }
    }

    /// Returns the review ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ReviewId {
        self.id
    }

    /// Returns the reviewed booking's ID.
    #[inline]
    #[must_use]
    pub fn booking_id(&self) -> BookingId {
        self.booking_id
    }

    /// Returns the rating.
    #[inline]
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the comment.
    #[inline]
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the image references.
    #[inline]
    #[must_use]
    pub fn image_refs(&self) -> &[String] {
        &self.image_refs
    }

    /// Returns when the review was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Review({} {} for {})", self.id, self.rating, self.booking_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_review() -> Review {
        Review::new(
            BookingId::new_v4(),
            Rating::new(4).unwrap(),
            "Good work, slightly late",
            vec!["img-1".to_string(), "img-2".to_string()],
            Timestamp::from_millis(99_000).unwrap(),
        )
    }

    #[test]
    fn carries_all_fields() {
        let review = sample_review();
        assert_eq!(review.rating().get(), 4);
        assert_eq!(review.comment(), "Good work, slightly late");
        assert_eq!(review.image_refs().len(), 2);
        assert_eq!(review.created_at().as_millis(), 99_000);
    }

    #[test]
    fn ids_are_unique() {
        let a = sample_review();
        let b = sample_review();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn serde_roundtrip() {
        let review = sample_review();
        let json = serde_json::to_string(&review).unwrap();
        let deserialized: Review = serde_json::from_str(&json).unwrap();
        assert_eq!(review, deserialized);
    }
}
