//! # Cancellation & Reschedule Policy
//!
//! Time-windowed eligibility rules for calling off or moving a booking.
//!
//! A booking may be cancelled while it is still early in its lifecycle
//! (`quote_requested`, `pending`, `accepted`) and only while strictly more
//! than the configured lead time remains before the scheduled service.
//! Rescheduling uses the same statuses with a stricter window, reflecting
//! that moving a job needs more notice than calling it off.
//!
//! The window check is deliberately a separate layer from transition
//! legality: both must pass for a cancellation to succeed.
//!
//! # Examples
//!
//! ```
//! use booking_engine::domain::entities::Booking;
//! use booking_engine::domain::policy::cancellation::CancellationPolicy;
//! use booking_engine::domain::value_objects::{CustomerId, Timestamp, WorkerId};
//!
//! let now = Timestamp::from_millis(0).unwrap();
//! let booking = Booking::request(
//!     CustomerId::new("cust-1"),
//!     WorkerId::new("work-1"),
//!     now.add_secs(5 * 3600),
//!     "Clean the gutters",
//!     now,
//! )
//! .unwrap();
//!
//! let policy = CancellationPolicy::default();
//! assert!(policy.can_cancel(&booking, now).is_ok());
//! // Exactly two hours out is no longer enough.
//! assert!(policy.can_cancel(&booking, now.add_secs(3 * 3600)).is_err());
//! ```

use crate::domain::entities::booking::Booking;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::booking_status::BookingStatus;
use crate::domain::value_objects::timestamp::Timestamp;

/// Default minimum lead time for cancellation: 2 hours.
pub const DEFAULT_CANCEL_LEAD_SECS: i64 = 2 * 3600;

/// Default minimum lead time for rescheduling: 4 hours.
pub const DEFAULT_RESCHEDULE_LEAD_SECS: i64 = 4 * 3600;

/// Time-window policy evaluator for cancellation and reschedule.
///
/// Stateless; window lengths are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationPolicy {
    cancel_lead_secs: i64,
    reschedule_lead_secs: i64,
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self {
            cancel_lead_secs: DEFAULT_CANCEL_LEAD_SECS,
            reschedule_lead_secs: DEFAULT_RESCHEDULE_LEAD_SECS,
        }
    }
}

impl CancellationPolicy {
    /// Creates a policy with explicit window lengths in seconds.
    #[must_use]
    pub const fn new(cancel_lead_secs: i64, reschedule_lead_secs: i64) -> Self {
        Self {
            cancel_lead_secs,
            reschedule_lead_secs,
        }
    }

    /// Returns the cancellation lead time in seconds.
    #[inline]
    #[must_use]
    pub const fn cancel_lead_secs(&self) -> i64 {
        self.cancel_lead_secs
    }

    /// Returns the reschedule lead time in seconds.
    #[inline]
    #[must_use]
    pub const fn reschedule_lead_secs(&self) -> i64 {
        self.reschedule_lead_secs
    }

    /// Checks whether the booking may be cancelled at `now`.
    ///
    /// Eligible iff the status is `quote_requested`, `pending` or `accepted`
    /// and strictly more than the cancellation lead remains before
    /// `scheduled_at`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::WrongStatus`] outside the eligible statuses
    /// - [`DomainError::TooCloseToSchedule`] inside the window
    pub fn can_cancel(&self, booking: &Booking, now: Timestamp) -> DomainResult<()> {
        self.check(booking, now, self.cancel_lead_secs)
    }

    /// Checks whether the booking may be rescheduled at `now`.
    ///
    /// Same statuses as cancellation, stricter lead time.
    ///
    /// # Errors
    ///
    /// Mirrors [`CancellationPolicy::can_cancel`].
    pub fn can_reschedule(&self, booking: &Booking, now: Timestamp) -> DomainResult<()> {
        self.check(booking, now, self.reschedule_lead_secs)
    }

    fn check(&self, booking: &Booking, now: Timestamp, lead_secs: i64) -> DomainResult<()> {
        if !Self::status_eligible(booking.status()) {
            return Err(DomainError::WrongStatus(format!(
                "a {} booking cannot be cancelled or rescheduled",
                booking.status()
            )));
        }

        let remaining_ms = booking.scheduled_at().millis_since(now);
        if remaining_ms <= lead_secs.saturating_mul(1000) {
            return Err(DomainError::TooCloseToSchedule {
                required_lead_secs: lead_secs,
            });
        }

        Ok(())
    }

    const fn status_eligible(status: BookingStatus) -> bool {
        matches!(
            status,
            BookingStatus::QuoteRequested | BookingStatus::Pending | BookingStatus::Accepted
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::actor::ActorRole;
    use crate::domain::value_objects::money::Amount;
    use crate::domain::value_objects::{CustomerId, WorkerId};

    fn t(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    const HOUR_MS: i64 = 3_600_000;

    fn booking_scheduled_in(hours: i64) -> Booking {
        Booking::request(
            CustomerId::new("cust-1"),
            WorkerId::new("work-1"),
            t(hours * HOUR_MS),
            "Clean the gutters",
            t(0),
        )
        .unwrap()
    }

    mod cancel_window {
        use super::*;

        #[test]
        fn allowed_well_before_schedule() {
            let booking = booking_scheduled_in(5);
            let policy = CancellationPolicy::default();
            assert!(policy.can_cancel(&booking, t(0)).is_ok());
        }

        #[test]
        fn boundary_is_strict() {
            let booking = booking_scheduled_in(5);
            let policy = CancellationPolicy::default();

            // Exactly 2h00m00s remaining: not allowed.
            let at_boundary = t(3 * HOUR_MS);
            assert!(matches!(
                policy.can_cancel(&booking, at_boundary),
                Err(DomainError::TooCloseToSchedule { .. })
            ));

            // 2h00m01s remaining: allowed.
            let just_outside = t(3 * HOUR_MS - 1_000);
            assert!(policy.can_cancel(&booking, just_outside).is_ok());

            // One millisecond over the line still counts as outside.
            assert!(policy.can_cancel(&booking, at_boundary.add_millis(-1)).is_ok());
        }

        #[test]
        fn rejected_inside_window() {
            let booking = booking_scheduled_in(5);
            let policy = CancellationPolicy::default();
            assert!(matches!(
                policy.can_cancel(&booking, t(4 * HOUR_MS)),
                Err(DomainError::TooCloseToSchedule {
                    required_lead_secs: 7200,
                })
            ));
        }

        #[test]
        fn rejected_after_schedule_passed() {
            let booking = booking_scheduled_in(5);
            let policy = CancellationPolicy::default();
            assert!(policy.can_cancel(&booking, t(6 * HOUR_MS)).is_err());
        }
    }

    mod reschedule_window {
        use super::*;

        #[test]
        fn stricter_than_cancel() {
            let booking = booking_scheduled_in(5);
            let policy = CancellationPolicy::default();

            // Three hours out: cancellation fine, reschedule not.
            let now = t(2 * HOUR_MS);
            assert!(policy.can_cancel(&booking, now).is_ok());
            assert!(matches!(
                policy.can_reschedule(&booking, now),
                Err(DomainError::TooCloseToSchedule {
                    required_lead_secs: 14400,
                })
            ));
        }

        #[test]
        fn boundary_is_strict() {
            let booking = booking_scheduled_in(5);
            let policy = CancellationPolicy::default();

            assert!(policy.can_reschedule(&booking, t(HOUR_MS)).is_err());
            assert!(policy.can_reschedule(&booking, t(HOUR_MS - 1_000)).is_ok());
        }
    }

    mod status_eligibility {
        use super::*;

        #[test]
        fn eligible_statuses() {
            let policy = CancellationPolicy::default();

            let booking = booking_scheduled_in(10);
            assert_eq!(booking.status(), BookingStatus::QuoteRequested);
            assert!(policy.can_cancel(&booking, t(0)).is_ok());

            let mut booking = booking_scheduled_in(10);
            booking
                .propose_quote(
                    Amount::new(100.0).unwrap(),
                    "Quote",
                    None,
                    ActorRole::Worker,
                    t(1),
                )
                .unwrap();
            assert_eq!(booking.status(), BookingStatus::Pending);
            assert!(policy.can_cancel(&booking, t(2)).is_ok());
        }

        #[test]
        fn in_progress_is_not_cancellable_by_policy() {
            let policy = CancellationPolicy::default();
            let mut booking = booking_scheduled_in(10);
            let quote_id = booking
                .propose_quote(
                    Amount::new(100.0).unwrap(),
                    "Quote",
                    None,
                    ActorRole::Worker,
                    t(1),
                )
                .unwrap();
            booking.accept_quote(quote_id, ActorRole::Customer, t(2)).unwrap();
            booking.start_work(ActorRole::Worker, t(3)).unwrap();

            assert!(matches!(
                policy.can_cancel(&booking, t(4)),
                Err(DomainError::WrongStatus(_))
            ));
        }

        #[test]
        fn terminal_statuses_rejected() {
            let policy = CancellationPolicy::default();
            let mut booking = booking_scheduled_in(10);
            booking.cancel(None, ActorRole::Customer, t(1)).unwrap();

            assert!(matches!(
                policy.can_cancel(&booking, t(2)),
                Err(DomainError::WrongStatus(_))
            ));
            assert!(policy.can_reschedule(&booking, t(2)).is_err());
        }
    }

    mod custom_windows {
        use super::*;

        #[test]
        fn widened_window_changes_nothing_else() {
            let booking = booking_scheduled_in(5);
            let policy = CancellationPolicy::new(3600, 7200);

            // 2h out: allowed under the 1h window.
            assert!(policy.can_cancel(&booking, t(3 * HOUR_MS)).is_ok());
            assert!(policy.can_reschedule(&booking, t(3 * HOUR_MS)).is_err());
        }
    }
}
