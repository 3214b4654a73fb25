//! # Lifecycle Events
//!
//! One event per successful status transition, published fire-and-forget to
//! whatever notifier subscribes. The engine only emits; delivery is an
//! external collaborator's concern.

use crate::domain::value_objects::actor::ActorRole;
use crate::domain::value_objects::booking_status::BookingStatus;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::BookingId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A booking moved (or entered the lifecycle).
///
/// `from_status` is `None` for booking creation, which has no prior status.
///
/// # Examples
///
/// ```
/// use booking_engine::domain::events::LifecycleEvent;
/// use booking_engine::domain::value_objects::{
///     ActorRole, BookingId, BookingStatus, Timestamp,
/// };
///
/// let event = LifecycleEvent::transition(
///     BookingId::new_v4(),
///     BookingStatus::Pending,
///     BookingStatus::Accepted,
///     ActorRole::Customer,
///     Timestamp::from_millis(1_000).unwrap(),
/// );
/// assert_eq!(event.from_status, Some(BookingStatus::Pending));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// The booking that moved.
    pub booking_id: BookingId,
    /// Status before the move; `None` on creation.
    pub from_status: Option<BookingStatus>,
    /// Status after the move.
    pub to_status: BookingStatus,
    /// Who performed the move.
    pub actor: ActorRole,
    /// When the move happened.
    pub at: Timestamp,
}

impl LifecycleEvent {
    /// Creates an event for a genuine status transition.
    #[must_use]
    pub fn transition(
        booking_id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        actor: ActorRole,
        at: Timestamp,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            booking_id,
            from_status: Some(from),
            to_status: to,
            actor,
            at,
        }
    }

    /// Creates an event for a booking entering the lifecycle.
    #[must_use]
    pub fn created(
        booking_id: BookingId,
        initial: BookingStatus,
        actor: ActorRole,
        at: Timestamp,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            booking_id,
            from_status: None,
            to_status: initial,
            actor,
            at,
        }
    }

    /// Returns true for a creation event.
    #[inline]
    #[must_use]
    pub const fn is_creation(&self) -> bool {
        self.from_status.is_none()
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from_status {
            Some(from) => write!(
                f,
                "LifecycleEvent({}: {} -> {} by {})",
                self.booking_id, from, self.to_status, self.actor
            ),
            None => write!(
                f,
                "LifecycleEvent({}: created as {} by {})",
                self.booking_id, self.to_status, self.actor
            ),
        }
    }
}
