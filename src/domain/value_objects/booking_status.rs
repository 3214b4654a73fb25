//! # Booking Status
//!
//! Booking lifecycle state machine.
//!
//! This module is the single source of truth for which status transitions
//! are legal and which actor roles may perform them, independent of *why* a
//! transition is requested. Sub-protocols (quote negotiation, cancellation
//! policy, review gate) layer their own rules on top.
//!
//! # State Machine
//!
//! ```text
//! quote_requested → pending → accepted → in_progress → completed
//!        |             |          |            |
//!        ├── declined ←┘          |            |
//!        └── cancelled ←──────────┴────────────┘
//! ```
//!
//! # Examples
//!
//! ```
//! use booking_engine::domain::value_objects::booking_status::BookingStatus;
//!
//! let status = BookingStatus::Pending;
//! assert!(status.can_transition_to(BookingStatus::Accepted));
//! assert!(!status.can_transition_to(BookingStatus::Completed));
//! ```

use super::actor::ActorRole;
use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking lifecycle status.
///
/// Represents the current status of a booking. Transitions are enforced via
/// [`transition`] and queried via
/// [`can_transition_to`](BookingStatus::can_transition_to).
///
/// # Terminal Statuses
///
/// The following statuses are terminal (no further transitions allowed):
/// - [`Completed`](BookingStatus::Completed) - Work finished
/// - [`Cancelled`](BookingStatus::Cancelled) - Called off by either party
/// - [`Declined`](BookingStatus::Declined) - Request or quote turned down
///
/// # Examples
///
/// ```
/// use booking_engine::domain::value_objects::booking_status::BookingStatus;
///
/// let status = BookingStatus::InProgress;
/// assert!(!status.is_terminal());
///
/// let terminal = BookingStatus::Completed;
/// assert!(terminal.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BookingStatus {
    /// Customer has asked for a price; no quote proposed yet.
    #[default]
    QuoteRequested = 0,

    /// Awaiting a decision (a quote is outstanding, or the worker has not
    /// yet responded to a direct request).
    Pending = 1,

    /// Both parties agreed; work not yet started.
    Accepted = 2,

    /// Worker has started the job.
    InProgress = 3,

    /// Work finished (terminal).
    Completed = 4,

    /// Called off by either party (terminal).
    Cancelled = 5,

    /// Request or quote turned down (terminal).
    Declined = 6,
}

impl BookingStatus {
    /// Returns true if this is a terminal status.
    ///
    /// Terminal statuses cannot transition to any other status.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_engine::domain::value_objects::booking_status::BookingStatus;
    ///
    /// assert!(!BookingStatus::Pending.is_terminal());
    /// assert!(BookingStatus::Completed.is_terminal());
    /// assert!(BookingStatus::Cancelled.is_terminal());
    /// assert!(BookingStatus::Declined.is_terminal());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Declined)
    }

    /// Returns true if this is an active (non-terminal) status.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if this status can transition to the target status.
    ///
    /// Enforces the booking state machine rules:
    /// - QuoteRequested → Pending, Accepted, Declined, Cancelled
    /// - Pending → Accepted, Declined, Cancelled
    /// - Accepted → InProgress, Cancelled
    /// - InProgress → Completed, Cancelled
    /// - Terminal statuses → (none)
    ///
    /// # Arguments
    ///
    /// * `target` - The target status to transition to
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_engine::domain::value_objects::booking_status::BookingStatus;
    ///
    /// // Valid transition
    /// assert!(BookingStatus::Accepted.can_transition_to(BookingStatus::InProgress));
    ///
    /// // Invalid transition (skipping states)
    /// assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
    ///
    /// // Terminal statuses cannot transition
    /// assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Pending));
    /// ```
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            // From QuoteRequested
            (Self::QuoteRequested, Self::Pending)
                | (Self::QuoteRequested, Self::Accepted)
                | (Self::QuoteRequested, Self::Declined)
                | (Self::QuoteRequested, Self::Cancelled)
                // From Pending
                | (Self::Pending, Self::Accepted)
                | (Self::Pending, Self::Declined)
                | (Self::Pending, Self::Cancelled)
                // From Accepted
                | (Self::Accepted, Self::InProgress)
                | (Self::Accepted, Self::Cancelled)
                // From InProgress
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Cancelled)
        )
    }

    /// Returns the valid next statuses from this status.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_engine::domain::value_objects::booking_status::BookingStatus;
    ///
    /// let targets = BookingStatus::Pending.allowed_transitions();
    /// assert!(targets.contains(&BookingStatus::Accepted));
    /// assert!(!targets.contains(&BookingStatus::Completed));
    /// ```
    #[must_use]
    pub fn allowed_transitions(&self) -> Vec<Self> {
        match self {
            Self::QuoteRequested => vec![
                Self::Pending,
                Self::Accepted,
                Self::Declined,
                Self::Cancelled,
            ],
            Self::Pending => vec![Self::Accepted, Self::Declined, Self::Cancelled],
            Self::Accepted => vec![Self::InProgress, Self::Cancelled],
            Self::InProgress => vec![Self::Completed, Self::Cancelled],
            // Terminal statuses have no valid transitions
            Self::Completed | Self::Cancelled | Self::Declined => vec![],
        }
    }

    /// Returns every status value.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::QuoteRequested,
            Self::Pending,
            Self::Accepted,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
            Self::Declined,
        ]
    }

    /// Human-readable label for display surfaces.
    ///
    /// The single canonical status-to-presentation derivation; callers must
    /// not maintain their own lookup tables.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::QuoteRequested => "Quote requested",
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Declined => "Declined",
        }
    }

    /// Wire representation, matching the serde encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QuoteRequested => "quote_requested",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Declined => "declined",
        }
    }

    /// Returns the numeric value of this status.
    #[inline]
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for BookingStatus {
    type Error = InvalidBookingStatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::QuoteRequested),
            1 => Ok(Self::Pending),
            2 => Ok(Self::Accepted),
            3 => Ok(Self::InProgress),
            4 => Ok(Self::Completed),
            5 => Ok(Self::Cancelled),
            6 => Ok(Self::Declined),
            _ => Err(InvalidBookingStatusError(value)),
        }
    }
}

/// Error returned when converting an invalid u8 to BookingStatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBookingStatusError(pub u8);

impl fmt::Display for InvalidBookingStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid booking status value: {}", self.0)
    }
}

impl std::error::Error for InvalidBookingStatusError {}

/// Lifecycle timestamp field stamped by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampField {
    /// `completed_at` is stamped when entering `completed`.
    CompletedAt,
    /// `cancelled_at` is stamped when entering `cancelled`.
    CancelledAt,
}

/// Outcome of a successful transition check.
///
/// Carries the new status and which lifecycle timestamp, if any, the caller
/// must stamp with the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The status to move to.
    pub to: BookingStatus,
    /// The timestamp field to stamp, if the target status has one.
    pub stamp: Option<StampField>,
}

/// Validates a proposed status transition.
///
/// Pure function of `(current, requested, actor)` with no side effects.
/// Legality is checked first, then actor authorization for the edge.
///
/// Edge authorization is the union of the flows that traverse an edge; the
/// sub-protocols impose stricter per-flow rules (e.g. only a customer may
/// accept a quote). [`ActorRole::System`] is authorized on every legal edge.
///
/// # Errors
///
/// - [`DomainError::IllegalTransition`] if `requested` is not reachable from
///   `current`
/// - [`DomainError::UnauthorizedActor`] if `actor` is not permitted on that
///   edge
///
/// # Examples
///
/// ```
/// use booking_engine::domain::value_objects::actor::ActorRole;
/// use booking_engine::domain::value_objects::booking_status::{
///     transition, BookingStatus, StampField,
/// };
///
/// let t = transition(
///     BookingStatus::InProgress,
///     BookingStatus::Completed,
///     ActorRole::Worker,
/// )
/// .unwrap();
/// assert_eq!(t.to, BookingStatus::Completed);
/// assert_eq!(t.stamp, Some(StampField::CompletedAt));
///
/// assert!(transition(
///     BookingStatus::InProgress,
///     BookingStatus::Completed,
///     ActorRole::Customer,
/// )
/// .is_err());
/// ```
pub fn transition(
    current: BookingStatus,
    requested: BookingStatus,
    actor: ActorRole,
) -> Result<Transition, DomainError> {
    if !current.can_transition_to(requested) {
        return Err(DomainError::IllegalTransition {
            from: current,
            to: requested,
        });
    }

    if !actor_allowed(current, requested, actor) {
        return Err(DomainError::UnauthorizedActor {
            actor,
            from: current,
            to: requested,
        });
    }

    let stamp = match requested {
        BookingStatus::Completed => Some(StampField::CompletedAt),
        BookingStatus::Cancelled => Some(StampField::CancelledAt),
        _ => None,
    };

    Ok(Transition {
        to: requested,
        stamp,
    })
}

/// Role authorization per edge. Callers must have checked legality first.
const fn actor_allowed(current: BookingStatus, requested: BookingStatus, actor: ActorRole) -> bool {
    use BookingStatus::*;

    if actor.is_system() {
        return true;
    }

    match (current, requested) {
        // Proposing the first quote moves the booking to pending.
        (QuoteRequested, Pending) => actor.is_worker(),
        // Accepting a quote straight from quote_requested is customer-driven.
        (QuoteRequested, Accepted) => actor.is_customer(),
        // Either party may close out the negotiation phase.
        (QuoteRequested, Declined | Cancelled) => true,
        (Pending, Accepted | Declined | Cancelled) => true,
        // Only the worker progresses the job.
        (Accepted, InProgress) => actor.is_worker(),
        (InProgress, Completed) => actor.is_worker(),
        // Either party may cancel an agreed or running job.
        (Accepted | InProgress, Cancelled) => true,
        _ => false,
    }
}
