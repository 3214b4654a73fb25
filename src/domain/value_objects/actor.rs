//! # Actor Role
//!
//! Which party is requesting an operation.
//!
//! The transport layer resolves a bearer credential to one of these roles
//! before calling into the engine; the engine itself never authenticates.
//! Roles govern which status transitions and sub-protocol operations an
//! actor may perform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The party requesting an operation on a booking.
///
/// # Examples
///
/// ```
/// use booking_engine::domain::value_objects::actor::ActorRole;
///
/// let role = ActorRole::Customer;
/// assert!(!role.is_system());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// The customer who requested the booking.
    Customer,
    /// The worker performing the service.
    Worker,
    /// Trusted automation; authorized on every legal transition.
    System,
}

impl ActorRole {
    /// Returns true for the customer role.
    #[inline]
    #[must_use]
    pub const fn is_customer(&self) -> bool {
        matches!(self, Self::Customer)
    }

    /// Returns true for the worker role.
    #[inline]
    #[must_use]
    pub const fn is_worker(&self) -> bool {
        matches!(self, Self::Worker)
    }

    /// Returns true for the system role.
    #[inline]
    #[must_use]
    pub const fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Customer => "customer",
            Self::Worker => "worker",
            Self::System => "system",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn helpers() {
        assert!(ActorRole::Customer.is_customer());
        assert!(ActorRole::Worker.is_worker());
        assert!(ActorRole::System.is_system());
        assert!(!ActorRole::Customer.is_worker());
    }

    #[test]
    fn display_format() {
        assert_eq!(ActorRole::Customer.to_string(), "customer");
        assert_eq!(ActorRole::Worker.to_string(), "worker");
        assert_eq!(ActorRole::System.to_string(), "system");
    }

    #[test]
    fn serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&ActorRole::Customer).unwrap(),
            "\"customer\""
        );
        let role: ActorRole = serde_json::from_str("\"worker\"").unwrap();
        assert_eq!(role, ActorRole::Worker);
    }
}
