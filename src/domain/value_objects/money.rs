//! # Amount Value Object
//!
//! Strictly positive decimal currency value.
//!
//! This module provides the [`Amount`] type, a type-safe wrapper around
//! [`Decimal`] for quote amounts. The engine performs no monetary
//! arithmetic (settlement is an external collaborator), so `Amount` only
//! validates and carries the value.
//!
//! # Examples
//!
//! ```
//! use booking_engine::domain::value_objects::money::Amount;
//!
//! let amount = Amount::new(5000.0).unwrap();
//! assert_eq!(amount.get().to_string(), "5000");
//!
//! assert!(Amount::new(0.0).is_err());
//! assert!(Amount::new(-10.0).is_err());
//! ```

use crate::domain::errors::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated quote amount.
///
/// # Invariants
///
/// - Amount is always > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new amount from an f64 value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAmount`] if the value is not a finite
    /// positive number.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        let decimal = Decimal::try_from(value)
            .map_err(|_| DomainError::InvalidAmount("not a representable number".to_string()))?;
        Self::from_decimal(decimal)
    }

    /// Creates a new amount from a Decimal value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAmount`] if the value is zero or
    /// negative.
    pub fn from_decimal(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount(
                "amount must be positive".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the inner Decimal value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
