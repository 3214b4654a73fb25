//! # Domain Errors
//!
//! Typed domain error definitions with numeric error codes.

pub mod domain_error;

pub use domain_error::{DomainError, DomainResult};
