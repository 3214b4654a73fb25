//! # Infrastructure Layer
//!
//! Adapters implementing the engine's outward-facing ports.
//!
//! ## Persistence
//!
//! Repository port and implementations:
//! - In-memory repository with optimistic version checking
//!
//! ## Notifications
//!
//! Fire-and-forget lifecycle event publishing backed by structured logging.

pub mod notify;
pub mod persistence;

pub use persistence as repos;
