//! # Domain Events
//!
//! Events emitted on successful lifecycle transitions, consumed by the
//! notification collaborator.

pub mod lifecycle;

pub use lifecycle::LifecycleEvent;
