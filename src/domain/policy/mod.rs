//! # Policy Layer
//!
//! Business rules layered on top of the status state machine.
//!
//! The state machine answers "is this transition legal and is this actor
//! allowed on the edge"; policies answer the *when* and *who-exactly*
//! questions that sit above it:
//!
//! - [`cancellation`]: time-windowed cancellation/reschedule eligibility
//! - [`review`]: review eligibility gate for completed bookings
//!
//! A caller must pass both layers: widening a time window never requires
//! touching transition legality.

pub mod cancellation;
pub mod review;

pub use cancellation::CancellationPolicy;
