//! # Booking Lifecycle Engine
//!
//! Lifecycle engine for service-marketplace bookings between a customer and
//! a worker: quote negotiation, time-windowed cancellation and reschedule
//! rules, and review eligibility, built around a single canonical status
//! state machine.
//!
//! ## Architecture
//!
//! This crate follows Domain-Driven Design with a layered architecture:
//!
//! - **Domain Layer** (`domain`): Core business logic, entities, value
//!   objects, policy evaluators, and domain events
//! - **Application Layer** (`application`): Use cases, DTOs, and orchestration
//! - **Infrastructure Layer** (`infrastructure`): Repository and notification
//!   adapters
//! - **API Layer** (`api`): REST interface
//!
//! ## Example
//!
//! ```rust,ignore
//! use booking_engine::application::dto::CreateBookingRequest;
//! use booking_engine::application::use_cases::RequestBookingUseCase;
//!
//! let request = CreateBookingRequest::new("cust-1", "work-1", scheduled_at, "Fix the sink");
//! let response = RequestBookingUseCase::new(/* dependencies */)
//!     .execute(request)
//!     .await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
