//! # Application Layer
//!
//! Use case orchestration over the domain core.
//!
//! This layer coordinates domain objects to perform the engine's external
//! operations, handling version preconditions, persistence, and event
//! publishing. One use case per operation:
//!
//! - [`RequestBookingUseCase`]: create a booking
//! - [`ProposeQuoteUseCase`]: worker proposes a quote
//! - [`RespondToBookingUseCase`]: accept/decline a quote or a direct request
//! - [`StartWorkUseCase`] / [`CompleteWorkUseCase`]: work progress
//! - [`CancelBookingUseCase`] / [`RescheduleBookingUseCase`]: time-windowed
//!   changes
//! - [`SubmitReviewUseCase`]: attach a review to a completed booking

pub mod dto;
pub mod error;
pub mod use_cases;

pub use dto::{
    BookingResponse, CancelBookingRequest, CreateBookingRequest, ProposeQuoteRequest,
    QuoteView, RescheduleBookingRequest, RespondDecision, RespondToBookingRequest,
    SubmitReviewRequest, SubmitReviewResponse, WorkProgressRequest,
};
pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::{
    CancelBookingUseCase, CompleteWorkUseCase, LifecycleEventPublisher, ProposeQuoteUseCase,
    RequestBookingUseCase, RescheduleBookingUseCase, RespondToBookingUseCase, StartWorkUseCase,
    SubmitReviewUseCase,
};
