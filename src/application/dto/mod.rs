//! # Data Transfer Objects
//!
//! Request and response shapes for the application layer.

pub mod booking_dto;

pub use booking_dto::{
    BookingResponse, CancelBookingRequest, CreateBookingRequest, ProposeQuoteRequest, QuoteView,
    RescheduleBookingRequest, RespondDecision, RespondToBookingRequest, SubmitReviewRequest,
    SubmitReviewResponse, WorkProgressRequest,
};
