//! # REST Handlers
//!
//! Request handlers for REST endpoints.
//!
//! # Endpoints
//!
//! ## Bookings
//! - `GET /api/v1/bookings` - List bookings with filtering
//! - `GET /api/v1/bookings/{id}` - Get booking by ID
//! - `POST /api/v1/bookings` - Create booking
//! - `POST /api/v1/bookings/{id}/quote` - Propose a quote
//! - `POST /api/v1/bookings/{id}/respond` - Accept/decline
//! - `POST /api/v1/bookings/{id}/start` - Start work
//! - `POST /api/v1/bookings/{id}/complete` - Complete work
//! - `POST /api/v1/bookings/{id}/cancel` - Cancel
//! - `POST /api/v1/bookings/{id}/reschedule` - Reschedule
//! - `POST /api/v1/bookings/{id}/review` - Submit review
//!
//! Request bodies carry the caller's `expected_version`; a stale snapshot
//! is rejected with `409 STALE_STATE` and the caller must re-fetch.

use crate::application::dto::booking_dto::{
    BookingResponse, CancelBookingRequest, CreateBookingRequest, ProposeQuoteRequest,
    RescheduleBookingRequest, RespondDecision, RespondToBookingRequest, SubmitReviewRequest,
    SubmitReviewResponse, WorkProgressRequest,
};
use crate::application::error::ApplicationError;
use crate::application::use_cases::{
    CancelBookingUseCase, CompleteWorkUseCase, LifecycleEventPublisher, ProposeQuoteUseCase,
    RequestBookingUseCase, RescheduleBookingUseCase, RespondToBookingUseCase, StartWorkUseCase,
    SubmitReviewUseCase,
};
use crate::domain::errors::DomainError;
use crate::domain::policy::cancellation::CancellationPolicy;
use crate::domain::value_objects::actor::ActorRole;
use crate::domain::value_objects::clock::Clock;
use crate::domain::value_objects::{BookingId, CustomerId, QuoteId, WorkerId};
use crate::infrastructure::persistence::traits::BookingRepository;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for REST handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Create-booking use case.
    pub request_booking: Arc<RequestBookingUseCase>,
    /// Propose-quote use case.
    pub propose_quote: Arc<ProposeQuoteUseCase>,
    /// Respond-to-booking use case.
    pub respond_to_booking: Arc<RespondToBookingUseCase>,
    /// Start-work use case.
    pub start_work: Arc<StartWorkUseCase>,
    /// Complete-work use case.
    pub complete_work: Arc<CompleteWorkUseCase>,
    /// Cancel-booking use case.
    pub cancel_booking: Arc<CancelBookingUseCase>,
    /// Reschedule-booking use case.
    pub reschedule_booking: Arc<RescheduleBookingUseCase>,
    /// Submit-review use case.
    pub submit_review: Arc<SubmitReviewUseCase>,
    /// Booking repository, for read endpoints.
    pub booking_repository: Arc<dyn BookingRepository>,
}

impl AppState {
    /// Wires every use case over the given collaborators.
    #[must_use]
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        event_publisher: Arc<dyn LifecycleEventPublisher>,
        clock: Arc<dyn Clock>,
        policy: CancellationPolicy,
    ) -> Self {
        Self {
            request_booking: Arc::new(RequestBookingUseCase::new(
                booking_repository.clone(),
                event_publisher.clone(),
                clock.clone(),
            )),
            propose_quote: Arc::new(ProposeQuoteUseCase::new(
                booking_repository.clone(),
                event_publisher.clone(),
                clock.clone(),
            )),
            respond_to_booking: Arc::new(RespondToBookingUseCase::new(
                booking_repository.clone(),
                event_publisher.clone(),
                clock.clone(),
            )),
            start_work: Arc::new(StartWorkUseCase::new(
                booking_repository.clone(),
                event_publisher.clone(),
                clock.clone(),
            )),
            complete_work: Arc::new(CompleteWorkUseCase::new(
                booking_repository.clone(),
                event_publisher.clone(),
                clock.clone(),
            )),
            cancel_booking: Arc::new(CancelBookingUseCase::new(
                booking_repository.clone(),
                event_publisher,
                clock.clone(),
                policy,
            )),
            reschedule_booking: Arc::new(RescheduleBookingUseCase::new(
                booking_repository.clone(),
                clock.clone(),
                policy,
            )),
            submit_review: Arc::new(SubmitReviewUseCase::new(booking_repository.clone(), clock)),
            booking_repository,
        }
    }
}

// ============================================================================
// Error Response
// ============================================================================

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<ApplicationError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: ApplicationError) -> Self {
        let (status, code) = match &err {
            ApplicationError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApplicationError::BookingNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApplicationError::StaleState { .. } => (StatusCode::CONFLICT, "STALE_STATE"),
            ApplicationError::DomainError(domain) => match domain {
                DomainError::QuoteNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                DomainError::UnauthorizedActor { .. } | DomainError::Forbidden(_) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN")
                }
                DomainError::TooCloseToSchedule { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "TOO_CLOSE_TO_SCHEDULE")
                }
                DomainError::IllegalTransition { .. }
                | DomainError::WrongStatus(_)
                | DomainError::QuoteExpired(_)
                | DomainError::QuoteAlreadyProposed(_)
                | DomainError::AlreadyReviewed(_)
                | DomainError::NotCompleted(_) => (StatusCode::CONFLICT, "CONFLICT"),
                _ => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            },
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        (status, Json(ErrorResponse::new(code, err.to_string())))
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Request Bodies
// ============================================================================

/// Body for proposing a quote; the booking id comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposeQuoteBody {
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Proposed price.
    pub amount: f64,
    /// Free-text terms.
    pub details: String,
    /// Optional validity deadline, epoch milliseconds.
    pub valid_until_ms: Option<i64>,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Body for responding to a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondBody {
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Accept or decline.
    pub decision: RespondDecision,
    /// The quote being accepted/declined. Required for `accept`.
    pub quote_id: Option<QuoteId>,
    /// Optional decline reason.
    pub reason: Option<String>,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Body for start/complete work.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkProgressBody {
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Body for cancelling a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelBody {
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Optional cancellation reason.
    pub reason: Option<String>,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Body for rescheduling a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleBody {
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// New service time, epoch milliseconds.
    pub new_scheduled_at_ms: i64,
    /// Requesting actor role.
    pub actor_role: ActorRole,
}

/// Body for submitting a review.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewBody {
    /// Version the caller's snapshot was read at.
    pub expected_version: u64,
    /// Reviewing customer; must be the booking's own customer.
    pub reviewer_id: String,
    /// Star rating, 1..=5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// References to uploaded images, if any.
    #[serde(default)]
    pub image_refs: Vec<String>,
}

/// Query parameters for listing bookings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListBookingsParams {
    /// Filter by customer.
    pub customer_id: Option<String>,
    /// Filter by worker.
    pub worker_id: Option<String>,
    /// When true, return only non-terminal bookings.
    #[serde(default)]
    pub active: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when reachable.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// `GET /api/v1/health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /api/v1/bookings`
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), HandlerError> {
    let response = state.request_booking.execute(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/v1/bookings/{id}`
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let booking_id = BookingId::new(id);
    let booking = state
        .booking_repository
        .get(&booking_id)
        .await
        .map_err(ApplicationError::from)?
        .ok_or_else(|| ApplicationError::booking_not_found(booking_id.to_string()))?;
    Ok(Json(BookingResponse::from(&booking)))
}

/// `GET /api/v1/bookings`
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListBookingsParams>,
) -> Result<Json<Vec<BookingResponse>>, HandlerError> {
    let bookings = if let Some(customer) = &params.customer_id {
        state
            .booking_repository
            .find_by_customer(&CustomerId::new(customer))
            .await
    } else if let Some(worker) = &params.worker_id {
        state
            .booking_repository
            .find_by_worker(&WorkerId::new(worker))
            .await
    } else {
        state.booking_repository.find_active().await
    }
    .map_err(ApplicationError::from)?;

    let responses: Vec<BookingResponse> = bookings
        .iter()
        .filter(|b| !params.active || b.status().is_active())
        .map(BookingResponse::from)
        .collect();
    Ok(Json(responses))
}

/// `POST /api/v1/bookings/{id}/quote`
pub async fn propose_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<ProposeQuoteBody>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let response = state
        .propose_quote
        .execute(ProposeQuoteRequest {
            booking_id: BookingId::new(id),
            expected_version: body.expected_version,
            amount: body.amount,
            details: body.details,
            valid_until_ms: body.valid_until_ms,
            actor_role: body.actor_role,
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/v1/bookings/{id}/respond`
pub async fn respond_to_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<RespondBody>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let response = state
        .respond_to_booking
        .execute(RespondToBookingRequest {
            booking_id: BookingId::new(id),
            expected_version: body.expected_version,
            decision: body.decision,
            quote_id: body.quote_id,
            reason: body.reason,
            actor_role: body.actor_role,
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/v1/bookings/{id}/start`
pub async fn start_work(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<WorkProgressBody>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let response = state
        .start_work
        .execute(WorkProgressRequest {
            booking_id: BookingId::new(id),
            expected_version: body.expected_version,
            actor_role: body.actor_role,
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/v1/bookings/{id}/complete`
pub async fn complete_work(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<WorkProgressBody>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let response = state
        .complete_work
        .execute(WorkProgressRequest {
            booking_id: BookingId::new(id),
            expected_version: body.expected_version,
            actor_role: body.actor_role,
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/v1/bookings/{id}/cancel`
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<CancelBody>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let response = state
        .cancel_booking
        .execute(CancelBookingRequest {
            booking_id: BookingId::new(id),
            expected_version: body.expected_version,
            reason: body.reason,
            actor_role: body.actor_role,
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/v1/bookings/{id}/reschedule`
pub async fn reschedule_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<RescheduleBody>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let response = state
        .reschedule_booking
        .execute(RescheduleBookingRequest {
            booking_id: BookingId::new(id),
            expected_version: body.expected_version,
            new_scheduled_at_ms: body.new_scheduled_at_ms,
            actor_role: body.actor_role,
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/v1/bookings/{id}/review`
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<ReviewBody>,
) -> Result<(StatusCode, Json<SubmitReviewResponse>), HandlerError> {
    let response = state
        .submit_review
        .execute(SubmitReviewRequest {
            booking_id: BookingId::new(id),
            expected_version: body.expected_version,
            reviewer_id: body.reviewer_id,
            rating: body.rating,
            comment: body.comment,
            image_refs: body.image_refs,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}
