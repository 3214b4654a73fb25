//! # Use Case Integration Tests
//!
//! Reusable test doubles and workflow tests for the application use cases,
//! exercising the full load → precondition → mutate → save → publish
//! pipeline against the in-memory repository and a deterministic clock.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::dto::booking_dto::{
    CancelBookingRequest, CreateBookingRequest, ProposeQuoteRequest, RescheduleBookingRequest,
    RespondDecision, RespondToBookingRequest, SubmitReviewRequest, WorkProgressRequest,
};
use crate::application::error::ApplicationError;
use crate::application::use_cases::{
    CancelBookingUseCase, CompleteWorkUseCase, LifecycleEventPublisher, ProposeQuoteUseCase,
    RequestBookingUseCase, RescheduleBookingUseCase, RespondToBookingUseCase, StartWorkUseCase,
    SubmitReviewUseCase,
};
use crate::domain::errors::DomainError;
use crate::domain::events::LifecycleEvent;
use crate::domain::policy::cancellation::CancellationPolicy;
use crate::domain::value_objects::actor::ActorRole;
use crate::domain::value_objects::booking_status::BookingStatus;
use crate::domain::value_objects::clock::FixedClock;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::BookingId;
use crate::infrastructure::persistence::in_memory::InMemoryBookingRepository;
use crate::infrastructure::persistence::traits::BookingRepository;

// ============================================================================
// Reusable Test Doubles
// ============================================================================

/// Publisher that records every event it receives.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingEventPublisher {
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl LifecycleEventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: LifecycleEvent) -> Result<(), String> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Publisher that always fails, for fire-and-forget verification.
#[derive(Debug, Default)]
pub struct FailingEventPublisher;

#[async_trait]
impl LifecycleEventPublisher for FailingEventPublisher {
    async fn publish(&self, _event: LifecycleEvent) -> Result<(), String> {
        Err("notifier unavailable".to_string())
    }
}

// ============================================================================
// Harness
// ============================================================================

const T0: i64 = 1_000_000_000;
const HOUR_MS: i64 = 3_600_000;

fn t(millis: i64) -> Timestamp {
    Timestamp::from_millis(millis).unwrap()
}

struct Harness {
    repo: Arc<InMemoryBookingRepository>,
    publisher: Arc<RecordingEventPublisher>,
    clock: Arc<FixedClock>,
    request: RequestBookingUseCase,
    propose: ProposeQuoteUseCase,
    respond: RespondToBookingUseCase,
    start: StartWorkUseCase,
    complete: CompleteWorkUseCase,
    cancel: CancelBookingUseCase,
    reschedule: RescheduleBookingUseCase,
    review: SubmitReviewUseCase,
}

impl Harness {
    fn new() -> Self {
        let repo = Arc::new(InMemoryBookingRepository::new());
        let publisher = Arc::new(RecordingEventPublisher::default());
        let clock = Arc::new(FixedClock::at(t(T0)));
        let policy = CancellationPolicy::default();

        Self {
            request: RequestBookingUseCase::new(
                repo.clone(),
                publisher.clone(),
                clock.clone(),
            ),
            propose: ProposeQuoteUseCase::new(repo.clone(), publisher.clone(), clock.clone()),
            respond: RespondToBookingUseCase::new(
                repo.clone(),
                publisher.clone(),
                clock.clone(),
            ),
            start: StartWorkUseCase::new(repo.clone(), publisher.clone(), clock.clone()),
            complete: CompleteWorkUseCase::new(repo.clone(), publisher.clone(), clock.clone()),
            cancel: CancelBookingUseCase::new(
                repo.clone(),
                publisher.clone(),
                clock.clone(),
                policy,
            ),
            reschedule: RescheduleBookingUseCase::new(repo.clone(), clock.clone(), policy),
            review: SubmitReviewUseCase::new(repo.clone(), clock.clone()),
            repo,
            publisher,
            clock,
        }
    }

    /// Creates a quote-flow booking scheduled `hours` after T0.
    async fn booking_in(&self, hours: i64) -> (BookingId, u64) {
        let response = self
            .request
            .execute(CreateBookingRequest::new(
                "cust-1",
                "work-1",
                T0 + hours * HOUR_MS,
                "Service the boiler",
            ))
            .await
            .unwrap();
        (response.id, response.version)
    }
}

// ============================================================================
// Request Booking
// ============================================================================

#[tokio::test]
async fn request_booking_success() {
    let h = Harness::new();
    let response = h
        .request
        .execute(CreateBookingRequest::new(
            "cust-1",
            "work-1",
            T0 + 24 * HOUR_MS,
            "Service the boiler",
        ))
        .await
        .unwrap();

    assert_eq!(response.status, BookingStatus::QuoteRequested);
    assert_eq!(response.version, 1);
    assert_eq!(h.repo.count().await.unwrap(), 1);

    let events = h.publisher.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_creation());
}

#[tokio::test]
async fn request_booking_direct_enters_pending() {
    let h = Harness::new();
    let response = h
        .request
        .execute(
            CreateBookingRequest::new("cust-1", "work-1", T0 + HOUR_MS, "Mow the lawn").direct(),
        )
        .await
        .unwrap();

    assert_eq!(response.status, BookingStatus::Pending);
}

#[tokio::test]
async fn request_booking_rejects_blank_description() {
    let h = Harness::new();
    let result = h
        .request
        .execute(CreateBookingRequest::new("cust-1", "work-1", T0 + HOUR_MS, "  "))
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(DomainError::MissingDescription))
    ));
    assert_eq!(h.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn request_booking_rejects_past_schedule() {
    let h = Harness::new();
    let result = h
        .request
        .execute(CreateBookingRequest::new(
            "cust-1",
            "work-1",
            T0 - HOUR_MS,
            "Too late",
        ))
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(DomainError::InvalidSchedule(_)))
    ));
}

// ============================================================================
// Full Lifecycle
// ============================================================================

#[tokio::test]
async fn full_lifecycle_to_review() {
    let h = Harness::new();
    let (id, version) = h.booking_in(24).await;

    // Worker proposes; booking moves to pending.
    let response = h
        .propose
        .execute(ProposeQuoteRequest {
            booking_id: id,
            expected_version: version,
            amount: 5000.0,
            details: "Parts and labour".to_string(),
            valid_until_ms: None,
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();
    assert_eq!(response.status, BookingStatus::Pending);
    let quote_id = response.quote.as_ref().unwrap().id;

    // Customer accepts the quote.
    let response = h
        .respond
        .execute(RespondToBookingRequest {
            booking_id: id,
            expected_version: response.version,
            decision: RespondDecision::Accept,
            quote_id: Some(quote_id),
            reason: None,
            actor_role: ActorRole::Customer,
        })
        .await
        .unwrap();
    assert_eq!(response.status, BookingStatus::Accepted);

    // Worker progresses the job.
    let response = h
        .start
        .execute(WorkProgressRequest {
            booking_id: id,
            expected_version: response.version,
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();
    assert_eq!(response.status, BookingStatus::InProgress);

    let response = h
        .complete
        .execute(WorkProgressRequest {
            booking_id: id,
            expected_version: response.version,
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();
    assert_eq!(response.status, BookingStatus::Completed);
    assert!(response.completed_at.is_some());

    // Customer reviews.
    let response = h
        .review
        .execute(SubmitReviewRequest {
            booking_id: id,
            expected_version: response.version,
            reviewer_id: "cust-1".to_string(),
            rating: 5,
            comment: "Spotless".to_string(),
            image_refs: vec![],
        })
        .await
        .unwrap();
    assert_eq!(response.booking.review_ref, Some(response.review.id()));

    // Creation + four transitions were published.
    let events = h.publisher.events();
    assert_eq!(events.len(), 5);
    assert_eq!(events[4].to_status, BookingStatus::Completed);
}

#[tokio::test]
async fn worker_declines_direct_request() {
    let h = Harness::new();
    let response = h
        .request
        .execute(
            CreateBookingRequest::new("cust-1", "work-1", T0 + HOUR_MS, "Mow the lawn").direct(),
        )
        .await
        .unwrap();

    let response = h
        .respond
        .execute(RespondToBookingRequest {
            booking_id: response.id,
            expected_version: response.version,
            decision: RespondDecision::Decline,
            quote_id: None,
            reason: None,
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();

    assert_eq!(response.status, BookingStatus::Declined);
}

#[tokio::test]
async fn accept_without_quote_id_is_rejected() {
    let h = Harness::new();
    let (id, version) = h.booking_in(24).await;

    let result = h
        .respond
        .execute(RespondToBookingRequest {
            booking_id: id,
            expected_version: version,
            decision: RespondDecision::Accept,
            quote_id: None,
            reason: None,
            actor_role: ActorRole::Customer,
        })
        .await;

    assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
}

#[tokio::test]
async fn expired_quote_cannot_be_accepted() {
    let h = Harness::new();
    let (id, version) = h.booking_in(24).await;

    let response = h
        .propose
        .execute(ProposeQuoteRequest {
            booking_id: id,
            expected_version: version,
            amount: 5000.0,
            details: "Valid for one hour".to_string(),
            valid_until_ms: Some(T0 + HOUR_MS),
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();
    let quote_id = response.quote.as_ref().unwrap().id;

    // Two hours pass.
    h.clock.advance_secs(2 * 3600);

    let result = h
        .respond
        .execute(RespondToBookingRequest {
            booking_id: id,
            expected_version: response.version,
            decision: RespondDecision::Accept,
            quote_id: Some(quote_id),
            reason: None,
            actor_role: ActorRole::Customer,
        })
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(DomainError::QuoteExpired(_)))
    ));

    // The stored booking is untouched.
    let stored = h.repo.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), BookingStatus::Pending);
    assert_eq!(stored.version(), response.version);
}

// ============================================================================
// Optimistic Concurrency
// ============================================================================

#[tokio::test]
async fn stale_version_is_rejected_and_state_unchanged() {
    let h = Harness::new();
    let (id, version) = h.booking_in(24).await;

    let result = h
        .propose
        .execute(ProposeQuoteRequest {
            booking_id: id,
            expected_version: version + 1,
            amount: 5000.0,
            details: String::new(),
            valid_until_ms: None,
            actor_role: ActorRole::Worker,
        })
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::StaleState {
            expected: 2,
            actual: 1,
        })
    ));

    let stored = h.repo.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.version(), version);
    assert!(stored.quotes().is_empty());
}

#[tokio::test]
async fn racing_cancel_and_accept_have_one_winner() {
    let h = Harness::new();
    let (id, version) = h.booking_in(24).await;

    let response = h
        .propose
        .execute(ProposeQuoteRequest {
            booking_id: id,
            expected_version: version,
            amount: 5000.0,
            details: String::new(),
            valid_until_ms: None,
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();
    let quote_id = response.quote.as_ref().unwrap().id;
    let snapshot_version = response.version;

    // Customer cancels first, based on the shared snapshot.
    h.cancel
        .execute(CancelBookingRequest {
            booking_id: id,
            expected_version: snapshot_version,
            reason: Some("found someone closer".to_string()),
            actor_role: ActorRole::Customer,
        })
        .await
        .unwrap();

    // The accept racing on the same snapshot must lose with StaleState,
    // not resurrect the booking.
    let result = h
        .respond
        .execute(RespondToBookingRequest {
            booking_id: id,
            expected_version: snapshot_version,
            decision: RespondDecision::Accept,
            quote_id: Some(quote_id),
            reason: None,
            actor_role: ActorRole::Customer,
        })
        .await;

    assert!(matches!(result, Err(ApplicationError::StaleState { .. })));

    let stored = h.repo.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), BookingStatus::Cancelled);
}

// ============================================================================
// Cancellation & Reschedule Windows
// ============================================================================

#[tokio::test]
async fn cancel_inside_window_is_rejected() {
    let h = Harness::new();
    let (id, version) = h.booking_in(5).await;

    // Move to exactly two hours before the schedule.
    h.clock.set(t(T0 + 3 * HOUR_MS));

    let result = h
        .cancel
        .execute(CancelBookingRequest {
            booking_id: id,
            expected_version: version,
            reason: None,
            actor_role: ActorRole::Customer,
        })
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(
            DomainError::TooCloseToSchedule { .. }
        ))
    ));
}

#[tokio::test]
async fn cancel_just_outside_window_succeeds() {
    let h = Harness::new();
    let (id, version) = h.booking_in(5).await;

    // 2h01m of lead remaining.
    h.clock.set(t(T0 + 3 * HOUR_MS - 60_000));

    let response = h
        .cancel
        .execute(CancelBookingRequest {
            booking_id: id,
            expected_version: version,
            reason: None,
            actor_role: ActorRole::Customer,
        })
        .await
        .unwrap();

    assert_eq!(response.status, BookingStatus::Cancelled);
    assert_eq!(response.cancelled_at, Some(t(T0 + 3 * HOUR_MS - 60_000)));
}

#[tokio::test]
async fn reschedule_requires_stricter_window() {
    let h = Harness::new();
    let (id, version) = h.booking_in(5).await;

    // Three hours out: inside the 4h reschedule window.
    h.clock.set(t(T0 + 2 * HOUR_MS));

    let result = h
        .reschedule
        .execute(RescheduleBookingRequest {
            booking_id: id,
            expected_version: version,
            new_scheduled_at_ms: T0 + 48 * HOUR_MS,
            actor_role: ActorRole::Customer,
        })
        .await;
    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(
            DomainError::TooCloseToSchedule { .. }
        ))
    ));

    // Rewind to five hours out: allowed, status unchanged.
    h.clock.set(t(T0));
    let response = h
        .reschedule
        .execute(RescheduleBookingRequest {
            booking_id: id,
            expected_version: version,
            new_scheduled_at_ms: T0 + 48 * HOUR_MS,
            actor_role: ActorRole::Customer,
        })
        .await
        .unwrap();

    assert_eq!(response.status, BookingStatus::QuoteRequested);
    assert_eq!(response.scheduled_at, t(T0 + 48 * HOUR_MS));
}

// ============================================================================
// Review Gate
// ============================================================================

#[tokio::test]
async fn duplicate_review_is_rejected() {
    let h = Harness::new();
    let (id, version) = h.booking_in(24).await;

    // Drive to completed via the system actor for brevity.
    let response = h
        .propose
        .execute(ProposeQuoteRequest {
            booking_id: id,
            expected_version: version,
            amount: 100.0,
            details: String::new(),
            valid_until_ms: None,
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();
    let quote_id = response.quote.as_ref().unwrap().id;
    let response = h
        .respond
        .execute(RespondToBookingRequest {
            booking_id: id,
            expected_version: response.version,
            decision: RespondDecision::Accept,
            quote_id: Some(quote_id),
            reason: None,
            actor_role: ActorRole::Customer,
        })
        .await
        .unwrap();
    let response = h
        .start
        .execute(WorkProgressRequest {
            booking_id: id,
            expected_version: response.version,
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();
    let response = h
        .complete
        .execute(WorkProgressRequest {
            booking_id: id,
            expected_version: response.version,
            actor_role: ActorRole::Worker,
        })
        .await
        .unwrap();

    let first = h
        .review
        .execute(SubmitReviewRequest {
            booking_id: id,
            expected_version: response.version,
            reviewer_id: "cust-1".to_string(),
            rating: 4,
            comment: "Solid".to_string(),
            image_refs: vec![],
        })
        .await
        .unwrap();

    // A second attempt against the fresh version still fails: the gate,
    // not the version check, rejects it.
    let second = h
        .review
        .execute(SubmitReviewRequest {
            booking_id: id,
            expected_version: first.booking.version,
            reviewer_id: "cust-1".to_string(),
            rating: 1,
            comment: "Changed my mind".to_string(),
            image_refs: vec![],
        })
        .await;

    assert!(matches!(
        second,
        Err(ApplicationError::DomainError(DomainError::AlreadyReviewed(_)))
    ));
}

#[tokio::test]
async fn foreign_reviewer_is_forbidden() {
    let h = Harness::new();
    let (id, version) = h.booking_in(24).await;

    let result = h
        .review
        .execute(SubmitReviewRequest {
            booking_id: id,
            expected_version: version,
            reviewer_id: "cust-1".to_string(),
            rating: 5,
            comment: String::new(),
            image_refs: vec![],
        })
        .await;

    // Still quote_requested: gate rejects with NotCompleted first.
    assert!(matches!(
        result,
        Err(ApplicationError::DomainError(DomainError::NotCompleted(_)))
    ));
}

// ============================================================================
// Fire-and-Forget Publishing
// ============================================================================

#[tokio::test]
async fn publisher_failure_does_not_fail_the_operation() {
    let repo = Arc::new(InMemoryBookingRepository::new());
    let clock = Arc::new(FixedClock::at(t(T0)));
    let use_case = RequestBookingUseCase::new(
        repo.clone(),
        Arc::new(FailingEventPublisher),
        clock,
    );

    let response = use_case
        .execute(CreateBookingRequest::new(
            "cust-1",
            "work-1",
            T0 + HOUR_MS,
            "Fit a new lock",
        ))
        .await
        .unwrap();

    assert_eq!(response.status, BookingStatus::QuoteRequested);
    assert_eq!(repo.count().await.unwrap(), 1);
}
