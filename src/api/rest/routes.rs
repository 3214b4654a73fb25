//! # REST Routes
//!
//! Route definitions for the REST API.
//!
//! # Route Structure
//!
//! ```text
//! /api/v1
//! ├── /health                      GET  - Health check
//! └── /bookings                    GET  - List bookings
//!     ├── /                        POST - Create booking
//!     └── /{id}                    GET  - Get booking by ID
//!         ├── /quote               POST - Propose a quote
//!         ├── /respond             POST - Accept/decline
//!         ├── /start               POST - Start work
//!         ├── /complete            POST - Complete work
//!         ├── /cancel              POST - Cancel
//!         ├── /reschedule          POST - Reschedule
//!         └── /review              POST - Submit review
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use booking_engine::api::rest::{create_router, AppState};
//!
//! let state = Arc::new(AppState::new(/* collaborators */));
//! let router = create_router(state);
//! axum::serve(listener, router).await?;
//! ```

use crate::api::rest::handlers::{
    cancel_booking, complete_work, create_booking, get_booking, health_check, list_bookings,
    propose_quote, reschedule_booking, respond_to_booking, start_work, submit_review, AppState,
};
use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Creates the REST API router with all endpoints.
///
/// # Arguments
///
/// * `state` - Shared application state containing the use cases
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    let booking_routes = Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/{id}", get(get_booking))
        .route("/{id}/quote", post(propose_quote))
        .route("/{id}/respond", post(respond_to_booking))
        .route("/{id}/start", post(start_work))
        .route("/{id}/complete", post(complete_work))
        .route("/{id}/cancel", post(cancel_booking))
        .route("/{id}/reschedule", post(reschedule_booking))
        .route("/{id}/review", post(submit_review));

    let api = Router::new()
        .route("/health", get(health_check))
        .nest("/bookings", booking_routes);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
