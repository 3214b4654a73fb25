//! # REST API
//!
//! axum handlers and routes for booking lifecycle operations.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
