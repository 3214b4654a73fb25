//! # Booking Engine
//!
//! Main entry point for the booking lifecycle service.

use booking_engine::api::rest::{create_router, AppState};
use booking_engine::config::{AppConfig, LogFormat};
use booking_engine::domain::value_objects::clock::SystemClock;
use booking_engine::infrastructure::notify::TracingEventPublisher;
use booking_engine::infrastructure::persistence::in_memory::InMemoryBookingRepository;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    info!(
        service = %config.service_name,
        "Starting booking engine v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = Arc::new(AppState::new(
        Arc::new(InMemoryBookingRepository::new()),
        Arc::new(TracingEventPublisher::new()),
        Arc::new(SystemClock),
        config.policy.to_policy(),
    ));
    let router = create_router(state);

    let addr = config.rest.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "REST server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down booking engine");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level));

    match config.log.format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).pretty().init(),
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
