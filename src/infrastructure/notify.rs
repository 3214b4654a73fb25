//! # Notification Adapter
//!
//! Fire-and-forget lifecycle event publishing.
//!
//! The default adapter emits each event as a structured log line; a real
//! deployment replaces it with a push/queue-backed implementation of the
//! same port. Delivery failures never propagate into the lifecycle
//! operation that produced the event.

use crate::application::use_cases::LifecycleEventPublisher;
use crate::domain::events::LifecycleEvent;
use async_trait::async_trait;
use tracing::info;

/// Publishes lifecycle events as structured log lines.
///
/// # Examples
///
/// ```
/// use booking_engine::infrastructure::notify::TracingEventPublisher;
///
/// let publisher = TracingEventPublisher::new();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    /// Creates a new tracing-backed publisher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LifecycleEventPublisher for TracingEventPublisher {
    async fn publish(&self, event: LifecycleEvent) -> Result<(), String> {
        info!(
            event_id = %event.event_id,
            booking_id = %event.booking_id,
            from = ?event.from_status,
            to = %event.to_status,
            actor = %event.actor,
            at = %event.at,
            "lifecycle event"
        );
        Ok(())
    }
}
