//! # Clock Port
//!
//! Injectable current-time source.
//!
//! All timestamp comparisons in the engine use a single injected clock so
//! that boundary conditions (e.g. exactly two hours before the scheduled
//! time) can be simulated deterministically in tests. Domain functions take
//! a [`Timestamp`] parameter; use cases sample the clock once per call.

use super::timestamp::Timestamp;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}

/// Wall-clock implementation of [`Clock`].
///
/// # Examples
///
/// ```
/// use booking_engine::domain::value_objects::clock::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now.as_millis() > 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Deterministic clock for tests.
///
/// Starts at a fixed instant and only moves when told to.
///
/// # Examples
///
/// ```
/// use booking_engine::domain::value_objects::clock::{Clock, FixedClock};
/// use booking_engine::domain::value_objects::timestamp::Timestamp;
///
/// let t0 = Timestamp::from_millis(1_000).unwrap();
/// let clock = FixedClock::at(t0);
/// assert_eq!(clock.now(), t0);
///
/// clock.advance_secs(60);
/// assert_eq!(clock.now(), t0.add_secs(60));
/// ```
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    #[must_use]
    pub fn at(instant: Timestamp) -> Self {
        Self {
            millis: AtomicI64::new(instant.as_millis()),
        }
    }

    /// Moves the clock to the given instant.
    pub fn set(&self, instant: Timestamp) {
        self.millis.store(instant.as_millis(), Ordering::SeqCst);
    }

    /// Advances the clock by the given number of seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.millis
            .fetch_add(secs.saturating_mul(1000), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.millis.load(Ordering::SeqCst)).unwrap_or(Timestamp::EPOCH)
    }
}
