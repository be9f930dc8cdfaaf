//! Session clocks.
//!
//! The simulation only ever asks "how long since the session started". Play
//! uses the monotonic system clock; tests and benches drive a manual clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic elapsed time since session start.
pub trait SessionClock {
    fn elapsed(&self) -> Duration;
}

/// Wall-clock backed session clock.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    /// Start counting from now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl SessionClock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Externally driven clock.
///
/// Clones share the same reading, so a test can keep one handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute reading. Readings never go backwards.
    pub fn set(&self, elapsed: Duration) {
        self.micros
            .fetch_max(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn advance(&self, by: Duration) {
        self.micros
            .fetch_add(by.as_micros() as u64, Ordering::Relaxed);
    }
}

impl SessionClock for ManualClock {
    fn elapsed(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Relaxed))
    }
}

impl<C: SessionClock + ?Sized> SessionClock for &C {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}
