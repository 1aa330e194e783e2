//! Time source abstraction
//!
//! All timestamps in the system are UTC instants; conversion to a local
//! timezone is a presentation concern and never happens inside the engine.
//! The engine takes its clock as a trait object so tests and scripted runs
//! can pin and advance time deterministically.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Mutex;

/// Source of the current instant
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current UTC timestamp
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and scripted scenarios
///
/// Time only moves when `advance` or `set` is called, which makes durations
/// and fee tiers exactly reproducible.
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock pinned at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { current: Mutex::new(start) }
    }

    /// Move the clock forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }

    /// Pin the clock to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
