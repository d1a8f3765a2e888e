//! Time source for record ids and timestamps.
//!
//! # Responsibility
//! - Provide one seam (`Clock`) for every "current time" read in core.
//! - Derive record ids from clock reads.
//!
//! # Invariants
//! - `SystemClock` never returns the same millisecond twice inside one
//!   process, so timestamp-derived ids stay unique and successive
//!   `updated_at` values strictly increase.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ISSUED_MS: AtomicI64 = AtomicI64::new(0);

/// Source of "now" for repositories.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall clock, strictly increasing at millisecond granularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let wall_ms = Utc::now().timestamp_millis();
        let mut previous = LAST_ISSUED_MS.load(Ordering::Relaxed);
        loop {
            let next = wall_ms.max(previous + 1);
            match LAST_ISSUED_MS.compare_exchange_weak(
                previous,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return from_millis(next),
                Err(actual) => previous = actual,
            }
        }
    }
}

/// Deterministic clock: starts at `start` and advances by `step_ms` on every read.
#[derive(Debug)]
pub struct SteppingClock {
    next_ms: AtomicI64,
    step_ms: i64,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step_ms: i64) -> Self {
        Self {
            next_ms: AtomicI64::new(start.timestamp_millis()),
            step_ms,
        }
    }

    /// Returns the instant the next read will yield, without consuming it.
    pub fn peek(&self) -> DateTime<Utc> {
        from_millis(self.next_ms.load(Ordering::Acquire))
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        from_millis(self.next_ms.fetch_add(self.step_ms, Ordering::AcqRel))
    }
}

/// Formats a clock reading as a record id (decimal epoch milliseconds).
pub fn id_from(instant: DateTime<Utc>) -> String {
    instant.timestamp_millis().to_string()
}

/// Reads the clock once and returns the derived id.
pub fn next_id(clock: &impl Clock) -> String {
    id_from(clock.now())
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}
