//! Injected randomness and time.
//!
//! The engine never reaches for a global RNG or the wall clock directly. Food
//! placement draws from a [`RandomSource`] and dynamic obstacles are gated by a
//! [`TimeSource`], so tests and the simulator can drive both deterministically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Uniform integer source used for food placement.
pub trait RandomSource {
    /// Returns a value in `[0, max_exclusive)`. Returns 0 when `max_exclusive <= 0`.
    fn next(&mut self, max_exclusive: i32) -> i32;
}

/// Adapts any `rand` generator to [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next(&mut self, max_exclusive: i32) -> i32 {
        if max_exclusive <= 0 {
            return 0;
        }
        self.0.gen_range(0..max_exclusive)
    }
}

/// Millisecond clock used by time-driven obstacles.
pub trait TimeSource {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock. Clones share the same instant, so a handle kept
/// outside the engine can move time forward for the copy the engine owns.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_millis)),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
