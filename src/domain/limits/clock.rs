//! Time source used by the rate limiter.

use std::time::Instant;

/// Monotonic time source.
///
/// Production code uses [`SystemClock`]; tests substitute a manually
/// advanced clock to drive window expiry deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
