//! Monotonic millisecond time base.
//!
//! Supplies the drift-free, zero-based clock used to bound communication
//! timeouts and to stamp diagnostic output. The reference instant is
//! established lazily on the first read and held for the lifetime of the
//! process; it is never reset.

use std::sync::OnceLock;
use std::time::Instant;

/// A zero-based monotonic clock with sub-millisecond resolution.
///
/// The first call to [`MonotonicClock::now_ms`] establishes the reference
/// instant and returns exactly `0.0`; every later call returns elapsed
/// milliseconds since that reference. Readings never go backward, even if
/// the wall clock is adjusted, because the source is [`Instant`].
#[derive(Debug, Default)]
pub struct MonotonicClock {
    epoch: OnceLock<Instant>,
}

impl MonotonicClock {
    /// Create a clock with no reference instant yet.
    pub const fn new() -> Self {
        Self {
            epoch: OnceLock::new(),
        }
    }

    /// Elapsed milliseconds since the first call on this clock.
    ///
    /// The call that establishes the reference returns `0.0`. Callers must
    /// tolerate an occasional zero reading rather than treat it as fatal.
    pub fn now_ms(&self) -> f64 {
        match self.epoch.get() {
            Some(epoch) => epoch.elapsed().as_secs_f64() * 1_000.0,
            None => {
                // Lost races leave someone else's epoch in place, which is
                // at most a sub-millisecond earlier reference.
                let _ = self.epoch.set(Instant::now());
                0.0
            }
        }
    }
}

/// Process-wide clock instance backing [`now_ms`].
static CLOCK: MonotonicClock = MonotonicClock::new();

/// Elapsed milliseconds since the first read in this process.
///
/// See [`MonotonicClock::now_ms`] for the contract.
pub fn now_ms() -> f64 {
    CLOCK.now_ms()
}
