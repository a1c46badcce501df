//! Monotonic clock trait

use core::cell::Cell;

use crate::timer::Millis;

/// Monotonic millisecond clock supplied by the host
///
/// The only environmental dependency of the core. Values must never go
/// backwards; the origin is arbitrary.
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> Millis;
}

/// Clock advanced by hand
///
/// Used by tests and by hosts that replay a recorded timeline.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`
    pub const fn new(start_ms: Millis) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move the clock forward by `delta_ms`
    pub fn advance(&self, delta_ms: Millis) {
        self.now.set(self.now.get() + delta_ms);
    }

    /// Jump to an absolute time
    ///
    /// Earlier times are ignored to keep the clock monotonic.
    pub fn set(&self, now_ms: Millis) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}
