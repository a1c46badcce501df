//! Loading screen
//!
//! Counts to 100 on a ticker, waits a short grace period, then reports
//! completion. The tick that first observes 100 stops the ticker and arms
//! the grace timer.

use crate::config::{LoaderTiming, PROGRESS_MAX};
use crate::state::Event;
use crate::timer::{earliest_due, next_deadline, Millis, TimerSlot};
use crate::traits::Animated;

/// Loading screen progress
#[derive(Debug, Clone, Default)]
pub struct LoadingScreen {
    /// Percentage shown under the logo
    progress: u8,
    /// Grace period elapsed
    complete: bool,
    timing: LoaderTiming,
    ticker: TimerSlot,
    grace: TimerSlot,
}

impl LoadingScreen {
    pub fn new(timing: LoaderTiming) -> Self {
        Self {
            timing,
            ..Default::default()
        }
    }

    /// Start counting from zero
    pub fn mount(&mut self, now_ms: Millis) {
        self.progress = 0;
        self.complete = false;
        self.grace.cancel();
        self.ticker.every(now_ms, self.timing.tick_ms);
    }

    /// Get progress (0..=100)
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Check if loading finished
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Time at which a run mounted at `start_ms` completes
    pub fn completion_time(&self, start_ms: Millis) -> Millis {
        let ticks = PROGRESS_MAX as Millis + 1;
        start_ms + ticks * self.timing.tick_ms.max(1) as Millis + self.timing.grace_ms as Millis
    }
}

impl Animated for LoadingScreen {
    fn next_deadline(&self) -> Option<Millis> {
        next_deadline(&[&self.ticker, &self.grace])
    }

    fn tick(&mut self, now_ms: Millis) -> Option<Event> {
        while let Some(slot) = earliest_due(&[&self.ticker, &self.grace], now_ms) {
            if slot == 0 {
                let at_ms = self.ticker.fire(now_ms)?;
                if self.progress >= PROGRESS_MAX {
                    self.ticker.cancel();
                    self.grace.once(at_ms, self.timing.grace_ms);
                } else {
                    self.progress += 1;
                }
            } else {
                self.grace.fire(now_ms);
                self.complete = true;
                return Some(Event::LoadComplete);
            }
        }
        None
    }

    fn unmount(&mut self) {
        self.ticker.cancel();
        self.grace.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::drain;

    #[test]
    fn test_counts_to_100() {
        let mut loader = LoadingScreen::default();
        loader.mount(0);

        drain(&mut loader, 1500, |_| {});
        assert_eq!(loader.progress(), 50);

        drain(&mut loader, 3000, |_| {});
        assert_eq!(loader.progress(), 100);
        assert!(!loader.is_complete());
    }

    #[test]
    fn test_completes_after_grace() {
        let mut loader = LoadingScreen::default();
        loader.mount(0);
        assert_eq!(loader.completion_time(0), 3530);

        assert_eq!(drain(&mut loader, 3529, |_| {}), 0);
        assert!(!loader.is_complete());

        let mut events = heapless::Vec::<Event, 4>::new();
        drain(&mut loader, 3530, |e| {
            let _ = events.push(e);
        });
        assert_eq!(events.as_slice(), &[Event::LoadComplete]);
        assert!(loader.is_complete());
        assert_eq!(loader.next_deadline(), None);
    }

    #[test]
    fn test_unmount_before_complete() {
        let mut loader = LoadingScreen::default();
        loader.mount(0);
        loader.unmount();
        assert_eq!(drain(&mut loader, 10_000, |_| {}), 0);
        assert_eq!(loader.progress(), 0);
    }
}
