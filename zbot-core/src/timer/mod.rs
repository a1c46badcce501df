//! Owned timer handles
//!
//! Every timer belongs to exactly one component instance. A component keeps
//! one `TimerSlot` per logical timer and cancels all of them on unmount, so a
//! deadline can never fire into torn-down state.
//!
//! Time is a plain millisecond count from a monotonic clock. Slots never read
//! the clock themselves; callers pass `now_ms` in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Milliseconds on the host's monotonic clock
pub type Millis = u64;

/// An armed deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deadline {
    /// Absolute time of the next firing
    pub due_ms: Millis,
    /// Re-arm period for repeating timers (None = one-shot)
    pub period_ms: Option<u32>,
}

/// A timer handle owned by a component
///
/// A slot is either disarmed or holds a single deadline. Repeating slots
/// re-arm one period after the deadline that just fired, not after the poll
/// time, so a late poll catches up firing by firing without drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSlot {
    deadline: Option<Deadline>,
}

impl TimerSlot {
    /// A slot with nothing scheduled
    pub const fn disarmed() -> Self {
        Self { deadline: None }
    }

    /// Arm a one-shot firing `delay_ms` after `now_ms`
    ///
    /// Replaces whatever the slot held before.
    pub fn once(&mut self, now_ms: Millis, delay_ms: u32) {
        self.deadline = Some(Deadline {
            due_ms: now_ms + delay_ms as Millis,
            period_ms: None,
        });
    }

    /// Arm a repeating timer; first firing is one period after `now_ms`
    ///
    /// A zero period is treated as 1 ms.
    pub fn every(&mut self, now_ms: Millis, period_ms: u32) {
        let period_ms = period_ms.max(1);
        self.deadline = Some(Deadline {
            due_ms: now_ms + period_ms as Millis,
            period_ms: Some(period_ms),
        });
    }

    /// Cancel any pending firing
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check if something is scheduled
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check if the slot repeats
    pub fn is_repeating(&self) -> bool {
        matches!(self.deadline, Some(Deadline { period_ms: Some(_), .. }))
    }

    /// Next firing time, if armed
    pub fn due_ms(&self) -> Option<Millis> {
        self.deadline.map(|d| d.due_ms)
    }

    /// Check if the slot should fire at `now_ms`
    pub fn is_due(&self, now_ms: Millis) -> bool {
        matches!(self.deadline, Some(d) if d.due_ms <= now_ms)
    }

    /// Consume one pending firing
    ///
    /// Returns the deadline that fired, or None if nothing was due.
    /// One-shot slots disarm; repeating slots move forward one period.
    pub fn fire(&mut self, now_ms: Millis) -> Option<Millis> {
        let deadline = self.deadline?;
        if deadline.due_ms > now_ms {
            return None;
        }

        self.deadline = deadline.period_ms.map(|period| Deadline {
            due_ms: deadline.due_ms + period as Millis,
            period_ms: Some(period),
        });

        Some(deadline.due_ms)
    }
}

/// Pick the slot that should fire next
///
/// Returns the index of the slot with the earliest deadline at or before
/// `now_ms`. Ties go to the lower index, so callers list their slots in the
/// order the timers were created.
pub fn earliest_due(slots: &[&TimerSlot], now_ms: Millis) -> Option<usize> {
    let mut best: Option<(usize, Millis)> = None;

    for (i, slot) in slots.iter().enumerate() {
        best = pick(best, i, slot.due_ms(), now_ms);
    }

    best.map(|(i, _)| i)
}

/// Pick the source that should fire next from a list of deadlines
///
/// Same tie rule as `earliest_due`. Returns the index and its deadline.
pub fn earliest_deadline(deadlines: &[Option<Millis>], now_ms: Millis) -> Option<(usize, Millis)> {
    let mut best = None;

    for (i, due) in deadlines.iter().enumerate() {
        best = pick(best, i, *due, now_ms);
    }

    best
}

fn pick(
    best: Option<(usize, Millis)>,
    index: usize,
    due: Option<Millis>,
    now_ms: Millis,
) -> Option<(usize, Millis)> {
    match (best, due) {
        (_, None) => best,
        (_, Some(due)) if due > now_ms => best,
        (Some((_, best_due)), Some(due)) if best_due <= due => best,
        (_, Some(due)) => Some((index, due)),
    }
}

/// Earliest armed deadline across a set of slots
pub fn next_deadline(slots: &[&TimerSlot]) -> Option<Millis> {
    slots.iter().filter_map(|s| s.due_ms()).min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut slot = TimerSlot::disarmed();
        slot.once(100, 50);

        assert!(!slot.is_due(149));
        assert_eq!(slot.fire(149), None);
        assert_eq!(slot.fire(150), Some(150));
        assert!(!slot.is_armed());
        assert_eq!(slot.fire(1000), None);
    }

    #[test]
    fn test_repeating_catches_up_without_drift() {
        let mut slot = TimerSlot::disarmed();
        slot.every(0, 20);

        // Poll late: three periods have elapsed
        assert_eq!(slot.fire(65), Some(20));
        assert_eq!(slot.fire(65), Some(40));
        assert_eq!(slot.fire(65), Some(60));
        assert_eq!(slot.fire(65), None);
        assert_eq!(slot.due_ms(), Some(80));
    }

    #[test]
    fn test_cancel() {
        let mut slot = TimerSlot::disarmed();
        slot.every(0, 10);
        slot.cancel();
        assert!(!slot.is_armed());
        assert_eq!(slot.fire(100), None);
    }

    #[test]
    fn test_zero_period_clamped() {
        let mut slot = TimerSlot::disarmed();
        slot.every(5, 0);
        assert_eq!(slot.due_ms(), Some(6));
    }

    #[test]
    fn test_rearm_replaces() {
        let mut slot = TimerSlot::disarmed();
        slot.once(0, 3000);
        slot.once(1000, 3000);
        assert_eq!(slot.due_ms(), Some(4000));
        assert!(!slot.is_repeating());
    }

    #[test]
    fn test_earliest_due_tie_goes_to_first() {
        let mut a = TimerSlot::disarmed();
        let mut b = TimerSlot::disarmed();
        let mut c = TimerSlot::disarmed();
        a.once(0, 2000);
        b.once(0, 2000);
        c.once(0, 1500);

        assert_eq!(earliest_due(&[&a, &b, &c], 1000), None);
        assert_eq!(earliest_due(&[&a, &b, &c], 2000), Some(2));
        c.cancel();
        assert_eq!(earliest_due(&[&a, &b, &c], 2000), Some(0));
    }

    #[test]
    fn test_earliest_deadline() {
        let deadlines = [Some(300), None, Some(100), Some(100)];
        assert_eq!(earliest_deadline(&deadlines, 50), None);
        assert_eq!(earliest_deadline(&deadlines, 100), Some((2, 100)));
        assert_eq!(earliest_deadline(&deadlines, 1000), Some((2, 100)));
    }

    #[test]
    fn test_next_deadline() {
        let mut a = TimerSlot::disarmed();
        let b = TimerSlot::disarmed();
        assert_eq!(next_deadline(&[&a, &b]), None);
        a.every(10, 20);
        assert_eq!(next_deadline(&[&a, &b]), Some(30));
    }
}
