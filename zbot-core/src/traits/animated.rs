//! Timer-driven component trait

use crate::state::Event;
use crate::timer::Millis;

/// A component whose state advances on owned timers
///
/// Hosts call `tick` with the current time until it returns `None`, then
/// sleep until `next_deadline`. Components fire due timers in deadline
/// order and stop at the first state-machine event so the host can react
/// (re-render, log) between events.
pub trait Animated {
    /// Earliest armed deadline, or None when nothing is scheduled
    fn next_deadline(&self) -> Option<Millis>;

    /// Fire timers due at or before `now_ms`
    ///
    /// Returns the first event produced. `None` means nothing is left due.
    fn tick(&mut self, now_ms: Millis) -> Option<Event>;

    /// Cancel every owned timer
    ///
    /// Must be called when the component leaves the page.
    fn unmount(&mut self);

    /// Check if any timer is still armed
    fn is_animating(&self) -> bool {
        self.next_deadline().is_some()
    }
}

/// Fire everything due at `now_ms`, handing each event to `on_event`
///
/// Returns the number of events produced.
pub fn drain<A, F>(component: &mut A, now_ms: Millis, mut on_event: F) -> usize
where
    A: Animated + ?Sized,
    F: FnMut(Event),
{
    let mut count = 0;
    while let Some(event) = component.tick(now_ms) {
        on_event(event);
        count += 1;
    }
    count
}
