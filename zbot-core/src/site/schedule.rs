//! Cleaning schedule mockup
//!
//! Weekday toggles, a start time and a save button whose acknowledgement
//! clears itself. Nothing is stored anywhere.

use crate::state::Event;
use crate::timer::{Millis, TimerSlot};
use crate::traits::Animated;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days, Monday first
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Three-letter label
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    /// Parse a label, case-insensitive
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(label))
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// Set of weekdays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeekDays(u8);

impl WeekDays {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    /// Flip a day; returns true if it is now selected
    pub fn toggle(&mut self, day: Weekday) -> bool {
        self.0 ^= day.bit();
        self.contains(day)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Selected days, Monday first
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

/// Wall-clock start time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StartTime {
    pub hour: u8,
    pub minute: u8,
}

impl StartTime {
    /// Validated constructor
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Parse "HH:MM"
    pub fn parse(text: &str) -> Option<Self> {
        let (h, m) = text.trim().split_once(':')?;
        if m.len() != 2 {
            return None;
        }
        Self::new(h.parse().ok()?, m.parse().ok()?)
    }

    /// "AM" or "PM"
    pub fn meridiem(&self) -> &'static str {
        if self.hour < 12 {
            "AM"
        } else {
            "PM"
        }
    }
}

impl Default for StartTime {
    fn default() -> Self {
        Self { hour: 9, minute: 0 }
    }
}

impl core::fmt::Display for StartTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Schedule editor state
#[derive(Debug, Clone)]
pub struct ScheduleEditor {
    days: WeekDays,
    start: StartTime,
    /// "Schedule Updated" acknowledgement visible
    saved: bool,
    ack_ms: u32,
    ack_timer: TimerSlot,
}

impl Default for ScheduleEditor {
    fn default() -> Self {
        Self::new(3000)
    }
}

impl ScheduleEditor {
    /// Editor with Mon/Wed/Fri at 09:00 preselected
    pub fn new(ack_ms: u32) -> Self {
        let mut days = WeekDays::empty();
        days.insert(Weekday::Mon);
        days.insert(Weekday::Wed);
        days.insert(Weekday::Fri);

        Self {
            days,
            start: StartTime::default(),
            saved: false,
            ack_ms,
            ack_timer: TimerSlot::disarmed(),
        }
    }

    pub fn days(&self) -> WeekDays {
        self.days
    }

    pub fn start_time(&self) -> StartTime {
        self.start
    }

    /// Check if the save acknowledgement is showing
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Save button label
    pub fn button_label(&self) -> &'static str {
        if self.saved {
            "Schedule Updated"
        } else {
            "Save Schedule"
        }
    }

    /// Flip a day; any edit hides the acknowledgement
    pub fn toggle(&mut self, day: Weekday) -> bool {
        self.saved = false;
        self.days.toggle(day)
    }

    /// Change the start time; any edit hides the acknowledgement
    pub fn set_start_time(&mut self, start: StartTime) {
        self.saved = false;
        self.start = start;
    }

    /// Show the acknowledgement and arm its expiry
    ///
    /// Saving again re-arms the same slot.
    pub fn save(&mut self, now_ms: Millis) -> Option<Event> {
        self.saved = true;
        self.ack_timer.once(now_ms, self.ack_ms);
        Some(Event::ScheduleSaved)
    }
}

impl Animated for ScheduleEditor {
    fn next_deadline(&self) -> Option<Millis> {
        self.ack_timer.due_ms()
    }

    fn tick(&mut self, now_ms: Millis) -> Option<Event> {
        self.ack_timer.fire(now_ms)?;
        self.saved = false;
        Some(Event::SaveAckExpired)
    }

    fn unmount(&mut self) {
        self.ack_timer.cancel();
        self.saved = false;
    }
}
