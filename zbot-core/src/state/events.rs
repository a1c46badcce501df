//! Events that trigger state transitions

use crate::site::Section;

/// Events produced by user actions and timer firings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Mapping demo
    /// User pressed "Scan & Clean"
    Start,
    /// Scanning window elapsed, map is complete
    ScanElapsed,
    /// Robot cleaned a unit
    UnitCleaned(u16),
    /// Robot passed a wall unit without cleaning it
    UnitSkipped(u16),
    /// Every unit was visited
    CleaningFinished,

    // Stage carousel
    /// Automatic advance to the given stage
    StageAdvanced(u8),
    /// User picked a stage directly
    StageSelected(u8),

    // Site shell
    /// Loading screen finished
    LoadComplete,
    /// Product tour prompt delay elapsed
    TourPrompted,
    /// Tour moved to the given step
    TourAdvanced(u8),
    /// Tour dismissed or finished
    TourClosed,
    /// User opened the pre-order page
    OpenPreorder,
    /// User returned from the pre-order page
    BackToLanding,
    /// Mobile menu opened (true) or closed (false)
    MenuToggled(bool),
    /// Navigation link followed; the menu is closed
    SectionLinked(Section),
    /// Design story modal opened
    StoryOpened,
    /// Design story modal closed
    StoryClosed,

    // Schedule editor
    /// User saved the schedule
    ScheduleSaved,
    /// "Schedule Updated" acknowledgement expired
    SaveAckExpired,

    // Lifecycle
    /// Component left the page; all timers cancelled
    Unmounted,
}

impl Event {
    /// Check if this event comes from a timer firing
    pub fn is_timer_event(&self) -> bool {
        matches!(
            self,
            Event::ScanElapsed
                | Event::UnitCleaned(_)
                | Event::UnitSkipped(_)
                | Event::CleaningFinished
                | Event::StageAdvanced(_)
                | Event::LoadComplete
                | Event::TourPrompted
                | Event::SaveAckExpired
        )
    }

    /// Check if this event changes the mapping demo
    pub fn is_demo_event(&self) -> bool {
        matches!(
            self,
            Event::Start
                | Event::ScanElapsed
                | Event::UnitCleaned(_)
                | Event::UnitSkipped(_)
                | Event::CleaningFinished
        )
    }
}
