//! Guided product tour
//!
//! A fixed list of steps, each pointing at a page section. "Next" scrolls
//! to the following section; on the last step it finishes the tour.

use crate::state::Event;

/// One tour step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TourStep {
    /// Section id to scroll to
    pub target: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Tour steps in order
pub const TOUR_STEPS: [TourStep; 4] = [
    TourStep {
        target: "hero-cta",
        title: "Welcome to ZBot",
        description: "Your journey to a cleaner home starts here. Let's take a quick tour.",
    },
    TourStep {
        target: "how-it-works",
        title: "Simple Workflow",
        description: "See how easy it is to set up and let ZBot handle the rest.",
    },
    TourStep {
        target: "mapping",
        title: "Interactive Mapping",
        description: "Try our Smart Map demo to see how ZBot navigates your space.",
    },
    TourStep {
        target: "scheduler",
        title: "Set & Forget",
        description: "Schedule cleanings around your life with our simple app interface.",
    },
];

/// Tour overlay state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProductTour {
    step: u8,
    open: bool,
}

impl ProductTour {
    /// A tour open at the first step
    pub fn opened() -> Self {
        Self {
            step: 0,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current step index (0-based)
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Current step content
    pub fn current(&self) -> &'static TourStep {
        &TOUR_STEPS[self.step as usize]
    }

    /// Check if the current step is the last one
    pub fn is_last(&self) -> bool {
        self.step as usize == TOUR_STEPS.len() - 1
    }

    /// Primary button label
    pub fn button_label(&self) -> &'static str {
        if self.is_last() {
            "Finish"
        } else {
            "Next"
        }
    }

    /// Advance, or finish on the last step
    ///
    /// Returns `TourAdvanced(step)` (the host scrolls to the new target) or
    /// `TourClosed`. Does nothing on a closed tour.
    pub fn next(&mut self) -> Option<Event> {
        if !self.open {
            return None;
        }
        if self.is_last() {
            return self.close();
        }
        self.step += 1;
        Some(Event::TourAdvanced(self.step))
    }

    /// Dismiss the tour
    pub fn close(&mut self) -> Option<Event> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(Event::TourClosed)
    }
}
