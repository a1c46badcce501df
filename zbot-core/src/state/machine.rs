//! State machine definitions

use super::events::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mapping demo phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Waiting for the user; also the state after a finished run
    #[default]
    Idle,
    /// Sweeping the room, building the map
    Scanning,
    /// Visiting units in order
    Cleaning,
}

impl Phase {
    /// Check if a run is in progress
    pub fn is_running(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Status-line label for the demo button
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Scan & Clean",
            Phase::Scanning => "Scanning...",
            Phase::Cleaning => "Cleaning...",
        }
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Idle, Start) => Scanning,
            (Scanning, ScanElapsed) => Cleaning,
            (Cleaning, CleaningFinished) => Idle,

            // Leaving the page always stops the run
            (_, Unmounted) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}

/// Top-level page view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum View {
    /// Loading screen counting up
    #[default]
    Loading,
    /// Scrolling landing page with the demos
    Landing,
    /// Pre-order form
    Preorder,
}

impl View {
    /// Process an event and return the next view
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use View::*;

        match (self, event) {
            (Loading, LoadComplete) => Landing,
            (Landing, OpenPreorder) => Preorder,
            (Preorder, BackToLanding) => Landing,
            _ => self,
        }
    }

    /// Check if the landing-page components are on screen
    pub fn shows_landing(&self) -> bool {
        matches!(self, View::Landing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let phase = Phase::Idle;
        let scanning = phase.transition(Event::Start);
        assert_eq!(scanning, Phase::Scanning);

        let cleaning = scanning.transition(Event::ScanElapsed);
        assert_eq!(cleaning, Phase::Cleaning);

        let idle = cleaning.transition(Event::CleaningFinished);
        assert_eq!(idle, Phase::Idle);
    }

    #[test]
    fn test_start_ignored_while_running() {
        assert_eq!(Phase::Scanning.transition(Event::Start), Phase::Scanning);
        assert_eq!(Phase::Cleaning.transition(Event::Start), Phase::Cleaning);
    }

    #[test]
    fn test_out_of_order_events_ignored() {
        assert_eq!(Phase::Idle.transition(Event::ScanElapsed), Phase::Idle);
        assert_eq!(Phase::Idle.transition(Event::CleaningFinished), Phase::Idle);
        assert_eq!(
            Phase::Scanning.transition(Event::CleaningFinished),
            Phase::Scanning
        );
    }

    #[test]
    fn test_unmount_from_any_phase() {
        for phase in [Phase::Idle, Phase::Scanning, Phase::Cleaning] {
            assert_eq!(phase.transition(Event::Unmounted), Phase::Idle);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Phase::Idle.label(), "Scan & Clean");
        assert_eq!(Phase::Cleaning.label(), "Cleaning...");
    }

    #[test]
    fn test_view_flow() {
        let view = View::Loading;
        assert_eq!(view.transition(Event::OpenPreorder), View::Loading);

        let landing = view.transition(Event::LoadComplete);
        assert_eq!(landing, View::Landing);
        assert!(landing.shows_landing());

        let preorder = landing.transition(Event::OpenPreorder);
        assert_eq!(preorder, View::Preorder);
        assert!(!preorder.shows_landing());

        assert_eq!(preorder.transition(Event::BackToLanding), View::Landing);
    }
}
