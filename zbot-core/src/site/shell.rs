//! Site shell
//!
//! Owns every component on the page and all of their timers. The shell
//! decides which components are mounted for the current view:
//!
//! - `Loading`: only the loading screen
//! - `Landing`: demo, carousel and schedule editor (plus the tour overlay
//!   and the design story modal)
//! - `Preorder`: none of the landing components; their timers are cancelled
//!   and they come back fresh on return
//!
//! `tick` always fires the earliest deadline across all components, so
//! timers of different components interleave strictly by time.

use crate::carousel::{CycleCarousel, CLEANING_STAGES};
use crate::config::{ConfigError, ShowcaseConfig, SiteTiming};
use crate::sequencer::DemoSequencer;
use crate::state::{Event, View};
use crate::timer::{earliest_deadline, Millis, TimerSlot};
use crate::traits::Animated;

use super::loader::LoadingScreen;
use super::schedule::{ScheduleEditor, StartTime, Weekday};
use super::tour::ProductTour;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Navigation link targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Section {
    Features,
    Story,
    Mapping,
}

impl Section {
    /// Links in menu order
    pub const ALL: [Section; 3] = [Section::Features, Section::Story, Section::Mapping];

    /// Anchor id on the page
    pub fn id(&self) -> &'static str {
        match self {
            Section::Features => "features",
            Section::Story => "story",
            Section::Mapping => "mapping",
        }
    }

    /// Link text
    pub fn label(&self) -> &'static str {
        match self {
            Section::Features => "Features",
            Section::Story => "Design",
            Section::Mapping => "Mapping",
        }
    }

    /// Parse a link text or anchor id, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(name) || s.id().eq_ignore_ascii_case(name))
    }
}

/// Components that live on the landing view
#[derive(Debug, Clone)]
pub struct LandingPage {
    pub demo: DemoSequencer,
    pub carousel: CycleCarousel,
    pub schedule: ScheduleEditor,
}

impl LandingPage {
    fn mount(&mut self, now_ms: Millis) {
        self.carousel.mount(now_ms);
    }

    fn unmount(&mut self) {
        self.demo.unmount();
        self.carousel.unmount();
        self.schedule.unmount();
    }
}

/// Timer sources in tie-break order
const LOADER: usize = 0;
const TOUR_PROMPT: usize = 1;
const DEMO: usize = 2;
const CAROUSEL: usize = 3;
const SCHEDULE: usize = 4;

/// The whole page
#[derive(Debug, Clone)]
pub struct Site {
    /// Current view
    view: View,
    /// Mobile menu overlay
    menu_open: bool,
    /// Design story modal, drawn above everything else
    story_open: bool,
    /// Loading screen (mounted only while loading)
    loader: LoadingScreen,
    /// Live landing components
    landing: LandingPage,
    /// Unmounted copy used to rebuild the landing view
    pristine: LandingPage,
    /// Tour overlay
    tour: ProductTour,
    /// One-shot that opens the tour after loading
    tour_prompt: TimerSlot,
    timing: SiteTiming,
}

impl Site {
    /// Build every component from configuration
    pub fn new(config: &ShowcaseConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let landing = LandingPage {
            demo: DemoSequencer::from_config(&config.grid, config.sequencer)?,
            carousel: CycleCarousel::new(CLEANING_STAGES.len() as u8, config.carousel)?,
            schedule: ScheduleEditor::new(config.site.save_ack_ms),
        };

        Ok(Self {
            view: View::Loading,
            menu_open: false,
            story_open: false,
            loader: LoadingScreen::new(config.loader),
            pristine: landing.clone(),
            landing,
            tour: ProductTour::default(),
            tour_prompt: TimerSlot::disarmed(),
            timing: config.site,
        })
    }

    /// Show the loading screen
    pub fn mount(&mut self, now_ms: Millis) {
        self.view = View::Loading;
        self.loader.mount(now_ms);
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn loader(&self) -> &LoadingScreen {
        &self.loader
    }

    pub fn demo(&self) -> &DemoSequencer {
        &self.landing.demo
    }

    pub fn carousel(&self) -> &CycleCarousel {
        &self.landing.carousel
    }

    pub fn schedule(&self) -> &ScheduleEditor {
        &self.landing.schedule
    }

    pub fn tour(&self) -> &ProductTour {
        &self.tour
    }

    pub fn is_story_open(&self) -> bool {
        self.story_open
    }

    /// Check if the tour overlay is drawn
    ///
    /// The tour only renders over the landing view; an open tour survives a
    /// trip to the pre-order page.
    pub fn is_tour_visible(&self) -> bool {
        self.tour.is_open() && self.view.shows_landing()
    }

    /// Landing page accepts input (the story modal covers it)
    fn is_interactive(&self) -> bool {
        self.view.shows_landing() && !self.story_open
    }

    /// Press "Scan & Clean"
    pub fn start_demo(&mut self, now_ms: Millis) -> Option<Event> {
        if !self.is_interactive() {
            return None;
        }
        self.landing.demo.start(now_ms)
    }

    /// Click a carousel stage
    pub fn select_stage(&mut self, index: u8, now_ms: Millis) -> Option<Event> {
        if !self.is_interactive() {
            return None;
        }
        self.landing.carousel.select(index, now_ms)
    }

    /// Tour "Next"/"Finish"
    ///
    /// On `TourAdvanced` the host should scroll to `tour().current().target`.
    pub fn next_tour_step(&mut self) -> Option<Event> {
        if !self.is_tour_visible() || self.story_open {
            return None;
        }
        self.tour.next()
    }

    /// Tour close button
    pub fn close_tour(&mut self) -> Option<Event> {
        if !self.is_tour_visible() || self.story_open {
            return None;
        }
        self.tour.close()
    }

    /// Flip a schedule day
    pub fn toggle_day(&mut self, day: Weekday) -> Option<bool> {
        if !self.is_interactive() {
            return None;
        }
        Some(self.landing.schedule.toggle(day))
    }

    /// Change the schedule start time
    pub fn set_start_time(&mut self, start: StartTime) -> bool {
        if !self.is_interactive() {
            return false;
        }
        self.landing.schedule.set_start_time(start);
        true
    }

    /// Press "Save Schedule"
    pub fn save_schedule(&mut self, now_ms: Millis) -> Option<Event> {
        if !self.is_interactive() {
            return None;
        }
        self.landing.schedule.save(now_ms)
    }

    /// Hamburger button
    pub fn toggle_menu(&mut self) -> Option<Event> {
        if !self.is_interactive() {
            return None;
        }
        self.menu_open = !self.menu_open;
        Some(Event::MenuToggled(self.menu_open))
    }

    /// Follow a navigation link; always closes the menu
    ///
    /// On `SectionLinked` the host should scroll to `section.id()`.
    pub fn follow_link(&mut self, section: Section) -> Option<Event> {
        if !self.is_interactive() {
            return None;
        }
        self.menu_open = false;
        Some(Event::SectionLinked(section))
    }

    /// "Read the design story"
    ///
    /// The button sits on the page, so it cannot be pressed through the menu.
    pub fn open_story(&mut self) -> Option<Event> {
        if !self.is_interactive() || self.menu_open {
            return None;
        }
        self.story_open = true;
        Some(Event::StoryOpened)
    }

    /// Story modal close button
    pub fn close_story(&mut self) -> Option<Event> {
        if !self.story_open {
            return None;
        }
        self.story_open = false;
        Some(Event::StoryClosed)
    }

    /// Go to the pre-order page
    ///
    /// Landing components unmount; their timers are cancelled.
    pub fn open_preorder(&mut self) -> Option<Event> {
        if !self.is_interactive() {
            return None;
        }
        self.view = self.view.transition(Event::OpenPreorder);
        self.menu_open = false;
        self.landing.unmount();
        Some(Event::OpenPreorder)
    }

    /// Return from the pre-order page with fresh landing components
    pub fn back_to_landing(&mut self, now_ms: Millis) -> Option<Event> {
        if self.view != View::Preorder {
            return None;
        }
        self.view = self.view.transition(Event::BackToLanding);
        self.landing = self.pristine.clone();
        self.landing.mount(now_ms);
        Some(Event::BackToLanding)
    }

    fn deadlines(&self) -> [Option<Millis>; 5] {
        [
            self.loader.next_deadline(),
            self.tour_prompt.due_ms(),
            self.landing.demo.next_deadline(),
            self.landing.carousel.next_deadline(),
            self.landing.schedule.next_deadline(),
        ]
    }

    fn on_load_complete(&mut self, at_ms: Millis) {
        self.view = self.view.transition(Event::LoadComplete);
        self.loader.unmount();
        self.landing.mount(at_ms);
        self.tour_prompt.once(at_ms, self.timing.tour_prompt_ms);
    }
}

impl Animated for Site {
    fn next_deadline(&self) -> Option<Millis> {
        self.deadlines().into_iter().flatten().min()
    }

    fn tick(&mut self, now_ms: Millis) -> Option<Event> {
        // Each source is ticked at its own deadline so it only fires what is
        // due at that instant, keeping cross-component order by time
        while let Some((source, at_ms)) = earliest_deadline(&self.deadlines(), now_ms) {
            let event = match source {
                LOADER => {
                    let event = self.loader.tick(at_ms);
                    if event == Some(Event::LoadComplete) {
                        self.on_load_complete(at_ms);
                    }
                    event
                }
                TOUR_PROMPT => {
                    self.tour_prompt.fire(at_ms);
                    self.tour = ProductTour::opened();
                    Some(Event::TourPrompted)
                }
                DEMO => self.landing.demo.tick(at_ms),
                CAROUSEL => self.landing.carousel.tick(at_ms),
                SCHEDULE => self.landing.schedule.tick(at_ms),
                _ => unreachable!(),
            };

            if event.is_some() {
                return event;
            }
        }
        None
    }

    fn unmount(&mut self) {
        self.loader.unmount();
        self.landing.unmount();
        self.tour_prompt.cancel();
    }
}
