//! Page-level components
//!
//! The loading screen, product tour and schedule editor, plus the shell
//! that mounts and unmounts every component as the view changes and owns
//! the menu, navigation links and design story modal.

pub mod loader;
pub mod schedule;
pub mod shell;
pub mod tour;

pub use loader::LoadingScreen;
pub use schedule::{ScheduleEditor, StartTime, WeekDays, Weekday};
pub use shell::{LandingPage, Section, Site};
pub use tour::{ProductTour, TourStep, TOUR_STEPS};
