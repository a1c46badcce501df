//! Cleaning-stage carousel
//!
//! Highlights one of N stages, advancing round-robin on a repeating timer.
//! The user may jump to any stage; by default that does not re-phase the
//! timer, so the next automatic tick can move the highlight straight away.

pub mod stages;

pub use stages::{Stage, CLEANING_STAGES};

use crate::config::{CarouselConfig, ConfigError, MAX_STAGES};
use crate::state::Event;
use crate::timer::{Millis, TimerSlot};
use crate::traits::Animated;

/// Snapshot handed to the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CarouselState {
    pub active_index: u8,
}

/// How a stage relates to the highlighted one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StageStatus {
    /// Highlighted
    Active,
    /// Before the highlighted stage
    Past,
    /// After the highlighted stage
    Upcoming,
}

/// Round-robin stage highlighter
#[derive(Debug, Clone)]
pub struct CycleCarousel {
    /// Highlighted stage
    active: u8,
    /// Number of stages (N)
    stage_count: u8,
    /// Timer behaviour
    config: CarouselConfig,
    /// Automatic advance
    advance: TimerSlot,
}

impl Default for CycleCarousel {
    fn default() -> Self {
        Self {
            active: 0,
            stage_count: CLEANING_STAGES.len() as u8,
            config: CarouselConfig::default(),
            advance: TimerSlot::disarmed(),
        }
    }
}

impl CycleCarousel {
    /// Create an unmounted carousel over `stage_count` stages
    pub fn new(stage_count: u8, config: CarouselConfig) -> Result<Self, ConfigError> {
        if stage_count == 0 || stage_count as usize > MAX_STAGES {
            return Err(ConfigError::InvalidStageCount(stage_count));
        }
        if config.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(Self {
            active: 0,
            stage_count,
            config,
            advance: TimerSlot::disarmed(),
        })
    }

    /// Start the automatic advance
    ///
    /// Mounting an already mounted carousel re-phases the timer but keeps
    /// the highlighted stage.
    pub fn mount(&mut self, now_ms: Millis) {
        self.advance.every(now_ms, self.config.interval_ms);
    }

    /// Check if the automatic advance is running
    pub fn is_mounted(&self) -> bool {
        self.advance.is_armed()
    }

    /// Highlight stage `index` immediately
    ///
    /// Out-of-range indices are ignored and return None.
    pub fn select(&mut self, index: u8, now_ms: Millis) -> Option<Event> {
        if index >= self.stage_count {
            return None;
        }

        self.active = index;
        if self.config.restart_on_select && self.advance.is_armed() {
            self.advance.every(now_ms, self.config.interval_ms);
        }

        Some(Event::StageSelected(index))
    }

    /// Get highlighted stage
    pub fn active_index(&self) -> u8 {
        self.active
    }

    /// Get number of stages
    pub fn stage_count(&self) -> u8 {
        self.stage_count
    }

    /// Snapshot for the view layer
    pub fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.active,
        }
    }

    /// Status of stage `index` relative to the highlight
    pub fn stage_status(&self, index: u8) -> StageStatus {
        use core::cmp::Ordering;

        match index.cmp(&self.active) {
            Ordering::Equal => StageStatus::Active,
            Ordering::Less => StageStatus::Past,
            Ordering::Greater => StageStatus::Upcoming,
        }
    }

    /// Connector line fill, 0..=100
    pub fn progress_percent(&self) -> u8 {
        if self.stage_count <= 1 {
            return 100;
        }
        (self.active as u16 * 100 / (self.stage_count as u16 - 1)) as u8
    }
}

impl Animated for CycleCarousel {
    fn next_deadline(&self) -> Option<Millis> {
        self.advance.due_ms()
    }

    fn tick(&mut self, now_ms: Millis) -> Option<Event> {
        self.advance.fire(now_ms)?;
        self.active = (self.active + 1) % self.stage_count;
        Some(Event::StageAdvanced(self.active))
    }

    fn unmount(&mut self) {
        self.advance.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> CycleCarousel {
        let mut carousel = CycleCarousel::default();
        carousel.mount(0);
        carousel
    }

    #[test]
    fn test_initial_state() {
        let carousel = CycleCarousel::default();
        assert_eq!(carousel.active_index(), 0);
        assert_eq!(carousel.stage_count(), 4);
        assert!(!carousel.is_mounted());
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn test_three_ticks_then_wrap() {
        let mut carousel = mounted();

        assert_eq!(carousel.tick(2000), Some(Event::StageAdvanced(1)));
        assert_eq!(carousel.tick(4000), Some(Event::StageAdvanced(2)));
        assert_eq!(carousel.tick(6000), Some(Event::StageAdvanced(3)));
        assert_eq!(carousel.active_index(), 3);

        assert_eq!(carousel.tick(8000), Some(Event::StageAdvanced(0)));
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn test_tick_before_deadline_does_nothing() {
        let mut carousel = mounted();
        assert_eq!(carousel.tick(1999), None);
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn test_select_is_immediate() {
        let mut carousel = mounted();
        for i in 0..4 {
            assert_eq!(carousel.select(i, 10), Some(Event::StageSelected(i)));
            assert_eq!(carousel.active_index(), i);
        }
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut carousel = mounted();
        carousel.select(2, 0);
        assert_eq!(carousel.select(4, 0), None);
        assert_eq!(carousel.active_index(), 2);
    }

    #[test]
    fn test_select_keeps_timer_phase() {
        let mut carousel = mounted();

        // Manual pick just before the automatic tick gets overridden
        carousel.select(2, 1990);
        assert_eq!(carousel.next_deadline(), Some(2000));
        assert_eq!(carousel.tick(2000), Some(Event::StageAdvanced(3)));
    }

    #[test]
    fn test_restart_on_select_rephases() {
        let config = CarouselConfig {
            interval_ms: 2000,
            restart_on_select: true,
        };
        let mut carousel = CycleCarousel::new(4, config).unwrap();
        carousel.mount(0);

        carousel.select(2, 1990);
        assert_eq!(carousel.next_deadline(), Some(3990));
        assert_eq!(carousel.tick(2000), None);
        assert_eq!(carousel.active_index(), 2);
    }

    #[test]
    fn test_stage_status_and_progress() {
        let mut carousel = mounted();
        carousel.select(2, 0);

        assert_eq!(carousel.stage_status(0), StageStatus::Past);
        assert_eq!(carousel.stage_status(2), StageStatus::Active);
        assert_eq!(carousel.stage_status(3), StageStatus::Upcoming);
        assert_eq!(carousel.progress_percent(), 66);

        carousel.select(3, 0);
        assert_eq!(carousel.progress_percent(), 100);
    }

    #[test]
    fn test_unmount_stops_advance() {
        let mut carousel = mounted();
        carousel.unmount();
        assert_eq!(carousel.tick(10_000), None);
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            CycleCarousel::new(0, CarouselConfig::default()).err(),
            Some(ConfigError::InvalidStageCount(0))
        );
        let config = CarouselConfig {
            interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            CycleCarousel::new(4, config).err(),
            Some(ConfigError::ZeroInterval)
        );
    }

    #[test]
    fn test_stage_table() {
        assert_eq!(CLEANING_STAGES.len(), 4);
        assert_eq!(CLEANING_STAGES[0].label, "Dose");
        assert_eq!(CLEANING_STAGES[3].label, "Dry");
    }
}
