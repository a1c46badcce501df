//! Demo sequencer
//!
//! Runs the scripted "scan then clean" animation. One `start()` arms two
//! independent timers:
//!
//! 1. a progress ticker that counts the button fill from 0 to 100
//! 2. a scan timer that, when it fires, switches to cleaning and arms a unit
//!    ticker that walks the grid in index order
//!
//! The progress ticker and the scan timer are not synchronised. With default
//! timings 100 × 20 ms matches the 2000 ms scan window, but nothing here
//! relies on progress being exactly 100 when cleaning begins.

use heapless::Vec;

use super::grid::Grid;
use crate::config::{ConfigError, GridConfig, SequencerTiming, MAX_UNITS, PROGRESS_MAX};
use crate::state::{Event, Phase};
use crate::timer::{earliest_due, next_deadline, Millis, TimerSlot};
use crate::traits::Animated;

/// Display state of a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitState {
    /// Not scanned yet
    Unmapped,
    /// Scanned, waiting to be cleaned
    Mapped,
    /// Cleaned in the current run
    Cleaned,
    /// Permanent obstacle (shown once mapped)
    Wall,
}

/// Snapshot handed to the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    pub phase: Phase,
    /// Button fill, 0..=100
    pub progress: u8,
    /// Cleaned units in ascending order
    pub completed_units: Vec<u16, MAX_UNITS>,
}

/// Scripted room-mapping demo
#[derive(Debug, Clone)]
pub struct DemoSequencer {
    /// Current phase
    phase: Phase,
    /// Button fill percentage
    progress: u8,
    /// Units cleaned this run, ascending
    completed: Vec<u16, MAX_UNITS>,
    /// Scan finished in the current (or last) run
    mapped: bool,
    /// Next unit index to visit
    cursor: u16,
    /// Room layout
    grid: Grid,
    /// Timer periods
    timing: SequencerTiming,
    /// Button fill ticker
    progress_ticker: TimerSlot,
    /// One-shot end of the scanning window
    scan_timer: TimerSlot,
    /// Per-unit cleaning ticker
    unit_ticker: TimerSlot,
}

/// Timer slots in creation order (ties fire in this order)
const PROGRESS: usize = 0;
const SCAN: usize = 1;
const UNIT: usize = 2;

impl Default for DemoSequencer {
    fn default() -> Self {
        Self::new(Grid::default(), SequencerTiming::default())
    }
}

impl DemoSequencer {
    /// Create an idle sequencer over `grid`
    pub fn new(grid: Grid, timing: SequencerTiming) -> Self {
        Self {
            phase: Phase::Idle,
            progress: 0,
            completed: Vec::new(),
            mapped: false,
            cursor: 0,
            grid,
            timing,
            progress_ticker: TimerSlot::disarmed(),
            scan_timer: TimerSlot::disarmed(),
            unit_ticker: TimerSlot::disarmed(),
        }
    }

    /// Create from configuration sections
    pub fn from_config(grid: &GridConfig, timing: SequencerTiming) -> Result<Self, ConfigError> {
        Ok(Self::new(Grid::from_config(grid)?, timing))
    }

    /// Begin a run
    ///
    /// Ignored while a run is in progress: nothing is reset and no timer is
    /// re-armed. Returns `Event::Start` when accepted.
    pub fn start(&mut self, now_ms: Millis) -> Option<Event> {
        if self.phase.is_running() {
            return None;
        }

        self.phase = self.phase.transition(Event::Start);
        self.completed.clear();
        self.mapped = false;
        self.progress = 0;
        self.cursor = 0;

        self.progress_ticker
            .every(now_ms, self.timing.progress_tick_ms);
        self.scan_timer.once(now_ms, self.timing.scan_duration_ms);
        self.unit_ticker.cancel();

        Some(Event::Start)
    }

    /// Get current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get button fill (0..=100)
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Units cleaned so far, ascending
    pub fn completed_units(&self) -> &[u16] {
        &self.completed
    }

    /// Check if the scan finished in the current or last run
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// Check if a finished run's map is on display
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Idle && self.mapped
    }

    /// Room layout
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Snapshot for the view layer
    pub fn state(&self) -> SequenceState {
        SequenceState {
            phase: self.phase,
            progress: self.progress,
            completed_units: self.completed.clone(),
        }
    }

    /// Display state of one unit
    pub fn unit_state(&self, unit: u16) -> UnitState {
        if self.completed.binary_search(&unit).is_ok() {
            UnitState::Cleaned
        } else if !self.mapped {
            UnitState::Unmapped
        } else if self.grid.is_wall(unit) {
            UnitState::Wall
        } else {
            UnitState::Mapped
        }
    }

    /// Robot marker cell (column, row), shown only during a run
    ///
    /// The robot waits at the centre while scanning and then follows the
    /// cleaning cursor.
    pub fn robot_cell(&self) -> Option<(u8, u8)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Scanning => Some(self.grid.centre()),
            Phase::Cleaning => {
                let unit = self.cursor.min(self.grid.len() - 1);
                Some(self.grid.position(unit))
            }
        }
    }

    fn slots(&self) -> [&TimerSlot; 3] {
        [&self.progress_ticker, &self.scan_timer, &self.unit_ticker]
    }

    fn cancel_all(&mut self) {
        self.progress_ticker.cancel();
        self.scan_timer.cancel();
        self.unit_ticker.cancel();
    }

    fn on_progress_tick(&mut self) {
        if self.progress >= PROGRESS_MAX {
            self.progress_ticker.cancel();
        } else {
            self.progress += 1;
        }
    }

    fn on_scan_elapsed(&mut self, at_ms: Millis) -> Option<Event> {
        self.mapped = true;
        self.phase = self.phase.transition(Event::ScanElapsed);
        self.unit_ticker.every(at_ms, self.timing.unit_interval_ms);
        Some(Event::ScanElapsed)
    }

    fn on_unit_tick(&mut self) -> Option<Event> {
        if self.cursor >= self.grid.len() {
            // Stop every timer, including a progress ticker that has not
            // reached 100 yet, so progress cannot climb while idle
            self.cancel_all();
            self.phase = self.phase.transition(Event::CleaningFinished);
            self.progress = 0;
            return Some(Event::CleaningFinished);
        }

        let unit = self.cursor;
        self.cursor += 1;

        if self.grid.is_wall(unit) {
            Some(Event::UnitSkipped(unit))
        } else {
            // Capacity is MAX_UNITS and the grid never exceeds it
            let _ = self.completed.push(unit);
            Some(Event::UnitCleaned(unit))
        }
    }
}

impl Animated for DemoSequencer {
    fn next_deadline(&self) -> Option<Millis> {
        next_deadline(&self.slots())
    }

    fn tick(&mut self, now_ms: Millis) -> Option<Event> {
        while let Some(slot) = earliest_due(&self.slots(), now_ms) {
            match slot {
                PROGRESS => {
                    self.progress_ticker.fire(now_ms);
                    self.on_progress_tick();
                }
                SCAN => {
                    let at_ms = self.scan_timer.fire(now_ms)?;
                    return self.on_scan_elapsed(at_ms);
                }
                UNIT => {
                    self.unit_ticker.fire(now_ms);
                    return self.on_unit_tick();
                }
                _ => unreachable!(),
            }
        }
        None
    }

    fn unmount(&mut self) {
        self.cancel_all();
        self.phase = self.phase.transition(Event::Unmounted);
        self.progress = 0;
    }
}
