//! Configuration type definitions
//!
//! With the `serde` feature every struct deserializes with per-field
//! defaults, so a partial TOML table is enough.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum units in the mapping grid
pub const MAX_UNITS: usize = 256;

/// Maximum stages the carousel can cycle through
pub const MAX_STAGES: usize = 8;

/// Progress value at which tickers stop counting
pub const PROGRESS_MAX: u8 = 100;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Grid has zero columns or rows
    EmptyGrid,
    /// Grid has more than `MAX_UNITS` units
    GridTooLarge,
    /// Wall index is outside the grid
    WallOutOfRange(u16),
    /// Carousel needs between 1 and `MAX_STAGES` stages
    InvalidStageCount(u8),
    /// A timer interval was zero
    ZeroInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyGrid => write!(f, "grid needs at least one column and one row"),
            ConfigError::GridTooLarge => write!(f, "grid has more than {} units", MAX_UNITS),
            ConfigError::WallOutOfRange(unit) => write!(f, "wall {} is outside the grid", unit),
            ConfigError::InvalidStageCount(n) => {
                write!(f, "carousel needs 1..={} stages, got {}", MAX_STAGES, n)
            }
            ConfigError::ZeroInterval => write!(f, "timer intervals must be non-zero"),
        }
    }
}

/// Mapping demo timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequencerTiming {
    /// Progress fill tick (ms); 100 ticks roughly match the scan window
    pub progress_tick_ms: u32,
    /// Scanning window before cleaning starts (ms)
    pub scan_duration_ms: u32,
    /// Time per unit during cleaning (ms)
    pub unit_interval_ms: u32,
}

impl Default for SequencerTiming {
    fn default() -> Self {
        Self {
            progress_tick_ms: 20,
            scan_duration_ms: 2000,
            unit_interval_ms: 50,
        }
    }
}

/// Mapping grid layout
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Columns
    pub cols: u8,
    /// Rows
    pub rows: u8,
    /// Unit indices that are walls (never cleaned)
    pub walls: Vec<u16, MAX_UNITS>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 6,
            rows: 6,
            walls: Vec::new(),
        }
    }
}

/// Stage carousel behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Automatic advance period (ms)
    pub interval_ms: u32,
    /// Re-phase the automatic timer when the user picks a stage
    ///
    /// Off by default: a manual pick can be overridden by the very next
    /// automatic tick.
    pub restart_on_select: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            restart_on_select: false,
        }
    }
}

/// Loading screen timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoaderTiming {
    /// Progress tick (ms)
    pub tick_ms: u32,
    /// Delay between reaching 100 and completion (ms)
    pub grace_ms: u32,
}

impl Default for LoaderTiming {
    fn default() -> Self {
        Self {
            tick_ms: 30,
            grace_ms: 500,
        }
    }
}

/// Site shell timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SiteTiming {
    /// Delay after loading before the product tour opens (ms)
    pub tour_prompt_ms: u32,
    /// How long "Schedule Updated" stays visible (ms)
    pub save_ack_ms: u32,
}

impl Default for SiteTiming {
    fn default() -> Self {
        Self {
            tour_prompt_ms: 2000,
            save_ack_ms: 3000,
        }
    }
}

/// Complete showcase configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShowcaseConfig {
    pub sequencer: SequencerTiming,
    pub grid: GridConfig,
    pub carousel: CarouselConfig,
    pub loader: LoaderTiming,
    pub site: SiteTiming,
}

impl ShowcaseConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            self.sequencer.progress_tick_ms,
            self.sequencer.scan_duration_ms,
            self.sequencer.unit_interval_ms,
            self.carousel.interval_ms,
            self.loader.tick_ms,
        ];
        if intervals.iter().any(|&ms| ms == 0) {
            return Err(ConfigError::ZeroInterval);
        }

        self.grid.validate()
    }
}

impl GridConfig {
    /// Total units (cols × rows)
    pub fn unit_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Check dimensions and wall indices
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let units = self.unit_count();
        if units > MAX_UNITS {
            return Err(ConfigError::GridTooLarge);
        }
        if let Some(&wall) = self.walls.iter().find(|&&w| w as usize >= units) {
            return Err(ConfigError::WallOutOfRange(wall));
        }
        Ok(())
    }
}
