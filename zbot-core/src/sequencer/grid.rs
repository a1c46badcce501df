//! Mapping grid
//!
//! A fixed rectangle of units, numbered row-major from the top-left. Walls
//! are permanent and never cleaned.

use crate::config::{ConfigError, GridConfig, MAX_UNITS};

const WORDS: usize = MAX_UNITS / 64;

/// Set of unit indices, iterated in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnitSet {
    bits: [u64; WORDS],
}

impl UnitSet {
    /// Empty set
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Add a unit; indices past `MAX_UNITS` are ignored
    pub fn insert(&mut self, unit: u16) {
        let unit = unit as usize;
        if unit < MAX_UNITS {
            self.bits[unit / 64] |= 1 << (unit % 64);
        }
    }

    /// Check membership
    pub fn contains(&self, unit: u16) -> bool {
        let unit = unit as usize;
        unit < MAX_UNITS && self.bits[unit / 64] & (1 << (unit % 64)) != 0
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..MAX_UNITS as u16).filter(move |&u| self.contains(u))
    }
}

impl FromIterator<u16> for UnitSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut set = Self::new();
        for unit in iter {
            set.insert(unit);
        }
        set
    }
}

/// The demo room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grid {
    cols: u8,
    rows: u8,
    walls: UnitSet,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cols: 6,
            rows: 6,
            walls: UnitSet::new(),
        }
    }
}

impl Grid {
    /// Create an open grid with no walls
    pub fn new(cols: u8, rows: u8) -> Result<Self, ConfigError> {
        Self::with_walls(cols, rows, core::iter::empty())
    }

    /// Create a grid with walls at the given unit indices
    pub fn with_walls<I>(cols: u8, rows: u8, walls: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = u16>,
    {
        if cols == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let units = cols as usize * rows as usize;
        if units > MAX_UNITS {
            return Err(ConfigError::GridTooLarge);
        }

        let mut set = UnitSet::new();
        for wall in walls {
            if wall as usize >= units {
                return Err(ConfigError::WallOutOfRange(wall));
            }
            set.insert(wall);
        }

        Ok(Self {
            cols,
            rows,
            walls: set,
        })
    }

    /// Build from configuration
    pub fn from_config(config: &GridConfig) -> Result<Self, ConfigError> {
        Self::with_walls(config.cols, config.rows, config.walls.iter().copied())
    }

    /// Total units
    pub fn len(&self) -> u16 {
        self.cols as u16 * self.rows as u16
    }

    /// Always false; a grid has at least one unit
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Check if a unit is a wall
    pub fn is_wall(&self, unit: u16) -> bool {
        self.walls.contains(unit)
    }

    /// Wall units
    pub fn walls(&self) -> &UnitSet {
        &self.walls
    }

    /// Number of units the robot will clean
    pub fn cleanable_count(&self) -> u16 {
        self.len() - self.walls.len() as u16
    }

    /// Cleanable units in visiting order
    pub fn cleanable(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.len()).filter(move |&u| !self.is_wall(u))
    }

    /// (column, row) of a unit
    pub fn position(&self, unit: u16) -> (u8, u8) {
        let cols = self.cols as u16;
        ((unit % cols) as u8, (unit / cols) as u8)
    }

    /// Unit at (column, row), if inside the grid
    pub fn unit_at(&self, col: u8, row: u8) -> Option<u16> {
        if col < self.cols && row < self.rows {
            Some(row as u16 * self.cols as u16 + col as u16)
        } else {
            None
        }
    }

    /// Centre cell, where the robot sits while scanning
    pub fn centre(&self) -> (u8, u8) {
        (self.cols / 2, self.rows / 2)
    }
}
