//! Room-mapping demo
//!
//! A grid of units, a scan window, then a unit-by-unit cleaning pass.

pub mod executor;
pub mod grid;

pub use executor::{DemoSequencer, SequenceState, UnitState};
pub use grid::{Grid, UnitSet};
