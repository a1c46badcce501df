//! Host-agnostic core logic for the ZBot showcase
//!
//! Everything here is a deterministic state machine driven by an external
//! millisecond clock. Nothing blocks, allocates or touches hardware:
//!
//! - Owned timer handles (`TimerSlot`) with explicit cancellation
//! - Room-mapping demo sequencer (scan, then clean a unit grid)
//! - Cleaning-stage carousel
//! - Loading screen, product tour, schedule editor and the site shell
//! - Configuration type definitions
//!
//! A host drives a component by calling `tick(now_ms)` until it returns
//! `None`, then sleeping until `next_deadline()`.

#![no_std]
#![deny(unsafe_code)]

pub mod carousel;
pub mod config;
pub mod sequencer;
pub mod site;
pub mod state;
pub mod timer;
pub mod traits;
