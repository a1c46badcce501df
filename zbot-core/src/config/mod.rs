//! Configuration types
//!
//! Timing and layout for every component. All fields have defaults matching
//! the shipped page, so hosts only override what they need.

pub mod types;

pub use types::*;
