//! Text-mode presentation for the ZBot showcase
//!
//! This crate provides:
//! - `DisplayBackend` trait for anything that can show rows of characters
//! - `Screen`, a fixed-size character buffer with per-row highlights
//! - `Renderer`, which turns component state from `zbot-core` into a `Screen`
//!
//! The renderer never reads the clock or touches timers. Hosts render after
//! every event and push the screen to a backend with `DisplayBackend::present`.

#![no_std]

pub mod backend;
pub mod renderer;
pub mod screen;

pub use backend::{DisplayBackend, DisplayError};
pub use renderer::Renderer;
pub use screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};
