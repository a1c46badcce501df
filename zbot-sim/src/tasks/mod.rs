//! Embassy tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod display;
pub mod input;
pub mod site;

pub use display::display_task;
pub use input::{script_task, spawn_stdin_reader};
pub use site::site_task;
