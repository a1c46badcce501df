//! State machines and the events that drive them
//!
//! Both machines are explicit, finite and deterministic. Components own the
//! timers; the machines only decide which state follows an event.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Phase, View};
