//! Host abstraction traits
//!
//! These traits define the seam between the state machines and whatever
//! drives them (an async executor, a test harness, a browser event loop).

pub mod animated;
pub mod clock;

pub use animated::{drain, Animated};
pub use clock::{Clock, ManualClock};
