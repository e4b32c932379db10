//! Time subsystem.
//!
//! Frame timing utilities that take explicit timestamps, so they can be driven
//! by the runtime in production and by synthetic instants in tests.

mod fps;
mod frame_clock;

pub use fps::{FpsCounter, FpsReport};
pub use frame_clock::{FrameClock, FrameTime};
