//! Triad engine crate.
//!
//! Platform and GPU runtime pieces for a single-window render loop: window and
//! event handling (winit), GPU context and resources (wgpu), frame timing and
//! logging setup.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
