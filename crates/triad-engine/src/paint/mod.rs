//! Color representation shared by the shell and renderers.

mod color;

pub use color::Color;
