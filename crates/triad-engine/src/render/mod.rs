//! GPU rendering resources.
//!
//! - `Vertex`: CPU-side vertex layout shared with the shaders
//! - `GeometryBuffer`: static vertex data uploaded once
//! - `ShaderProgram`: compiled + linked pipeline with a uniform fill color

mod geometry;
mod program;
mod vertex;

pub use geometry::GeometryBuffer;
pub use program::{ProgramDesc, ShaderProgram, SOLID_COLOR_WGSL};
pub use vertex::{vertex_bytes, Vertex};
