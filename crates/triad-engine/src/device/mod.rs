//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its present mode
//! - describing the adapter and routing device errors to the debug channel
//! - acquiring frames and providing encoders/views for rendering

mod debug;
mod error;
mod frame;
mod gpu;
mod info;
mod init;
mod surface;

pub use debug::{DebugChannel, DebugMessage, DebugSeverity, DebugSource, DebugType};
pub use error::InitError;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use info::{ContextProfile, GpuInfo};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
