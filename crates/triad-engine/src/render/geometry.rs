use wgpu::util::DeviceExt;

use crate::device::InitError;

use super::vertex::{vertex_bytes, Vertex};

/// Static vertex data resident on the GPU.
///
/// Uploaded once at creation and never written again.
pub struct GeometryBuffer {
    vbo: wgpu::Buffer,
    vertex_count: u32,
}

impl GeometryBuffer {
    pub fn new(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Result<Self, InitError> {
        let vertex_count = draw_count(vertices.len())?;

        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: vertex_bytes(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!("{label}: uploaded {vertex_count} vertices ({} bytes)", vbo.size());

        Ok(Self { vbo, vertex_count })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Size of the GPU allocation in bytes.
    pub fn byte_size(&self) -> u64 {
        self.vbo.size()
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.vbo
    }
}

/// Draw ranges are `u32`; larger vertex sets cannot be drawn in one call.
fn draw_count(len: usize) -> Result<u32, InitError> {
    u32::try_from(len).map_err(|_| InitError::GeometryTooLarge { vertices: len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_count_fits_u32() {
        assert_eq!(draw_count(3).ok(), Some(3));
        assert_eq!(draw_count(u32::MAX as usize).ok(), Some(u32::MAX));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_geometry_is_rejected() {
        let len = u32::MAX as usize + 1;
        assert!(matches!(
            draw_count(len),
            Err(InitError::GeometryTooLarge { vertices }) if vertices == len
        ));
    }
}
