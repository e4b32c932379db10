use winit::dpi::PhysicalSize;

/// Rasterization viewport in physical pixels.
///
/// Origin is the top-left corner of the render target.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Full-target viewport for a framebuffer of `width` x `height`.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Restricts the viewport to a target of the given size.
    ///
    /// wgpu rejects viewports that extend past the render target, which can
    /// happen for one frame between a resize event and the next reconfigure.
    pub fn clamped_to(self, target: PhysicalSize<u32>) -> Self {
        let tw = target.width as f32;
        let th = target.height as f32;
        let x = self.x.clamp(0.0, tw);
        let y = self.y.clamp(0.0, th);
        Self {
            x,
            y,
            width: self.width.clamp(0.0, tw - x),
            height: self.height.clamp(0.0, th - y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_size_starts_at_origin() {
        assert_eq!(Viewport::from_size(400, 300), Viewport::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn clamping_keeps_viewport_inside_target() {
        let vp = Viewport::from_size(1024, 768).clamped_to(PhysicalSize::new(800, 600));
        assert_eq!(vp, Viewport::new(0.0, 0.0, 800.0, 600.0));

        let inside = Viewport::from_size(400, 300);
        assert_eq!(inside.clamped_to(PhysicalSize::new(800, 600)), inside);
    }

    #[test]
    fn zero_area_is_empty() {
        assert!(Viewport::from_size(0, 300).is_empty());
        assert!(Viewport::default().is_empty());
        assert!(!Viewport::from_size(1, 1).is_empty());
    }
}
