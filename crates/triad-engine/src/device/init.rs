/// Parameters for creating the GPU context.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format if the surface offers one.
    pub prefer_srgb: bool,

    /// Presentation interval at startup: `0` presents immediately, anything
    /// else waits for vertical blank.
    pub swap_interval: u32,

    /// Adapter selection hint.
    pub power_preference: wgpu::PowerPreference,

    /// Write GPU debug messages to the log. Errors are counted either way.
    pub debug_output: bool,

    /// Requested surface alpha mode; falls back to a supported one.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Frame latency hint passed to the surface configuration.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Sets the startup swap interval from a vsync flag.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.swap_interval = u32::from(vsync);
        self
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            swap_interval: 0,
            power_preference: wgpu::PowerPreference::HighPerformance,
            debug_output: true,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_without_vsync() {
        let init = GpuInit::default();
        assert_eq!(init.swap_interval, 0);
        assert!(init.debug_output);
    }

    #[test]
    fn vsync_flag_maps_to_interval() {
        assert_eq!(GpuInit::default().with_vsync(true).swap_interval, 1);
        assert_eq!(GpuInit::default().with_vsync(false).swap_interval, 0);
    }
}
