use winit::dpi::LogicalSize;

use triad_engine::device::GpuInit;
use triad_engine::input::Key;
use triad_engine::paint::Color;
use triad_engine::render::SOLID_COLOR_WGSL;
use triad_engine::window::RuntimeConfig;

/// Compiled-in shell configuration.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub title: String,
    pub size: LogicalSize<f64>,

    /// Wait for vblank on present. Toggled at runtime with `vsync_key`.
    pub vsync: bool,

    /// Raises the window close flag.
    pub close_key: Key,
    pub vsync_key: Key,

    pub clear_color: Color,
    /// Uniform fill color of the triangle.
    pub fill_color: Color,

    /// WGSL program source (`vs_main` / `fs_main`).
    pub shader_source: &'static str,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "triad".to_string(),
            size: LogicalSize::new(800.0, 600.0),
            vsync: false,
            close_key: Key::Escape,
            vsync_key: Key::Letter('V'),
            clear_color: Color::BLACK,
            fill_color: Color::WHITE,
            shader_source: SOLID_COLOR_WGSL,
        }
    }
}

impl ShellConfig {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: self.size,
            ..RuntimeConfig::default()
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit::default().with_vsync(self.vsync)
    }
}

/// GL-style swap interval for a vsync flag.
pub fn swap_interval(vsync: bool) -> u32 {
    if vsync { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bootstrap_window() {
        let cfg = ShellConfig::default();
        assert_eq!(cfg.size, LogicalSize::new(800.0, 600.0));
        assert!(!cfg.vsync);
        assert_eq!(cfg.gpu_init().swap_interval, 0);
        assert_eq!(cfg.runtime_config().title, "triad");
    }

    #[test]
    fn vsync_maps_to_interval_one() {
        assert_eq!(swap_interval(true), 1);
        assert_eq!(swap_interval(false), 0);
    }
}
