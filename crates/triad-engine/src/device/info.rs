use std::fmt;

/// Context capability class, the wgpu analogue of a GL core/compatibility profile.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ContextProfile {
    /// Adapter meets the full WebGPU baseline.
    Core,
    /// Adapter runs with downlevel restrictions (GLES, old D3D/Vulkan drivers).
    Compatibility,
}

impl fmt::Display for ContextProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextProfile::Core => f.write_str("Core profile"),
            ContextProfile::Compatibility => f.write_str("Compatibility profile"),
        }
    }
}

/// Human-readable adapter description, captured once at device creation.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shading_language: String,
    pub backend: wgpu::Backend,
    pub profile: ContextProfile,
}

impl GpuInfo {
    pub(crate) fn query(adapter: &wgpu::Adapter) -> Self {
        let info = adapter.get_info();
        let downlevel = adapter.get_downlevel_capabilities();

        let profile = if downlevel.is_webgpu_compliant() {
            ContextProfile::Core
        } else {
            ContextProfile::Compatibility
        };

        Self {
            vendor: vendor_name(info.vendor),
            renderer: info.name.clone(),
            version: driver_version(&info),
            shading_language: format!("WGSL ({:?})", downlevel.shader_model),
            backend: info.backend,
            profile,
        }
    }

    /// Writes the adapter description to the log, one field per line.
    pub fn log(&self) {
        log::info!("Backend is: {:?}", self.backend);
        log::info!("Vendor is: {}", self.vendor);
        log::info!("Renderer is: {}", self.renderer);
        log::info!("VERSION is: {}", self.version);
        log::info!("LANGUAGE_VERSION is: {}", self.shading_language);
    }
}

/// Maps a PCI vendor id to a vendor name.
pub(crate) fn vendor_name(id: u32) -> String {
    let name = match id {
        0x10DE => "NVIDIA",
        0x1002 | 0x1022 => "AMD",
        0x8086 => "Intel",
        0x106B => "Apple",
        0x13B5 => "ARM",
        0x5143 => "Qualcomm",
        0x1010 => "Imagination Technologies",
        0x10005 => "Mesa",
        _ => return format!("0x{id:04X}"),
    };
    name.to_string()
}

fn driver_version(info: &wgpu::AdapterInfo) -> String {
    let joined = format!("{} {}", info.driver, info.driver_info);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        format!("{:?} (driver unreported)", info.backend)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vendors_are_named() {
        assert_eq!(vendor_name(0x10DE), "NVIDIA");
        assert_eq!(vendor_name(0x8086), "Intel");
        assert_eq!(vendor_name(0x1002), "AMD");
    }

    #[test]
    fn unknown_vendor_is_hex() {
        assert_eq!(vendor_name(0xBEEF), "0xBEEF");
        assert_eq!(vendor_name(0x1), "0x0001");
    }

    #[test]
    fn profile_display() {
        assert_eq!(ContextProfile::Core.to_string(), "Core profile");
        assert_eq!(ContextProfile::Compatibility.to_string(), "Compatibility profile");
    }
}
