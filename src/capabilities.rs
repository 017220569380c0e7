//! GPU capability detection.
//!
//! The engine degrades to CPU-only effect state when no adapter is
//! available, so callers probe capabilities once at startup and pick a
//! transition preset accordingly.

/// What the host GPU can do. All zeros/empty when no adapter exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceCapabilities {
    /// Whether a usable GPU adapter was found.
    pub supports_gpu: bool,
    /// Maximum 2D texture dimension.
    pub max_texture_size: u32,
    /// Maximum buffer size in bytes.
    pub max_buffer_size: u64,
    /// Adapter name as reported by the driver.
    pub renderer: String,
    /// Driver/vendor description.
    pub vendor: String,
    /// Graphics backend in use (Vulkan, Metal, ...).
    pub backend: String,
}

impl DeviceCapabilities {
    /// Capabilities of a host with no GPU.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Probe the host GPU. Falls back to [`none`](Self::none) when no
    /// adapter is available or the crate was built without the `gpu`
    /// feature.
    #[must_use]
    #[cfg(feature = "gpu")]
    pub fn detect() -> Self {
        let instance = wgpu::Instance::default();
        let adapter = match pollster::block_on(instance.request_adapter(
            &wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            },
        )) {
            Ok(adapter) => adapter,
            Err(err) => {
                log::warn!("no GPU adapter available: {err}");
                return Self::none();
            }
        };

        let info = adapter.get_info();
        let limits = adapter.limits();
        Self {
            supports_gpu: true,
            max_texture_size: limits.max_texture_dimension_2d,
            max_buffer_size: limits.max_buffer_size,
            renderer: info.name,
            vendor: info.driver,
            backend: info.backend.to_string(),
        }
    }

    /// Probe the host GPU. Falls back to [`none`](Self::none) when no
    /// adapter is available or the crate was built without the `gpu`
    /// feature.
    #[must_use]
    #[cfg(not(feature = "gpu"))]
    pub fn detect() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_reports_no_support() {
        let caps = DeviceCapabilities::none();
        assert!(!caps.supports_gpu);
        assert_eq!(caps.max_texture_size, 0);
        assert!(caps.renderer.is_empty());
    }

    #[test]
    fn test_detect_is_consistent() {
        let caps = DeviceCapabilities::detect();
        if caps.supports_gpu {
            assert!(caps.max_texture_size > 0);
        } else {
            assert_eq!(caps, DeviceCapabilities::none());
        }
    }
}
