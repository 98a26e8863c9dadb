/// Errors from bringing up the GPU.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Instance, adapter, device and queue for one rendering thread.
pub struct GpuContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Device with no presentation surface, for offscreen rendering.
    pub fn headless() -> Result<Self, GpuError> {
        let instance = new_instance();
        Self::with_instance(instance, None)
    }

    /// Device compatible with a window surface.
    pub fn with_surface(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
    ) -> Result<(Self, wgpu::Surface<'static>), GpuError> {
        let instance = new_instance();
        let surface = instance.create_surface(target)?;
        let context = Self::with_instance(instance, Some(&surface))?;
        Ok((context, surface))
    }

    fn with_instance(
        instance: wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self, GpuError> {
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface,
            force_fallback_adapter: false,
        }))
        .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("fractalspace_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        device.on_uncaptured_error(Box::new(|error| {
            tracing::error!("wgpu error: {error}");
        }));

        let info = adapter.get_info();
        tracing::info!(
            adapter = %info.name,
            backend = info.backend.to_str(),
            "GPU initialized"
        );

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }

    /// Pick a non-sRGB surface format when offered, so shader output is
    /// written as-is like a default GL framebuffer.
    pub fn surface_format(&self, surface: &wgpu::Surface<'_>) -> Result<wgpu::TextureFormat, GpuError> {
        let caps = surface.get_capabilities(&self.adapter);
        caps.formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)
    }

    pub fn surface_config(
        &self,
        surface: &wgpu::Surface<'_>,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> wgpu::SurfaceConfiguration {
        let caps = surface.get_capabilities(&self.adapter);
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }
}

fn new_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}
