/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: the demo shaders compute colors in display space, so
    /// their output is written unconverted.
    pub prefer_srgb: bool,

    /// Present mode. FIFO paces the loop to the display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode; falls back to the first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,

    /// Format of the depth buffer allocated alongside the surface.
    pub depth_format: wgpu::TextureFormat,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            depth_format: wgpu::TextureFormat::Depth32Float,
        }
    }
}
