/// Knobs for bringing up the device and surface.
///
/// The defaults suit the signal view: vsync-paced presentation, no optional
/// features, and the adapter's own preferred surface format.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick `Bgra8UnormSrgb`/`Rgba8UnormSrgb` over the adapter's first format.
    pub prefer_srgb: bool,

    /// `Fifo` ties frame pacing to the display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Requested compositing alpha. Falls back to the first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Frames the surface may queue ahead (a hint; backends may ignore it).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: Some(wgpu::CompositeAlphaMode::PreMultiplied),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
