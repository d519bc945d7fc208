/// Per-frame state a renderer needs while recording.
pub struct RenderCtx<'a> {
    pub queue: &'a wgpu::Queue,
    /// Format of the surface texture being drawn this frame.
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    pub fn new(queue: &'a wgpu::Queue, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            queue,
            surface_format,
        }
    }
}

/// Where the current frame is recorded: the frame's encoder and the surface view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self {
            encoder,
            color_view,
        }
    }
}
