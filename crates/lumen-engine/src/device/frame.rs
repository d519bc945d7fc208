/// Surface texture, its view and a fresh encoder for one frame.
///
/// Created by `Gpu::begin_frame` and consumed by `Gpu::submit`, which presents the
/// texture. The next frame cannot be acquired while this one is alive.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
