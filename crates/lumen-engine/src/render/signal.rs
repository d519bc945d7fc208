use crate::render::{RenderCtx, RenderTarget};

use super::uniform::{SignalUniform, SIGNAL_UNIFORM_SIZE};

const SHADER_SRC: &str = include_str!("shaders/signal.wgsl");

/// Full-screen signal renderer.
///
/// Owns one pipeline, one 16-byte uniform buffer and the bind group tying them
/// together. Everything is created in [`SignalRenderer::new`] and reused for every
/// frame; the bind group is cached since the buffer never changes identity.
///
/// The shader synthesizes a full-screen triangle from the vertex index, so no
/// vertex or index buffers exist.
pub struct SignalRenderer {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    clear: wgpu::Color,
}

impl SignalRenderer {
    /// Builds the pipeline and uniform resources for `format`.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lumen signal shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SRC.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen signal bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(SignalUniform::min_binding_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lumen signal pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lumen signal pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen signal ubo"),
            size: SIGNAL_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen signal bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::debug!("signal pipeline created for {format:?}");

        Self {
            format,
            pipeline,
            uniform_buffer,
            bind_group,
            clear: wgpu::Color::BLACK,
        }
    }

    /// Color target format the pipeline was built for.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// `true` if the pipeline can draw into a surface of `format`.
    pub fn targets(&self, format: wgpu::TextureFormat) -> bool {
        self.format == format
    }

    /// Uploads `uniform` and records the clear + single draw into `target`.
    ///
    /// Each call rewrites the whole uniform block and records a self-contained
    /// pass, so a skipped frame leaves nothing behind for the next one. Nothing is
    /// recorded when the surface format no longer matches the pipeline.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, uniform: SignalUniform) {
        if !self.targets(ctx.surface_format) {
            log::warn!(
                "surface format {:?} does not match pipeline format {:?}; frame not drawn",
                ctx.surface_format,
                self.format
            );
            return;
        }

        ctx.queue.write_buffer(&self.uniform_buffer, 0, uniform.as_bytes());

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen signal pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_declares_both_entry_points_and_binding() {
        assert!(SHADER_SRC.contains("fn vs_main"));
        assert!(SHADER_SRC.contains("fn fs_main"));
        assert!(SHADER_SRC.contains("@group(0) @binding(0)"));
    }

    #[test]
    fn builds_on_headless_device_when_available() {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let init = crate::device::GpuInit::default();

        // Skipped silently on machines without an adapter.
        let Ok((_adapter, device, _queue)) =
            pollster::block_on(crate::device::acquire_device(&instance, None, &init))
        else {
            return;
        };

        let renderer = SignalRenderer::new(&device, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(renderer.format(), wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(renderer.uniform_buffer.size(), SIGNAL_UNIFORM_SIZE);
    }

    #[test]
    fn only_targets_its_own_format() {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let init = crate::device::GpuInit::default();

        let Ok((_adapter, device, _queue)) =
            pollster::block_on(crate::device::acquire_device(&instance, None, &init))
        else {
            return;
        };

        let renderer = SignalRenderer::new(&device, wgpu::TextureFormat::Rgba8Unorm);
        assert!(renderer.targets(wgpu::TextureFormat::Rgba8Unorm));
        assert!(!renderer.targets(wgpu::TextureFormat::Bgra8UnormSrgb));
    }
}
