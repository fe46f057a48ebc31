use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::device::Gpu;
use crate::paint::Color;
use crate::render::mesh::{FlatVertex, GpuMesh};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{binding_size, compile_shader, depth_state, uniform_layout, DrawUniforms};

/// One flat-colored mesh instance for the current frame.
#[derive(Debug, Copy, Clone)]
pub struct FlatDraw<'a> {
    pub mesh: &'a GpuMesh,
    pub model_view: Mat4,
    pub color: Color,
}

/// Renderer for single-color meshes without lighting.
///
/// Culling is off: strips with alternating winding draw both faces.
pub struct FlatRenderer {
    pipeline: wgpu::RenderPipeline,

    frame_ubo: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    draw_layout: wgpu::BindGroupLayout,
    draws: DrawUniforms,
    uniforms: Vec<DrawUniform>,
}

impl FlatRenderer {
    /// Builds the pipeline for the surface and depth formats of `gpu`.
    ///
    /// Fails if the shader does not compile.
    pub fn new(gpu: &Gpu<'_>) -> Result<Self> {
        let device = gpu.device();
        let shader =
            compile_shader(device, "vitrine flat shader", include_str!("shaders/flat.wgsl"))?;

        let frame_layout = uniform_layout(
            device,
            "vitrine flat frame bgl",
            wgpu::ShaderStages::VERTEX,
            false,
            binding_size::<FrameUniform>(),
        );
        let draw_layout = uniform_layout(
            device,
            "vitrine flat draw bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            true,
            binding_size::<DrawUniform>(),
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vitrine flat pipeline layout"),
            bind_group_layouts: &[&frame_layout, &draw_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vitrine flat pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[FlatVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
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
            depth_stencil: Some(depth_state(gpu.depth_format())),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let frame_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vitrine flat frame ubo"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vitrine flat frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_ubo.as_entire_binding(),
            }],
        });

        Ok(Self {
            pipeline,
            frame_ubo,
            frame_bind_group,
            draws: DrawUniforms::new::<DrawUniform>("vitrine flat draw ubo", device),
            draw_layout,
            uniforms: Vec::new(),
        })
    }

    /// Draws `draws` in order with one shared projection.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        projection: Mat4,
        draws: &[FlatDraw<'_>],
    ) {
        self.uniforms.clear();
        self.uniforms.extend(draws.iter().map(DrawUniform::new));
        if self.uniforms.is_empty() {
            return;
        }

        ctx.queue.write_buffer(
            &self.frame_ubo,
            0,
            bytemuck::bytes_of(&FrameUniform { projection: projection.to_cols_array_2d() }),
        );

        self.draws.ensure_capacity(ctx.device, &self.draw_layout, self.uniforms.len());
        self.draws.write(ctx.queue, &self.uniforms);

        let Some(draw_bind_group) = self.draws.bind_group() else { return };

        let mut rpass = target.begin_load_pass("vitrine flat pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.frame_bind_group, &[]);

        for (i, draw) in draws.iter().enumerate() {
            rpass.set_bind_group(1, draw_bind_group, &[self.draws.offset(i)]);
            draw.mesh.bind(&mut rpass);
            rpass.draw_indexed(0..draw.mesh.index_count(), 0, 0..1);
        }
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniform {
    projection: [[f32; 4]; 4],
}

/// Per-draw uniform (80 bytes), addressed with a dynamic offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniform {
    model_view: [[f32; 4]; 4],
    color: [f32; 4],
}

impl DrawUniform {
    fn new(draw: &FlatDraw<'_>) -> Self {
        Self {
            model_view: draw.model_view.to_cols_array_2d(),
            color: draw.color.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 64);
        assert_eq!(std::mem::size_of::<DrawUniform>(), 80);
    }
}
