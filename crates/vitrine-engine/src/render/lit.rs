use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::device::Gpu;
use crate::render::mesh::{GpuMesh, LitVertex, VertexKind};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{light, model, Light, Material};

use super::common::{binding_size, compile_shader, depth_state, uniform_layout, DrawUniforms};

/// One lit mesh instance for the current frame.
#[derive(Debug, Copy, Clone)]
pub struct LitDraw<'a> {
    pub mesh: &'a GpuMesh,
    pub model_view: Mat4,
    pub material: Material,
}

/// Renderer for meshes with normals, shaded with per-vertex Phong lighting.
///
/// Back faces are culled; meshes must wind counter-clockwise seen from outside.
pub struct LitRenderer {
    pipeline: wgpu::RenderPipeline,

    frame_ubo: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    draw_layout: wgpu::BindGroupLayout,
    draws: DrawUniforms,
    uniforms: Vec<DrawUniform>,
}

impl LitRenderer {
    /// Builds the pipeline for the surface and depth formats of `gpu`.
    ///
    /// Fails if the shader does not compile.
    pub fn new(gpu: &Gpu<'_>) -> Result<Self> {
        let device = gpu.device();
        let shader = compile_shader(device, "vitrine lit shader", include_str!("shaders/lit.wgsl"))?;

        let frame_layout = uniform_layout(
            device,
            "vitrine lit frame bgl",
            wgpu::ShaderStages::VERTEX,
            false,
            binding_size::<FrameUniform>(),
        );
        let draw_layout = uniform_layout(
            device,
            "vitrine lit draw bgl",
            wgpu::ShaderStages::VERTEX,
            true,
            binding_size::<DrawUniform>(),
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vitrine lit pipeline layout"),
            bind_group_layouts: &[&frame_layout, &draw_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vitrine lit pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[LitVertex::layout()],
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
                cull_mode: Some(wgpu::Face::Back),
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
            label: Some("vitrine lit frame ubo"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vitrine lit frame bind group"),
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
            draws: DrawUniforms::new::<DrawUniform>("vitrine lit draw ubo", device),
            draw_layout,
            uniforms: Vec::new(),
        })
    }

    /// Draws `draws` in order with one shared projection and light.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        projection: Mat4,
        light: &Light,
        draws: &[LitDraw<'_>],
    ) {
        self.uniforms.clear();
        self.uniforms.extend(draws.iter().map(DrawUniform::new));
        if self.uniforms.is_empty() {
            return;
        }

        ctx.queue.write_buffer(
            &self.frame_ubo,
            0,
            bytemuck::bytes_of(&FrameUniform::new(projection, light)),
        );

        self.draws.ensure_capacity(ctx.device, &self.draw_layout, self.uniforms.len());
        self.draws.write(ctx.queue, &self.uniforms);

        let Some(draw_bind_group) = self.draws.bind_group() else { return };

        let mut rpass = target.begin_load_pass("vitrine lit pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.frame_bind_group, &[]);

        for (i, draw) in draws.iter().enumerate() {
            if draw.mesh.kind() != VertexKind::Lit {
                log::warn!("lit renderer skipped a mesh uploaded without normals");
                continue;
            }
            rpass.set_bind_group(1, draw_bind_group, &[self.draws.offset(i)]);
            draw.mesh.bind(&mut rpass);
            rpass.draw_indexed(0..draw.mesh.index_count(), 0, 0..1);
        }
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Frame uniform (128 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniform {
    projection: [[f32; 4]; 4],
    light_position: [f32; 4],
    light_ambient: [f32; 4],
    light_diffuse: [f32; 4],
    light_specular: [f32; 4],
}

impl FrameUniform {
    fn new(projection: Mat4, l: &Light) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            light_position: light::position(l).to_array(),
            light_ambient: l.ambient.to_array(),
            light_diffuse: l.diffuse.to_array(),
            light_specular: l.specular.to_array(),
        }
    }
}

/// Per-draw uniform (192 bytes), addressed with a dynamic offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniform {
    model_view: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
    shininess: f32,
    _pad: [f32; 3],
}

impl DrawUniform {
    fn new(draw: &LitDraw<'_>) -> Self {
        let m = draw.material;
        Self {
            model_view: draw.model_view.to_cols_array_2d(),
            normal_matrix: model::normal_matrix(draw.model_view).to_cols_array_2d(),
            ambient: m.ambient.to_array(),
            diffuse: m.diffuse.to_array(),
            specular: m.specular.to_array(),
            shininess: m.shininess,
            _pad: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 128);
        assert_eq!(std::mem::size_of::<DrawUniform>(), 192);
    }

    #[test]
    fn frame_uniform_carries_light_position() {
        let u = FrameUniform::new(Mat4::IDENTITY, &Light::default());
        assert_eq!(u.light_position, [0.0, 0.0, -5.0, 1.0]);
        assert_eq!(u.light_ambient, [0.1, 0.1, 0.1, 1.0]);
    }
}
