use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use vitrine_mesh::Mesh;

/// Vertex layout of the lit pipeline (24 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl LitVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LitVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Vertex layout of the flat pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct FlatVertex {
    pub position: [f32; 3],
}

impl FlatVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FlatVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Which vertex layout a [`GpuMesh`] was uploaded with.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VertexKind {
    /// Position + normal, for `LitRenderer`.
    Lit,
    /// Position only, for `FlatRenderer`.
    Flat,
}

/// Immutable GPU copy of a [`Mesh`].
///
/// Buffers are written once at upload and never touched again.
#[derive(Debug)]
pub struct GpuMesh {
    kind: VertexKind,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Uploads `mesh` with positions and normals.
    ///
    /// Fails if the mesh carries no normals.
    pub fn upload_lit(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Result<Self> {
        let vertices = lit_vertices(mesh).with_context(|| format!("mesh `{label}` has no normals"))?;
        Ok(Self::upload(device, label, VertexKind::Lit, bytemuck::cast_slice(&vertices), &mesh.indices))
    }

    /// Uploads `mesh` positions only; normals, if any, are ignored.
    pub fn upload_flat(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertices = flat_vertices(mesh);
        Self::upload(device, label, VertexKind::Flat, bytemuck::cast_slice(&vertices), &mesh.indices)
    }

    fn upload(
        device: &wgpu::Device,
        label: &str,
        kind: VertexKind,
        vertex_bytes: &[u8],
        indices: &[u32],
    ) -> Self {
        log::debug!("uploading mesh `{label}`: {} bytes, {} indices", vertex_bytes.len(), indices.len());

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("vitrine {label} vbo")),
            contents: vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("vitrine {label} ibo")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            kind,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    #[inline]
    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub(crate) fn bind<'p>(&self, rpass: &mut wgpu::RenderPass<'p>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }
}

fn lit_vertices(mesh: &Mesh) -> Option<Vec<LitVertex>> {
    let normals = mesh.normals.as_ref()?;
    Some(
        mesh.positions
            .iter()
            .zip(normals)
            .map(|(p, n)| LitVertex { position: p.to_array(), normal: n.to_array() })
            .collect(),
    )
}

fn flat_vertices(mesh: &Mesh) -> Vec<FlatVertex> {
    mesh.positions.iter().map(|p| FlatVertex { position: p.to_array() }).collect()
}
