//! Shared helpers for the mesh renderers.

use anyhow::{bail, Result};

// ── shaders ───────────────────────────────────────────────────────────────

/// Compiles a WGSL module and fails with every error the compiler reported.
pub(super) fn compile_shader(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let info = pollster::block_on(module.get_compilation_info());
    let errors: Vec<String> = info
        .messages
        .iter()
        .filter(|m| m.message_type == wgpu::CompilationMessageType::Error)
        .map(format_message)
        .collect();

    for warning in info
        .messages
        .iter()
        .filter(|m| m.message_type == wgpu::CompilationMessageType::Warning)
    {
        log::warn!("{label}: {}", format_message(warning));
    }

    if !errors.is_empty() {
        bail!("failed to compile {label}:\n{}", errors.join("\n"));
    }

    log::debug!("compiled {label}");
    Ok(module)
}

fn format_message(m: &wgpu::CompilationMessage) -> String {
    match &m.location {
        Some(loc) => format!("line {}:{}: {}", loc.line_number, loc.line_position, m.message),
        None => m.message.clone(),
    }
}

// ── depth ─────────────────────────────────────────────────────────────────

pub(super) fn depth_state(format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

// ── bind group layouts ────────────────────────────────────────────────────

/// Layout with a single uniform buffer at binding 0.
pub(super) fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
    has_dynamic_offset: bool,
    min_binding_size: Option<std::num::NonZeroU64>,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset,
                min_binding_size,
            },
            count: None,
        }],
    })
}

// ── dynamic uniforms ──────────────────────────────────────────────────────

/// Rounds `size` up to the device's dynamic-offset alignment.
pub(super) fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Slot count to allocate when `required` draws no longer fit.
pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

/// Minimum binding size for a uniform struct `T`.
pub(super) fn binding_size<T>() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

/// Per-draw uniform slots addressed with dynamic offsets.
///
/// The buffer grows to the next power of two and is rebuilt together with its
/// bind group; contents are rewritten every frame.
pub(super) struct DrawUniforms {
    label: &'static str,
    item_size: u64,
    stride: u64,
    capacity: usize,
    buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
    staging: Vec<u8>,
}

impl DrawUniforms {
    pub(super) fn new<T>(label: &'static str, device: &wgpu::Device) -> Self {
        let item_size = std::mem::size_of::<T>() as u64;
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        Self {
            label,
            item_size,
            stride: aligned_stride(item_size, alignment),
            capacity: 0,
            buffer: None,
            bind_group: None,
            staging: Vec::new(),
        }
    }

    pub(super) fn ensure_capacity(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        required: usize,
    ) {
        if required <= self.capacity && self.bind_group.is_some() {
            return;
        }

        let new_cap = grown_capacity(required);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: new_cap as u64 * self.stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(self.label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: std::num::NonZeroU64::new(self.item_size),
                }),
            }],
        });

        log::debug!("{}: grew to {new_cap} slots", self.label);
        self.capacity = new_cap;
        self.buffer = Some(buffer);
        self.bind_group = Some(bind_group);
    }

    /// Packs `items` at `stride` intervals and uploads them in one write.
    pub(super) fn write<T: bytemuck::Pod>(&mut self, queue: &wgpu::Queue, items: &[T]) {
        let Some(buffer) = self.buffer.as_ref() else { return };

        let stride = self.stride as usize;
        self.staging.clear();
        self.staging.resize(items.len() * stride, 0);
        for (slot, item) in self.staging.chunks_exact_mut(stride).zip(items) {
            let bytes = bytemuck::bytes_of(item);
            slot[..bytes.len()].copy_from_slice(bytes);
        }

        if !self.staging.is_empty() {
            queue.write_buffer(buffer, 0, &self.staging);
        }
    }

    pub(super) fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }

    /// Dynamic offset of slot `i`.
    pub(super) fn offset(&self, i: usize) -> u32 {
        (i as u64 * self.stride) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── aligned_stride ────────────────────────────────────────────────────

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(aligned_stride(192, 256), 256);
        assert_eq!(aligned_stride(80, 256), 256);
        assert_eq!(aligned_stride(300, 256), 512);
    }

    #[test]
    fn aligned_size_is_kept() {
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(192, 64), 192);
    }

    #[test]
    fn zero_alignment_is_treated_as_one() {
        assert_eq!(aligned_stride(80, 0), 80);
    }

    // ── grown_capacity ────────────────────────────────────────────────────

    #[test]
    fn capacity_has_a_floor() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(11), 64);
    }

    #[test]
    fn capacity_grows_to_power_of_two() {
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }
}
