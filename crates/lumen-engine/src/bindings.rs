//! Binding contract between host and shaders.
//!
//! | Resource | Group | Binding |
//! |---|---|---|
//! | Diffuse texture | 0 | 0 |
//! | Diffuse sampler | 0 | 1 |
//! | Camera uniform | 1 | 0 |
//! | Depth texture | 2 | 0 |
//! | Depth sampler | 2 | 1 |
//! | Render-mode uniform | 3 | 0 |
//! | Light uniform | 4 | 0 |
//!
//! Layout constructors come in pairs with bind-group constructors so a layout
//! and the groups created against it cannot drift apart.

use std::num::NonZeroU64;

use lumen_shade::{CameraUniform, LightUniform, RenderModeUniform};

/// A `@group(g) @binding(b)` slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Slot {
    pub group: u32,
    pub binding: u32,
}

impl Slot {
    #[inline]
    pub const fn new(group: u32, binding: u32) -> Self {
        Self { group, binding }
    }
}

pub const DIFFUSE_TEXTURE: Slot = Slot::new(0, 0);
pub const DIFFUSE_SAMPLER: Slot = Slot::new(0, 1);
pub const CAMERA: Slot = Slot::new(1, 0);
pub const DEPTH_TEXTURE: Slot = Slot::new(2, 0);
pub const DEPTH_SAMPLER: Slot = Slot::new(2, 1);
pub const RENDER_MODE: Slot = Slot::new(3, 0);
pub const LIGHT: Slot = Slot::new(4, 0);

// ── uniform sizes ─────────────────────────────────────────────────────────

/// Binding size of a uniform record. Fails to compile unless the record is a
/// non-zero multiple of 16 bytes.
const fn uniform_size<T>() -> NonZeroU64 {
    let size = size_of::<T>();
    assert!(size % 16 == 0, "uniform records must be a multiple of 16 bytes");
    match NonZeroU64::new(size as u64) {
        Some(size) => size,
        None => panic!("uniform records must not be empty"),
    }
}

pub const CAMERA_UNIFORM_SIZE: NonZeroU64 = uniform_size::<CameraUniform>();
pub const LIGHT_UNIFORM_SIZE: NonZeroU64 = uniform_size::<LightUniform>();
pub const RENDER_MODE_UNIFORM_SIZE: NonZeroU64 = uniform_size::<RenderModeUniform>();

fn uniform_entry(
    slot: Slot,
    visibility: wgpu::ShaderStages,
    size: NonZeroU64,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: slot.binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(size),
        },
        count: None,
    }
}

// ── group 0: diffuse ──────────────────────────────────────────────────────

pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lumen diffuse bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: DIFFUSE_TEXTURE.binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: DIFFUSE_SAMPLER.binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

pub fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("lumen diffuse bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: DIFFUSE_TEXTURE.binding,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: DIFFUSE_SAMPLER.binding,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

// ── group 1: camera ───────────────────────────────────────────────────────

pub fn camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lumen camera bgl"),
        entries: &[uniform_entry(CAMERA, wgpu::ShaderStages::VERTEX, CAMERA_UNIFORM_SIZE)],
    })
}

// ── group 2: depth ────────────────────────────────────────────────────────

/// The depth texture is read with `textureLoad`; the sampler is part of the
/// contract but must be non-filtering to be compatible with a depth texture.
pub fn depth_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lumen depth bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: DEPTH_TEXTURE.binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: DEPTH_SAMPLER.binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                count: None,
            },
        ],
    })
}

pub fn depth_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("lumen depth bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: DEPTH_TEXTURE.binding,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: DEPTH_SAMPLER.binding,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

// ── group 3: render mode ──────────────────────────────────────────────────

pub fn render_mode_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lumen render mode bgl"),
        entries: &[uniform_entry(
            RENDER_MODE,
            wgpu::ShaderStages::FRAGMENT,
            RENDER_MODE_UNIFORM_SIZE,
        )],
    })
}

// ── group 4: light ────────────────────────────────────────────────────────

pub fn light_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lumen light bgl"),
        entries: &[uniform_entry(
            LIGHT,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            LIGHT_UNIFORM_SIZE,
        )],
    })
}

// ── shared ────────────────────────────────────────────────────────────────

/// Bind group for the single-uniform layouts (camera, render mode, light).
pub fn uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

/// Placeholder layout for a group index a pipeline does not use.
pub fn empty_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lumen empty bgl"),
        entries: &[],
    })
}

pub fn empty_bind_group(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("lumen empty bind group"),
        layout,
        entries: &[],
    })
}
