//! Render pipelines, one per shading variant.
//!
//! A variant fixes the WGSL module, the vertex buffers and the bind-group
//! layouts. `VariantPipeline::new` checks those against the contract before
//! handing anything to wgpu.

use lumen_shade::{ColorVertex, InstanceRaw, LitVertex, TexturedVertex};

use crate::bindings::{self, Slot};
use crate::contract::{self, ContractError};
use crate::layout::VertexLayout;
use crate::shaders;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PipelineVariant {
    /// Procedural triangle from the vertex index, constant color.
    Triangle,
    /// Per-vertex color, positions already in clip space.
    FlatColor,
    /// Camera-projected, diffuse-textured geometry.
    Textured,
    /// Instanced, lit geometry with render-mode dispatch.
    Lit,
    /// The lit vertex stage with no fragment stage; writes depth only.
    DepthPrepass,
}

impl PipelineVariant {
    pub const ALL: [Self; 5] = [
        Self::Triangle,
        Self::FlatColor,
        Self::Textured,
        Self::Lit,
        Self::DepthPrepass,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Triangle => "lumen triangle",
            Self::FlatColor => "lumen flat color",
            Self::Textured => "lumen textured",
            Self::Lit => "lumen lit",
            Self::DepthPrepass => "lumen depth prepass",
        }
    }

    pub const fn has_fragment_stage(self) -> bool {
        !matches!(self, Self::DepthPrepass)
    }

    pub const fn requires_depth(self) -> bool {
        matches!(self, Self::DepthPrepass)
    }

    /// Resource slots the variant's shader declares.
    pub fn resource_slots(self) -> &'static [Slot] {
        match self {
            Self::Triangle | Self::FlatColor => &[],
            Self::Textured => &[
                bindings::DIFFUSE_TEXTURE,
                bindings::DIFFUSE_SAMPLER,
                bindings::CAMERA,
            ],
            Self::Lit => &[
                bindings::DIFFUSE_TEXTURE,
                bindings::DIFFUSE_SAMPLER,
                bindings::CAMERA,
                bindings::DEPTH_TEXTURE,
                bindings::DEPTH_SAMPLER,
                bindings::RENDER_MODE,
                bindings::LIGHT,
            ],
            Self::DepthPrepass => &[bindings::CAMERA],
        }
    }

    /// Number of bind-group layouts in the pipeline layout.
    ///
    /// The pre-pass keeps group 0 as an empty placeholder so the camera stays
    /// at group 1, where the lit vertex stage reads it.
    pub const fn bind_group_count(self) -> usize {
        match self {
            Self::Triangle | Self::FlatColor => 0,
            Self::Textured | Self::DepthPrepass => 2,
            Self::Lit => 5,
        }
    }

    pub fn vertex_buffers(self) -> Vec<wgpu::VertexBufferLayout<'static>> {
        match self {
            Self::Triangle => Vec::new(),
            Self::FlatColor => vec![ColorVertex::layout()],
            Self::Textured => vec![TexturedVertex::layout()],
            Self::Lit | Self::DepthPrepass => vec![LitVertex::layout(), InstanceRaw::layout()],
        }
    }

    /// Creates the bind-group layouts of the variant, in group order.
    pub fn bind_group_layouts(self, device: &wgpu::Device) -> Vec<wgpu::BindGroupLayout> {
        match self {
            Self::Triangle | Self::FlatColor => Vec::new(),
            Self::Textured => vec![
                bindings::texture_bind_group_layout(device),
                bindings::camera_bind_group_layout(device),
            ],
            Self::Lit => vec![
                bindings::texture_bind_group_layout(device),
                bindings::camera_bind_group_layout(device),
                bindings::depth_bind_group_layout(device),
                bindings::render_mode_bind_group_layout(device),
                bindings::light_bind_group_layout(device),
            ],
            Self::DepthPrepass => vec![
                bindings::empty_bind_group_layout(device),
                bindings::camera_bind_group_layout(device),
            ],
        }
    }
}

/// Attachment formats and rasterizer state a pipeline is built for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderTargets {
    pub color_format: wgpu::TextureFormat,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub cull_mode: Option<wgpu::Face>,
}

impl RenderTargets {
    #[inline]
    pub fn new(color_format: wgpu::TextureFormat, depth_format: Option<wgpu::TextureFormat>) -> Self {
        Self {
            color_format,
            depth_format,
            ..Self::default()
        }
    }
}

impl Default for RenderTargets {
    fn default() -> Self {
        Self {
            color_format: wgpu::TextureFormat::Rgba8UnormSrgb,
            depth_format: Some(crate::texture::DEPTH_FORMAT),
            cull_mode: Some(wgpu::Face::Back),
        }
    }
}

/// A built pipeline together with the bind-group layouts it was built from.
pub struct VariantPipeline {
    variant: PipelineVariant,
    pipeline: wgpu::RenderPipeline,
    bind_group_layouts: Vec<wgpu::BindGroupLayout>,
}

impl VariantPipeline {
    /// Builds `variant` with its own bind-group layouts.
    pub fn new(
        device: &wgpu::Device,
        variant: PipelineVariant,
        targets: &RenderTargets,
    ) -> Result<Self, ContractError> {
        let layouts = variant.bind_group_layouts(device);
        Self::with_layouts(device, variant, targets, &variant.vertex_buffers(), layouts)
    }

    /// Builds `variant` from caller-supplied layouts.
    ///
    /// Fails before any wgpu call when the layouts do not match what the
    /// variant's shader expects.
    pub fn with_layouts(
        device: &wgpu::Device,
        variant: PipelineVariant,
        targets: &RenderTargets,
        vertex_buffers: &[wgpu::VertexBufferLayout<'_>],
        bind_group_layouts: Vec<wgpu::BindGroupLayout>,
    ) -> Result<Self, ContractError> {
        contract::validate(variant, vertex_buffers, bind_group_layouts.len())?;
        if variant.requires_depth() && targets.depth_format.is_none() {
            return Err(ContractError::MissingDepthTarget { variant });
        }

        let layout_refs: Vec<&wgpu::BindGroupLayout> = bind_group_layouts.iter().collect();
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(variant.label()),
            bind_group_layouts: &layout_refs,
            immediate_size: 0,
        });

        let pipeline = create_render_pipeline(
            device,
            &pipeline_layout,
            variant,
            targets,
            vertex_buffers,
        );

        log::debug!(
            "created {} pipeline (color {:?}, depth {:?})",
            variant.label(),
            targets.color_format,
            targets.depth_format
        );

        Ok(Self {
            variant,
            pipeline,
            bind_group_layouts,
        })
    }

    #[inline]
    pub fn variant(&self) -> PipelineVariant {
        self.variant
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Layout of bind group `group`, if the variant has one there.
    #[inline]
    pub fn bind_group_layout(&self, group: u32) -> Option<&wgpu::BindGroupLayout> {
        self.bind_group_layouts.get(group as usize)
    }
}

fn create_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    variant: PipelineVariant,
    targets: &RenderTargets,
    vertex_buffers: &[wgpu::VertexBufferLayout<'_>],
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shaders::module_descriptor(variant));

    let color_targets = [Some(wgpu::ColorTargetState {
        format: targets.color_format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
    })];

    let fragment = variant.has_fragment_stage().then(|| wgpu::FragmentState {
        module: &shader,
        entry_point: Some(shaders::FRAGMENT_ENTRY),
        compilation_options: Default::default(),
        targets: &color_targets,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(variant.label()),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(shaders::VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: vertex_buffers,
        },

        fragment,

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: targets.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: targets.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}
