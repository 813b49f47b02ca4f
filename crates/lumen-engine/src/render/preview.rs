use lumen_shade::{Camera, CameraUniform};

use crate::bindings;
use crate::contract::{self, ContractError};
use crate::pipeline::{PipelineVariant, RenderTargets, VariantPipeline};
use crate::render::{Mesh, RenderCtx, RenderTarget, UniformBuffer};
use crate::texture::DiffuseTexture;

/// One draw of an unlit variant.
#[derive(Copy, Clone)]
pub enum PreviewDraw<'a> {
    /// Three vertices generated from the vertex index.
    Triangle,
    FlatColor(&'a Mesh),
    Textured {
        mesh: &'a Mesh,
        /// Created by [`PreviewRenderer::create_material`].
        material: &'a DiffuseTexture,
    },
}

impl PreviewDraw<'_> {
    pub fn variant(&self) -> PipelineVariant {
        match self {
            Self::Triangle => PipelineVariant::Triangle,
            Self::FlatColor(_) => PipelineVariant::FlatColor,
            Self::Textured { .. } => PipelineVariant::Textured,
        }
    }
}

/// Renderer for the `Triangle`, `FlatColor` and `Textured` variants.
///
/// Draws without depth testing or culling.
pub struct PreviewRenderer {
    triangle: VariantPipeline,
    flat_color: VariantPipeline,
    textured: VariantPipeline,

    camera: UniformBuffer<CameraUniform>,
    camera_bind_group: wgpu::BindGroup,
}

impl PreviewRenderer {
    pub fn new(
        ctx: &RenderCtx<'_>,
        color_format: wgpu::TextureFormat,
        camera: &Camera,
    ) -> Result<Self, ContractError> {
        let device = ctx.device;
        let targets = RenderTargets {
            color_format,
            depth_format: None,
            cull_mode: None,
        };

        let triangle = VariantPipeline::new(device, PipelineVariant::Triangle, &targets)?;
        let flat_color = VariantPipeline::new(device, PipelineVariant::FlatColor, &targets)?;
        let textured = VariantPipeline::new(device, PipelineVariant::Textured, &targets)?;

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(camera);
        let camera = UniformBuffer::new(device, uniform, "lumen preview camera ubo");

        let layout = textured
            .bind_group_layout(bindings::CAMERA.group)
            .ok_or(ContractError::BindGroupCount {
                variant: PipelineVariant::Textured,
                expected: bindings::CAMERA.group as usize + 1,
                found: 0,
            })?;
        let camera_bind_group = bindings::uniform_bind_group(
            device,
            layout,
            camera.buffer(),
            "lumen preview camera bind group",
        );

        Ok(Self {
            triangle,
            flat_color,
            textured,
            camera,
            camera_bind_group,
        })
    }

    pub fn update_camera(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        let mut uniform = *self.camera.get();
        uniform.update_view_proj(camera);
        self.camera.write(queue, uniform);
    }

    /// Uploads an RGBA8 image as a material for [`PreviewDraw::Textured`].
    pub fn create_material(
        &self,
        ctx: &RenderCtx<'_>,
        width: u32,
        height: u32,
        rgba: &[u8],
        label: &str,
    ) -> anyhow::Result<DiffuseTexture> {
        let layout = self
            .textured
            .bind_group_layout(bindings::DIFFUSE_TEXTURE.group)
            .ok_or(ContractError::BindGroupCount {
                variant: PipelineVariant::Textured,
                expected: bindings::DIFFUSE_TEXTURE.group as usize + 1,
                found: 0,
            })?;
        DiffuseTexture::from_rgba8(ctx.device, ctx.queue, layout, width, height, rgba, label)
    }

    /// Clears `target` to `clear` and records `draw`.
    ///
    /// Rejects a mesh whose vertex record does not match the variant.
    pub fn render(
        &self,
        target: &mut RenderTarget<'_>,
        clear: wgpu::Color,
        draw: PreviewDraw<'_>,
    ) -> Result<(), ContractError> {
        if let PreviewDraw::FlatColor(mesh) | PreviewDraw::Textured { mesh, .. } = draw {
            let variant = draw.variant();
            contract::validate(
                variant,
                std::slice::from_ref(mesh.vertex_layout()),
                variant.bind_group_count(),
            )?;
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen preview pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        match draw {
            PreviewDraw::Triangle => {
                rpass.set_pipeline(self.triangle.pipeline());
                rpass.draw(0..3, 0..1);
            }
            PreviewDraw::FlatColor(mesh) => {
                rpass.set_pipeline(self.flat_color.pipeline());
                rpass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
                rpass.set_index_buffer(mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count(), 0, 0..1);
            }
            PreviewDraw::Textured { mesh, material } => {
                rpass.set_pipeline(self.textured.pipeline());
                rpass.set_bind_group(bindings::DIFFUSE_TEXTURE.group, &material.bind_group, &[]);
                rpass.set_bind_group(bindings::CAMERA.group, &self.camera_bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
                rpass.set_index_buffer(mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count(), 0, 0..1);
            }
        }

        Ok(())
    }
}
