use lumen_shade::{
    Camera, CameraUniform, InstanceRaw, Light, LightUniform, RenderMode, RenderModeUniform,
};

use crate::bindings;
use crate::contract::{self, ContractError};
use crate::layout::VertexLayout;
use crate::pipeline::{PipelineVariant, RenderTargets, VariantPipeline};
use crate::render::{InstanceBuffer, Mesh, RenderCtx, RenderTarget, UniformBuffer};
use crate::texture::{DepthTexture, DiffuseTexture};

/// Initial state of a [`SceneRenderer`].
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub clear_color: wgpu::Color,
    pub camera: Camera,
    pub light: Light,
    pub render_mode: RenderMode,
    pub color_format: wgpu::TextureFormat,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
            camera: Camera::default(),
            light: Light::default(),
            render_mode: RenderMode::Normal,
            color_format: wgpu::TextureFormat::Rgba8UnormSrgb,
        }
    }
}

/// One instanced draw of the lit scene.
#[derive(Copy, Clone)]
pub struct SceneDraw<'a> {
    pub mesh: &'a Mesh,
    pub instances: &'a InstanceBuffer,
    pub material: &'a DiffuseTexture,
}

/// Instanced lit renderer.
///
/// In `DepthVisualize` mode the scene is first drawn depth-only into a
/// dedicated texture, which the main pass then binds at group 2. The main
/// pass keeps its own depth attachment so no texture is both sampled and
/// written in one pass.
pub struct SceneRenderer {
    lit: VariantPipeline,
    prepass: VariantPipeline,

    camera: UniformBuffer<CameraUniform>,
    light: UniformBuffer<LightUniform>,
    render_mode: UniformBuffer<RenderModeUniform>,

    camera_bind_group: wgpu::BindGroup,
    light_bind_group: wgpu::BindGroup,
    render_mode_bind_group: wgpu::BindGroup,
    prepass_empty_bind_group: wgpu::BindGroup,
    prepass_camera_bind_group: wgpu::BindGroup,

    prepass_depth: DepthTexture,
    depth: DepthTexture,
    depth_bind_group: wgpu::BindGroup,

    clear_color: wgpu::Color,
    mode: RenderMode,
    warned_raw_mode: bool,
}

impl SceneRenderer {
    pub fn new(
        ctx: &RenderCtx<'_>,
        config: &SceneConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, ContractError> {
        let device = ctx.device;
        let targets = RenderTargets::new(config.color_format, Some(crate::texture::DEPTH_FORMAT));

        let lit = VariantPipeline::new(device, PipelineVariant::Lit, &targets)?;
        let prepass = VariantPipeline::new(device, PipelineVariant::DepthPrepass, &targets)?;

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&config.camera);
        let camera = UniformBuffer::new(device, camera_uniform, "lumen camera ubo");
        let light = UniformBuffer::new(device, config.light.to_uniform(), "lumen light ubo");
        let render_mode = UniformBuffer::new(
            device,
            RenderModeUniform::new(config.render_mode),
            "lumen render mode ubo",
        );

        let camera_bind_group =
            uniform_group(&lit, bindings::CAMERA, device, &camera, "lumen camera bind group")?;
        let light_bind_group =
            uniform_group(&lit, bindings::LIGHT, device, &light, "lumen light bind group")?;
        let render_mode_bind_group = uniform_group(
            &lit,
            bindings::RENDER_MODE,
            device,
            &render_mode,
            "lumen render mode bind group",
        )?;
        let prepass_camera_bind_group = uniform_group(
            &prepass,
            bindings::CAMERA,
            device,
            &camera,
            "lumen prepass camera bind group",
        )?;
        let prepass_empty_bind_group =
            bindings::empty_bind_group(device, group_layout(&prepass, 0)?);

        let prepass_depth = DepthTexture::new(device, width, height, "lumen prepass depth");
        let depth = DepthTexture::new(device, width, height, "lumen depth");
        let depth_bind_group =
            prepass_depth.bind_group(device, group_layout(&lit, bindings::DEPTH_TEXTURE.group)?);

        Ok(Self {
            lit,
            prepass,
            camera,
            light,
            render_mode,
            camera_bind_group,
            light_bind_group,
            render_mode_bind_group,
            prepass_empty_bind_group,
            prepass_camera_bind_group,
            prepass_depth,
            depth,
            depth_bind_group,
            clear_color: config.clear_color,
            mode: config.render_mode,
            warned_raw_mode: false,
        })
    }

    /// Uploads an RGBA8 image as a material usable in [`SceneDraw`].
    pub fn create_material(
        &self,
        ctx: &RenderCtx<'_>,
        width: u32,
        height: u32,
        rgba: &[u8],
        label: &str,
    ) -> anyhow::Result<DiffuseTexture> {
        let layout = group_layout(&self.lit, bindings::DIFFUSE_TEXTURE.group)?;
        DiffuseTexture::from_rgba8(ctx.device, ctx.queue, layout, width, height, rgba, label)
    }

    pub fn update_camera(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        let mut uniform = *self.camera.get();
        uniform.update_view_proj(camera);
        self.camera.write(queue, uniform);
    }

    pub fn set_light(&mut self, queue: &wgpu::Queue, light: Light) {
        self.light.write(queue, light.to_uniform());
    }

    #[inline]
    pub fn light(&self) -> Light {
        self.light.get().light()
    }

    pub fn set_render_mode(&mut self, queue: &wgpu::Queue, mode: RenderMode) {
        self.mode = mode;
        self.render_mode.write(queue, RenderModeUniform::new(mode));
    }

    /// Forwards a raw mode value to the shader unchanged. Values other than
    /// the depth-visualize code shade normally.
    pub fn set_render_mode_raw(&mut self, queue: &wgpu::Queue, raw: u32) {
        let mode = RenderMode::from_raw(raw);
        if mode.to_raw() != raw && !self.warned_raw_mode {
            log::debug!("SceneRenderer: render mode {raw} is not a known mode; shading as {mode:?}");
            self.warned_raw_mode = true;
        }
        self.mode = mode;
        self.render_mode.write(queue, RenderModeUniform::from_raw(raw));
    }

    #[inline]
    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }

    /// Recreates the depth textures for a new target size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.prepass_depth = DepthTexture::new(device, width, height, "lumen prepass depth");
        self.depth = DepthTexture::new(device, width, height, "lumen depth");
        if let Some(layout) = self.lit.bind_group_layout(bindings::DEPTH_TEXTURE.group) {
            self.depth_bind_group = self.prepass_depth.bind_group(device, layout);
        }
    }

    /// Records the scene into `target`, clearing it first.
    ///
    /// Rejects the frame before recording anything if a mesh was not built
    /// from `LitVertex`.
    pub fn render(
        &self,
        target: &mut RenderTarget<'_>,
        draws: &[SceneDraw<'_>],
    ) -> Result<(), ContractError> {
        for draw in draws {
            let buffers = [draw.mesh.vertex_layout().clone(), InstanceRaw::layout()];
            contract::validate(
                PipelineVariant::Lit,
                &buffers,
                PipelineVariant::Lit.bind_group_count(),
            )?;
        }

        if self.mode == RenderMode::DepthVisualize {
            self.record_prepass(target, draws);
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(self.depth.attachment()),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(self.lit.pipeline());
        rpass.set_bind_group(bindings::CAMERA.group, &self.camera_bind_group, &[]);
        rpass.set_bind_group(bindings::DEPTH_TEXTURE.group, &self.depth_bind_group, &[]);
        rpass.set_bind_group(bindings::RENDER_MODE.group, &self.render_mode_bind_group, &[]);
        rpass.set_bind_group(bindings::LIGHT.group, &self.light_bind_group, &[]);

        for draw in draws {
            let Some(instances) = draw.instances.slice() else { continue };
            rpass.set_bind_group(bindings::DIFFUSE_TEXTURE.group, &draw.material.bind_group, &[]);
            rpass.set_vertex_buffer(0, draw.mesh.vertex_buffer().slice(..));
            rpass.set_vertex_buffer(1, instances);
            rpass.set_index_buffer(draw.mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..draw.mesh.index_count(), 0, 0..draw.instances.len());
        }

        Ok(())
    }

    fn record_prepass(&self, target: &mut RenderTarget<'_>, draws: &[SceneDraw<'_>]) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen depth prepass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(self.prepass_depth.attachment()),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(self.prepass.pipeline());
        rpass.set_bind_group(0, &self.prepass_empty_bind_group, &[]);
        rpass.set_bind_group(bindings::CAMERA.group, &self.prepass_camera_bind_group, &[]);

        for draw in draws {
            let Some(instances) = draw.instances.slice() else { continue };
            rpass.set_vertex_buffer(0, draw.mesh.vertex_buffer().slice(..));
            rpass.set_vertex_buffer(1, instances);
            rpass.set_index_buffer(draw.mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..draw.mesh.index_count(), 0, 0..draw.instances.len());
        }
    }
}

fn group_layout(
    pipeline: &VariantPipeline,
    group: u32,
) -> Result<&wgpu::BindGroupLayout, ContractError> {
    pipeline
        .bind_group_layout(group)
        .ok_or(ContractError::BindGroupCount {
            variant: pipeline.variant(),
            expected: group as usize + 1,
            found: pipeline.variant().bind_group_count(),
        })
}

fn uniform_group<T: bytemuck::Pod>(
    pipeline: &VariantPipeline,
    slot: bindings::Slot,
    device: &wgpu::Device,
    uniform: &UniformBuffer<T>,
    label: &str,
) -> Result<wgpu::BindGroup, ContractError> {
    let layout = group_layout(pipeline, slot.group)?;
    Ok(bindings::uniform_bind_group(device, layout, uniform.buffer(), label))
}
