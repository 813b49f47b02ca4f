//! Headless lumen studio.
//!
//! Renders an instanced, lit cube grid offscreen in both render modes, then
//! one frame of each unlit variant.

mod config;
mod geometry;

use anyhow::{Context, Result};
use lumen_engine::device::Gpu;
use lumen_engine::logging::init_logging;
use lumen_engine::render::{
    InstanceBuffer, Mesh, OffscreenTarget, PreviewDraw, PreviewRenderer, RenderCtx, RenderTarget,
    SceneConfig, SceneDraw, SceneRenderer,
};
use lumen_shade::{Camera, Instance, InstanceRaw, RenderMode};

use crate::config::StudioConfig;

const CHECKER_SIZE: u32 = 256;
const CHECKER_CELLS: u32 = 8;

/// Raw mode value outside the known set; must shade like `Normal`.
const UNKNOWN_RAW_MODE: u32 = 7;

fn main() -> Result<()> {
    let config = StudioConfig::default();
    init_logging(config.logging.clone());

    let gpu = Gpu::new_headless_blocking(config.gpu.clone())?;
    let ctx = RenderCtx::new(gpu.device(), gpu.queue());

    let target = OffscreenTarget::new(
        gpu.device(),
        config.width,
        config.height,
        config.color_format,
        "lumen studio target",
    );
    let camera = Camera {
        eye: config.camera_eye,
        aspect: target.aspect(),
        ..Camera::default()
    };

    render_scene(&gpu, &ctx, &config, &target, &camera)?;
    render_previews(&gpu, &ctx, &target, &camera)?;

    log::info!("studio run complete on {}", gpu.adapter_info().name);
    Ok(())
}

fn render_scene(
    gpu: &Gpu,
    ctx: &RenderCtx<'_>,
    config: &StudioConfig,
    target: &OffscreenTarget,
    camera: &Camera,
) -> Result<()> {
    let (width, height) = target.size();
    let scene_config = SceneConfig {
        camera: *camera,
        light: config.light,
        color_format: target.format,
        ..SceneConfig::default()
    };
    let mut scene = SceneRenderer::new(ctx, &scene_config, width, height)
        .context("failed to build the lit scene pipelines")?;

    let checker = geometry::checkerboard(CHECKER_SIZE, CHECKER_CELLS);
    let material = scene.create_material(ctx, CHECKER_SIZE, CHECKER_SIZE, &checker, "checker")?;

    let (cube_vertices, cube_indices) = geometry::cube(0.5);
    let cube = Mesh::new(gpu.device(), &cube_vertices, &cube_indices, "lumen cube");

    let raw: Vec<InstanceRaw> = geometry::instance_grid(config.grid_size, config.grid_spacing)
        .iter()
        .map(Instance::to_raw)
        .collect();
    let mut instances = InstanceBuffer::new("lumen cube instances");
    instances.write(gpu.device(), gpu.queue(), &raw);

    let draws = [SceneDraw {
        mesh: &cube,
        instances: &instances,
        material: &material,
    }];

    let mut light = config.light;
    let mut mode = RenderMode::Normal;
    for frame in 0..config.frames {
        scene.set_render_mode(gpu.queue(), mode);

        light = geometry::orbit_light(light, config.light_step_degrees);
        scene.set_light(gpu.queue(), light);

        submit_scene(gpu, &scene, target, &draws)
            .with_context(|| format!("frame {frame} ({mode:?})"))?;
        log::info!("frame {frame}: {} instances, {mode:?}", instances.len());
        mode = mode.toggled();
    }

    scene.set_render_mode_raw(gpu.queue(), UNKNOWN_RAW_MODE);
    submit_scene(gpu, &scene, target, &draws).context("frame with unknown render mode")?;
    log::info!(
        "raw render mode {UNKNOWN_RAW_MODE} rendered as {:?}",
        scene.render_mode()
    );

    Ok(())
}

fn submit_scene(
    gpu: &Gpu,
    scene: &SceneRenderer,
    target: &OffscreenTarget,
    draws: &[SceneDraw<'_>],
) -> Result<()> {
    let mut encoder = gpu.create_encoder("lumen scene encoder");
    scene.render(&mut RenderTarget::new(&mut encoder, &target.view), draws)?;
    gpu.submit(encoder);
    Ok(())
}

fn render_previews(
    gpu: &Gpu,
    ctx: &RenderCtx<'_>,
    target: &OffscreenTarget,
    camera: &Camera,
) -> Result<()> {
    let preview = PreviewRenderer::new(ctx, target.format, camera)
        .context("failed to build the preview pipelines")?;

    let triangle = Mesh::new(
        gpu.device(),
        &geometry::COLOR_TRIANGLE,
        &geometry::COLOR_TRIANGLE_INDICES,
        "lumen color triangle",
    );
    let quad = Mesh::new(
        gpu.device(),
        &geometry::TEXTURED_QUAD,
        &geometry::QUAD_INDICES,
        "lumen textured quad",
    );

    let checker = geometry::checkerboard(CHECKER_SIZE, CHECKER_CELLS);
    let material =
        preview.create_material(ctx, CHECKER_SIZE, CHECKER_SIZE, &checker, "preview checker")?;

    let clear = wgpu::Color::BLACK;
    for draw in [
        PreviewDraw::Triangle,
        PreviewDraw::FlatColor(&triangle),
        PreviewDraw::Textured {
            mesh: &quad,
            material: &material,
        },
    ] {
        let mut encoder = gpu.create_encoder("lumen preview encoder");
        preview.render(&mut RenderTarget::new(&mut encoder, &target.view), clear, draw)?;
        gpu.submit(encoder);
        log::info!("preview: {}", draw.variant().label());
    }

    Ok(())
}
