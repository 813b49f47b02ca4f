use glam::Vec3;
use lumen_engine::device::GpuInit;
use lumen_engine::logging::LoggingConfig;
use lumen_shade::Light;

/// Settings of one headless studio run.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub width: u32,
    pub height: u32,
    pub color_format: wgpu::TextureFormat,

    /// Instances per side of the square grid.
    pub grid_size: u32,
    /// Distance between neighbouring instances, in world units.
    pub grid_spacing: f32,

    /// Camera position; the camera looks at the origin.
    pub camera_eye: Vec3,

    pub light: Light,
    /// Degrees the light orbits around +Y between frames.
    pub light_step_degrees: f32,

    /// Lit frames to render; even frames shade normally, odd frames
    /// visualize depth.
    pub frames: u32,

    pub gpu: GpuInit,
    pub logging: LoggingConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            color_format: wgpu::TextureFormat::Rgba8UnormSrgb,
            grid_size: 10,
            grid_spacing: 3.0,
            camera_eye: Vec3::new(0.0, 18.0, 30.0),
            light: Light::new(Vec3::new(2.0, 2.0, 2.0), Vec3::ONE),
            light_step_degrees: 1.0,
            frames: 4,
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
        }
    }
}
