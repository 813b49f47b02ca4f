//! WGSL modules, one per pipeline variant.
//!
//! Every module exposes `vs_main`; every variant except the depth pre-pass
//! uses its `fs_main`. The depth pre-pass reuses the lit module's vertex stage.

use crate::pipeline::PipelineVariant;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

pub const TRIANGLE: &str = include_str!("triangle.wgsl");
pub const FLAT_COLOR: &str = include_str!("flat_color.wgsl");
pub const TEXTURED: &str = include_str!("textured.wgsl");
pub const LIT: &str = include_str!("lit.wgsl");

/// WGSL source of a variant.
pub fn source(variant: PipelineVariant) -> &'static str {
    match variant {
        PipelineVariant::Triangle => TRIANGLE,
        PipelineVariant::FlatColor => FLAT_COLOR,
        PipelineVariant::Textured => TEXTURED,
        PipelineVariant::Lit | PipelineVariant::DepthPrepass => LIT,
    }
}

pub fn module_descriptor(variant: PipelineVariant) -> wgpu::ShaderModuleDescriptor<'static> {
    wgpu::ShaderModuleDescriptor {
        label: Some(variant.label()),
        source: wgpu::ShaderSource::Wgsl(source(variant).into()),
    }
}
