//! Lumen engine crate.
//!
//! This crate owns the wgpu side of the shading contract: WGSL modules, the
//! bind-group and vertex-buffer layouts they expect, pipeline construction per
//! variant, and the per-frame uniforms the host feeds them.
//!
//! The numeric behavior of every shader stage is mirrored in `lumen-shade`.

pub mod bindings;
pub mod contract;
pub mod device;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod shaders;
pub mod texture;

pub use contract::ContractError;
pub use pipeline::{PipelineVariant, RenderTargets, VariantPipeline};
