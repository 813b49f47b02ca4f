//! GPU device management.
//!
//! Lumen renders offscreen: this module creates the wgpu
//! Instance/Adapter/Device/Queue without a surface and leaves target
//! allocation to the renderers.

mod gpu;
mod init;

pub use gpu::Gpu;
pub use init::GpuInit;
