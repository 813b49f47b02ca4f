//! GPU rendering subsystem.
//!
//! Renderers own their pipelines and per-frame uniforms and record passes
//! into a caller-provided encoder.
//!
//! Convention:
//! - `SceneRenderer` draws instanced lit geometry and runs the depth
//!   pre-pass when the render mode needs it.
//! - `PreviewRenderer` draws the unlit variants.

mod buffers;
mod ctx;
mod offscreen;
mod preview;
mod scene;
mod uniform;

pub use buffers::{InstanceBuffer, Mesh};
pub use ctx::{RenderCtx, RenderTarget};
pub use offscreen::OffscreenTarget;
pub use preview::{PreviewDraw, PreviewRenderer};
pub use scene::{SceneConfig, SceneDraw, SceneRenderer};
pub use uniform::UniformBuffer;
