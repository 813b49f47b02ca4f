//! CPU reference implementation of the **lumen** shading core.
//!
//! Every shader stage shipped by `lumen-engine` has a pure Rust counterpart
//! here. The functions take immutable input records and return output
//! records, mirroring one GPU invocation each: no hidden state, no
//! invocation-to-invocation communication.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`instance`] | `Instance`, `InstanceRaw`, instance matrix reconstruction |
//! | [`camera`] | `Camera`, `CameraUniform`, clip-space projection |
//! | [`light`] | `Light`, `LightUniform`, ambient + diffuse lighting |
//! | [`render_mode`] | `RenderMode`, `RenderModeUniform` |
//! | [`depth`] | depth-buffer visualization |
//! | [`texture`] | `Sample2d` / `LoadDepth` and CPU images |
//! | [`vertex`] | vertex records and vertex stages per pipeline variant |
//! | [`fragment`] | fragment stages per pipeline variant |
//!
//! # Quick start
//!
//! ```rust
//! use glam::{Vec3, Vec4};
//! use lumen_shade::light::{Light, shade};
//!
//! let light = Light::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ONE);
//! let color = shade(&light, Vec3::Z, Vec3::ZERO, Vec4::ONE);
//! assert!((color.x - 1.1).abs() < 1e-6);
//! assert_eq!(color.w, 1.0);
//! ```

pub mod camera;
pub mod depth;
pub mod fragment;
pub mod instance;
pub mod light;
pub mod render_mode;
pub mod texture;
pub mod vertex;

pub use camera::{Camera, CameraUniform};
pub use instance::{Instance, InstanceRaw};
pub use light::{Light, LightUniform};
pub use render_mode::{RenderMode, RenderModeUniform};
pub use vertex::{ColorVertex, LitVertex, TexturedVertex};
