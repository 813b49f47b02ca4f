//! Fragment stage of each pipeline variant.

use glam::Vec4;

use crate::depth::visualize_fragment;
use crate::light::{shade, Light};
use crate::render_mode::RenderMode;
use crate::texture::{LoadDepth, Sample2d};
use crate::vertex::{ColorVaryings, LitVaryings, TexturedVaryings};

/// Constant color written by the procedural triangle.
pub const TRIANGLE_COLOR: Vec4 = Vec4::new(0.3, 0.2, 0.1, 1.0);

/// Resources bound to the lit fragment stage for one draw.
pub struct LitBindings<'a, T: ?Sized, D: ?Sized> {
    pub diffuse: &'a T,
    pub depth: &'a D,
    pub light: Light,
    pub mode: RenderMode,
}

#[inline]
pub fn triangle_fragment() -> Vec4 {
    TRIANGLE_COLOR
}

#[inline]
pub fn flat_color_fragment(input: &ColorVaryings) -> Vec4 {
    input.color.extend(1.0)
}

#[inline]
pub fn textured_fragment<T: Sample2d + ?Sized>(input: &TexturedVaryings, diffuse: &T) -> Vec4 {
    diffuse.sample(input.tex_coords)
}

/// Lit fragment stage: dispatches on the render mode of the draw.
///
/// `DepthVisualize` never touches the diffuse texture or the light.
pub fn lit_fragment<T, D>(input: &LitVaryings, bindings: &LitBindings<'_, T, D>) -> Vec4
where
    T: Sample2d + ?Sized,
    D: LoadDepth + ?Sized,
{
    match bindings.mode {
        RenderMode::DepthVisualize => visualize_fragment(bindings.depth, input.clip_position),
        RenderMode::Normal => {
            let object_color = bindings.diffuse.sample(input.tex_coords);
            shade(&bindings.light, input.world_normal, input.world_position, object_color)
        }
    }
}
