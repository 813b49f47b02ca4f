use glam::{UVec2, Vec4};

use crate::texture::LoadDepth;

/// Gain applied to `1 - depth` so the narrow band of perspective depth values
/// near the far plane becomes visible. The result is not clamped; the color
/// target saturates it.
pub const DEPTH_VISUALIZE_SCALE: f32 = 100.0;

/// Maps a depth value to an opaque gray: far plane (1.0) is black.
#[inline]
pub fn visualize_depth(depth: f32) -> Vec4 {
    let v = (1.0 - depth) * DEPTH_VISUALIZE_SCALE;
    Vec4::new(v, v, v, 1.0)
}

/// Integer texel addressed by a fragment position (`@builtin(position).xy`).
#[inline]
pub fn fragment_texel(frag_coord: Vec4) -> UVec2 {
    frag_coord.truncate().truncate().as_uvec2()
}

/// Depth-visualization fragment path: load the depth under this fragment and
/// map it to gray.
pub fn visualize_fragment<D: LoadDepth + ?Sized>(depth_tex: &D, frag_coord: Vec4) -> Vec4 {
    visualize_depth(depth_tex.load(fragment_texel(frag_coord)))
}
