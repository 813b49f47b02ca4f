//! Vertex records and the vertex stage of each pipeline variant.
//!
//! Records are `#[repr(C)]` so they can be uploaded as-is; attribute
//! locations are declared next to the buffer layouts in `lumen-engine`.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

use crate::camera::{project, CameraUniform};
use crate::instance::InstanceRaw;

// ── records ───────────────────────────────────────────────────────────────

/// Flat-color vertex: position (location 0) + color (location 1).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Textured vertex: position (location 0) + tex coords (location 1).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// Lit vertex: position (0), tex coords (1), normal (2).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

// ── stage outputs ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorVaryings {
    pub clip_position: Vec4,
    pub color: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexturedVaryings {
    pub clip_position: Vec4,
    pub tex_coords: Vec2,
}

/// Output of the lit vertex stage, interpolated by the rasterizer.
///
/// In the fragment stage `clip_position` holds the fragment position
/// (`@builtin(position)`), whose `xy` are framebuffer coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LitVaryings {
    pub clip_position: Vec4,
    pub tex_coords: Vec2,
    pub world_normal: Vec3,
    pub world_position: Vec3,
}

// ── stages ────────────────────────────────────────────────────────────────

/// Procedural triangle: vertex index straight to NDC, no buffers, no camera.
///
/// The index is reinterpreted as `i32` and the subtraction wraps, as on the GPU.
#[inline]
pub fn triangle_vertex(vertex_index: u32) -> Vec4 {
    let x = 1i32.wrapping_sub(vertex_index as i32) as f32 * 0.5;
    let y = ((vertex_index & 1) as i32 * 2 - 1) as f32 * 0.5;
    Vec4::new(x, y, 0.0, 1.0)
}

/// Local position cast directly to clip space (`w = 1`).
#[inline]
pub fn flat_color_vertex(vertex: &ColorVertex) -> ColorVaryings {
    ColorVaryings {
        clip_position: Vec3::from_array(vertex.position).extend(1.0),
        color: Vec3::from_array(vertex.color),
    }
}

#[inline]
pub fn textured_vertex(vertex: &TexturedVertex, camera: &CameraUniform) -> TexturedVaryings {
    TexturedVaryings {
        clip_position: project(camera, Vec3::from_array(vertex.position).extend(1.0)),
        tex_coords: Vec2::from_array(vertex.tex_coords),
    }
}

/// Instanced, lit vertex stage.
///
/// The normal is forwarded without a normal-matrix transform, which is only
/// correct while instance matrices carry no non-uniform scale.
pub fn lit_vertex(vertex: &LitVertex, instance: &InstanceRaw, camera: &CameraUniform) -> LitVaryings {
    let model = instance.matrix();
    let world_position = model * Vec3::from_array(vertex.position).extend(1.0);

    LitVaryings {
        clip_position: project(camera, world_position),
        tex_coords: Vec2::from_array(vertex.tex_coords),
        world_normal: Vec3::from_array(vertex.normal),
        world_position: world_position.truncate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::instance::Instance;
    use glam::{Mat4, Quat};

    fn lit() -> LitVertex {
        LitVertex {
            position: [0.5, -0.25, 1.0],
            tex_coords: [0.25, 0.75],
            normal: [0.0, 3.0, 0.0],
        }
    }

    // ── triangle ──────────────────────────────────────────────────────────

    #[test]
    fn procedural_triangle_corners() {
        assert_eq!(triangle_vertex(0), Vec4::new(0.5, -0.5, 0.0, 1.0));
        assert_eq!(triangle_vertex(1), Vec4::new(0.0, 0.5, 0.0, 1.0));
        assert_eq!(triangle_vertex(2), Vec4::new(-0.5, -0.5, 0.0, 1.0));
    }

    #[test]
    fn procedural_triangle_wraps_large_indices() {
        let v = triangle_vertex(0x8000_0000);
        assert_eq!(v.x, (i32::MIN + 1) as f32 * 0.5);
        assert_eq!(v.y, -0.5);

        assert_eq!(triangle_vertex(u32::MAX), Vec4::new(1.0, 0.5, 0.0, 1.0));
    }

    // ── flat color ────────────────────────────────────────────────────────

    #[test]
    fn flat_color_keeps_position_and_sets_w() {
        let v = ColorVertex { position: [0.0, 0.5, 0.0], color: [1.0, 0.0, 0.0] };
        let out = flat_color_vertex(&v);
        assert_eq!(out.clip_position, Vec4::new(0.0, 0.5, 0.0, 1.0));
        assert_eq!(out.color, Vec3::X);
    }

    // ── textured ──────────────────────────────────────────────────────────

    #[test]
    fn textured_applies_camera() {
        let camera = CameraUniform::from_matrix(Mat4::from_scale(Vec3::splat(2.0)));
        let v = TexturedVertex { position: [1.0, 2.0, 3.0], tex_coords: [0.5, 0.5] };
        let out = textured_vertex(&v, &camera);
        assert_eq!(out.clip_position, Vec4::new(2.0, 4.0, 6.0, 1.0));
        assert_eq!(out.tex_coords, Vec2::splat(0.5));
    }

    // ── lit ───────────────────────────────────────────────────────────────

    #[test]
    fn lit_with_identity_instance_and_camera() {
        let out = lit_vertex(&lit(), &InstanceRaw::IDENTITY, &CameraUniform::new());
        assert_eq!(out.clip_position, Vec4::new(0.5, -0.25, 1.0, 1.0));
        assert_eq!(out.world_position, Vec3::new(0.5, -0.25, 1.0));
    }

    #[test]
    fn lit_translates_into_world_space() {
        let inst = Instance::new(Vec3::new(10.0, 0.0, -2.0), Quat::IDENTITY).to_raw();
        let out = lit_vertex(&lit(), &inst, &CameraUniform::new());
        assert_eq!(out.world_position, Vec3::new(10.5, -0.25, -1.0));
        assert_eq!(out.clip_position, out.world_position.extend(1.0));
    }

    #[test]
    fn lit_forwards_normal_untransformed() {
        let inst = Instance::new(Vec3::ZERO, Quat::from_rotation_x(1.0)).to_raw();
        let out = lit_vertex(&lit(), &inst, &CameraUniform::new());
        assert_eq!(out.world_normal, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(out.tex_coords, Vec2::new(0.25, 0.75));
    }

    #[test]
    fn lit_is_deterministic() {
        let camera = {
            let mut u = CameraUniform::new();
            u.update_view_proj(&Camera::default());
            u
        };
        let inst = Instance::new(Vec3::new(1.5, 0.0, -3.0), Quat::from_rotation_y(0.7)).to_raw();
        let a = lit_vertex(&lit(), &inst, &camera);
        let b = lit_vertex(&lit(), &inst, &camera);
        assert_eq!(
            a.clip_position.to_array().map(f32::to_bits),
            b.clip_position.to_array().map(f32::to_bits)
        );
    }

    #[test]
    fn vertex_records_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<ColorVertex>(), 24);
        assert_eq!(std::mem::size_of::<TexturedVertex>(), 20);
        assert_eq!(std::mem::size_of::<LitVertex>(), 32);
        assert_eq!(std::mem::offset_of!(LitVertex, normal), 20);
    }
}
