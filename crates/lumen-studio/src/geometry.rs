//! Procedural assets for the studio scenes.

use glam::{Quat, Vec3};
use lumen_shade::{ColorVertex, Instance, Light, LitVertex, TexturedVertex};

/// The three-vertex color triangle, counter-clockwise.
pub const COLOR_TRIANGLE: [ColorVertex; 3] = [
    ColorVertex { position: [0.0, 0.5, 0.0], color: [1.0, 0.0, 0.0] },
    ColorVertex { position: [-0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] },
    ColorVertex { position: [0.5, -0.5, 0.0], color: [0.0, 0.0, 1.0] },
];
pub const COLOR_TRIANGLE_INDICES: [u16; 3] = [0, 1, 2];

/// A 2×2 quad in the XY plane facing +Z.
pub const TEXTURED_QUAD: [TexturedVertex; 4] = [
    TexturedVertex { position: [-1.0, -1.0, 0.0], tex_coords: [0.0, 1.0] },
    TexturedVertex { position: [1.0, -1.0, 0.0], tex_coords: [1.0, 1.0] },
    TexturedVertex { position: [1.0, 1.0, 0.0], tex_coords: [1.0, 0.0] },
    TexturedVertex { position: [-1.0, 1.0, 0.0], tex_coords: [0.0, 0.0] },
];
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// Outward normal and the four corners of each face, counter-clockwise seen
// from outside.
const CUBE_FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    ([0.0, 0.0, 1.0], [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]]),
    ([0.0, 0.0, -1.0], [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]]),
    ([1.0, 0.0, 0.0], [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]]),
    ([-1.0, 0.0, 0.0], [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]]),
    ([0.0, 1.0, 0.0], [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]]),
    ([0.0, -1.0, 0.0], [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]]),
];

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Axis-aligned cube centered on the origin with per-face normals.
pub fn cube(half_extent: f32) -> (Vec<LitVertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in CUBE_FACES {
        let base = vertices.len() as u16;
        for (corner, uv) in corners.iter().zip(FACE_UVS) {
            vertices.push(LitVertex {
                position: corner.map(|c| c * half_extent),
                tex_coords: uv,
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// Square grid of instances on the XZ plane, centered on the origin.
///
/// Each instance is tilted 45° about the axis from the origin to its
/// position; the center instance keeps the identity rotation.
pub fn instance_grid(per_side: u32, spacing: f32) -> Vec<Instance> {
    let half = (per_side as f32 - 1.0) * 0.5;
    let mut instances = Vec::with_capacity((per_side * per_side) as usize);

    for z in 0..per_side {
        for x in 0..per_side {
            let position = Vec3::new(x as f32 - half, 0.0, z as f32 - half) * spacing;
            let rotation = match position.try_normalize() {
                Some(axis) => Quat::from_axis_angle(axis, 45f32.to_radians()),
                None => Quat::IDENTITY,
            };
            instances.push(Instance::new(position, rotation));
        }
    }

    instances
}

/// RGBA8 checkerboard, `cells` squares per side.
pub fn checkerboard(size: u32, cells: u32) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let light = ((x / cell) + (y / cell)) % 2 == 0;
            let texel = if light { [230, 230, 230, 255] } else { [40, 60, 110, 255] };
            rgba.extend_from_slice(&texel);
        }
    }

    rgba
}

/// `light` rotated about +Y by `degrees`.
pub fn orbit_light(light: Light, degrees: f32) -> Light {
    let rotation = Quat::from_axis_angle(Vec3::Y, degrees.to_radians());
    Light::new(rotation * light.position, light.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_winding_agrees_with_normals() {
        let (vertices, indices) = cube(0.5);
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        for tri in indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|i| Vec3::from_array(vertices[tri[i] as usize].position));
            let face = (b - a).cross(c - a);
            let normal = Vec3::from_array(vertices[tri[0] as usize].normal);
            assert!(face.dot(normal) > 0.0, "triangle {tri:?} winds against its normal");
        }
    }

    #[test]
    fn cube_respects_extent() {
        let (vertices, _) = cube(0.5);
        for v in vertices {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn grid_is_centered() {
        let grid = instance_grid(3, 2.0);
        assert_eq!(grid.len(), 9);
        let sum: Vec3 = grid.iter().map(|i| i.position).sum();
        assert!(sum.length() < 1e-5);
        assert_eq!(grid[4].position, Vec3::ZERO);
        assert_eq!(grid[4].rotation, Quat::IDENTITY);
    }

    #[test]
    fn checkerboard_alternates() {
        let rgba = checkerboard(4, 2);
        assert_eq!(rgba.len(), 4 * 4 * 4);
        let texel = |x: usize, y: usize| &rgba[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(texel(0, 0), texel(1, 1));
        assert_ne!(texel(0, 0), texel(2, 0));
        assert_eq!(texel(0, 0)[3], 255);
    }

    #[test]
    fn orbit_keeps_height_and_radius() {
        let light = Light::new(Vec3::new(2.0, 2.0, 2.0), Vec3::ONE);
        let moved = orbit_light(light, 90.0);
        assert!((moved.position.y - 2.0).abs() < 1e-5);
        assert!((moved.position.length() - light.position.length()).abs() < 1e-5);
        assert_eq!(moved.color, light.color);
    }
}
