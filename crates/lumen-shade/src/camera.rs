use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Perspective camera parameters.
///
/// `fovy` is the vertical field of view in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Builds the world → clip transform.
    ///
    /// Right-handed look-at followed by a perspective projection with a
    /// `0..1` depth range, which is what wgpu expects in clip space.
    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

/// Camera uniform (group 1, binding 0): a single `mat4x4f`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    #[inline]
    pub fn from_matrix(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_view_projection_matrix().to_cols_array_2d();
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view_proj)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the camera's view-projection to a homogeneous world position.
#[inline]
pub fn project(camera: &CameraUniform, world_position: Vec4) -> Vec4 {
    camera.matrix() * world_position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_camera_passes_position_through() {
        let p = Vec4::new(0.25, -0.5, 0.75, 1.0);
        assert_eq!(project(&CameraUniform::new(), p), p);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::default();
        let clip = project(
            &CameraUniform::from_matrix(camera.build_view_projection_matrix()),
            camera.target.extend(1.0),
        );
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "depth {} outside 0..1", ndc.z);
    }

    #[test]
    fn near_and_far_planes_map_to_zero_and_one() {
        let camera = Camera {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            ..Camera::default()
        };
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let near = project(&uniform, Vec4::new(0.0, 0.0, -camera.znear, 1.0));
        let far = project(&uniform, Vec4::new(0.0, 0.0, -camera.zfar, 1.0));
        assert!((near.z / near.w).abs() < 1e-6);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn uniform_is_one_mat4() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }
}
