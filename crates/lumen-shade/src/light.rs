use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Fraction of the light color applied regardless of surface orientation.
pub const AMBIENT_STRENGTH: f32 = 0.1;

/// Single point light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

impl Light {
    #[inline]
    pub const fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }

    pub fn to_uniform(&self) -> LightUniform {
        LightUniform::new(self.position, self.color)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(2.0, 2.0, 2.0), Vec3::ONE)
    }
}

/// Light uniform (group 4, binding 0).
///
/// Each `vec3f` occupies a 16-byte slot in the uniform address space, hence
/// the explicit pads.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub _padding: u32,
    pub color: [f32; 3],
    pub _padding2: u32,
}

impl LightUniform {
    #[inline]
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            _padding: 0,
            color: color.to_array(),
            _padding2: 0,
        }
    }

    #[inline]
    pub fn light(&self) -> Light {
        Light::new(Vec3::from_array(self.position), Vec3::from_array(self.color))
    }
}

impl Default for LightUniform {
    fn default() -> Self {
        Light::default().to_uniform()
    }
}

/// Ambient + diffuse shading of one fragment.
///
/// `world_normal` is used as interpolated; it is not renormalized, so its
/// length scales the diffuse term. Alpha is taken from `object_color` as is.
/// A fragment sitting exactly on the light position yields a non-finite
/// direction; that case is left to IEEE semantics.
pub fn shade(light: &Light, world_normal: Vec3, world_position: Vec3, object_color: Vec4) -> Vec4 {
    let ambient = light.color * AMBIENT_STRENGTH;

    let light_dir = (light.position - world_position).normalize();
    let diffuse_strength = world_normal.dot(light_dir).max(0.0);
    let diffuse = light.color * diffuse_strength;

    ((ambient + diffuse) * object_color.truncate()).extend(object_color.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_light_above() -> Light {
        Light::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ONE)
    }

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-6
    }

    // ── formula ───────────────────────────────────────────────────────────

    #[test]
    fn facing_light_is_ambient_plus_full_diffuse() {
        let c = shade(&white_light_above(), Vec3::Z, Vec3::ZERO, Vec4::ONE);
        assert!(approx(c, Vec4::new(1.1, 1.1, 1.1, 1.0)), "{c:?}");
    }

    #[test]
    fn facing_away_leaves_only_ambient() {
        let c = shade(&white_light_above(), Vec3::NEG_Z, Vec3::ZERO, Vec4::ONE);
        assert!(approx(c, Vec4::new(0.1, 0.1, 0.1, 1.0)), "{c:?}");
    }

    #[test]
    fn grazing_angle_scales_diffuse() {
        // 60° between normal and light direction: cos = 0.5.
        let light = Light::new(Vec3::new(0.0, 3f32.sqrt(), 1.0), Vec3::ONE);
        let c = shade(&light, Vec3::Z, Vec3::ZERO, Vec4::ONE);
        assert!(approx(c, Vec4::new(0.6, 0.6, 0.6, 1.0)), "{c:?}");
    }

    #[test]
    fn object_color_modulates_per_channel() {
        let light = Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.5, 0.0));
        let c = shade(&light, Vec3::Z, Vec3::ZERO, Vec4::new(0.5, 1.0, 1.0, 1.0));
        assert!(approx(c, Vec4::new(0.55, 0.55, 0.0, 1.0)), "{c:?}");
    }

    #[test]
    fn alpha_is_never_lit() {
        let c = shade(&white_light_above(), Vec3::Z, Vec3::ZERO, Vec4::new(1.0, 1.0, 1.0, 0.25));
        assert_eq!(c.w, 0.25);
    }

    #[test]
    fn unnormalized_normal_is_not_corrected() {
        let c = shade(&white_light_above(), Vec3::Z * 2.0, Vec3::ZERO, Vec4::ONE);
        assert!(approx(c, Vec4::new(2.1, 2.1, 2.1, 1.0)), "{c:?}");
    }

    #[test]
    fn zero_normal_gives_ambient() {
        let c = shade(&white_light_above(), Vec3::ZERO, Vec3::ZERO, Vec4::ONE);
        assert!(approx(c, Vec4::new(0.1, 0.1, 0.1, 1.0)), "{c:?}");
    }

    // ── uniform layout ────────────────────────────────────────────────────

    #[test]
    fn uniform_layout_pads_each_vec3() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 32);
        assert_eq!(std::mem::offset_of!(LightUniform, position), 0);
        assert_eq!(std::mem::offset_of!(LightUniform, color), 16);
    }

    #[test]
    fn uniform_round_trips_light() {
        let light = Light::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(light.to_uniform().light(), light);
    }
}
