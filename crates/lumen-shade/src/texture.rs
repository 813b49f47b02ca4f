//! CPU stand-ins for the bound texture/sampler pairs.

use glam::{UVec2, Vec2, Vec4};

/// Filtered color lookup at normalized coordinates (`textureSample`).
///
/// CPU implementations approximate the GPU sampler and are not
/// bit-equivalent to it: [`RgbaImage`] decodes linearly and filters nearest,
/// while the GPU diffuse texture is `Rgba8UnormSrgb` with a linear mag filter.
pub trait Sample2d {
    fn sample(&self, uv: Vec2) -> Vec4;
}

/// Unfiltered depth lookup at integer texel coordinates (`textureLoad`).
pub trait LoadDepth {
    fn load(&self, texel: UVec2) -> f32;
}

/// A constant color behaves like a 1×1 texture.
impl Sample2d for Vec4 {
    #[inline]
    fn sample(&self, _uv: Vec2) -> Vec4 {
        *self
    }
}

/// Uniform depth everywhere.
impl LoadDepth for f32 {
    #[inline]
    fn load(&self, _texel: UVec2) -> f32 {
        *self
    }
}

/// Row-major RGBA image sampled with clamp-to-edge addressing and nearest
/// filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl RgbaImage {
    /// Returns `None` unless `texels.len() == width * height` and both are non-zero.
    pub fn new(width: u32, height: u32, texels: Vec<Vec4>) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize)?;
        if expected == 0 || texels.len() != expected {
            return None;
        }
        Some(Self { width, height, texels })
    }

    /// Decodes tightly packed 8-bit RGBA bytes (linear, no sRGB conversion).
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() % 4 != 0 {
            return None;
        }
        let texels = bytes
            .chunks_exact(4)
            .map(|px| Vec4::new(px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32) / 255.0)
            .collect();
        Self::new(width, height, texels)
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    #[inline]
    pub fn texel(&self, texel: UVec2) -> Vec4 {
        let x = texel.x.min(self.width - 1) as usize;
        let y = texel.y.min(self.height - 1) as usize;
        self.texels[y * self.width as usize + x]
    }
}

impl Sample2d for RgbaImage {
    fn sample(&self, uv: Vec2) -> Vec4 {
        let size = self.size().as_vec2();
        let p = (uv.clamp(Vec2::ZERO, Vec2::ONE) * size).floor();
        self.texel(p.as_uvec2())
    }
}

/// Row-major depth attachment contents.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthImage {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl DepthImage {
    /// A `width × height` image cleared to `depth`. Zero dimensions are bumped to 1.
    pub fn filled(width: u32, height: u32, depth: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            values: vec![depth; width as usize * height as usize],
        }
    }

    pub fn set(&mut self, texel: UVec2, depth: f32) {
        if texel.x < self.width && texel.y < self.height {
            self.values[(texel.y * self.width + texel.x) as usize] = depth;
        }
    }
}

impl LoadDepth for DepthImage {
    /// Out-of-range texels are clamped to the edge.
    fn load(&self, texel: UVec2) -> f32 {
        let x = texel.x.min(self.width - 1);
        let y = texel.y.min(self.height - 1);
        self.values[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> RgbaImage {
        let black = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let white = Vec4::ONE;
        RgbaImage::new(2, 2, vec![black, white, white, black]).unwrap()
    }

    #[test]
    fn rejects_mismatched_texel_count() {
        assert!(RgbaImage::new(2, 2, vec![Vec4::ONE; 3]).is_none());
        assert!(RgbaImage::new(0, 2, vec![]).is_none());
        assert!(RgbaImage::from_rgba8(1, 1, &[1, 2, 3]).is_none());
    }

    #[test]
    fn nearest_sampling_picks_quadrants() {
        let img = checker();
        assert_eq!(img.sample(Vec2::new(0.25, 0.25)).x, 0.0);
        assert_eq!(img.sample(Vec2::new(0.75, 0.25)).x, 1.0);
        assert_eq!(img.sample(Vec2::new(0.25, 0.75)).x, 1.0);
        assert_eq!(img.sample(Vec2::new(0.75, 0.75)).x, 0.0);
    }

    #[test]
    fn sampling_clamps_to_edge() {
        let img = checker();
        assert_eq!(img.sample(Vec2::new(-3.0, -3.0)), img.sample(Vec2::ZERO));
        assert_eq!(img.sample(Vec2::new(9.0, 9.0)), img.texel(UVec2::new(1, 1)));
    }

    #[test]
    fn rgba8_is_normalized() {
        let img = RgbaImage::from_rgba8(1, 1, &[255, 0, 51, 255]).unwrap();
        let c = img.sample(Vec2::splat(0.5));
        assert!((c - Vec4::new(1.0, 0.0, 0.2, 1.0)).abs().max_element() < 1e-6);
    }

    #[test]
    fn depth_load_clamps_out_of_range() {
        let mut img = DepthImage::filled(2, 2, 1.0);
        img.set(UVec2::new(1, 1), 0.5);
        assert_eq!(img.load(UVec2::new(7, 9)), 0.5);
        assert_eq!(img.load(UVec2::new(0, 0)), 1.0);
    }
}
