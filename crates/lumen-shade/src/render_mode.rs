use bytemuck::{Pod, Zeroable};

/// Fragment path selected per draw.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum RenderMode {
    /// Textured + lit shading.
    #[default]
    Normal,
    /// Grayscale view of the depth pre-pass.
    DepthVisualize,
}

impl RenderMode {
    pub const NORMAL_RAW: u32 = 0;
    pub const DEPTH_VISUALIZE_RAW: u32 = 1;

    /// Decodes the uniform value. Anything other than `1` is `Normal`.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            Self::DEPTH_VISUALIZE_RAW => Self::DepthVisualize,
            _ => Self::Normal,
        }
    }

    #[inline]
    pub const fn to_raw(self) -> u32 {
        match self {
            Self::Normal => Self::NORMAL_RAW,
            Self::DepthVisualize => Self::DEPTH_VISUALIZE_RAW,
        }
    }

    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::DepthVisualize,
            Self::DepthVisualize => Self::Normal,
        }
    }
}

/// Render-mode uniform (group 3, binding 0): `u32` + 12 bytes of padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RenderModeUniform {
    pub mode: u32,
    pub _padding: [u32; 3],
}

impl RenderModeUniform {
    #[inline]
    pub const fn new(mode: RenderMode) -> Self {
        Self::from_raw(mode.to_raw())
    }

    /// Wraps a raw value without decoding it; the shader applies the fallback.
    #[inline]
    pub const fn from_raw(mode: u32) -> Self {
        Self { mode, _padding: [0; 3] }
    }

    #[inline]
    pub const fn mode(&self) -> RenderMode {
        RenderMode::from_raw(self.mode)
    }
}

impl From<RenderMode> for RenderModeUniform {
    fn from(mode: RenderMode) -> Self {
        Self::new(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_selects_depth_visualize() {
        assert_eq!(RenderMode::from_raw(0), RenderMode::Normal);
        assert_eq!(RenderMode::from_raw(1), RenderMode::DepthVisualize);
        for raw in [2, 3, 7, 255, 0x8000_0000, u32::MAX] {
            assert_eq!(RenderMode::from_raw(raw), RenderMode::Normal, "raw {raw}");
        }
    }

    #[test]
    fn raw_round_trip() {
        for mode in [RenderMode::Normal, RenderMode::DepthVisualize] {
            assert_eq!(RenderMode::from_raw(mode.to_raw()), mode);
            assert_eq!(RenderModeUniform::new(mode).mode(), mode);
        }
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(RenderMode::Normal.toggled(), RenderMode::DepthVisualize);
        assert_eq!(RenderMode::DepthVisualize.toggled(), RenderMode::Normal);
    }

    #[test]
    fn uniform_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<RenderModeUniform>(), 16);
        let u = RenderModeUniform::new(RenderMode::DepthVisualize);
        assert_eq!(bytemuck::bytes_of(&u), &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn unknown_raw_uniform_decodes_to_normal() {
        assert_eq!(RenderModeUniform::from_raw(42).mode(), RenderMode::Normal);
    }
}
