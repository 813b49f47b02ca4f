use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3, Vec4};

/// Per-instance placement of a mesh in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Instance {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Instance {
    #[inline]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Packs the model matrix (translation × rotation) into its GPU record.
    pub fn to_raw(&self) -> InstanceRaw {
        let model = Mat4::from_translation(self.position) * Mat4::from_quat(self.rotation);
        InstanceRaw {
            model: model.to_cols_array_2d(),
        }
    }
}

/// GPU record of one instance: four `vec4f` rows at attribute locations 5..=8.
///
/// Row `i` is the `i`-th 16-byte slot of the instance stream. The shader
/// rebuilds the matrix with `mat4x4f(row0, row1, row2, row3)`, which reads the
/// slots in the same order as [`Mat4::from_cols_array_2d`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    pub const IDENTITY: Self = Self {
        model: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { model: rows }
    }

    /// Returns the four rows in stream order.
    #[inline]
    pub fn rows(&self) -> [Vec4; 4] {
        self.model.map(Vec4::from_array)
    }

    /// Rebuilds the model matrix of this instance.
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        resolve_instance_matrix(self.rows())
    }
}

impl Default for InstanceRaw {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Reconstructs the model matrix from the four per-instance rows.
///
/// No validation and no reordering: row `i` of the input is row `i` of the
/// result, bit for bit.
#[inline]
pub fn resolve_instance_matrix(rows: [Vec4; 4]) -> Mat4 {
    let [row0, row1, row2, row3] = rows;
    Mat4::from_cols(row0, row1, row2, row3)
}

/// Returns row `i` (0..4) of a matrix built by [`resolve_instance_matrix`].
#[inline]
pub fn instance_row(matrix: &Mat4, i: usize) -> Vec4 {
    matrix.col(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> [Vec4; 4] {
        [
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        ]
    }

    // ── reconstruction ────────────────────────────────────────────────────

    #[test]
    fn rows_survive_reconstruction_in_order() {
        let input = rows();
        let m = resolve_instance_matrix(input);
        for (i, row) in input.iter().enumerate() {
            assert_eq!(instance_row(&m, i), *row, "row {i} moved");
        }
    }

    #[test]
    fn reconstruction_is_bit_exact() {
        let input = [
            Vec4::new(f32::MIN_POSITIVE, -0.0, 1.0e-38, 3.0e38),
            Vec4::new(0.1, 0.2, 0.3, 0.4),
            Vec4::splat(-7.25),
            Vec4::new(1.0 / 3.0, 2.0 / 3.0, 0.0, 1.0),
        ];
        let m = resolve_instance_matrix(input);
        for (i, row) in input.iter().enumerate() {
            let got = instance_row(&m, i).to_array().map(f32::to_bits);
            assert_eq!(got, row.to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn raw_rows_match_stream_slots() {
        let raw = InstanceRaw::from_rows(rows().map(|r| r.to_array()));
        let bytes: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&raw));
        // Row i occupies floats [4i, 4i + 4) of the instance record.
        for (i, row) in raw.rows().iter().enumerate() {
            assert_eq!(&bytes[i * 4..i * 4 + 4], &row.to_array());
        }
    }

    #[test]
    fn matrix_matches_glam_column_layout() {
        let raw = InstanceRaw::from_rows(rows().map(|r| r.to_array()));
        assert_eq!(raw.matrix(), Mat4::from_cols_array_2d(&raw.model));
    }

    // ── to_raw ────────────────────────────────────────────────────────────

    #[test]
    fn translation_lands_in_row_three() {
        let raw = Instance::new(Vec3::new(2.0, -3.0, 4.5), Quat::IDENTITY).to_raw();
        assert_eq!(raw.model[3], [2.0, -3.0, 4.5, 1.0]);
        assert_eq!(raw.model[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(raw.model[1], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(raw.model[2], [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn rotation_then_translation() {
        let inst = Instance::new(
            Vec3::new(10.0, 0.0, 0.0),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        );
        let p = inst.to_raw().matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p - Vec4::new(10.0, 1.0, 0.0, 1.0)).abs().max_element() < 1e-6);
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(InstanceRaw::default().matrix(), Mat4::IDENTITY);
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 64);
    }
}
