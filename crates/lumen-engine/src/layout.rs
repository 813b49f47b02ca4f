//! Vertex-buffer layouts of the shading records.
//!
//! Locations: 0 = position, 1 = tex coords or color, 2 = normal,
//! 5..=8 = instance matrix rows.

use lumen_shade::{ColorVertex, InstanceRaw, LitVertex, TexturedVertex};

/// A `Pod` record that can be bound as a vertex or instance buffer.
pub trait VertexLayout: bytemuck::Pod {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute];
    const STEP_MODE: wgpu::VertexStepMode = wgpu::VertexStepMode::Vertex;

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: Self::STEP_MODE,
            attributes: Self::ATTRIBUTES,
        }
    }
}

impl VertexLayout for ColorVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];
}

impl VertexLayout for TexturedVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // tex_coords
    ];
}

impl VertexLayout for LitVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2, // tex_coords
        2 => Float32x3  // normal
    ];
}

/// One instance record spans four consecutive `vec4f` attributes; the shader
/// reassembles them into a `mat4x4f` in this order.
impl VertexLayout for InstanceRaw {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &[
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 5,
            format: wgpu::VertexFormat::Float32x4,
        },
        wgpu::VertexAttribute {
            offset: size_of::<[f32; 4]>() as wgpu::BufferAddress,
            shader_location: 6,
            format: wgpu::VertexFormat::Float32x4,
        },
        wgpu::VertexAttribute {
            offset: size_of::<[f32; 8]>() as wgpu::BufferAddress,
            shader_location: 7,
            format: wgpu::VertexFormat::Float32x4,
        },
        wgpu::VertexAttribute {
            offset: size_of::<[f32; 12]>() as wgpu::BufferAddress,
            shader_location: 8,
            format: wgpu::VertexFormat::Float32x4,
        },
    ];
    const STEP_MODE: wgpu::VertexStepMode = wgpu::VertexStepMode::Instance;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(attrs: &[wgpu::VertexAttribute], location: u32) -> wgpu::VertexAttribute {
        *attrs
            .iter()
            .find(|a| a.shader_location == location)
            .unwrap_or_else(|| panic!("no attribute at location {location}"))
    }

    #[test]
    fn lit_vertex_offsets_follow_record() {
        let layout = LitVertex::layout();
        assert_eq!(layout.array_stride, size_of::<LitVertex>() as u64);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(find(layout.attributes, 0).offset, std::mem::offset_of!(LitVertex, position) as u64);
        assert_eq!(find(layout.attributes, 1).offset, std::mem::offset_of!(LitVertex, tex_coords) as u64);
        assert_eq!(find(layout.attributes, 2).offset, std::mem::offset_of!(LitVertex, normal) as u64);
    }

    #[test]
    fn color_and_textured_share_location_one() {
        assert_eq!(find(ColorVertex::ATTRIBUTES, 1).format, wgpu::VertexFormat::Float32x3);
        assert_eq!(find(TexturedVertex::ATTRIBUTES, 1).format, wgpu::VertexFormat::Float32x2);
        assert_eq!(
            find(ColorVertex::ATTRIBUTES, 1).offset,
            std::mem::offset_of!(ColorVertex, color) as u64
        );
    }

    #[test]
    fn instance_rows_are_in_order() {
        let layout = InstanceRaw::layout();
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.array_stride, 64);
        for (row, attr) in layout.attributes.iter().enumerate() {
            assert_eq!(attr.shader_location, 5 + row as u32);
            assert_eq!(attr.offset, 16 * row as u64);
            assert_eq!(attr.format, wgpu::VertexFormat::Float32x4);
        }
    }

    #[test]
    fn instance_row_bytes_land_on_matching_attribute() {
        let raw = InstanceRaw::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        let bytes = bytemuck::bytes_of(&raw);
        for (row, attr) in InstanceRaw::ATTRIBUTES.iter().enumerate() {
            let start = attr.offset as usize;
            let floats: &[f32] = bytemuck::cast_slice(&bytes[start..start + 16]);
            assert_eq!(floats, &raw.model[row]);
        }
    }
}
