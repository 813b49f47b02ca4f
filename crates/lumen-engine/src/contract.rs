//! Static validation of vertex-buffer and bind-group layouts against the
//! shading contract.
//!
//! wgpu reports layout mismatches asynchronously through its error sink and
//! not always with the offending slot. These checks run before any wgpu call
//! so a bad layout stops pipeline construction with a precise error.

use std::fmt;

use crate::pipeline::PipelineVariant;

/// Expected shape of one vertex buffer of a variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BufferContract {
    pub step_mode: wgpu::VertexStepMode,
    pub attributes: &'static [(u32, wgpu::VertexFormat)],
}

const COLOR_VERTEX: BufferContract = BufferContract {
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[(0, wgpu::VertexFormat::Float32x3), (1, wgpu::VertexFormat::Float32x3)],
};

const TEXTURED_VERTEX: BufferContract = BufferContract {
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[(0, wgpu::VertexFormat::Float32x3), (1, wgpu::VertexFormat::Float32x2)],
};

const LIT_VERTEX: BufferContract = BufferContract {
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        (0, wgpu::VertexFormat::Float32x3),
        (1, wgpu::VertexFormat::Float32x2),
        (2, wgpu::VertexFormat::Float32x3),
    ],
};

const INSTANCE_ROWS: BufferContract = BufferContract {
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[
        (5, wgpu::VertexFormat::Float32x4),
        (6, wgpu::VertexFormat::Float32x4),
        (7, wgpu::VertexFormat::Float32x4),
        (8, wgpu::VertexFormat::Float32x4),
    ],
};

/// Vertex buffers a variant expects, in slot order.
pub fn buffer_contracts(variant: PipelineVariant) -> &'static [BufferContract] {
    match variant {
        PipelineVariant::Triangle => &[],
        PipelineVariant::FlatColor => &[COLOR_VERTEX],
        PipelineVariant::Textured => &[TEXTURED_VERTEX],
        PipelineVariant::Lit | PipelineVariant::DepthPrepass => &[LIT_VERTEX, INSTANCE_ROWS],
    }
}

/// A host-side layout that does not match what a variant's shader expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    BufferCount {
        variant: PipelineVariant,
        expected: usize,
        found: usize,
    },
    StepMode {
        variant: PipelineVariant,
        buffer: usize,
        expected: wgpu::VertexStepMode,
        found: wgpu::VertexStepMode,
    },
    MissingAttribute {
        variant: PipelineVariant,
        buffer: usize,
        location: u32,
    },
    UnexpectedAttribute {
        variant: PipelineVariant,
        buffer: usize,
        location: u32,
    },
    AttributeFormat {
        variant: PipelineVariant,
        location: u32,
        expected: wgpu::VertexFormat,
        found: wgpu::VertexFormat,
    },
    AttributeOutOfStride {
        variant: PipelineVariant,
        location: u32,
        end: u64,
        stride: u64,
    },
    BindGroupCount {
        variant: PipelineVariant,
        expected: usize,
        found: usize,
    },
    MissingDepthTarget {
        variant: PipelineVariant,
    },
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferCount { variant, expected, found } => write!(
                f,
                "{variant:?}: expected {expected} vertex buffer(s), got {found}"
            ),
            Self::StepMode { variant, buffer, expected, found } => write!(
                f,
                "{variant:?}: vertex buffer {buffer} must step per {expected:?}, got {found:?}"
            ),
            Self::MissingAttribute { variant, buffer, location } => write!(
                f,
                "{variant:?}: vertex buffer {buffer} lacks attribute @location({location})"
            ),
            Self::UnexpectedAttribute { variant, buffer, location } => write!(
                f,
                "{variant:?}: vertex buffer {buffer} declares unexpected @location({location})"
            ),
            Self::AttributeFormat { variant, location, expected, found } => write!(
                f,
                "{variant:?}: @location({location}) must be {expected:?}, got {found:?}"
            ),
            Self::AttributeOutOfStride { variant, location, end, stride } => write!(
                f,
                "{variant:?}: @location({location}) ends at byte {end}, past the {stride}-byte stride"
            ),
            Self::BindGroupCount { variant, expected, found } => write!(
                f,
                "{variant:?}: expected {expected} bind group layout(s), got {found}"
            ),
            Self::MissingDepthTarget { variant } => {
                write!(f, "{variant:?}: requires a depth target format")
            }
        }
    }
}

impl std::error::Error for ContractError {}

/// Checks vertex-buffer layouts and the bind-group layout count of `variant`.
pub fn validate(
    variant: PipelineVariant,
    buffers: &[wgpu::VertexBufferLayout<'_>],
    bind_group_layouts: usize,
) -> Result<(), ContractError> {
    let contracts = buffer_contracts(variant);
    if buffers.len() != contracts.len() {
        return Err(ContractError::BufferCount {
            variant,
            expected: contracts.len(),
            found: buffers.len(),
        });
    }

    for (index, (layout, contract)) in buffers.iter().zip(contracts).enumerate() {
        validate_buffer(variant, index, layout, contract)?;
    }

    let expected = variant.bind_group_count();
    if bind_group_layouts != expected {
        return Err(ContractError::BindGroupCount {
            variant,
            expected,
            found: bind_group_layouts,
        });
    }

    Ok(())
}

fn validate_buffer(
    variant: PipelineVariant,
    buffer: usize,
    layout: &wgpu::VertexBufferLayout<'_>,
    contract: &BufferContract,
) -> Result<(), ContractError> {
    if layout.step_mode != contract.step_mode {
        return Err(ContractError::StepMode {
            variant,
            buffer,
            expected: contract.step_mode,
            found: layout.step_mode,
        });
    }

    for &(location, format) in contract.attributes {
        let Some(attr) = layout.attributes.iter().find(|a| a.shader_location == location) else {
            return Err(ContractError::MissingAttribute { variant, buffer, location });
        };
        if attr.format != format {
            return Err(ContractError::AttributeFormat {
                variant,
                location,
                expected: format,
                found: attr.format,
            });
        }
        let end = attr.offset + attr.format.size();
        if end > layout.array_stride {
            return Err(ContractError::AttributeOutOfStride {
                variant,
                location,
                end,
                stride: layout.array_stride,
            });
        }
    }

    if let Some(extra) = layout
        .attributes
        .iter()
        .find(|a| !contract.attributes.iter().any(|&(loc, _)| loc == a.shader_location))
    {
        return Err(ContractError::UnexpectedAttribute {
            variant,
            buffer,
            location: extra.shader_location,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::VertexLayout;
    use lumen_shade::{ColorVertex, InstanceRaw, LitVertex, TexturedVertex};

    // ── accepted ──────────────────────────────────────────────────────────

    #[test]
    fn builtin_layouts_satisfy_their_variant() {
        for variant in PipelineVariant::ALL {
            let buffers = variant.vertex_buffers();
            assert_eq!(
                validate(variant, &buffers, variant.bind_group_count()),
                Ok(()),
                "{variant:?}"
            );
        }
    }

    // ── rejected ──────────────────────────────────────────────────────────

    #[test]
    fn swapped_buffers_are_rejected() {
        let buffers = [InstanceRaw::layout(), LitVertex::layout()];
        let err = validate(PipelineVariant::Lit, &buffers, 5).unwrap_err();
        assert_eq!(
            err,
            ContractError::StepMode {
                variant: PipelineVariant::Lit,
                buffer: 0,
                expected: wgpu::VertexStepMode::Vertex,
                found: wgpu::VertexStepMode::Instance,
            }
        );
    }

    #[test]
    fn missing_instance_buffer_is_rejected() {
        let err = validate(PipelineVariant::Lit, &[LitVertex::layout()], 5).unwrap_err();
        assert_eq!(
            err,
            ContractError::BufferCount { variant: PipelineVariant::Lit, expected: 2, found: 1 }
        );
    }

    #[test]
    fn color_layout_on_textured_variant_is_a_format_error() {
        let err = validate(PipelineVariant::Textured, &[ColorVertex::layout()], 2).unwrap_err();
        assert_eq!(
            err,
            ContractError::AttributeFormat {
                variant: PipelineVariant::Textured,
                location: 1,
                expected: wgpu::VertexFormat::Float32x2,
                found: wgpu::VertexFormat::Float32x3,
            }
        );
    }

    #[test]
    fn textured_layout_lacks_normal_for_lit() {
        let buffers = [TexturedVertex::layout(), InstanceRaw::layout()];
        let err = validate(PipelineVariant::Lit, &buffers, 5).unwrap_err();
        assert_eq!(
            err,
            ContractError::MissingAttribute { variant: PipelineVariant::Lit, buffer: 0, location: 2 }
        );
    }

    #[test]
    fn extra_attribute_is_rejected() {
        let err = validate(PipelineVariant::FlatColor, &[LitVertex::layout()], 0).unwrap_err();
        // Location 1 is checked first and is the wrong width for a color.
        assert!(matches!(err, ContractError::AttributeFormat { location: 1, .. }));

        const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            3 => Float32
        ];
        let layout = wgpu::VertexBufferLayout {
            array_stride: 28,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRS,
        };
        let err = validate(PipelineVariant::FlatColor, &[layout], 0).unwrap_err();
        assert_eq!(
            err,
            ContractError::UnexpectedAttribute {
                variant: PipelineVariant::FlatColor,
                buffer: 0,
                location: 3
            }
        );
    }

    #[test]
    fn attribute_past_stride_is_rejected() {
        let layout = wgpu::VertexBufferLayout {
            array_stride: 16,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ColorVertex::ATTRIBUTES,
        };
        let err = validate(PipelineVariant::FlatColor, &[layout], 0).unwrap_err();
        assert_eq!(
            err,
            ContractError::AttributeOutOfStride {
                variant: PipelineVariant::FlatColor,
                location: 1,
                end: 24,
                stride: 16
            }
        );
    }

    #[test]
    fn wrong_bind_group_count_is_rejected() {
        let buffers = PipelineVariant::Textured.vertex_buffers();
        let err = validate(PipelineVariant::Textured, &buffers, 5).unwrap_err();
        assert_eq!(
            err,
            ContractError::BindGroupCount { variant: PipelineVariant::Textured, expected: 2, found: 5 }
        );
    }

    #[test]
    fn errors_name_the_slot() {
        let err = ContractError::MissingAttribute {
            variant: PipelineVariant::Lit,
            buffer: 1,
            location: 7,
        };
        assert_eq!(err.to_string(), "Lit: vertex buffer 1 lacks attribute @location(7)");
    }
}
