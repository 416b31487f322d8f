//! Vertex type for batched quad rendering

use bytemuck::{Pod, Zeroable};

/// Floats per vertex: corner (2) + model matrix (16) + color (4)
pub const FLOATS_PER_VERTEX: usize = 2 + 16 + 4;

/// One corner of a batched quad.
///
/// The model matrix and color of the quad are repeated on each of its four
/// corners, so a whole frame draws with one vertex buffer and one call.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BatchVertex {
    /// Corner of the unit square, (0,0) to (1,1)
    pub corner: [f32; 2],
    /// Model matrix columns
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl BatchVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BatchVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors outside the batch
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
