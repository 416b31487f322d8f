//! Batch geometry packer
//!
//! Expands every block into four [`BatchVertex`] records and counts six
//! indices per quad. The index buffer itself is static (see
//! [`quad_indices`]); only the vertex data changes from frame to frame.
//!
//! A batch holds at most `capacity` quads. The GPU buffers are sized from
//! the same number, so [`Batch::push`] refuses to grow past it.

use crate::error::BatchError;
use crate::math::model_matrix;
use crate::sim::Block;

use super::vertex::BatchVertex;

/// Unit-square corners in vertex order
pub const QUAD_CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: u32 = 6;

#[derive(Debug, Clone)]
pub struct Batch {
    vertices: Vec<BatchVertex>,
    index_count: u32,
    capacity: usize,
}

impl Batch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity * VERTICES_PER_QUAD),
            index_count: 0,
            capacity,
        }
    }

    /// Drop all packed quads. Done at the start of every frame.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.index_count = 0;
    }

    /// Append one quad for `block`. On overflow the batch is left untouched.
    pub fn push(&mut self, block: &Block) -> Result<(), BatchError> {
        let requested = self.instance_count() + 1;
        if requested > self.capacity {
            return Err(BatchError::Overflow {
                capacity: self.capacity,
                requested,
            });
        }

        let model = model_matrix(block.body.pos, block.body.size).to_cols_array_2d();
        let color = block.color.to_array();
        self.vertices
            .extend(QUAD_CORNERS.iter().map(|&corner| BatchVertex {
                corner,
                model,
                color,
            }));
        self.index_count += INDICES_PER_QUAD;
        Ok(())
    }

    /// Push every block in order, stopping at the first overflow
    pub fn extend<'a>(&mut self, blocks: impl IntoIterator<Item = &'a Block>) -> Result<(), BatchError> {
        for block in blocks {
            self.push(block)?;
        }
        Ok(())
    }

    #[inline]
    pub fn instance_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_QUAD
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Indices the draw call must consume
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[BatchVertex] {
        &self.vertices
    }

    /// The packed buffer as a flat float slice
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Static index buffer for `capacity` quads.
///
/// Quad `i` uses vertices `4i..4i+4` as two triangles sharing the
/// (1,0)-(0,1) diagonal.
pub fn quad_indices(capacity: usize) -> Vec<u32> {
    (0..capacity as u32)
        .flat_map(|i| {
            let base = i * VERTICES_PER_QUAD as u32;
            [base, base + 1, base + 2, base + 1, base + 2, base + 3]
        })
        .collect()
}
