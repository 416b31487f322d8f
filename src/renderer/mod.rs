//! WebGPU rendering module
//!
//! Every live block becomes one quad in a shared vertex batch, drawn with a
//! single indexed call per frame.

pub mod batch;
pub mod pipeline;
pub mod vertex;

pub use batch::{Batch, quad_indices};
pub use pipeline::BatchRenderer;
pub use vertex::BatchVertex;
