//! Linear algebra primitives and scalar helpers for the toolkit
//!
//! Everything is generic over [`Scalar`] so the same types serve f32
//! rendering paths and f64 precision work. Vectors and matrices are plain
//! `#[repr(C)]` data and implement [`bytemuck::Pod`], so slices of them can
//! be uploaded to GPU buffers directly.

pub mod bits;
pub mod mat;
pub mod rect;
pub mod scalar;
pub mod vec;

pub use mat::*;
pub use rect::*;
pub use scalar::*;
pub use vec::*;
