//! Core rendering abstractions
//!
//! This module provides mid-level abstractions over wgpu primitives.

pub mod buffer;
pub mod texture;

pub use buffer::UniformBlockBuffer;
pub use texture::{FileTextureLoader, Texture2D};
