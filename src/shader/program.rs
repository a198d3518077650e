//! Shader program service contract
//!
//! The binder never talks to a graphics API directly. Everything it needs
//! from the compiled program (activation, uniforms, block introspection,
//! block buffers, texture units) goes through [`ShaderProgram`].

use super::uniform::UniformSink;
use crate::renderer::binding::BindingPoint;
use std::sync::Arc;

/// Introspection result for one uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockQuery {
    /// Index of the block inside the program.
    pub index: u32,
    /// Total byte size of the block.
    pub size: usize,
    /// Byte offset of each requested member, in request order.
    pub offsets: Vec<usize>,
}

/// A compiled and linked GPU program.
pub trait ShaderProgram: UniformSink {
    /// Texture resource type bound through this program.
    type Texture;
    /// GPU buffer object backing a uniform block.
    type BlockBuffer;

    /// Whether compilation and linking succeeded.
    fn is_linked(&self) -> bool;

    /// Compilation diagnostic, if any.
    fn diagnostic(&self) -> Option<&str> {
        None
    }

    /// Make this program current.
    fn begin_use(&mut self);

    /// Restore the previously current program.
    fn end_use(&mut self);

    /// Look up member offsets and total size of a uniform block.
    ///
    /// Returns `None` if the block or any member does not exist.
    fn query_block_layout(&self, block: &str, members: &[&str]) -> Option<BlockQuery>;

    /// Create a buffer object of `size` bytes for a uniform block.
    fn create_block_buffer(&mut self, size: usize) -> Self::BlockBuffer;

    /// Replace the whole contents of a block buffer.
    fn upload_block(&mut self, buffer: &Self::BlockBuffer, bytes: &[u8]);

    /// Make `buffer` visible at a binding point.
    fn bind_block(&mut self, buffer: &Self::BlockBuffer, point: BindingPoint);

    /// Route the program's block `block_index` to a binding point.
    fn set_block_binding(&mut self, block_index: u32, point: BindingPoint);

    /// Bind a texture to a texture unit.
    fn bind_texture(&mut self, unit: u32, texture: &Arc<Self::Texture>);
}
