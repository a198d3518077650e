//! GPU buffer abstractions
//!
//! Provides the untyped uniform buffer backing material blocks and loose
//! uniforms.

use crate::context::WgpuContext;
use std::sync::Arc;

/// Raw uniform buffer without type information.
///
/// Cheap to clone; clones share the same GPU buffer.
#[derive(Clone)]
pub struct UniformBlockBuffer {
    pub(crate) buffer: Arc<wgpu::Buffer>,
    pub(crate) size: u64,
}

impl UniformBlockBuffer {
    /// Create a new uniform buffer of at least `size` bytes.
    ///
    /// The allocation is rounded up to 16 bytes, which also covers empty
    /// blocks.
    pub fn new(ctx: &WgpuContext, size: u64, label: Option<&str>) -> Self {
        let size = size.max(1).next_multiple_of(16);
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label,
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer: Arc::new(buffer),
            size,
        }
    }

    /// Overwrite the buffer from offset 0 with `bytes`.
    pub fn write_bytes(&self, ctx: &WgpuContext, bytes: &[u8]) {
        let len = (bytes.len() as u64).min(self.size) as usize;
        let bytes = &bytes[..len];
        if len % wgpu::COPY_BUFFER_ALIGNMENT as usize == 0 {
            ctx.queue.write_buffer(&self.buffer, 0, bytes);
        } else {
            let mut padded = bytes.to_vec();
            padded.resize(len.next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT as usize), 0);
            ctx.queue.write_buffer(&self.buffer, 0, &padded);
        }
    }

    /// Get the raw wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Get the buffer size.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl std::fmt::Debug for UniformBlockBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniformBlockBuffer")
            .field("size", &self.size)
            .finish()
    }
}
