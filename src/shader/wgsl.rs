//! WGSL program service
//!
//! [`WgslProgram`] implements [`ShaderProgram`] on wgpu. WGSL has no loose
//! uniforms, so uniforms set by name are staged into the `var<uniform>`
//! block that declares them. Texture globals are addressed through texture
//! units: assigning an integer to a texture global's name picks the unit it
//! samples from.
//!
//! Queue writes all land before the next submit, so a buffer rewritten
//! between two draws of one submit would show both draws its last contents.
//! Every changed block is therefore written to a fresh buffer, and a bind
//! group keeps the buffers that were current when it was built.

use super::program::{BlockQuery, ShaderProgram};
use super::reflect::{ResourceKind, ShaderReflection};
use super::uniform::{UniformSink, UniformValue};
use crate::context::WgpuContext;
use crate::core::buffer::UniformBlockBuffer;
use crate::core::texture::Texture2D;
use crate::error::{BinderError, Result};
use crate::renderer::binding::BindingPoint;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Handle of a block buffer created through [`ShaderProgram::create_block_buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle(usize);

/// CPU bytes of a uniform block and the GPU buffer holding them.
struct StagedBlock {
    label: String,
    bytes: Vec<u8>,
    buffer: Option<UniformBlockBuffer>,
    dirty: bool,
}

impl StagedBlock {
    fn new(label: String, size: usize) -> Self {
        Self {
            label,
            bytes: vec![0; size],
            buffer: None,
            dirty: false,
        }
    }

    /// Buffer with the current bytes, allocated on first use and after
    /// every change.
    fn current(&mut self, ctx: &WgpuContext) -> &UniformBlockBuffer {
        if self.dirty {
            self.buffer = None;
            self.dirty = false;
        }
        let (label, bytes) = (&self.label, &self.bytes);
        self.buffer.get_or_insert_with(|| {
            let buffer = UniformBlockBuffer::new(ctx, bytes.len() as u64, Some(label));
            buffer.write_bytes(ctx, bytes);
            buffer
        })
    }
}

/// A WGSL shader compiled for wgpu.
pub struct WgslProgram {
    ctx: WgpuContext,
    label: String,
    module: Option<wgpu::ShaderModule>,
    reflection: Option<ShaderReflection>,
    diagnostic: Option<String>,
    loose: Vec<StagedBlock>,
    block_buffers: Vec<StagedBlock>,
    block_bindings: HashMap<u32, BindingPoint>,
    bound_blocks: HashMap<BindingPoint, BlockHandle>,
    texture_units: HashMap<String, u32>,
    bound_textures: HashMap<u32, Arc<Texture2D>>,
    use_depth: u32,
}

impl WgslProgram {
    /// Compile `source`, keeping a failed program around as unlinked.
    pub fn new(ctx: &WgpuContext, label: &str, source: &str) -> Self {
        Self::compile(ctx, label, source).unwrap_or_else(|e| {
            error!("Failed to compile program {}: {}", label, e);
            Self::empty(ctx, label, Some(e.to_string()))
        })
    }

    /// Compile `source`, failing on parse or validation errors.
    pub fn compile(ctx: &WgpuContext, label: &str, source: &str) -> Result<Self> {
        let reflection = ShaderReflection::from_wgsl(source)?;

        let module = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

        let loose = reflection
            .blocks()
            .iter()
            .map(|block| StagedBlock::new(format!("{} {}", label, block.variable), block.size))
            .collect();

        info!(
            "Compiled program {} ({} uniform blocks, {} texture resources)",
            label,
            reflection.blocks().len(),
            reflection.resources().len()
        );

        let mut program = Self::empty(ctx, label, None);
        program.module = Some(module);
        program.reflection = Some(reflection);
        program.loose = loose;
        Ok(program)
    }

    fn empty(ctx: &WgpuContext, label: &str, diagnostic: Option<String>) -> Self {
        Self {
            ctx: ctx.clone(),
            label: label.to_string(),
            module: None,
            reflection: None,
            diagnostic,
            loose: Vec::new(),
            block_buffers: Vec::new(),
            block_bindings: HashMap::new(),
            bound_blocks: HashMap::new(),
            texture_units: HashMap::new(),
            bound_textures: HashMap::new(),
            use_depth: 0,
        }
    }

    /// The wgpu shader module, if compilation succeeded.
    pub fn module(&self) -> Option<&wgpu::ShaderModule> {
        self.module.as_ref()
    }

    /// Reflection data, if compilation succeeded.
    pub fn reflection(&self) -> Option<&ShaderReflection> {
        self.reflection.as_ref()
    }

    /// Write every changed block to a fresh buffer.
    pub fn flush(&mut self) {
        let ctx = &self.ctx;
        for block in self
            .loose
            .iter_mut()
            .chain(self.block_buffers.iter_mut())
            .filter(|b| b.dirty)
        {
            block.current(ctx);
        }
    }

    /// Assemble the bind group for `group` from the current bindings.
    ///
    /// Uniform blocks routed to a binding point use the block buffer bound
    /// there; all others use their loose uniforms. Textures use the texture
    /// at their assigned unit, and each sampler takes the sampler of the
    /// texture declared at the binding right before it.
    ///
    /// The group captures the current contents. Uniforms set afterwards do
    /// not change what a draw recorded with this group reads.
    pub fn bind_group(
        &mut self,
        group: u32,
        layout: &wgpu::BindGroupLayout,
    ) -> Result<wgpu::BindGroup> {
        let Some(reflection) = &self.reflection else {
            return Err(BinderError::Compile(
                self.diagnostic.clone().unwrap_or_default(),
            ));
        };

        let mut buffers = Vec::new();
        for (index, block) in reflection.blocks().iter().enumerate() {
            if block.group != group {
                continue;
            }
            let staged = match self.block_bindings.get(&(index as u32)) {
                Some(point) => {
                    let handle = self
                        .bound_blocks
                        .get(point)
                        .ok_or_else(|| BinderError::UnboundBlock(block.variable.clone()))?;
                    &mut self.block_buffers[handle.0]
                }
                None => &mut self.loose[index],
            };
            buffers.push((block.binding, staged.current(&self.ctx).clone()));
        }

        let mut entries: Vec<wgpu::BindGroupEntry<'_>> = buffers
            .iter()
            .map(|(binding, buffer)| wgpu::BindGroupEntry {
                binding: *binding,
                resource: buffer.buffer().as_entire_binding(),
            })
            .collect();

        for resource in reflection.resources().iter().filter(|r| r.group == group) {
            let texture_name = match resource.kind {
                ResourceKind::Texture => resource.name.as_str(),
                ResourceKind::Sampler => reflection
                    .resources()
                    .iter()
                    .find(|r| {
                        r.kind == ResourceKind::Texture
                            && r.group == group
                            && r.binding + 1 == resource.binding
                    })
                    .map(|r| r.name.as_str())
                    .ok_or_else(|| BinderError::UnpairedSampler(resource.name.clone()))?,
            };
            let unit = *self
                .texture_units
                .get(texture_name)
                .ok_or_else(|| BinderError::UnassignedTexture(texture_name.to_string()))?;
            let texture =
                self.bound_textures
                    .get(&unit)
                    .ok_or_else(|| BinderError::UnboundTexture {
                        name: texture_name.to_string(),
                        unit,
                    })?;

            let binding_resource = match resource.kind {
                ResourceKind::Texture => wgpu::BindingResource::TextureView(texture.view()),
                ResourceKind::Sampler => wgpu::BindingResource::Sampler(texture.sampler()),
            };
            entries.push(wgpu::BindGroupEntry {
                binding: resource.binding,
                resource: binding_resource,
            });
        }

        debug!(
            "Bind group {} of program {} with {} entries",
            group,
            self.label,
            entries.len()
        );
        Ok(self.ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} group {}", self.label, group)),
            layout,
            entries: &entries,
        }))
    }
}

impl UniformSink for WgslProgram {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        let Some(reflection) = &self.reflection else {
            return;
        };

        if let Some(texture) = reflection.texture(name) {
            if let UniformValue::Int(unit) = value {
                self.texture_units
                    .insert(texture.name.clone(), unit.max(0) as u32);
            }
            return;
        }

        let Some((index, member)) = reflection.uniform(name) else {
            trace!("Program {} has no uniform {}", self.label, name);
            return;
        };
        let block = &mut self.loose[index];
        let written = block
            .bytes
            .get_mut(member.offset..member.offset + member.size)
            .is_some_and(|dst| value.write_to(dst));
        if written {
            block.dirty = true;
        } else {
            trace!(
                "Uniform {} ({} bytes) does not fit its {} byte member",
                name,
                value.size(),
                member.size
            );
        }
    }
}

impl ShaderProgram for WgslProgram {
    type Texture = Texture2D;
    type BlockBuffer = BlockHandle;

    fn is_linked(&self) -> bool {
        self.module.is_some()
    }

    fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    fn begin_use(&mut self) {
        self.use_depth += 1;
    }

    fn end_use(&mut self) {
        self.use_depth = self.use_depth.saturating_sub(1);
        if self.use_depth == 0 {
            self.flush();
        }
    }

    fn query_block_layout(&self, block: &str, members: &[&str]) -> Option<BlockQuery> {
        self.reflection.as_ref()?.query(block, members)
    }

    fn create_block_buffer(&mut self, size: usize) -> BlockHandle {
        let handle = BlockHandle(self.block_buffers.len());
        self.block_buffers.push(StagedBlock::new(
            format!("{} block {}", self.label, handle.0),
            size,
        ));
        handle
    }

    fn upload_block(&mut self, buffer: &BlockHandle, bytes: &[u8]) {
        let Some(block) = self.block_buffers.get_mut(buffer.0) else {
            return;
        };
        let len = bytes.len().min(block.bytes.len());
        block.bytes[..len].copy_from_slice(&bytes[..len]);
        block.dirty = true;
        block.current(&self.ctx);
    }

    fn bind_block(&mut self, buffer: &BlockHandle, point: BindingPoint) {
        self.bound_blocks.insert(point, *buffer);
    }

    fn set_block_binding(&mut self, block_index: u32, point: BindingPoint) {
        self.block_bindings.insert(block_index, point);
    }

    fn bind_texture(&mut self, unit: u32, texture: &Arc<Texture2D>) {
        self.bound_textures.insert(unit, Arc::clone(texture));
    }
}
