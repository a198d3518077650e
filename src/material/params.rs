//! Material parameters and their uniform block
//!
//! [`MaterialParams`] is the CPU copy. [`MaterialBlock`] owns the staging
//! bytes and the GPU buffer and keeps them equal to the last marshaled
//! parameters.

use super::layout::{BlockLayout, FieldSpec};
use crate::renderer::binding::BindingPoint;
use crate::shader::program::ShaderProgram;
use crate::shader::uniform::UniformValue;
use glam::Vec4;

/// Fields of the material block, in marshaling order.
pub const MATERIAL_FIELDS: [FieldSpec<'static>; 4] = [
    FieldSpec::new("roughness", 4),
    FieldSpec::new("specular", 4),
    FieldSpec::new("metallic", 4),
    FieldSpec::new("ambient", 16),
];

/// CPU values of the material block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub roughness: f32,
    pub specular: f32,
    pub metallic: f32,
    pub ambient: Vec4,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            roughness: 2.0,
            specular: 0.0,
            metallic: 0.0,
            ambient: Vec4::new(0.1, 0.1, 0.1, 1.0),
        }
    }
}

impl MaterialParams {
    /// Values in [`MATERIAL_FIELDS`] order.
    pub fn values(&self) -> [UniformValue; 4] {
        [
            UniformValue::Float(self.roughness),
            UniformValue::Float(self.specular),
            UniformValue::Float(self.metallic),
            UniformValue::Vec4(self.ambient),
        ]
    }
}

/// Staging bytes and GPU buffer of a material block.
#[derive(Debug)]
pub struct MaterialBlock<B> {
    layout: BlockLayout,
    staging: Vec<u8>,
    buffer: Option<B>,
    binding: BindingPoint,
}

impl<B> MaterialBlock<B> {
    /// Create the block. A GPU buffer is only created for an enabled layout.
    pub fn new<P>(program: &mut P, layout: BlockLayout, binding: BindingPoint) -> Self
    where
        P: ShaderProgram<BlockBuffer = B> + ?Sized,
    {
        let buffer = layout
            .is_enabled()
            .then(|| program.create_block_buffer(layout.size()));
        Self {
            staging: vec![0; layout.size()],
            layout,
            buffer,
            binding,
        }
    }

    /// Write every field's bytes at its resolved offset.
    pub fn marshal(&mut self, params: &MaterialParams) {
        for (field, value) in self.layout.fields().iter().zip(params.values()) {
            // Resolution guarantees offset + size fits the block.
            if let Some(dst) = self.staging.get_mut(field.offset..) {
                value.write_to(dst);
            }
        }
    }

    /// Marshal `params` and upload the full staging buffer.
    ///
    /// The program is in use for the duration. Does nothing on the GPU side
    /// for a disabled layout.
    pub fn upload<P>(&mut self, program: &mut P, params: &MaterialParams)
    where
        P: ShaderProgram<BlockBuffer = B> + ?Sized,
    {
        program.begin_use();
        self.marshal(params);
        if let Some(buffer) = &self.buffer {
            program.upload_block(buffer, &self.staging);
            program.bind_block(buffer, self.binding);
            program.set_block_binding(self.layout.block_index(), self.binding);
        }
        program.end_use();
    }

    /// Bind the buffer at the binding point again, without uploading.
    pub fn rebind<P>(&self, program: &mut P)
    where
        P: ShaderProgram<BlockBuffer = B> + ?Sized,
    {
        if let Some(buffer) = &self.buffer {
            program.bind_block(buffer, self.binding);
        }
    }

    /// The resolved layout.
    pub fn layout(&self) -> &BlockLayout {
        &self.layout
    }

    /// Current staging bytes.
    pub fn staging(&self) -> &[u8] {
        &self.staging
    }

    /// Binding point of the block.
    pub fn binding(&self) -> BindingPoint {
        self.binding
    }

    /// Whether a GPU buffer backs this block.
    pub fn is_enabled(&self) -> bool {
        self.buffer.is_some()
    }
}
