//! Uniform block layout resolution
//!
//! A [`BlockLayout`] records where each tracked field lives inside a uniform
//! block. It is resolved once against a linked program and never changes.

use crate::shader::program::ShaderProgram;
use tracing::{debug, warn};

/// A field requested from a uniform block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec<'a> {
    pub name: &'a str,
    /// Bytes the CPU writes for this field.
    pub size: usize,
}

impl<'a> FieldSpec<'a> {
    pub const fn new(name: &'a str, size: usize) -> Self {
        Self { name, size }
    }
}

/// A resolved field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutField {
    pub name: String,
    pub offset: usize,
    pub size: usize,
}

/// Byte layout of a uniform block.
///
/// A disabled layout has size 0 and no fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    block_index: u32,
    size: usize,
    fields: Vec<LayoutField>,
}

impl BlockLayout {
    /// Resolve `fields` inside `block_name`.
    ///
    /// Degrades to [`BlockLayout::disabled`] if the block or a member is
    /// missing, or if a field would not fit inside the block.
    pub fn resolve<P: ShaderProgram + ?Sized>(
        program: &P,
        block_name: &str,
        fields: &[FieldSpec<'_>],
    ) -> Self {
        let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
        let Some(query) = program.query_block_layout(block_name, &names) else {
            warn!(
                "Uniform block {} or one of its members {:?} not found, disabling it",
                block_name, names
            );
            return Self::disabled();
        };

        if query.size == 0 || query.offsets.len() != fields.len() {
            warn!(
                "Uniform block {} reported an unusable layout, disabling it",
                block_name
            );
            return Self::disabled();
        }

        let mut resolved = Vec::with_capacity(fields.len());
        for (field, &offset) in fields.iter().zip(&query.offsets) {
            if offset + field.size > query.size {
                warn!(
                    "Field {}.{} at offset {} overruns the {} byte block, disabling it",
                    block_name, field.name, offset, query.size
                );
                return Self::disabled();
            }
            resolved.push(LayoutField {
                name: field.name.to_string(),
                offset,
                size: field.size,
            });
        }

        debug!(
            "Resolved uniform block {} (index {}, {} bytes)",
            block_name, query.index, query.size
        );
        Self {
            block_index: query.index,
            size: query.size,
            fields: resolved,
        }
    }

    /// A layout that disables uploads.
    pub fn disabled() -> Self {
        Self {
            block_index: 0,
            size: 0,
            fields: Vec::new(),
        }
    }

    /// Whether the block was resolved.
    pub fn is_enabled(&self) -> bool {
        self.size > 0
    }

    /// Index of the block inside the program.
    pub fn block_index(&self) -> u32 {
        self.block_index
    }

    /// Total byte size of the block.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Resolved fields, in request order.
    pub fn fields(&self) -> &[LayoutField] {
        &self.fields
    }

    /// Offset of a field by name.
    pub fn offset(&self, name: &str) -> Option<usize> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.offset)
    }
}
