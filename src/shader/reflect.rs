//! WGSL reflection
//!
//! Parses and validates WGSL with naga and records the uniform blocks and
//! texture resources the binder needs to address by name.

use crate::error::{BinderError, Result};
use crate::shader::program::BlockQuery;

/// One member of a uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMember {
    pub name: String,
    pub offset: usize,
    pub size: usize,
}

/// A `var<uniform>` global.
///
/// Scalar and vector uniforms are reported as single-member blocks whose
/// member carries the variable name.
#[derive(Debug, Clone)]
pub struct UniformBlock {
    /// Variable name.
    pub variable: String,
    /// Struct type name, if the uniform is a named struct.
    pub type_name: Option<String>,
    pub group: u32,
    pub binding: u32,
    /// Total byte size.
    pub size: usize,
    pub members: Vec<BlockMember>,
}

impl UniformBlock {
    /// Whether `name` refers to this block by variable or type name.
    pub fn is_named(&self, name: &str) -> bool {
        self.variable == name || self.type_name.as_deref() == Some(name)
    }

    /// Find a member by name.
    pub fn member(&self, name: &str) -> Option<&BlockMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Kind of a handle-space resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Texture,
    Sampler,
}

/// A texture or sampler global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSlot {
    pub name: String,
    pub kind: ResourceKind,
    pub group: u32,
    pub binding: u32,
}

/// Reflection data of a validated WGSL module.
#[derive(Debug, Clone)]
pub struct ShaderReflection {
    blocks: Vec<UniformBlock>,
    resources: Vec<ResourceSlot>,
}

impl ShaderReflection {
    /// Parse, validate and reflect a WGSL source.
    pub fn from_wgsl(source: &str) -> Result<Self> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| BinderError::Compile(format!("WGSL parse error: {e}")))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| BinderError::Compile(format!("Validation error: {e}")))?;

        Ok(Self::from_module(&module))
    }

    /// Reflect an already validated module.
    pub fn from_module(module: &naga::Module) -> Self {
        let gctx = module.to_ctx();
        let mut blocks = Vec::new();
        let mut resources = Vec::new();

        for (_, var) in module.global_variables.iter() {
            let Some(name) = var.name.clone() else {
                continue;
            };
            let Some(binding) = var.binding.as_ref() else {
                continue;
            };
            let ty = &module.types[var.ty];

            match var.space {
                naga::AddressSpace::Uniform => {
                    let size = ty.inner.size(gctx) as usize;
                    let members = match &ty.inner {
                        naga::TypeInner::Struct { members, .. } => members
                            .iter()
                            .filter_map(|m| {
                                Some(BlockMember {
                                    name: m.name.clone()?,
                                    offset: m.offset as usize,
                                    size: module.types[m.ty].inner.size(gctx) as usize,
                                })
                            })
                            .collect(),
                        _ => vec![BlockMember {
                            name: name.clone(),
                            offset: 0,
                            size,
                        }],
                    };
                    blocks.push(UniformBlock {
                        variable: name,
                        type_name: ty.name.clone(),
                        group: binding.group,
                        binding: binding.binding,
                        size,
                        members,
                    });
                }
                naga::AddressSpace::Handle => {
                    let kind = match ty.inner {
                        naga::TypeInner::Image { .. } => ResourceKind::Texture,
                        naga::TypeInner::Sampler { .. } => ResourceKind::Sampler,
                        _ => continue,
                    };
                    resources.push(ResourceSlot {
                        name,
                        kind,
                        group: binding.group,
                        binding: binding.binding,
                    });
                }
                _ => {}
            }
        }

        Self { blocks, resources }
    }

    /// All uniform blocks, in declaration order.
    pub fn blocks(&self) -> &[UniformBlock] {
        &self.blocks
    }

    /// All texture and sampler globals, in declaration order.
    pub fn resources(&self) -> &[ResourceSlot] {
        &self.resources
    }

    /// Find a block by variable or struct type name, with its index.
    pub fn block(&self, name: &str) -> Option<(usize, &UniformBlock)> {
        self.blocks.iter().enumerate().find(|(_, b)| b.is_named(name))
    }

    /// Resolve a uniform name to its block index and member.
    ///
    /// Accepts `block.member` (block by variable or type name) or a bare
    /// member name, searched across all blocks in declaration order.
    pub fn uniform(&self, name: &str) -> Option<(usize, &BlockMember)> {
        if let Some((block, member)) = name.split_once('.') {
            let (index, block) = self.block(block)?;
            return block.member(member).map(|m| (index, m));
        }
        self.blocks
            .iter()
            .enumerate()
            .find_map(|(index, b)| b.member(name).map(|m| (index, m)))
    }

    /// Find a texture global by name.
    pub fn texture(&self, name: &str) -> Option<&ResourceSlot> {
        self.resources
            .iter()
            .find(|r| r.kind == ResourceKind::Texture && r.name == name)
    }

    /// Answer a block layout query.
    pub fn query(&self, block: &str, members: &[&str]) -> Option<BlockQuery> {
        let (index, block) = self.block(block)?;
        let offsets = members
            .iter()
            .map(|name| block.member(name).map(|m| m.offset))
            .collect::<Option<Vec<_>>>()?;
        Some(BlockQuery {
            index: index as u32,
            size: block.size,
            offsets,
        })
    }
}
