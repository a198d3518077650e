//! Recording doubles for the program service and texture loader.

use crate::error::{BinderError, Result};
use crate::material::textures::TextureLoader;
use crate::renderer::binding::BindingPoint;
use crate::shader::program::{BlockQuery, ShaderProgram};
use crate::shader::uniform::{UniformSink, UniformValue};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub struct MockTexture {
    pub name: String,
}

impl MockTexture {
    pub fn shared(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    BeginUse,
    EndUse,
    Uniform(String, UniformValue),
    CreateBlock(usize),
    Upload(Vec<u8>),
    BindBlock(BindingPoint),
    BlockBinding(u32, BindingPoint),
    BindTexture(u32, String),
}

/// A block the mock reports through introspection.
#[derive(Debug, Clone)]
pub struct MockBlock {
    pub name: String,
    pub index: u32,
    pub size: usize,
    pub members: Vec<(String, usize)>,
}

#[derive(Debug, Default)]
pub struct MockProgram {
    pub linked: bool,
    pub blocks: Vec<MockBlock>,
    pub calls: Vec<Call>,
    next_buffer: usize,
}

impl MockProgram {
    pub fn new() -> Self {
        Self {
            linked: true,
            ..Default::default()
        }
    }

    pub fn unlinked() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, name: &str, size: usize, members: &[(&str, usize)]) -> Self {
        let index = self.blocks.len() as u32;
        self.blocks.push(MockBlock {
            name: name.to_string(),
            index,
            size,
            members: members
                .iter()
                .map(|(name, offset)| (name.to_string(), *offset))
                .collect(),
        });
        self
    }

    /// The std140 layout of the material block.
    pub fn with_material_block(self) -> Self {
        self.with_block(
            "InputMaterial",
            32,
            &[("roughness", 0), ("specular", 4), ("metallic", 8), ("ambient", 16)],
        )
    }

    /// Last value assigned to `name`.
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Uniform(n, value) if n == name => Some(*value),
            _ => None,
        })
    }

    pub fn uniform_names(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Uniform(name, _) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<&[u8]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Upload(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Last texture bound at `unit`.
    pub fn bound_texture(&self, unit: u32) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::BindTexture(u, name) if *u == unit => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl UniformSink for MockProgram {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.calls.push(Call::Uniform(name.to_string(), value));
    }
}

impl ShaderProgram for MockProgram {
    type Texture = MockTexture;
    type BlockBuffer = usize;

    fn is_linked(&self) -> bool {
        self.linked
    }

    fn begin_use(&mut self) {
        self.calls.push(Call::BeginUse);
    }

    fn end_use(&mut self) {
        self.calls.push(Call::EndUse);
    }

    fn query_block_layout(&self, block: &str, members: &[&str]) -> Option<BlockQuery> {
        let block = self.blocks.iter().find(|b| b.name == block)?;
        let offsets = members
            .iter()
            .map(|name| {
                block
                    .members
                    .iter()
                    .find(|(member, _)| member == name)
                    .map(|(_, offset)| *offset)
            })
            .collect::<Option<Vec<_>>>()?;
        Some(BlockQuery {
            index: block.index,
            size: block.size,
            offsets,
        })
    }

    fn create_block_buffer(&mut self, size: usize) -> usize {
        self.calls.push(Call::CreateBlock(size));
        self.next_buffer += 1;
        self.next_buffer
    }

    fn upload_block(&mut self, _buffer: &usize, bytes: &[u8]) {
        self.calls.push(Call::Upload(bytes.to_vec()));
    }

    fn bind_block(&mut self, _buffer: &usize, point: BindingPoint) {
        self.calls.push(Call::BindBlock(point));
    }

    fn set_block_binding(&mut self, block_index: u32, point: BindingPoint) {
        self.calls.push(Call::BlockBinding(block_index, point));
    }

    fn bind_texture(&mut self, unit: u32, texture: &Arc<MockTexture>) {
        self.calls.push(Call::BindTexture(unit, texture.name.clone()));
    }
}

/// Loader serving a fixed set of paths.
#[derive(Debug, Default)]
pub struct MockLoader {
    textures: HashMap<PathBuf, Arc<MockTexture>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, name: &str) -> Self {
        self.textures
            .insert(PathBuf::from(path), MockTexture::shared(name));
        self
    }

    /// Loader that also serves the default texture path.
    pub fn with_default() -> Self {
        Self::new().with("required/defaultTexture.png", "default")
    }
}

impl TextureLoader<MockTexture> for MockLoader {
    fn load_texture(&self, path: &Path) -> Result<Arc<MockTexture>> {
        self.textures
            .get(path)
            .cloned()
            .ok_or_else(|| BinderError::TextureMissing(path.to_path_buf()))
    }
}
