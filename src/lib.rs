//! Sheen material binder
//!
//! CPU-side binding of materials and lights for a forward renderer on wgpu.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **context** - Core wgpu wrapper (Device, Queue)
//! 2. **core** - GPU primitives (uniform block buffers, textures)
//! 3. **shader** - Program service trait, WGSL reflection and the wgpu program
//! 4. **material** - Material parameters, block layout and texture slots
//! 5. **renderer** - Light dispatch, binding points and the material binder

pub mod context;
pub mod core;
pub mod error;
pub mod material;
pub mod renderer;
pub mod shader;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use context::WgpuContext;

pub use core::{FileTextureLoader, Texture2D, UniformBlockBuffer};

pub use error::{BinderError, Result};

pub use material::{
    BlockLayout, ImportedMaterial, MaterialBlock, MaterialParams, TextureLoader, TextureSlot,
    TextureSlots,
};

pub use renderer::{
    apply_light, Attenuation, BinderSettings, BindingContext, BindingPoint, DrawScope, Light,
    LightProperties, LightType, LightingPath, MaterialBinder, SceneLight,
};

pub use shader::{ShaderProgram, ShaderReflection, UniformSink, UniformValue, WgslProgram};

// Re-export glam for convenience
pub use glam;
