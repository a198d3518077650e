//! Shader program service
//!
//! The binder talks to a compiled program through [`ShaderProgram`]. The
//! wgpu implementation reflects WGSL with naga to find its uniform blocks
//! and texture globals.

pub mod program;
pub mod reflect;
pub mod uniform;
pub mod wgsl;

pub use program::{BlockQuery, ShaderProgram};
pub use reflect::{BlockMember, ResourceKind, ResourceSlot, ShaderReflection, UniformBlock};
pub use uniform::{UniformSink, UniformValue};
pub use wgsl::{BlockHandle, WgslProgram};
