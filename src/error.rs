//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the binder and its wgpu program service.
///
/// Most binder paths degrade instead of failing; these errors surface from
/// the collaborator-facing calls (compilation, texture loading, bind group
/// assembly) where the caller has to decide what to do.
#[derive(Debug, Error)]
pub enum BinderError {
    /// WGSL parsing or validation failed.
    #[error("shader compilation failed: {0}")]
    Compile(String),

    /// A texture file could not be opened or decoded.
    #[error("failed to decode texture {path}: {source}")]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A texture loader has nothing at the given path.
    #[error("texture not found: {0}")]
    TextureMissing(PathBuf),

    /// A texture global has no texture bound at its unit.
    #[error("no texture bound at unit {unit} for `{name}`")]
    UnboundTexture { name: String, unit: u32 },

    /// A uniform block was routed to a binding point with no buffer bound.
    #[error("no buffer bound for uniform block `{0}`")]
    UnboundBlock(String),

    /// A texture global was never assigned a texture unit.
    #[error("texture `{0}` has no texture unit assigned")]
    UnassignedTexture(String),

    /// A sampler global has no texture declared at the binding before it.
    #[error("sampler `{0}` has no texture at the preceding binding")]
    UnpairedSampler(String),
}

/// Result alias for binder operations.
pub type Result<T> = std::result::Result<T, BinderError>;
