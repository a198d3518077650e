//! Binder settings
//!
//! Configuration for binder creation.

use super::binding::BindingPoint;
use std::path::PathBuf;

/// Settings for creating a material binder.
#[derive(Debug, Clone)]
pub struct BinderSettings {
    /// Name of the material uniform block in the program.
    pub block_name: String,
    /// Binding point the material block is bound at.
    pub binding_point: BindingPoint,
    /// Texture used for unset diffuse and specular slots.
    pub default_texture: PathBuf,
    /// Initial maximum displacement for displacement mapping.
    pub max_displacement: f32,
}

impl Default for BinderSettings {
    fn default() -> Self {
        Self {
            block_name: "InputMaterial".to_string(),
            binding_point: BindingPoint::MATERIAL,
            default_texture: PathBuf::from("required/defaultTexture.png"),
            max_displacement: 0.5,
        }
    }
}

impl BinderSettings {
    /// Create new binder settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the material block name.
    pub fn block_name(mut self, name: impl Into<String>) -> Self {
        self.block_name = name.into();
        self
    }

    /// Set the material binding point.
    pub fn binding_point(mut self, point: BindingPoint) -> Self {
        self.binding_point = point;
        self
    }

    /// Set the default texture path.
    pub fn default_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_texture = path.into();
        self
    }

    /// Set the initial maximum displacement.
    pub fn max_displacement(mut self, max_displacement: f32) -> Self {
        self.max_displacement = max_displacement;
        self
    }
}
