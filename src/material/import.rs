//! Imported material descriptions
//!
//! The asset importer hands over colors, a shininess and texture paths. They
//! are mapped onto [`MaterialParams`] and texture slots as the binder's
//! shaders have always received them: the diffuse color's first channel
//! drives roughness and shininess drives metallic.

use super::params::MaterialParams;
use super::textures::TextureSlot;
use glam::Vec4;
use std::path::PathBuf;

/// Material as produced by the asset importer.
///
/// Absent properties leave the binder's current values untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedMaterial {
    pub diffuse_color: Option<Vec4>,
    pub specular_color: Option<Vec4>,
    pub ambient_color: Option<Vec4>,
    pub shininess: Option<f32>,
    pub diffuse_textures: Vec<PathBuf>,
    pub specular_textures: Vec<PathBuf>,
}

impl ImportedMaterial {
    /// Copy the scalar properties into `params`.
    pub fn apply_to(&self, params: &mut MaterialParams) {
        if let Some(diffuse) = self.diffuse_color {
            params.roughness = diffuse.x;
        }
        if let Some(specular) = self.specular_color {
            params.specular = specular.x;
        }
        if let Some(shininess) = self.shininess {
            params.metallic = shininess;
        }
        if let Some(ambient) = self.ambient_color {
            params.ambient = ambient;
        }
    }

    /// First texture path per slot that has one.
    pub fn texture_paths(&self) -> impl Iterator<Item = (TextureSlot, &PathBuf)> {
        [
            (TextureSlot::Diffuse, self.diffuse_textures.first()),
            (TextureSlot::Specular, self.specular_textures.first()),
        ]
        .into_iter()
        .filter_map(|(slot, path)| path.map(|p| (slot, p)))
    }
}
