//! Texture slots
//!
//! Maps semantic slots to shared textures and binds them to their texture
//! units before a draw.

use crate::error::Result;
use crate::shader::program::ShaderProgram;
use crate::shader::uniform::UniformValue;
use std::path::Path;
use std::sync::Arc;
use tracing::error;

/// Semantic texture slot. The discriminant is the texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Diffuse = 0,
    Normal = 1,
    Displacement = 2,
    Specular = 3,
}

impl TextureSlot {
    /// All slots, in unit order.
    pub const ALL: [TextureSlot; 4] = [
        TextureSlot::Diffuse,
        TextureSlot::Normal,
        TextureSlot::Displacement,
        TextureSlot::Specular,
    ];

    /// Texture unit the slot binds to.
    pub fn unit(self) -> u32 {
        self as u32
    }

    /// Uniform holding the slot's texture unit.
    pub fn sampler_uniform(self) -> &'static str {
        match self {
            TextureSlot::Diffuse => "diffuseTexture",
            TextureSlot::Normal => "normalTexture",
            TextureSlot::Displacement => "displacementTexture",
            TextureSlot::Specular => "specularTexture",
        }
    }
}

/// Loads texture files into shared textures.
pub trait TextureLoader<T> {
    fn load_texture(&self, path: &Path) -> Result<Arc<T>>;
}

/// Sparse slot-to-texture table.
#[derive(Debug)]
pub struct TextureSlots<T> {
    slots: [Option<Arc<T>>; 4],
    max_displacement: f32,
}

impl<T> Default for TextureSlots<T> {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl<T> TextureSlots<T> {
    /// Create an empty table.
    pub fn new(max_displacement: f32) -> Self {
        Self {
            slots: [None, None, None, None],
            max_displacement,
        }
    }

    /// Install a texture, releasing this table's share of the previous one.
    pub fn set(&mut self, slot: TextureSlot, texture: Arc<T>) {
        self.slots[slot as usize] = Some(texture);
    }

    /// Texture explicitly set for a slot.
    pub fn get(&self, slot: TextureSlot) -> Option<&Arc<T>> {
        self.slots[slot as usize].as_ref()
    }

    /// Set the maximum displacement pushed with the bindings.
    pub fn set_max_displacement(&mut self, max_displacement: f32) {
        self.max_displacement = max_displacement;
    }

    pub fn max_displacement(&self) -> f32 {
        self.max_displacement
    }

    /// Bind every slot's texture and describe the bindings to the shader.
    ///
    /// Diffuse and specular always bind, falling back to `default`. Normal and
    /// displacement bind only when set, with a flag uniform telling the shader
    /// whether they are present.
    pub fn bind_all<P>(&self, program: &mut P, default: Option<&Arc<T>>)
    where
        P: ShaderProgram<Texture = T> + ?Sized,
    {
        for slot in [TextureSlot::Diffuse, TextureSlot::Specular] {
            match self.get(slot).or(default) {
                Some(texture) => program.bind_texture(slot.unit(), texture),
                None => error!(
                    "No texture for the {:?} slot and no default texture, leaving unit {} unbound",
                    slot,
                    slot.unit()
                ),
            }
        }

        for (slot, flag) in [
            (TextureSlot::Normal, "useNormalTexture"),
            (TextureSlot::Displacement, "useDisplacementTexture"),
        ] {
            let texture = self.get(slot);
            if let Some(texture) = texture {
                program.bind_texture(slot.unit(), texture);
            }
            program.set_uniform(flag, UniformValue::Bool(texture.is_some()));
        }

        for slot in TextureSlot::ALL {
            program.set_uniform(
                slot.sampler_uniform(),
                UniformValue::Int(slot.unit() as i32),
            );
        }
        program.set_uniform("maxDisplacement", self.max_displacement.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockProgram, MockTexture};

    #[test]
    fn test_empty_table_binds_default() {
        let mut program = MockProgram::new();
        let default = MockTexture::shared("default");
        let slots = TextureSlots::<MockTexture>::default();

        slots.bind_all(&mut program, Some(&default));

        assert_eq!(program.bound_texture(0), Some("default"));
        assert_eq!(program.bound_texture(3), Some("default"));
        assert_eq!(program.bound_texture(1), None);
        assert_eq!(program.bound_texture(2), None);
        assert_eq!(
            program.uniform("useNormalTexture"),
            Some(UniformValue::Bool(false))
        );
        assert_eq!(
            program.uniform("useDisplacementTexture"),
            Some(UniformValue::Bool(false))
        );
    }

    #[test]
    fn test_normal_override_sets_flag() {
        let mut program = MockProgram::new();
        let default = MockTexture::shared("default");
        let mut slots = TextureSlots::default();
        slots.set(TextureSlot::Normal, MockTexture::shared("bumps"));

        slots.bind_all(&mut program, Some(&default));

        assert_eq!(program.bound_texture(1), Some("bumps"));
        assert_eq!(
            program.uniform("useNormalTexture"),
            Some(UniformValue::Bool(true))
        );
        assert_eq!(program.bound_texture(0), Some("default"));
        assert_eq!(program.bound_texture(3), Some("default"));
        assert_eq!(
            program.uniform("useDisplacementTexture"),
            Some(UniformValue::Bool(false))
        );
    }

    #[test]
    fn test_units_and_displacement_uniforms() {
        let mut program = MockProgram::new();
        let mut slots = TextureSlots::new(0.5);
        slots.set(TextureSlot::Specular, MockTexture::shared("shine"));
        slots.set_max_displacement(0.1);

        slots.bind_all(&mut program, None);

        assert_eq!(program.bound_texture(3), Some("shine"));
        assert_eq!(program.uniform("diffuseTexture"), Some(UniformValue::Int(0)));
        assert_eq!(program.uniform("normalTexture"), Some(UniformValue::Int(1)));
        assert_eq!(
            program.uniform("displacementTexture"),
            Some(UniformValue::Int(2))
        );
        assert_eq!(program.uniform("specularTexture"), Some(UniformValue::Int(3)));
        assert_eq!(
            program.uniform("maxDisplacement"),
            Some(UniformValue::Float(0.1))
        );
    }

    #[test]
    fn test_missing_default_skips_bind() {
        let mut program = MockProgram::new();
        let slots = TextureSlots::<MockTexture>::default();

        slots.bind_all(&mut program, None);

        assert_eq!(program.bound_texture(0), None);
        assert_eq!(program.bound_texture(3), None);
        assert_eq!(
            program.uniform("useNormalTexture"),
            Some(UniformValue::Bool(false))
        );
    }

    #[test]
    fn test_set_releases_previous_texture() {
        let first = MockTexture::shared("first");
        let mut slots = TextureSlots::default();
        slots.set(TextureSlot::Diffuse, Arc::clone(&first));
        assert_eq!(Arc::strong_count(&first), 2);

        slots.set(TextureSlot::Diffuse, MockTexture::shared("second"));
        assert_eq!(Arc::strong_count(&first), 1);
        assert_eq!(slots.get(TextureSlot::Diffuse).unwrap().name, "second");
    }
}
