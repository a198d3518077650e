//! Material binder
//!
//! Owns a compiled program together with the material block, the texture
//! slots and the default texture, and prepares the program for each draw.

use super::binding::{BinderId, BindingContext, DrawScope};
use super::dispatch::{apply_light, LightingPath};
use super::light::Light;
use super::settings::BinderSettings;
use crate::material::import::ImportedMaterial;
use crate::material::layout::BlockLayout;
use crate::material::params::{MaterialBlock, MaterialParams, MATERIAL_FIELDS};
use crate::material::textures::{TextureLoader, TextureSlot, TextureSlots};
use crate::shader::program::ShaderProgram;
use glam::{Vec3, Vec4};
use std::sync::Arc;
use tracing::{info, warn};

/// Binds material and light parameters into a program.
///
/// Every material setter re-marshals and uploads the whole material block
/// before returning, so the GPU block always matches [`MaterialBinder::params`].
pub struct MaterialBinder<P: ShaderProgram> {
    id: BinderId,
    program: P,
    params: MaterialParams,
    block: MaterialBlock<P::BlockBuffer>,
    textures: TextureSlots<P::Texture>,
    default_texture: Option<Arc<P::Texture>>,
}

impl<P: ShaderProgram> MaterialBinder<P> {
    /// Create a binder for `program`.
    ///
    /// An unlinked program yields a binder with a disabled material block and
    /// no default texture. A missing default texture is only a warning.
    pub fn new<L>(mut program: P, loader: &L, settings: &BinderSettings) -> Self
    where
        L: TextureLoader<P::Texture> + ?Sized,
    {
        let params = MaterialParams::default();
        let textures = TextureSlots::new(settings.max_displacement);

        if !program.is_linked() {
            warn!(
                "Program is not linked, material binding disabled: {}",
                program.diagnostic().unwrap_or("no diagnostic")
            );
            let block =
                MaterialBlock::new(&mut program, BlockLayout::disabled(), settings.binding_point);
            return Self {
                id: BinderId::next(),
                program,
                params,
                block,
                textures,
                default_texture: None,
            };
        }

        let layout = BlockLayout::resolve(&program, &settings.block_name, &MATERIAL_FIELDS);
        let mut block = MaterialBlock::new(&mut program, layout, settings.binding_point);
        block.upload(&mut program, &params);

        let default_texture = match loader.load_texture(&settings.default_texture) {
            Ok(texture) => Some(texture),
            Err(e) => {
                warn!("Failed to load the default texture: {}", e);
                None
            }
        };

        Self {
            id: BinderId::next(),
            program,
            params,
            block,
            textures,
            default_texture,
        }
    }

    /// Identity used in binding contexts.
    pub fn id(&self) -> BinderId {
        self.id
    }

    /// The bound program.
    pub fn program(&self) -> &P {
        &self.program
    }

    /// The bound program, mutably.
    pub fn program_mut(&mut self) -> &mut P {
        &mut self.program
    }

    /// Current material parameters.
    pub fn params(&self) -> &MaterialParams {
        &self.params
    }

    /// The material block's staging bytes and layout.
    pub fn block(&self) -> &MaterialBlock<P::BlockBuffer> {
        &self.block
    }

    /// The texture slot table.
    pub fn textures(&self) -> &TextureSlots<P::Texture> {
        &self.textures
    }

    /// The default texture, if it loaded.
    pub fn default_texture(&self) -> Option<&Arc<P::Texture>> {
        self.default_texture.as_ref()
    }

    pub fn set_roughness(&mut self, roughness: f32) {
        self.params.roughness = roughness;
        self.update_material_block();
    }

    pub fn set_specular(&mut self, specular: f32) {
        self.params.specular = specular;
        self.update_material_block();
    }

    pub fn set_metallic(&mut self, metallic: f32) {
        self.params.metallic = metallic;
        self.update_material_block();
    }

    pub fn set_ambient(&mut self, ambient: Vec4) {
        self.params.ambient = ambient;
        self.update_material_block();
    }

    /// Store a texture for a slot. Nothing is sent to the GPU until the next
    /// [`MaterialBinder::setup_materials`].
    pub fn set_texture(&mut self, slot: TextureSlot, texture: Arc<P::Texture>) {
        self.textures.set(slot, texture);
    }

    pub fn set_max_displacement(&mut self, max_displacement: f32) {
        self.textures.set_max_displacement(max_displacement);
    }

    /// Select the lighting path for `light` and push its uniforms.
    pub fn setup_lighting(&mut self, light: Option<&dyn Light>) -> LightingPath {
        apply_light(&mut self.program, light)
    }

    /// Rebind the material block and bind all texture slots.
    pub fn setup_materials(&mut self) {
        self.block.rebind(&mut self.program);
        self.textures
            .bind_all(&mut self.program, self.default_texture.as_ref());
    }

    /// Push the camera position.
    pub fn setup_camera(&mut self, position: Vec3) {
        self.program.set_uniform("cameraPosition", position.into());
    }

    /// Apply an imported material with a single block upload.
    ///
    /// Textures that fail to load are skipped and leave their slot as it was.
    pub fn load_from_imported<L>(&mut self, material: Option<&ImportedMaterial>, loader: &L)
    where
        L: TextureLoader<P::Texture> + ?Sized,
    {
        let Some(material) = material else {
            return;
        };

        material.apply_to(&mut self.params);
        for (slot, path) in material.texture_paths() {
            match loader.load_texture(path) {
                Ok(texture) => self.textures.set(slot, texture),
                Err(e) => warn!("Skipping {:?} texture of imported material: {}", slot, e),
            }
        }

        self.update_material_block();
        info!("Loaded imported material into binder {:?}", self.id);
    }

    /// Prepare the program for a draw: lighting, then textures.
    ///
    /// The returned scope keeps the program in use and holds `context`, so
    /// no other binder can rebind the material binding point until the draw
    /// has been recorded and the scope dropped.
    pub fn prepare_draw<'a>(
        &'a mut self,
        context: &'a mut BindingContext,
        light: Option<&dyn Light>,
    ) -> DrawScope<'a, P> {
        self.program.begin_use();
        self.setup_lighting(light);
        self.setup_materials();
        DrawScope::new(
            &mut self.program,
            context,
            self.block.binding(),
            self.id,
        )
    }

    fn update_material_block(&mut self) {
        self.block.upload(&mut self.program, &self.params);
    }
}
