//! Material state
//!
//! Scalar parameters packed into the material uniform block, texture slots,
//! and the mapping from imported asset materials.

pub mod import;
pub mod layout;
pub mod params;
pub mod textures;

pub use import::ImportedMaterial;
pub use layout::{BlockLayout, FieldSpec, LayoutField};
pub use params::{MaterialBlock, MaterialParams, MATERIAL_FIELDS};
pub use textures::{TextureLoader, TextureSlot, TextureSlots};
