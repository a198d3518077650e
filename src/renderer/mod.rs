//! Per-draw binding
//!
//! [`MaterialBinder`] pushes a material, a light and the camera into a
//! program before each draw. Lights reach the shader through
//! [`apply_light`], which picks the lighting path from the light's type.

pub mod binder;
pub mod binding;
pub mod dispatch;
pub mod light;
pub mod settings;

pub use binder::MaterialBinder;
pub use binding::{BinderId, BindingContext, BindingPoint, DrawScope};
pub use dispatch::{apply_light, LightingPath};
pub use light::{Attenuation, Light, LightProperties, LightType, LightVariant, SceneLight};
pub use settings::BinderSettings;
