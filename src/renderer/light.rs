//! Light types
//!
//! Lights as the binder sees them: a type tag, a property set and an
//! attenuation model.

use crate::shader::uniform::UniformSink;
use glam::Vec4;

/// Light type enumeration.
///
/// Lights may report tags the binder does not know how to shade, either
/// [`LightType::Area`] or an arbitrary numeric tag in [`LightType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    Point,
    Directional,
    Hemisphere,
    Area,
    Global,
    Other(i32),
}

impl LightType {
    /// Numeric tag written to the `lightingType` uniform.
    pub fn tag(self) -> i32 {
        match self {
            LightType::Point => 0,
            LightType::Directional => 1,
            LightType::Hemisphere => 2,
            LightType::Area => 3,
            LightType::Global => 4,
            LightType::Other(tag) => tag,
        }
    }

    /// Inverse of [`LightType::tag`].
    pub fn from_tag(tag: i32) -> Self {
        match tag {
            0 => LightType::Point,
            1 => LightType::Directional,
            2 => LightType::Hemisphere,
            3 => LightType::Area,
            4 => LightType::Global,
            other => LightType::Other(other),
        }
    }
}

/// Attenuation factors for point and spot lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    /// Constant attenuation factor (default: 1.0).
    pub constant: f32,
    /// Linear attenuation factor.
    pub linear: f32,
    /// Quadratic attenuation factor.
    pub quadratic: f32,
}

impl Attenuation {
    /// Create a new attenuation.
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Default attenuation for a ~50 unit range.
    pub fn range_50() -> Self {
        Self::new(1.0, 0.09, 0.032)
    }

    /// No attenuation (constant intensity).
    pub fn none() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Convert to array.
    pub fn to_array(&self) -> [f32; 3] {
        [self.constant, self.linear, self.quadratic]
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::none()
    }
}

/// Shading properties of a light.
///
/// Only the fields relevant to the light's type are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightProperties {
    /// Color fed to the generic light color uniform.
    pub diffuse_color: Vec4,
    pub specular_color: Vec4,
    /// Radius of a point light.
    pub radius: f32,
    /// Sky color of a hemisphere light.
    pub sky_color: Vec4,
    /// Ground color of a hemisphere light.
    pub ground_color: Vec4,
}

impl Default for LightProperties {
    fn default() -> Self {
        Self {
            diffuse_color: Vec4::ONE,
            specular_color: Vec4::ONE,
            radius: 1.0,
            sky_color: Vec4::ONE,
            ground_color: Vec4::ZERO,
        }
    }
}

/// Trait for light sources.
pub trait Light {
    /// Get the light type.
    fn light_type(&self) -> LightType;

    /// Get the shading properties.
    fn properties(&self) -> &LightProperties;

    /// World-space forward direction (w = 0).
    fn forward_direction(&self) -> Vec4;

    /// Get the attenuation model.
    fn attenuation(&self) -> Attenuation;

    /// Push any extra uniforms this light knows about.
    fn setup_shader_uniforms(&self, _sink: &mut dyn UniformSink) {}
}

/// A light placed in the scene.
#[derive(Debug, Clone)]
pub struct SceneLight {
    /// Light type.
    pub light_type: LightType,
    /// Shading properties.
    pub properties: LightProperties,
    /// Forward direction (normalized, w = 0).
    pub direction: Vec4,
    /// Attenuation factors.
    pub attenuation: Attenuation,
}

impl SceneLight {
    /// Create a new light.
    pub fn new(light_type: LightType, properties: LightProperties) -> Self {
        Self {
            light_type,
            properties,
            direction: Vec4::new(0.0, 0.0, -1.0, 0.0),
            attenuation: Attenuation::none(),
        }
    }

    /// Create a point light.
    pub fn point(color: Vec4, radius: f32) -> Self {
        Self::new(
            LightType::Point,
            LightProperties {
                diffuse_color: color,
                specular_color: color,
                radius,
                ..Default::default()
            },
        )
    }

    /// Create a directional light shining along `direction`.
    pub fn directional(color: Vec4, direction: Vec4) -> Self {
        Self::new(
            LightType::Directional,
            LightProperties {
                diffuse_color: color,
                specular_color: color,
                ..Default::default()
            },
        )
        .with_direction(direction)
    }

    /// Create a hemisphere light blending sky and ground colors.
    pub fn hemisphere(sky_color: Vec4, ground_color: Vec4) -> Self {
        Self::new(
            LightType::Hemisphere,
            LightProperties {
                sky_color,
                ground_color,
                ..Default::default()
            },
        )
    }

    /// Set the forward direction. The w component is forced to 0.
    pub fn with_direction(mut self, direction: Vec4) -> Self {
        self.direction = direction.truncate().normalize_or_zero().extend(0.0);
        self
    }

    /// Set the attenuation.
    pub fn with_attenuation(mut self, attenuation: Attenuation) -> Self {
        self.attenuation = attenuation;
        self
    }
}

impl Light for SceneLight {
    fn light_type(&self) -> LightType {
        self.light_type
    }

    fn properties(&self) -> &LightProperties {
        &self.properties
    }

    fn forward_direction(&self) -> Vec4 {
        self.direction
    }

    fn attenuation(&self) -> Attenuation {
        self.attenuation
    }
}

/// A light resolved into the variant the binder dispatches on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightVariant {
    Global,
    Point { radius: f32 },
    Directional { direction: Vec4 },
    Hemisphere { sky_color: Vec4, ground_color: Vec4 },
    Unsupported(LightType),
}

impl LightVariant {
    /// Resolve the variant of a light.
    pub fn of(light: &dyn Light) -> Self {
        let properties = light.properties();
        // `Other` may carry a known tag; normalize before matching.
        match LightType::from_tag(light.light_type().tag()) {
            LightType::Global => LightVariant::Global,
            LightType::Point => LightVariant::Point {
                radius: properties.radius,
            },
            LightType::Directional => LightVariant::Directional {
                direction: light.forward_direction(),
            },
            LightType::Hemisphere => LightVariant::Hemisphere {
                sky_color: properties.sky_color,
                ground_color: properties.ground_color,
            },
            other @ (LightType::Area | LightType::Other(_)) => LightVariant::Unsupported(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip_known_types() {
        for ty in [
            LightType::Point,
            LightType::Directional,
            LightType::Hemisphere,
            LightType::Area,
            LightType::Global,
        ] {
            assert_eq!(LightType::from_tag(ty.tag()), ty);
        }
        assert_eq!(LightType::from_tag(42), LightType::Other(42));
    }

    #[test]
    fn test_variant_of_point_light() {
        let light = SceneLight::point(Vec4::ONE, 5.0);
        assert_eq!(LightVariant::of(&light), LightVariant::Point { radius: 5.0 });
    }

    #[test]
    fn test_directional_direction_is_normalized() {
        let light = SceneLight::directional(Vec4::ONE, Vec4::new(0.0, -2.0, 0.0, 1.0));
        assert_eq!(
            LightVariant::of(&light),
            LightVariant::Directional {
                direction: Vec4::new(0.0, -1.0, 0.0, 0.0)
            }
        );
    }

    #[test]
    fn test_other_with_known_tag_is_that_type() {
        let light = SceneLight::new(
            LightType::Other(0),
            LightProperties {
                radius: 3.0,
                ..Default::default()
            },
        );
        assert_eq!(LightVariant::of(&light), LightVariant::Point { radius: 3.0 });

        let light = SceneLight::new(LightType::Other(4), LightProperties::default());
        assert_eq!(LightVariant::of(&light), LightVariant::Global);
    }

    #[test]
    fn test_area_light_is_unsupported() {
        let light = SceneLight::new(LightType::Area, LightProperties::default());
        assert_eq!(
            LightVariant::of(&light),
            LightVariant::Unsupported(LightType::Area)
        );
    }
}
