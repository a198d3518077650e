//! Light dispatch
//!
//! Selects the lighting path for the active light and pushes the uniforms
//! that path reads.

use super::light::{Attenuation, Light, LightType, LightVariant};
use crate::shader::uniform::{UniformSink, UniformValue};
use tracing::warn;

/// Lighting path selected for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingPath {
    Global,
    Point,
    Directional,
    Hemisphere,
    /// The light's type is not shaded; the global path was used instead.
    Fallback(LightType),
}

impl LightingPath {
    /// Light type whose tag went into `lightingType`.
    pub fn shader_type(self) -> LightType {
        match self {
            LightingPath::Global | LightingPath::Fallback(_) => LightType::Global,
            LightingPath::Point => LightType::Point,
            LightingPath::Directional => LightType::Directional,
            LightingPath::Hemisphere => LightType::Hemisphere,
        }
    }
}

/// Configure the shader for `light`, or for global lighting if there is none.
///
/// Attenuation is written last and unconditionally, so it is never left over
/// from a previous light.
pub fn apply_light(sink: &mut dyn UniformSink, light: Option<&dyn Light>) -> LightingPath {
    let path = match light {
        None => {
            set_lighting_type(sink, LightingPath::Global);
            LightingPath::Global
        }
        Some(light) => {
            let variant = LightVariant::of(light);
            let path = match variant {
                LightVariant::Global => LightingPath::Global,
                LightVariant::Point { .. } => LightingPath::Point,
                LightVariant::Directional { .. } => LightingPath::Directional,
                LightVariant::Hemisphere { .. } => LightingPath::Hemisphere,
                LightVariant::Unsupported(light_type) => {
                    warn!(
                        "Light type is not supported, defaulting to global light. Ignoring: {}",
                        light_type.tag()
                    );
                    LightingPath::Fallback(light_type)
                }
            };
            set_lighting_type(sink, path);

            match variant {
                LightVariant::Point { radius } => {
                    sink.set_uniform("pointLight.radius", radius.into());
                }
                LightVariant::Directional { direction } => {
                    sink.set_uniform("directionalLight.direction", direction.into());
                }
                LightVariant::Hemisphere {
                    sky_color,
                    ground_color,
                } => {
                    sink.set_uniform("hemisphereLight.csky", sky_color.into());
                    sink.set_uniform("hemisphereLight.cground", ground_color.into());
                }
                LightVariant::Global | LightVariant::Unsupported(_) => {}
            }

            sink.set_uniform(
                "genericLight.color",
                light.properties().diffuse_color.into(),
            );
            light.setup_shader_uniforms(sink);
            path
        }
    };

    let attenuation = light.map_or_else(Attenuation::none, |l| l.attenuation());
    let [constant, linear, quadratic] = attenuation.to_array();
    sink.set_uniform("constantAttenuation", constant.into());
    sink.set_uniform("linearAttenuation", linear.into());
    sink.set_uniform("quadraticAttenuation", quadratic.into());

    path
}

fn set_lighting_type(sink: &mut dyn UniformSink, path: LightingPath) {
    sink.set_uniform(
        "lightingType",
        UniformValue::Int(path.shader_type().tag()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::light::{LightProperties, SceneLight};
    use crate::test_support::MockProgram;
    use glam::Vec4;

    fn attenuation_of(program: &MockProgram) -> [Option<UniformValue>; 3] {
        [
            program.uniform("constantAttenuation"),
            program.uniform("linearAttenuation"),
            program.uniform("quadraticAttenuation"),
        ]
    }

    #[test]
    fn test_no_light_uses_global_and_no_falloff() {
        let mut program = MockProgram::new();
        let path = apply_light(&mut program, None);

        assert_eq!(path, LightingPath::Global);
        assert_eq!(program.uniform("lightingType"), Some(UniformValue::Int(4)));
        assert_eq!(
            attenuation_of(&program),
            [
                Some(UniformValue::Float(1.0)),
                Some(UniformValue::Float(0.0)),
                Some(UniformValue::Float(0.0)),
            ]
        );
        assert_eq!(program.uniform("genericLight.color"), None);
        assert_eq!(program.uniform("pointLight.radius"), None);
    }

    #[test]
    fn test_point_light_sets_radius_and_attenuation() {
        let mut program = MockProgram::new();
        let light = SceneLight::point(Vec4::new(1.0, 0.5, 0.25, 1.0), 5.0)
            .with_attenuation(Attenuation::range_50());

        let path = apply_light(&mut program, Some(&light));

        assert_eq!(path, LightingPath::Point);
        assert_eq!(program.uniform("lightingType"), Some(UniformValue::Int(0)));
        assert_eq!(
            program.uniform("pointLight.radius"),
            Some(UniformValue::Float(5.0))
        );
        assert_eq!(
            program.uniform("genericLight.color"),
            Some(UniformValue::Vec4(Vec4::new(1.0, 0.5, 0.25, 1.0)))
        );
        assert_eq!(
            attenuation_of(&program),
            [
                Some(UniformValue::Float(1.0)),
                Some(UniformValue::Float(0.09)),
                Some(UniformValue::Float(0.032)),
            ]
        );
    }

    #[test]
    fn test_directional_light_sets_direction() {
        let mut program = MockProgram::new();
        let light = SceneLight::directional(Vec4::ONE, Vec4::new(1.0, 0.0, 0.0, 0.0));

        assert_eq!(
            apply_light(&mut program, Some(&light)),
            LightingPath::Directional
        );
        assert_eq!(program.uniform("lightingType"), Some(UniformValue::Int(1)));
        assert_eq!(
            program.uniform("directionalLight.direction"),
            Some(UniformValue::Vec4(Vec4::new(1.0, 0.0, 0.0, 0.0)))
        );
    }

    #[test]
    fn test_hemisphere_light_sets_sky_and_ground() {
        let mut program = MockProgram::new();
        let sky = Vec4::new(0.4, 0.6, 1.0, 1.0);
        let ground = Vec4::new(0.2, 0.1, 0.0, 1.0);
        let light = SceneLight::hemisphere(sky, ground);

        assert_eq!(
            apply_light(&mut program, Some(&light)),
            LightingPath::Hemisphere
        );
        assert_eq!(program.uniform("lightingType"), Some(UniformValue::Int(2)));
        assert_eq!(
            program.uniform("hemisphereLight.csky"),
            Some(UniformValue::Vec4(sky))
        );
        assert_eq!(
            program.uniform("hemisphereLight.cground"),
            Some(UniformValue::Vec4(ground))
        );
    }

    #[test]
    fn test_unrecognized_light_falls_back_to_global() {
        let mut program = MockProgram::new();
        let color = Vec4::new(0.3, 0.3, 0.3, 1.0);
        let light = SceneLight::new(
            LightType::Other(17),
            LightProperties {
                diffuse_color: color,
                ..Default::default()
            },
        )
        .with_attenuation(Attenuation::new(2.0, 0.5, 0.25));

        let path = apply_light(&mut program, Some(&light));

        assert_eq!(path, LightingPath::Fallback(LightType::Other(17)));
        assert_eq!(program.uniform("lightingType"), Some(UniformValue::Int(4)));
        assert_eq!(
            program.uniform("genericLight.color"),
            Some(UniformValue::Vec4(color))
        );
        assert_eq!(
            attenuation_of(&program),
            [
                Some(UniformValue::Float(2.0)),
                Some(UniformValue::Float(0.5)),
                Some(UniformValue::Float(0.25)),
            ]
        );
    }

    #[test]
    fn test_other_tag_of_known_type_is_dispatched_as_that_type() {
        let mut program = MockProgram::new();
        let light = SceneLight::new(
            LightType::Other(0),
            LightProperties {
                radius: 5.0,
                ..Default::default()
            },
        );

        let path = apply_light(&mut program, Some(&light));

        assert_eq!(path, LightingPath::Point);
        assert_eq!(program.uniform("lightingType"), Some(UniformValue::Int(0)));
        assert_eq!(
            program.uniform("pointLight.radius"),
            Some(UniformValue::Float(5.0))
        );
    }

    #[test]
    fn test_global_light_takes_global_path() {
        let mut program = MockProgram::new();
        let color = Vec4::new(0.5, 0.5, 0.5, 1.0);
        let light = SceneLight::new(
            LightType::Global,
            LightProperties {
                diffuse_color: color,
                ..Default::default()
            },
        );

        let path = apply_light(&mut program, Some(&light));

        assert_eq!(path, LightingPath::Global);
        assert_eq!(program.uniform("lightingType"), Some(UniformValue::Int(4)));
        assert_eq!(
            program.uniform("genericLight.color"),
            Some(UniformValue::Vec4(color))
        );
    }

    struct TaggedLight {
        inner: SceneLight,
    }

    impl Light for TaggedLight {
        fn light_type(&self) -> LightType {
            self.inner.light_type()
        }

        fn properties(&self) -> &LightProperties {
            self.inner.properties()
        }

        fn forward_direction(&self) -> Vec4 {
            self.inner.forward_direction()
        }

        fn attenuation(&self) -> Attenuation {
            self.inner.attenuation()
        }

        fn setup_shader_uniforms(&self, sink: &mut dyn UniformSink) {
            sink.set_uniform("pointLight.falloffExponent", UniformValue::Float(2.0));
        }
    }

    #[test]
    fn test_light_hook_runs_before_attenuation() {
        let mut program = MockProgram::new();
        let light = TaggedLight {
            inner: SceneLight::point(Vec4::ONE, 1.0),
        };

        apply_light(&mut program, Some(&light));

        let names = program.uniform_names();
        let hook = names
            .iter()
            .position(|n| n == "pointLight.falloffExponent")
            .unwrap();
        let attenuation = names
            .iter()
            .position(|n| n == "constantAttenuation")
            .unwrap();
        assert!(hook < attenuation);
    }
}
