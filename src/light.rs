//! Lighting configuration for 3D scenes.
//!
//! Lights are attached to scene nodes. Directional lights take their position
//! from the node's world transform (used for shadow casting) and keep an explicit
//! direction, which can be re-aimed every frame.

use crate::color::Color;
use glamx::Vec3;

/// The type of light source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightType {
    /// An ambient light blending a sky color (along `up`) and a ground color.
    Hemispheric {
        /// The direction of the sky.
        up: Vec3,
        /// The color lighting the faces pointing away from `up`.
        ground_color: Color,
    },

    /// A directional light with parallel rays (like the sun).
    Directional(Vec3),
}

impl Default for LightType {
    fn default() -> Self {
        LightType::Hemispheric {
            up: Vec3::Y,
            ground_color: crate::color::BLACK,
        }
    }
}

/// A light source that can be attached to a scene node.
///
/// # Examples
/// ```
/// # use diamond_sphere::prelude::*;
/// let sky = Light::hemispheric(Vec3::Y).with_intensity(4.0);
///
/// let mut sun = Light::directional(Vec3::new(1.0, -1.0, -1.0)).with_intensity(2.0);
/// sun.set_direction_to_target(Vec3::new(-16.0, 16.0, 16.0), Vec3::ZERO);
/// assert!((sun.direction().unwrap() - Vec3::new(1.0, -1.0, -1.0).normalize()).length() < 1.0e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    /// The type of light.
    pub light_type: LightType,
    /// The color of the light (RGBA, each component 0.0-1.0).
    pub color: Color,
    /// The intensity multiplier for the light.
    pub intensity: f32,
    /// Whether the light is enabled.
    pub enabled: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            light_type: LightType::default(),
            color: crate::color::WHITE,
            intensity: 1.0,
            enabled: true,
        }
    }
}

impl Light {
    /// Creates a hemispheric light whose sky is along `up`.
    pub fn hemispheric(up: Vec3) -> Self {
        Self {
            light_type: LightType::Hemispheric {
                up,
                ground_color: crate::color::BLACK,
            },
            ..Default::default()
        }
    }

    /// Creates a directional light (like the sun).
    pub fn directional(dir: Vec3) -> Self {
        Self {
            light_type: LightType::Directional(dir),
            ..Default::default()
        }
    }

    /// Sets the light color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the light intensity.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Sets whether the light is enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The direction of a directional light.
    pub fn direction(&self) -> Option<Vec3> {
        match self.light_type {
            LightType::Directional(dir) => Some(dir),
            LightType::Hemispheric { .. } => None,
        }
    }

    /// Points a directional light located at `position` toward `target`.
    ///
    /// Has no effect on other light types, or if `position == target`.
    pub fn set_direction_to_target(&mut self, position: Vec3, target: Vec3) {
        if let LightType::Directional(ref mut dir) = self.light_type {
            *dir = (target - position).normalize_or(*dir);
        }
    }
}
