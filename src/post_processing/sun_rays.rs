//! Volumetric light scattering ("god rays") emitted by a billboard.

use crate::color;
use crate::resource::{Material3d, StandardMaterial};
use crate::scene::SceneNode3d;
use glamx::Vec3;

/// Parameters of the sun rays effect and of its emitter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunRaysConfig {
    /// Name of the emitter node.
    pub name: String,
    /// Size of the emitter plane.
    pub plane_size: f32,
    /// Uniform scale applied to the emitter.
    pub scale: f32,
    /// Texture drawn on the emitter.
    pub texture: String,
    /// Resolution of the effect relative to the screen.
    pub ratio: f32,
    /// Number of samples along each ray.
    pub samples: u32,
    /// Overall intensity of the rays.
    pub exposure: f32,
    /// Fall-off of each sample along a ray.
    pub decay: f32,
    /// Contribution of each sample.
    pub weight: f32,
    /// Spacing of the samples.
    pub density: f32,
}

impl Default for SunRaysConfig {
    fn default() -> Self {
        SunRaysConfig {
            name: "a-sun".to_string(),
            plane_size: 1.2,
            scale: 2.0,
            texture: "textures/rainbow.png".to_string(),
            ratio: 1.0,
            samples: 100,
            exposure: 0.3,
            decay: 0.96815,
            weight: 0.98767,
            density: 0.996,
        }
    }
}

/// The sun rays post-process together with the billboard it radiates from.
#[derive(Clone)]
pub struct VolumetricLightScattering {
    config: SunRaysConfig,
    emitter: SceneNode3d,
}

impl VolumetricLightScattering {
    /// Creates the emitter plane at the origin, as a child of `parent`.
    ///
    /// The emitter always faces the camera, glows white and is textured with
    /// the configured transparent texture.
    pub fn new(config: SunRaysConfig, parent: &mut SceneNode3d) -> Self {
        let half = config.plane_size / 2.0;
        let mut emitter = SceneNode3d::mesh(
            &config.name,
            Vec3::ZERO,
            crate::scene::BoundingBox::new(Vec3::new(-half, -half, 0.0), Vec3::new(half, half, 0.0)),
        );

        let mut material = StandardMaterial::new(&format!("{}Material", config.name));
        material.diffuse_color = color::LIME;
        material.emissive_color = color::WHITE;
        material.back_face_culling = false;
        material.diffuse_texture = Some(config.texture.clone());
        material.has_alpha = true;

        let _ = emitter
            .set_material(Material3d::Standard(material))
            .set_billboard(true)
            .set_local_scale(config.scale, config.scale, config.scale);
        parent.add_child(emitter.clone());

        VolumetricLightScattering { config, emitter }
    }

    /// The effect parameters.
    pub fn config(&self) -> &SunRaysConfig {
        &self.config
    }

    /// The node the rays radiate from.
    pub fn emitter(&self) -> &SceneNode3d {
        &self.emitter
    }
}
