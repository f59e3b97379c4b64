//! Parameters of the diamond sphere scene.

use crate::color::{self, Color};
use crate::diamond::{ExplosionConfig, RotationConfig};
use crate::post_processing::{BloomPipeline, SunRaysConfig};
use crate::shadow::ShadowConfig;
use glamx::Vec3;

/// Initial placement and limits of the orbit camera.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraConfig {
    /// Initial longitudinal angle.
    pub alpha: f32,
    /// Initial latitudinal angle.
    pub beta: f32,
    /// Initial distance to the target.
    pub radius: f32,
    /// Initial target.
    pub target: Vec3,
    /// Lower bound of `beta`.
    pub lower_beta_limit: Option<f32>,
    /// Upper bound of `beta`.
    pub upper_beta_limit: Option<f32>,
    /// Lower bound of `radius`.
    pub lower_radius_limit: Option<f32>,
    /// Upper bound of `radius`.
    pub upper_radius_limit: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            alpha: 6.33,
            beta: 1.13,
            radius: 12.2687,
            target: Vec3::ZERO,
            lower_beta_limit: Some(0.0),
            upper_beta_limit: Some(99_999_999_999.0),
            lower_radius_limit: Some(8.0),
            upper_radius_limit: Some(160.0),
        }
    }
}

/// Names used to pick nodes out of the imported model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelConfig {
    /// Nodes whose name contains this are cells.
    pub cell_filter: String,
    /// Name of the main mesh, hidden once imported.
    pub main_mesh: String,
    /// Name of the root node created by the importer, dropped once imported.
    pub root_name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            cell_filter: "_cell".to_string(),
            main_mesh: "Diamond Big 1".to_string(),
            root_name: "__root__".to_string(),
        }
    }
}

/// The node material shared, as per-cell clones, by all the cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiamondMaterialConfig {
    /// Identifier of the material graph snippet.
    pub snippet_id: String,
    /// Whether back faces are culled.
    pub back_face_culling: bool,
    /// Whether front and back faces are rendered in separate passes.
    pub separate_culling_pass: bool,
    /// Base color of every cell, before jitter.
    pub base_color: Color,
    /// Upper bound (exclusive) of the random amount added to the blue channel.
    pub blue_jitter: f32,
}

impl Default for DiamondMaterialConfig {
    fn default() -> Self {
        DiamondMaterialConfig {
            snippet_id: "KIUSWC#69".to_string(),
            back_face_culling: false,
            separate_culling_pass: true,
            base_color: color::opaque(0.5, 0.5, 0.5),
            blue_jitter: 0.1,
        }
    }
}

/// The sky light and the sun.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightingConfig {
    /// Intensity of the hemispheric light.
    pub hemispheric_intensity: f32,
    /// Path of the prefiltered environment map.
    pub environment_texture: String,
    /// Initial direction of the directional light.
    pub sun_direction: Vec3,
    /// Intensity of the directional light.
    pub sun_intensity: f32,
    /// Position of the directional light, used for shadows.
    pub sun_position: Vec3,
    /// Point the directional light is re-aimed at every frame.
    pub sun_target: Vec3,
    /// Color the frame is cleared with.
    pub clear_color: Color,
}

impl Default for LightingConfig {
    fn default() -> Self {
        LightingConfig {
            hemispheric_intensity: 4.0,
            environment_texture: "env/decor-shop.env".to_string(),
            sun_direction: Vec3::new(1.0, -1.0, -1.0),
            sun_intensity: 2.0,
            sun_position: Vec3::new(-16.0, 16.0, 16.0),
            sun_target: Vec3::ZERO,
            clear_color: color::BLACK,
        }
    }
}

/// The reflective ground.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MirrorConfig {
    /// Width and depth of the ground.
    pub ground_size: f32,
    /// Size of the reflection texture, in pixels.
    pub texture_size: u32,
    /// Blur kernel of the reflection.
    pub adaptive_blur_kernel: u32,
    /// Intensity of the reflection.
    pub level: f32,
    /// Opacity of the ground.
    pub alpha: f32,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        MirrorConfig {
            ground_size: 300.0,
            texture_size: 2048,
            adaptive_blur_kernel: 16,
            level: 1.0,
            alpha: 0.12,
        }
    }
}

/// Everything [`DiamondSphere::new`](crate::diamond::DiamondSphere::new) needs
/// besides the imported model.
///
/// # Example
/// ```
/// # use diamond_sphere::diamond::DiamondSphereConfig;
/// let config = DiamondSphereConfig::default().with_frame_rate(30);
/// assert_eq!(config.model.cell_filter, "_cell");
/// assert_eq!(config.rotation.alpha_step, 0.008);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiamondSphereConfig {
    /// The orbit camera.
    pub camera: CameraConfig,
    /// Node names of the imported model.
    pub model: ModelConfig,
    /// The cells material.
    pub material: DiamondMaterialConfig,
    /// Lights and clear color.
    pub lighting: LightingConfig,
    /// Shadows of the directional light.
    pub shadows: ShadowConfig,
    /// Bloom and anti-aliasing.
    pub bloom: BloomPipeline,
    /// The reflective ground.
    pub mirror: MirrorConfig,
    /// Sun rays and their emitter.
    pub sun_rays: SunRaysConfig,
    /// Background layer.
    pub background: BackgroundConfig,
    /// Explosion animations.
    pub explosion: ExplosionConfig,
    /// Idle camera rotation.
    pub rotation: RotationConfig,
    /// Frames per second of the fixed frame clock.
    pub frame_rate: FrameRate,
}

/// The image drawn behind the scene.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundConfig {
    /// Path of the texture.
    pub texture: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            texture: "textures/stars-2.jpg".to_string(),
        }
    }
}

/// A number of frames per second, 60 by default.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRate(pub u32);

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate(60)
    }
}

impl DiamondSphereConfig {
    /// Sets the camera parameters.
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Sets the node names of the imported model.
    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Sets the explosion parameters.
    pub fn with_explosion(mut self, explosion: ExplosionConfig) -> Self {
        self.explosion = explosion;
        self
    }

    /// Sets the idle rotation parameters.
    pub fn with_rotation(mut self, rotation: RotationConfig) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the frames per second of the fixed frame clock.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = FrameRate(fps);
        self
    }
}
