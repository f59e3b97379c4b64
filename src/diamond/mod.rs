//! The diamond sphere scene: a sphere of diamond cells around a hidden core,
//! with camera presets and an explode/assemble animation.

pub use self::config::{
    BackgroundConfig, CameraConfig, DiamondMaterialConfig, DiamondSphereConfig, FrameRate,
    LightingConfig, MirrorConfig, ModelConfig,
};
pub use self::explosion::{ExplosionConfig, ExplosionController, ExplosionState};
pub use self::rotation::{CameraRotation, RotationConfig};

use crate::animation::{AnimationHandle, Animator, OnComplete};
use crate::camera::{CameraPreset, CameraTransition, OrbitCamera, TransitionCoordinator};
use crate::color::Color;
use crate::error::SceneError;
use crate::light::Light;
use crate::post_processing::{BloomPipeline, VolumetricLightScattering};
use crate::resource::{
    Material3d, MirrorTexture, NodeMaterial, Plane, StandardMaterial, BASE_COLOR_INPUT,
};
use crate::scene::{BoundingBox, FrameClock, FrameInfo, MeshExploder, RenderHooks, SceneNode3d};
use crate::shadow::ShadowGenerator;
use glamx::Vec3;
use rand::Rng;
use std::cell::RefCell;
use std::convert::TryFrom;
use std::rc::Rc;

mod config;
mod explosion;
mod rotation;

/// The cells and the nodes the model import leaves behind.
struct ImportedModel {
    cells: Vec<SceneNode3d>,
    main_mesh: Option<SceneNode3d>,
}

/// The diamond sphere scene.
///
/// Creating the scene lays the imported cells out, sets lights, shadows,
/// reflections and post-processing up, and registers the per-frame hooks. Each
/// call to [`render_frame`](Self::render_frame) then steps the animations and
/// runs the hooks.
pub struct DiamondSphere {
    config: DiamondSphereConfig,
    scene: SceneNode3d,
    camera: Rc<RefCell<OrbitCamera>>,
    animator: Animator,
    hooks: RenderHooks,
    clock: FrameClock,
    transitions: TransitionCoordinator,
    explosion: ExplosionController,
    exploder: MeshExploder,
    rotation: CameraRotation,
    hemispheric_light: SceneNode3d,
    sun: SceneNode3d,
    shadow_generator: ShadowGenerator,
    bloom: BloomPipeline,
    cells: Vec<SceneNode3d>,
    main_mesh: Option<SceneNode3d>,
    parent: SceneNode3d,
    decoy: SceneNode3d,
    ground: SceneNode3d,
    mirror: MirrorTexture,
    sun_rays: VolumetricLightScattering,
}

impl DiamondSphere {
    /// Builds the scene from the nodes of the imported model.
    ///
    /// `imported` lists every node of the model, in import order. `rng` jitters
    /// the tint of each cell.
    ///
    /// # Errors
    /// Returns [`SceneError::ZeroFrameRate`] if the configured frame rate is 0,
    /// and [`SceneError::NoCellMeshes`] if no imported node is a cell.
    pub fn new<R: Rng>(
        config: DiamondSphereConfig,
        imported: &[SceneNode3d],
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        let clock = match config.frame_rate.0 {
            0 => return Err(SceneError::ZeroFrameRate),
            fps => FrameClock::fixed(fps),
        };

        let animator = Animator::new();
        let hooks = RenderHooks::new();
        let mut scene = SceneNode3d::named("scene");

        let camera = Rc::new(RefCell::new(Self::create_camera(&config)));

        let (hemispheric_light, sun) = Self::create_lights(&config, &mut scene);
        let mut shadow_generator = ShadowGenerator::new(config.shadows.clone(), sun.clone());
        let bloom = config.bloom.clone();

        let ImportedModel { cells, main_mesh } = Self::import_model(&config, imported)?;

        if let Some(main) = &main_mesh {
            scene.add_child(main.clone());
        }

        let exploder = MeshExploder::new(cells.clone()).ok_or_else(|| SceneError::NoCellMeshes {
            filter: config.model.cell_filter.clone(),
        })?;
        exploder.explode(config.explosion.initial_ratio);

        let explosion = ExplosionController::new(animator.clone(), config.explosion);
        explosion.mark_laid_out(config.explosion.initial_ratio);

        let mut diamond = NodeMaterial::new("diamond", &config.material.snippet_id);
        diamond.back_face_culling = config.material.back_face_culling;
        diamond.separate_culling_pass = config.material.separate_culling_pass;

        let mut parent = scene.add_group("parent");
        let decoy = parent.add_group("decoy");

        let ground = Self::create_ground(&config, &mut scene);
        let mut mirror = Self::create_mirror(&config, &ground);
        let sun_rays = VolumetricLightScattering::new(config.sun_rays.clone(), &mut scene);

        for (i, cell) in cells.iter().enumerate() {
            let mut cell = cell.clone();
            let _ = cell.set_name(&format!("S{}", i));

            let mut material = diamond.clone_named(&format!("Sat-{}", i));
            let base = config.material.base_color;
            let jitter = if config.material.blue_jitter > 0.0 {
                rng.random_range(0.0..config.material.blue_jitter)
            } else {
                0.0
            };
            material.set_input(BASE_COLOR_INPUT, Color::new(base.r, base.g, base.b + jitter, base.a));

            let _ = cell.set_material(Material3d::Node(material));
            parent.add_child(cell.clone());
            mirror.add_to_render_list(cell.clone());
            shadow_generator.add_caster(cell);
        }

        log::info!(
            "diamond sphere: {} cells, center cell {}",
            cells.len(),
            exploder.center_mesh().name()
        );

        let rotation = CameraRotation::new(config.rotation);
        let transitions = TransitionCoordinator::new(animator.clone(), hooks.clone());

        let res = DiamondSphere {
            config,
            scene,
            camera,
            animator,
            hooks,
            clock,
            transitions,
            explosion,
            exploder,
            rotation,
            hemispheric_light,
            sun,
            shadow_generator,
            bloom,
            cells,
            main_mesh,
            parent,
            decoy,
            ground,
            mirror,
            sun_rays,
        };

        res.register_hooks();

        Ok(res)
    }

    fn create_camera(config: &DiamondSphereConfig) -> OrbitCamera {
        let c = &config.camera;
        let mut camera = OrbitCamera::new(c.alpha, c.beta, c.radius, c.target);
        camera.set_beta_limits(c.lower_beta_limit, c.upper_beta_limit);
        camera.set_radius_limits(c.lower_radius_limit, c.upper_radius_limit);
        camera
    }

    fn create_lights(config: &DiamondSphereConfig, scene: &mut SceneNode3d) -> (SceneNode3d, SceneNode3d) {
        let lighting = &config.lighting;

        let hemispheric = scene.add_light(
            "light",
            Light::hemispheric(Vec3::Y).with_intensity(lighting.hemispheric_intensity),
        );

        let mut sun_parent = scene.add_group("dirLightParent");
        let mut sun = sun_parent.add_light(
            "directionalLight",
            Light::directional(lighting.sun_direction).with_intensity(lighting.sun_intensity),
        );
        let _ = sun.set_position(lighting.sun_position);

        (hemispheric, sun)
    }

    fn import_model(config: &DiamondSphereConfig, imported: &[SceneNode3d]) -> Result<ImportedModel, SceneError> {
        let model = &config.model;

        let mut cells: Vec<SceneNode3d> = imported
            .iter()
            .filter(|n| n.name().contains(&model.cell_filter))
            .cloned()
            .collect();

        if cells.is_empty() {
            return Err(SceneError::NoCellMeshes {
                filter: model.cell_filter.clone(),
            });
        }

        for cell in &mut cells {
            let _ = cell.unparent();
        }

        let main_mesh = imported.iter().find(|n| n.name() == model.main_mesh).cloned();
        if let Some(main) = &main_mesh {
            let mut main = main.clone();
            let _ = main.set_enabled(false);
            let _ = main.unparent();
        }

        if let Some(root) = imported.iter().find(|n| n.name() == model.root_name) {
            let mut root = root.clone();
            root.remove();
            for mut child in root.children() {
                child.remove();
            }
        }

        log::debug!(
            "imported {} cells out of {} nodes, main mesh found: {}",
            cells.len(),
            imported.len(),
            main_mesh.is_some()
        );

        Ok(ImportedModel { cells, main_mesh })
    }

    fn create_ground(config: &DiamondSphereConfig, scene: &mut SceneNode3d) -> SceneNode3d {
        let half = config.mirror.ground_size / 2.0;
        let mut ground = SceneNode3d::mesh(
            "ground",
            Vec3::ZERO,
            BoundingBox::new(Vec3::new(-half, 0.0, -half), Vec3::new(half, 0.0, half)),
        );

        let mut material = StandardMaterial::new("mirror");
        material.disable_lighting = true;
        material.alpha = config.mirror.alpha;

        let _ = ground
            .set_enabled(false)
            .set_receive_shadows(true)
            .set_material(Material3d::Standard(material));
        scene.add_child(ground.clone());
        ground
    }

    fn create_mirror(config: &DiamondSphereConfig, ground: &SceneNode3d) -> MirrorTexture {
        let pose = ground.world_pose();
        let normal = pose.rotation * Vec3::Y;
        let plane = Plane::from_position_and_normal(pose.translation, -normal);

        let mut mirror = MirrorTexture::new("mirror", config.mirror.texture_size, plane);
        mirror.adaptive_blur_kernel = config.mirror.adaptive_blur_kernel;
        mirror.level = config.mirror.level;
        mirror
    }

    fn register_hooks(&self) {
        let mut sun = self.sun.clone();
        let sun_target = self.config.lighting.sun_target;
        let _ = self.hooks.add(move |_| {
            let position = sun.world_position();
            sun.modify_light(|light| light.set_direction_to_target(position, sun_target));
        });

        let camera = self.camera.clone();
        let rotation = self.rotation.clone();
        let explosion = self.explosion.clone();
        let exploder = self.exploder.clone();
        let _ = self.hooks.add(move |_| {
            rotation.step(&mut camera.borrow_mut());

            if let Some(ratio) = explosion.take_layout_ratio() {
                exploder.explode(ratio);
            }
        });
    }

    /// Steps the animations by one tick of the frame clock, then runs the
    /// per-frame hooks in registration order.
    pub fn render_frame(&mut self) -> FrameInfo {
        let delta = self.clock.tick();
        self.animator.advance(delta);
        self.hooks.run(delta)
    }

    /// Replaces the frame clock.
    pub fn set_clock(&mut self, clock: FrameClock) {
        self.clock = clock;
    }

    /// Moves the camera as requested by `transition`.
    ///
    /// See [`TransitionCoordinator::transition`]. Returns `false` if nothing was
    /// started.
    pub fn transition(&self, transition: CameraTransition, on_complete: Option<OnComplete>) -> bool {
        self.transitions.transition(&self.camera, transition, on_complete)
    }

    /// Moves the camera to a predefined viewpoint.
    pub fn set_camera(&self, preset: CameraPreset) -> bool {
        log::debug!("camera preset {:?}", preset);
        self.transition(preset.transition(), None)
    }

    /// Moves the camera to the predefined viewpoint number `index`.
    ///
    /// # Errors
    /// Returns [`SceneError::UnknownCameraPreset`] if there is no such preset.
    pub fn set_camera_index(&self, index: usize) -> Result<bool, SceneError> {
        let preset = CameraPreset::try_from(index)?;
        Ok(self.set_camera(preset))
    }

    /// Collapses the cells together.
    pub fn hide_structure(&self) -> AnimationHandle {
        self.explosion.hide_structure()
    }

    /// Spreads the cells apart, revealing the structure.
    pub fn show_structure(&self) -> AnimationHandle {
        self.explosion.show_structure()
    }

    /// Resumes the idle camera rotation.
    pub fn start_rotation(&self) {
        self.rotation.start()
    }

    /// Suspends the idle camera rotation.
    pub fn stop_rotation(&self) {
        self.rotation.stop()
    }

    /// Whether the idle camera rotation is running.
    pub fn is_rotating(&self) -> bool {
        self.rotation.is_enabled()
    }

    /// The scene parameters.
    pub fn config(&self) -> &DiamondSphereConfig {
        &self.config
    }

    /// The root of the scene graph.
    pub fn scene(&self) -> &SceneNode3d {
        &self.scene
    }

    /// The orbit camera.
    pub fn camera(&self) -> &Rc<RefCell<OrbitCamera>> {
        &self.camera
    }

    /// The animator stepped by [`render_frame`](Self::render_frame).
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// The per-frame hooks.
    pub fn hooks(&self) -> &RenderHooks {
        &self.hooks
    }

    /// The explosion ratio and its animations.
    pub fn explosion(&self) -> &ExplosionController {
        &self.explosion
    }

    /// The layout of the cells around the center cell.
    pub fn exploder(&self) -> &MeshExploder {
        &self.exploder
    }

    /// The cells, in import order.
    pub fn cells(&self) -> &[SceneNode3d] {
        &self.cells
    }

    /// The hidden main mesh of the model, if it had one.
    pub fn main_mesh(&self) -> Option<&SceneNode3d> {
        self.main_mesh.as_ref()
    }

    /// The group holding every cell.
    pub fn parent(&self) -> &SceneNode3d {
        &self.parent
    }

    /// The empty group below [`parent`](Self::parent).
    pub fn decoy(&self) -> &SceneNode3d {
        &self.decoy
    }

    /// The ambient sky light.
    pub fn hemispheric_light(&self) -> &SceneNode3d {
        &self.hemispheric_light
    }

    /// The directional light.
    pub fn sun(&self) -> &SceneNode3d {
        &self.sun
    }

    /// Shadows cast by the cells under the directional light.
    pub fn shadow_generator(&self) -> &ShadowGenerator {
        &self.shadow_generator
    }

    /// Bloom and anti-aliasing settings.
    pub fn bloom(&self) -> &BloomPipeline {
        &self.bloom
    }

    /// The reflective ground.
    pub fn ground(&self) -> &SceneNode3d {
        &self.ground
    }

    /// Reflection of the cells in the ground.
    pub fn mirror(&self) -> &MirrorTexture {
        &self.mirror
    }

    /// The sun rays and their emitter.
    pub fn sun_rays(&self) -> &VolumetricLightScattering {
        &self.sun_rays
    }

    /// Path of the environment map.
    pub fn environment_texture(&self) -> &str {
        &self.config.lighting.environment_texture
    }

    /// Path of the background texture.
    pub fn background(&self) -> &str {
        &self.config.background.texture
    }

    /// Color the frame is cleared with.
    pub fn clear_color(&self) -> Color {
        self.config.lighting.clear_color
    }
}
