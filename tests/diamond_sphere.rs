use diamond_sphere::prelude::*;
use rand::SeedableRng;
use std::cell::Cell;

fn model(cells: usize) -> Vec<SceneNode3d> {
    let mut root = SceneNode3d::named("__root__");
    root.add_child(SceneNode3d::mesh(
        "Diamond Big 1",
        Vec3::ZERO,
        BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.5)),
    ));
    root.add_child(SceneNode3d::named("Camera"));

    for i in 0..cells {
        let angle = i as f32 * std::f32::consts::TAU / cells as f32;
        root.add_child(SceneNode3d::mesh(
            &format!("Diamond_cell.{}", i),
            Vec3::new(angle.cos(), 0.5, angle.sin()),
            BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.1)),
        ));
    }

    // A center cell, so the layout has a fixed point.
    root.add_child(SceneNode3d::mesh(
        "Diamond_cell.center",
        Vec3::new(0.0, 0.5, 0.0),
        BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.1)),
    ));

    let mut nodes = vec![root.clone()];
    nodes.extend(root.children());
    nodes
}

fn sphere(cells: usize) -> DiamondSphere {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    DiamondSphere::new(DiamondSphereConfig::default(), &model(cells), &mut rng).unwrap()
}

#[test]
fn model_import() {
    let imported = model(6);
    let sphere = sphere_from(&imported);

    assert_eq!(sphere.cells().len(), 7);
    for (i, cell) in sphere.cells().iter().enumerate() {
        assert_eq!(cell.name(), format!("S{}", i));
        assert!(cell.parent().unwrap().ptr_eq(sphere.parent()));

        let material = cell.material().unwrap();
        let material = material.as_node().unwrap();
        assert_eq!(material.name, format!("Sat-{}", i));
        assert_eq!(material.snippet_id, "KIUSWC#69");
        assert!(!material.back_face_culling);
        assert!(material.separate_culling_pass);

        let tint = material.base_color().unwrap();
        assert_eq!((tint.r, tint.g), (0.5, 0.5));
        assert!(tint.b >= 0.5 && tint.b < 0.6);
    }

    let main = sphere.main_mesh().unwrap();
    assert!(!main.is_enabled());
    assert!(main.parent().unwrap().ptr_eq(sphere.scene()));

    let root = &imported[0];
    assert!(root.children().is_empty());

    assert_eq!(sphere.mirror().render_list().len(), 7);
    assert_eq!(sphere.shadow_generator().render_list().len(), 7);
    assert_eq!(sphere.decoy().parent().unwrap().name(), "parent");
}

fn sphere_from(imported: &[SceneNode3d]) -> DiamondSphere {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    DiamondSphere::new(DiamondSphereConfig::default(), imported, &mut rng).unwrap()
}

#[test]
fn model_without_cells() {
    let nodes = vec![SceneNode3d::named("__root__"), SceneNode3d::named("Diamond Big 1")];
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);

    match DiamondSphere::new(DiamondSphereConfig::default(), &nodes, &mut rng) {
        Err(e) => assert_eq!(
            e,
            SceneError::NoCellMeshes {
                filter: "_cell".to_string()
            }
        ),
        Ok(_) => panic!("a model without cells must be rejected"),
    }
}

#[test]
fn setup() {
    let sphere = sphere(4);

    let camera = *sphere.camera().borrow();
    assert_eq!(camera.alpha(), 6.33);
    assert_eq!(camera.beta(), 1.13);
    assert_eq!(camera.radius(), 12.2687);
    assert_eq!(camera.target(), Vec3::ZERO);

    assert_eq!(sphere.hooks().len(), 2);
    assert!(sphere.is_rotating());
    assert_eq!(sphere.explosion().ratio(), 0.05);
    assert_eq!(sphere.explosion().state(), ExplosionState::Idle);

    assert_eq!(sphere.hemispheric_light().light().unwrap().intensity, 4.0);
    assert!((sphere.sun().world_position() - Vec3::new(-16.0, 16.0, 16.0)).length() < 1.0e-5);
    assert_eq!(sphere.shadow_generator().config().map_size, 2048);
    assert_eq!(sphere.bloom().bloom_threshold, 0.2);
    assert_eq!(sphere.clear_color(), BLACK);

    let ground = sphere.ground();
    assert!(!ground.is_enabled());
    assert!(ground.receives_shadows());
    assert_eq!(sphere.mirror().mirror_plane.normal, -Vec3::Y);
    assert_eq!(sphere.mirror().adaptive_blur_kernel, 16);

    let emitter = sphere.sun_rays().emitter();
    assert!(emitter.is_billboard());
    assert_eq!(emitter.local_scale(), Vec3::splat(2.0));
}

#[test]
fn sun_is_aimed_at_the_origin() {
    let mut sphere = sphere(4);
    let _ = sphere.render_frame();

    let direction = sphere.sun().light().unwrap().direction().unwrap();
    assert!((direction - Vec3::new(1.0, -1.0, -1.0).normalize()).length() < 1.0e-6);
}

#[test]
fn rotation_toggle() {
    let mut sphere = sphere(4);

    let _ = sphere.render_frame();
    let alpha = sphere.camera().borrow().alpha();
    assert!((alpha - (6.33 + 0.008)).abs() < 1.0e-5);

    sphere.stop_rotation();
    let _ = sphere.render_frame();
    assert_eq!(sphere.camera().borrow().alpha(), alpha);

    sphere.start_rotation();
    let _ = sphere.render_frame();
    assert!(sphere.camera().borrow().alpha() > alpha);
}

#[test]
fn presets_are_reached_exactly() {
    let mut sphere = sphere(4);
    sphere.stop_rotation();

    for preset in CameraPreset::ALL.iter() {
        let expected = preset.transition();
        let done = Rc::new(Cell::new(false));
        let d = done.clone();

        assert!(sphere.transition(expected, Some(Box::new(move || d.set(true)))));
        assert_eq!(sphere.hooks().len(), 2);

        for _ in 0..60 {
            let _ = sphere.render_frame();
        }
        assert!(done.get());

        let camera = sphere.camera().borrow();
        assert_eq!(Some(camera.alpha()), expected.alpha);
        assert_eq!(Some(camera.beta()), expected.beta);
        assert_eq!(Some(camera.radius()), expected.radius);
        assert_eq!(Some(camera.target()), expected.target);
    }
}

#[test]
fn preset_by_index() {
    let sphere = sphere(4);
    assert_eq!(sphere.set_camera_index(1), Ok(true));
    assert_eq!(sphere.set_camera_index(4), Err(SceneError::UnknownCameraPreset(4)));
}

#[test]
fn free_move_rebuilds_the_angles() {
    let mut sphere = sphere(4);
    sphere.stop_rotation();

    let position = Vec3::new(0.0, 5.0, 20.0);
    assert!(sphere.transition(CameraTransition::new().with_position(position), None));
    assert_eq!(sphere.hooks().len(), 3);

    for _ in 0..60 {
        let _ = sphere.render_frame();
    }

    assert_eq!(sphere.hooks().len(), 2);
    let camera = sphere.camera().borrow();
    assert_eq!(camera.position(), position);
    assert!((camera.radius() - position.length()).abs() < 1.0e-2);
}

#[test]
fn free_move_wins_over_the_idle_rotation() {
    let mut sphere = sphere(4);
    assert!(sphere.is_rotating());

    let position = Vec3::new(0.0, 5.0, 20.0);
    let reached = Rc::new(Cell::new(None));
    let (r, camera) = (reached.clone(), sphere.camera().clone());
    let started = sphere.transition(
        CameraTransition::new().with_position(position),
        Some(Box::new(move || r.set(Some(camera.borrow().position())))),
    );
    assert!(started);

    for _ in 0..60 {
        let _ = sphere.render_frame();
    }

    let reached = reached.get().expect("the transition did not complete");
    assert!((reached - position).length() < 1.0e-4);
    assert_eq!(sphere.hooks().len(), 2);

    // The rotation resumes from the reached position.
    let camera = *sphere.camera().borrow();
    assert!(!camera.is_position_pinned());
    assert!((camera.radius() - position.length()).abs() < 1.0e-3);
    assert!((camera.position() - position).length() < 1.0);

    let _ = sphere.render_frame();
    assert!(sphere.camera().borrow().position() != camera.position());
}

#[test]
fn stopped_explosion_settles() {
    let mut sphere = sphere(6);
    sphere.stop_rotation();

    let drive = sphere.show_structure();
    let _ = sphere.render_frame();
    sphere.animator().stop(drive);
    let ratio = sphere.explosion().ratio();
    assert!(ratio > 0.05 && ratio < 0.24);

    for _ in 0..200 {
        let _ = sphere.render_frame();
    }

    assert!(!sphere.explosion().is_dirty());
    assert_eq!(sphere.explosion().state(), ExplosionState::Idle);
    assert_eq!(sphere.explosion().ratio(), ratio);
}

#[test]
fn zero_frame_rate_is_rejected() {
    let config = DiamondSphereConfig::default().with_frame_rate(0);
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);

    match DiamondSphere::new(config, &model(4), &mut rng) {
        Err(e) => assert_eq!(e, SceneError::ZeroFrameRate),
        Ok(_) => panic!("a zero frame rate must be rejected"),
    }
}

#[test]
fn staying_put_is_a_noop() {
    let sphere = sphere(4);
    let position = sphere.camera().borrow().position();

    let called = Rc::new(Cell::new(false));
    let c = called.clone();
    let started = sphere.transition(
        CameraTransition::new().with_position(position),
        Some(Box::new(move || c.set(true))),
    );

    assert!(!started);
    assert!(sphere.animator().is_empty());
    assert_eq!(sphere.hooks().len(), 2);
    assert!(!called.get());
}

#[test]
fn hide_structure_settles_in_120_frames() {
    let mut sphere = sphere(6);
    sphere.stop_rotation();
    sphere.set_clock(FrameClock::fixed(480));

    let _ = sphere.show_structure();
    for _ in 0..120 {
        let _ = sphere.render_frame();
    }
    assert_eq!(sphere.explosion().ratio(), 0.24);
    assert!(!sphere.explosion().is_dirty());

    let _ = sphere.hide_structure();
    for frame in 1..120 {
        let _ = sphere.render_frame();
        assert!(sphere.explosion().is_dirty(), "settled early, at frame {}", frame);
    }

    let _ = sphere.render_frame();
    assert!(!sphere.explosion().is_dirty());
    assert_eq!(sphere.explosion().ratio(), 0.05);

    let exploder = sphere.exploder();
    let center = exploder.center_mesh().world_bounding_center();
    for (cell, origin) in exploder.meshes().iter().zip(exploder.origins()) {
        let to_center = *origin - center;
        let expected = *origin + to_center * 0.05;
        assert!((cell.world_position() - expected).length() < 1.0e-5);
    }
}

#[test]
fn cells_spread_while_shown() {
    let mut sphere = sphere(6);
    sphere.stop_rotation();

    let exploder = sphere.exploder().clone();
    let center = exploder.center_mesh().world_position();
    let cell = exploder.meshes()[0].clone();
    let before = cell.world_position().distance(center);

    let _ = sphere.show_structure();
    for _ in 0..15 {
        let _ = sphere.render_frame();
    }

    assert_eq!(sphere.explosion().ratio(), 0.24);
    assert!(cell.world_position().distance(center) > before);
    assert_eq!(exploder.center_mesh().world_position(), center);
}
