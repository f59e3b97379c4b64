use diamond_sphere::prelude::*;
use rand::SeedableRng;
use std::cell::Cell;

/// A model shaped like the real one: cells spread on a sphere around a main mesh.
fn import_model(cells: usize) -> Vec<SceneNode3d> {
    let mut root = SceneNode3d::named("__root__");
    root.add_child(SceneNode3d::mesh(
        "Diamond Big 1",
        Vec3::new(0.0, 0.8, 0.0),
        BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.5)),
    ));

    let golden_angle = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());

    for i in 0..cells {
        let y = 1.0 - 2.0 * (i as f32 + 0.5) / cells as f32;
        let r = (1.0 - y * y).sqrt();
        let theta = golden_angle * i as f32;
        let position = Vec3::new(r * theta.cos(), y, r * theta.sin()) + Vec3::new(0.0, 0.8, 0.0);

        root.add_child(SceneNode3d::mesh(
            &format!("Diamond_cell.{:03}", i),
            position,
            BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.08)),
        ));
    }

    let mut nodes = vec![root.clone()];
    root.apply_to_scene_nodes(&mut |n| {
        if !n.ptr_eq(&root) {
            nodes.push(n.clone())
        }
    });
    nodes
}

fn main() {
    env_logger::init();

    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let imported = import_model(200);
    let mut sphere = match DiamondSphere::new(DiamondSphereConfig::default(), &imported, &mut rng) {
        Ok(sphere) => sphere,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    sphere.show_structure();

    for _ in 0..30 {
        sphere.render_frame();
    }
    log::info!("structure shown, ratio {}", sphere.explosion().ratio());

    sphere.stop_rotation();

    // Visit every preset, each one starting once the previous one is reached.
    for preset in CameraPreset::ALL.iter() {
        let arrived = Rc::new(Cell::new(false));
        let a = arrived.clone();
        let started = sphere.transition(preset.transition(), Some(Box::new(move || a.set(true))));

        if !started {
            log::info!("already at {:?}", preset);
            continue;
        }

        while !arrived.get() {
            sphere.render_frame();
        }

        let camera = sphere.camera().borrow();
        log::info!(
            "{:?}: alpha {:.2}, beta {:.2}, radius {:.2}, position {:?}",
            preset,
            camera.alpha(),
            camera.beta(),
            camera.radius(),
            camera.position()
        );
    }

    sphere.hide_structure();
    sphere.start_rotation();

    for _ in 0..120 {
        sphere.render_frame();
    }

    let camera = sphere.camera().borrow();
    log::info!(
        "structure hidden, ratio {}; camera rotated to alpha {:.2}",
        sphere.explosion().ratio(),
        camera.alpha()
    );
}
