/*!
# Diamond sphere

Keep It Simple, Stupid diamond sphere scene.

A sphere of diamond cells, lit by a sky light and a sun casting shadows,
reflected by the ground, with bloom and sun rays. The scene offers a handful of
one-liners to drive it:

* move the camera to one of four predefined viewpoints, or anywhere else,
  with eased transitions reporting their completion once;
* spread the cells apart to show the structure, or collapse them back;
* start or stop the idle rotation of the camera.

Rendering itself is left to the renderer: this crate maintains the scene graph,
the camera, the material/light/post-processing descriptors and the per-frame
logic (animations and render hooks) that drive them.

```
use diamond_sphere::prelude::*;
use rand::SeedableRng;

// The imported model: a root node holding the cells.
let mut root = SceneNode3d::named("__root__");
for i in 0..8 {
    let angle = i as f32 * std::f32::consts::TAU / 8.0;
    let position = Vec3::new(angle.cos(), 0.0, angle.sin());
    let bounds = BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.1));
    root.add_child(SceneNode3d::mesh(&format!("Diamond_cell.{}", i), position, bounds));
}
let mut imported = vec![root.clone()];
imported.extend(root.children());

let mut rng = rand::rngs::StdRng::seed_from_u64(0);
let mut sphere = DiamondSphere::new(DiamondSphereConfig::default(), &imported, &mut rng).unwrap();

sphere.stop_rotation();
sphere.set_camera(CameraPreset::Camera1);
sphere.show_structure();

for _ in 0..60 {
    sphere.render_frame();
}

assert_eq!(sphere.camera().borrow().radius(), 2.5);
assert_eq!(sphere.explosion().ratio(), 0.24);
```

## Frames
Everything runs on the render loop, one frame at a time. Each call to
`DiamondSphere::render_frame` first steps every running animation, in the order
they were started, then runs the render hooks in the order they were added.
Completion callbacks run without any internal borrow held, so they may start
new transitions or remove hooks.
*/
#![allow(non_upper_case_globals)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

extern crate num_traits as num;
#[cfg(feature = "serde")]
extern crate serde;

pub use glamx;

pub mod animation;
pub mod camera;
pub mod color;
pub mod diamond;
pub mod error;
pub mod light;
pub mod post_processing;
pub mod resource;
pub mod scene;
pub mod shadow;

pub mod prelude {
    pub use crate::animation::*;
    pub use crate::camera::*;
    pub use crate::color::*;
    pub use crate::diamond::*;
    pub use crate::error::*;
    pub use crate::light::*;
    pub use crate::post_processing::*;
    pub use crate::resource::*;
    pub use crate::scene::*;
    pub use crate::shadow::*;
    pub use glamx::{Pose3, Quat, Vec3};
    pub use std::cell::RefCell;
    pub use std::rc::Rc;
}
