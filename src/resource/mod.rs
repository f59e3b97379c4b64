//! Materials and render targets.

pub use self::material::{Material3d, NodeMaterial, StandardMaterial, BASE_COLOR_INPUT};
pub use self::mirror::{MirrorTexture, Plane};

mod material;
mod mirror;
