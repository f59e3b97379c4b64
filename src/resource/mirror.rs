//! Planar reflections.

use crate::scene::SceneNode3d;
use glamx::Vec3;

/// A plane `normal · p + d = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// The unit normal of the plane.
    pub normal: Vec3,
    /// The signed offset of the plane along its normal.
    pub d: f32,
}

impl Plane {
    /// The plane passing through `position` with the given normal.
    pub fn from_position_and_normal(position: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or(Vec3::Y);
        Plane {
            normal,
            d: -normal.dot(position),
        }
    }

    /// Signed distance from `p` to this plane.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.d
    }
}

/// Render-to-texture reflection of a list of meshes across a plane.
#[derive(Clone)]
pub struct MirrorTexture {
    /// Name of the texture.
    pub name: String,
    /// Width and height of the texture, in pixels.
    pub size: u32,
    /// Blur kernel applied to the reflection, scaled with the texture size.
    pub adaptive_blur_kernel: u32,
    /// Intensity of the reflection.
    pub level: f32,
    /// The reflection plane.
    pub mirror_plane: Plane,
    render_list: Vec<SceneNode3d>,
}

impl MirrorTexture {
    /// Creates an empty mirror texture reflecting across `mirror_plane`.
    pub fn new(name: &str, size: u32, mirror_plane: Plane) -> Self {
        MirrorTexture {
            name: name.to_string(),
            size,
            adaptive_blur_kernel: 0,
            level: 1.0,
            mirror_plane,
            render_list: Vec::new(),
        }
    }

    /// Adds a mesh to the list of reflected meshes.
    pub fn add_to_render_list(&mut self, node: SceneNode3d) {
        if !self.render_list.iter().any(|n| n.ptr_eq(&node)) {
            self.render_list.push(node);
        }
    }

    /// The reflected meshes.
    pub fn render_list(&self) -> &[SceneNode3d] {
        &self.render_list
    }
}
