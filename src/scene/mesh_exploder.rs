use crate::scene::SceneNode3d;
use glamx::Vec3;

/// Spreads a set of meshes away from a center mesh.
///
/// Each mesh records its world position at construction (its origin) and the
/// offset from the center mesh's bounding center to its own. Exploding by a
/// ratio then places every mesh at `origin + offset * ratio`, while the center
/// mesh stays where it was.
///
/// # Example
/// ```
/// # use diamond_sphere::scene::{BoundingBox, MeshExploder, SceneNode3d};
/// # use glamx::Vec3;
/// let unit = BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.5));
/// let center = SceneNode3d::mesh("center", Vec3::ZERO, unit);
/// let side = SceneNode3d::mesh("side", Vec3::new(2.0, 0.0, 0.0), unit);
///
/// let exploder = MeshExploder::with_center(vec![center.clone(), side.clone()], center).unwrap();
/// exploder.explode(0.5);
/// assert_eq!(side.world_position(), Vec3::new(3.0, 0.0, 0.0));
/// ```
#[derive(Clone)]
pub struct MeshExploder {
    center_mesh: SceneNode3d,
    center_position: Vec3,
    meshes: Vec<SceneNode3d>,
    origins: Vec<Vec3>,
    to_center: Vec<Vec3>,
}

impl MeshExploder {
    /// Creates an exploder around the mesh whose bounding center is the closest
    /// to the average bounding center.
    ///
    /// Returns `None` if `meshes` is empty.
    pub fn new(meshes: Vec<SceneNode3d>) -> Option<Self> {
        let center_mesh = Self::closest_to_average(&meshes)?;
        Self::with_center(meshes, center_mesh)
    }

    /// Creates an exploder around `center_mesh`.
    ///
    /// The center mesh is not displaced, whether it is part of `meshes` or not.
    /// Returns `None` only if `meshes` is empty.
    pub fn with_center(mut meshes: Vec<SceneNode3d>, center_mesh: SceneNode3d) -> Option<Self> {
        if meshes.is_empty() {
            return None;
        }

        meshes.retain(|m| !m.ptr_eq(&center_mesh));

        let center_position = center_mesh.world_position();
        let center = center_mesh.world_bounding_center();
        let origins = meshes.iter().map(|m| m.world_position()).collect();
        let to_center = meshes
            .iter()
            .map(|m| {
                if m.bounds().is_some() && center_mesh.bounds().is_some() {
                    m.world_bounding_center() - center
                } else {
                    Vec3::ZERO
                }
            })
            .collect();

        Some(MeshExploder {
            center_mesh,
            center_position,
            meshes,
            origins,
            to_center,
        })
    }

    fn closest_to_average(meshes: &[SceneNode3d]) -> Option<SceneNode3d> {
        if meshes.is_empty() {
            return None;
        }

        let centers: Vec<Vec3> = meshes.iter().map(|m| m.world_bounding_center()).collect();
        let average = centers.iter().fold(Vec3::ZERO, |acc, c| acc + *c) / centers.len() as f32;

        let mut shortest = f32::MAX;
        let mut res = None;

        for (mesh, center) in meshes.iter().zip(centers.iter()) {
            let dist = center.distance(average);

            if dist < shortest {
                shortest = dist;
                res = Some(mesh.clone());
            }
        }

        res.or_else(|| meshes.first().cloned())
    }

    /// Moves every mesh to `origin + offset * ratio`, then puts the center mesh
    /// back at its original position.
    ///
    /// A ratio of 0 restores the original layout. Any ratio is accepted.
    pub fn explode(&self, ratio: f32) {
        for ((mesh, origin), to_center) in self
            .meshes
            .iter()
            .zip(self.origins.iter())
            .zip(self.to_center.iter())
        {
            let _ = mesh.clone().set_world_position(*origin + *to_center * ratio);
        }

        let _ = self
            .center_mesh
            .clone()
            .set_world_position(self.center_position);
    }

    /// The mesh the others are spread from.
    pub fn center_mesh(&self) -> &SceneNode3d {
        &self.center_mesh
    }

    /// The displaced meshes, without the center mesh.
    pub fn meshes(&self) -> &[SceneNode3d] {
        &self.meshes
    }

    /// The world positions of the displaced meshes at construction.
    pub fn origins(&self) -> &[Vec3] {
        &self.origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::BoundingBox;

    fn cell(name: &str, position: Vec3) -> SceneNode3d {
        SceneNode3d::mesh(
            name,
            position,
            BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.1)),
        )
    }

    #[test]
    fn center_mesh_is_closest_to_average() {
        let meshes = vec![
            cell("a", Vec3::new(-1.0, 0.0, 0.0)),
            cell("b", Vec3::new(0.1, 0.0, 0.0)),
            cell("c", Vec3::new(1.0, 0.0, 0.0)),
        ];

        let exploder = MeshExploder::new(meshes.clone()).unwrap();
        assert!(exploder.center_mesh().ptr_eq(&meshes[1]));
        assert_eq!(exploder.meshes().len(), 2);
        assert_eq!(exploder.origins(), &[Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn explode_is_relative_to_origins() {
        let meshes = vec![cell("center", Vec3::ZERO), cell("outer", Vec3::new(0.0, 2.0, 0.0))];
        let exploder = MeshExploder::new(meshes.clone()).unwrap();

        exploder.explode(0.24);
        assert!((meshes[1].world_position() - Vec3::new(0.0, 2.48, 0.0)).length() < 1.0e-5);

        exploder.explode(0.05);
        assert!((meshes[1].world_position() - Vec3::new(0.0, 2.1, 0.0)).length() < 1.0e-5);

        exploder.explode(0.0);
        assert_eq!(meshes[1].world_position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(meshes[0].world_position(), Vec3::ZERO);
    }

    #[test]
    fn explode_under_a_moved_parent() {
        let mut root = SceneNode3d::named("root");
        let mut group = root.add_group("parent");
        let _ = group.set_position(Vec3::new(0.0, 10.0, 0.0));

        let center = cell("center", Vec3::ZERO);
        let outer = cell("outer", Vec3::new(1.0, 0.0, 0.0));
        let exploder = MeshExploder::new(vec![center.clone(), outer.clone()]).unwrap();

        group.add_child(center.clone());
        group.add_child(outer.clone());
        exploder.explode(1.0);

        assert!((outer.world_position() - Vec3::new(2.0, 0.0, 0.0)).length() < 1.0e-5);
        assert!((outer.position() - Vec3::new(2.0, -10.0, 0.0)).length() < 1.0e-5);
    }

    #[test]
    fn no_mesh() {
        assert!(MeshExploder::new(Vec::new()).is_none());
    }
}
