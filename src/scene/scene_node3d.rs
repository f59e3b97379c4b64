use crate::light::Light;
use crate::resource::Material3d;
use glamx::{Pose3, Quat, Vec3};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::rc::Weak;

/// An axis-aligned box, expressed in the local space of the node owning it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// The smallest corner.
    pub mins: Vec3,
    /// The largest corner.
    pub maxs: Vec3,
}

impl BoundingBox {
    /// Creates a box from its two extreme corners.
    pub fn new(mins: Vec3, maxs: Vec3) -> Self {
        BoundingBox { mins, maxs }
    }

    /// Creates a box of half-extents `half_extents` centered at `center`.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        BoundingBox {
            mins: center - half_extents,
            maxs: center + half_extents,
        }
    }

    /// The center of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.mins + self.maxs) * 0.5
    }
}

/// Applies `pose` to the point `p`.
#[inline]
pub(crate) fn transform_point(pose: &Pose3, p: Vec3) -> Vec3 {
    pose.rotation * p + pose.translation
}

/// The data contained by a `SceneNode3d`.
pub struct SceneNodeData3d {
    name: String,
    local_scale: Vec3,
    local_transform: Pose3,
    world_scale: Vec3,
    world_transform: Pose3,
    enabled: bool,
    billboard: bool,
    receive_shadows: bool,
    up_to_date: bool,
    bounds: Option<BoundingBox>,
    material: Option<Material3d>,
    light: Option<Light>,
    children: Vec<SceneNode3d>,
    parent: Option<Weak<RefCell<SceneNodeData3d>>>,
}

/// A node of the scene graph.
///
/// This may represent a group of other nodes, a mesh (with bounds and a material),
/// and/or a light. Cloning a node yields another handle to the same node.
#[derive(Clone)]
pub struct SceneNode3d {
    data: Rc<RefCell<SceneNodeData3d>>,
}

impl SceneNodeData3d {
    fn set_parent(&mut self, parent: Weak<RefCell<SceneNodeData3d>>) {
        self.parent = Some(parent);
    }

    fn remove_from_parent(&mut self, to_remove: &SceneNode3d) {
        if let Some(bp) = self.parent.as_ref().and_then(|p| p.upgrade()) {
            bp.borrow_mut().remove(to_remove);
        }
    }

    fn remove(&mut self, o: &SceneNode3d) {
        if let Some(i) = self
            .children
            .iter()
            .rposition(|e| Rc::ptr_eq(&o.data, &e.data))
        {
            let _ = self.children.remove(i);
        }
    }

    /// Whether this node has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent
            .as_ref()
            .map_or(true, |p| p.upgrade().is_none())
    }

    /// The name of this node.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The children of this node.
    #[inline]
    pub fn children(&self) -> &[SceneNode3d] {
        &self.children
    }

    /// The material of this node, if any.
    #[inline]
    pub fn material(&self) -> Option<&Material3d> {
        self.material.as_ref()
    }

    /// The light attached to this node, if any.
    #[inline]
    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    fn invalidate(&mut self) {
        self.up_to_date = false;

        for c in self.children.iter_mut() {
            let mut dm = c.data_mut();

            if dm.up_to_date {
                dm.invalidate()
            }
        }
    }

    fn update(&mut self) {
        if !self.up_to_date {
            if let Some(dp) = self.parent.as_ref().and_then(|p| p.upgrade()) {
                let mut dp = dp.borrow_mut();
                dp.update();
                self.world_transform = dp.world_transform * self.local_transform;
                self.world_scale = dp.world_scale * self.local_scale;
                self.up_to_date = true;
                return;
            }

            // no parent
            self.world_transform = self.local_transform;
            self.world_scale = self.local_scale;
            self.up_to_date = true;
        }
    }
}

impl Default for SceneNode3d {
    fn default() -> SceneNode3d {
        SceneNode3d::empty()
    }
}

impl SceneNode3d {
    /// Creates a new unrooted scene node with the specified properties.
    ///
    /// # Arguments
    /// * `name` - The node name
    /// * `local_scale` - The initial scale factors along each axis
    /// * `local_transform` - The initial local transformation (rotation + translation)
    pub fn new(name: &str, local_scale: Vec3, local_transform: Pose3) -> SceneNode3d {
        let data = SceneNodeData3d {
            name: name.to_string(),
            local_scale,
            local_transform,
            world_transform: local_transform,
            world_scale: local_scale,
            enabled: true,
            billboard: false,
            receive_shadows: false,
            up_to_date: false,
            bounds: None,
            material: None,
            light: None,
            children: Vec::new(),
            parent: None,
        };

        SceneNode3d {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Creates a new empty, unnamed scene node with identity transformations.
    pub fn empty() -> SceneNode3d {
        SceneNode3d::named("")
    }

    /// Creates a new empty scene node with the given name.
    pub fn named(name: &str) -> SceneNode3d {
        SceneNode3d::new(name, Vec3::ONE, Pose3::IDENTITY)
    }

    /// Creates a mesh node: a named node located at `position` whose geometry
    /// spans `bounds` (in local space).
    pub fn mesh(name: &str, position: Vec3, bounds: BoundingBox) -> SceneNode3d {
        let node = SceneNode3d::named(name);
        {
            let mut data = node.data.borrow_mut();
            data.local_transform.translation = position;
            data.bounds = Some(bounds);
        }
        node
    }

    /// Creates a new node holding a light.
    pub fn new_light(name: &str, light: Light) -> SceneNode3d {
        let node = SceneNode3d::named(name);
        node.data.borrow_mut().light = Some(light);
        node
    }

    /// Whether `self` and `other` are handles to the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &SceneNode3d) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Returns an immutable reference to this node's internal data.
    pub fn data(&self) -> Ref<'_, SceneNodeData3d> {
        self.data.borrow()
    }

    /// Returns a mutable reference to this node's internal data.
    pub fn data_mut(&mut self) -> RefMut<'_, SceneNodeData3d> {
        self.data.borrow_mut()
    }

    /// Removes this node from its parent in the scene graph.
    ///
    /// Its local transformation is kept as-is, so its world transformation may change.
    pub fn remove(&mut self) {
        let self_self = self.clone();
        let mut data = self.data_mut();
        data.remove_from_parent(&self_self);
        data.parent = None;
        data.invalidate();
    }

    /// Removes this node from its parent while keeping its world transformation.
    pub fn unparent(&mut self) -> Self {
        let world = self.world_pose();
        let world_scale = self.world_scale();
        self.remove();

        let mut data = self.data_mut();
        data.local_transform = world;
        data.local_scale = world_scale;
        drop(data);
        self.clone()
    }

    /// The parent of this node, if it has one.
    pub fn parent(&self) -> Option<SceneNode3d> {
        self.data()
            .parent
            .as_ref()
            .and_then(|p| p.upgrade())
            .map(|data| SceneNode3d { data })
    }

    /// Adds an empty named group node as a child of this node.
    ///
    /// # Returns
    /// The newly created child `SceneNode3d`
    pub fn add_group(&mut self, name: &str) -> SceneNode3d {
        let node = SceneNode3d::named(name);

        self.add_child(node.clone());

        node
    }

    /// Adds an existing node as a child of this node.
    ///
    /// # Panics
    /// Panics if the node already has a parent
    pub fn add_child(&mut self, node: SceneNode3d) {
        assert!(
            node.data().is_root(),
            "The added node must not have a parent yet."
        );

        let mut node = node;
        let self_weak_ptr = Rc::downgrade(&self.data);
        {
            let mut data = node.data_mut();
            data.set_parent(self_weak_ptr);
            data.invalidate();
        }
        self.data_mut().children.push(node)
    }

    /// Adds a light node as a child of this node.
    pub fn add_light(&mut self, name: &str, light: Light) -> SceneNode3d {
        let node = Self::new_light(name, light);
        self.add_child(node.clone());
        node
    }

    /// The children of this node.
    pub fn children(&self) -> Vec<SceneNode3d> {
        self.data().children.clone()
    }

    /// Applies a closure to this node and all its descendants.
    #[inline]
    pub fn apply_to_scene_nodes<F: FnMut(&SceneNode3d)>(&self, f: &mut F) {
        f(self);

        for c in self.data().children.iter() {
            c.apply_to_scene_nodes(f)
        }
    }

    /// The name of this node.
    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    /// Renames this node.
    pub fn set_name(&mut self, name: &str) -> Self {
        self.data_mut().name = name.to_string();
        self.clone()
    }

    /// Whether this node is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.data().enabled
    }

    /// Enables or disables this node. Disabled nodes and their children are not rendered.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) -> Self {
        self.data_mut().enabled = enabled;
        self.clone()
    }

    /// Whether this node always faces the camera.
    #[inline]
    pub fn is_billboard(&self) -> bool {
        self.data().billboard
    }

    /// Makes this node always face the camera.
    #[inline]
    pub fn set_billboard(&mut self, billboard: bool) -> Self {
        self.data_mut().billboard = billboard;
        self.clone()
    }

    /// Whether shadows are cast onto this node.
    #[inline]
    pub fn receives_shadows(&self) -> bool {
        self.data().receive_shadows
    }

    /// Sets whether shadows are cast onto this node.
    #[inline]
    pub fn set_receive_shadows(&mut self, receive: bool) -> Self {
        self.data_mut().receive_shadows = receive;
        self.clone()
    }

    /// The local bounds of this node's geometry, if it has any.
    #[inline]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.data().bounds
    }

    /// Sets the local bounds of this node's geometry.
    #[inline]
    pub fn set_bounds(&mut self, bounds: Option<BoundingBox>) -> Self {
        self.data_mut().bounds = bounds;
        self.clone()
    }

    /// The world-space center of this node's bounds, or its world position if it
    /// has no bounds.
    pub fn world_bounding_center(&self) -> Vec3 {
        let world = self.world_pose();
        let center = self.bounds().map_or(Vec3::ZERO, |b| b.center());
        transform_point(&world, center * self.world_scale())
    }

    /// The material of this node.
    pub fn material(&self) -> Option<Material3d> {
        self.data().material.clone()
    }

    /// Sets the material of this node.
    pub fn set_material(&mut self, material: Material3d) -> Self {
        self.data_mut().material = Some(material);
        self.clone()
    }

    /// Modifies the material of this node.
    ///
    /// The closure is called only if the node has a material.
    pub fn modify_material<F: FnOnce(&mut Material3d)>(&mut self, f: F) {
        if let Some(ref mut material) = self.data_mut().material {
            f(material);
        }
    }

    /// Sets the light on this node.
    ///
    /// Pass `None` to remove the light.
    pub fn set_light(&mut self, light: Option<Light>) -> Self {
        self.data_mut().light = light;
        self.clone()
    }

    /// Returns a copy of the light on this node, if any.
    pub fn light(&self) -> Option<Light> {
        self.data().light.clone()
    }

    /// Modifies the light on this node.
    ///
    /// The closure is called only if the node has a light.
    pub fn modify_light<F: FnOnce(&mut Light)>(&mut self, f: F) {
        if let Some(ref mut light) = self.data_mut().light {
            f(light);
        }
    }

    /// Sets the local scaling factors of the object.
    #[inline]
    pub fn set_local_scale(&mut self, sx: f32, sy: f32, sz: f32) -> Self {
        let mut data = self.data_mut();
        data.invalidate();
        data.local_scale = Vec3::new(sx, sy, sz);
        drop(data);
        self.clone()
    }

    /// Returns the scaling factors of the object.
    #[inline]
    pub fn local_scale(&self) -> Vec3 {
        self.data().local_scale
    }

    /// This node world transformation.
    ///
    /// This will force an update of the world transformation of its parents if they have been
    /// invalidated.
    #[inline]
    pub fn world_pose(&self) -> Pose3 {
        let mut data = self.data.borrow_mut();
        data.update();
        data.world_transform
    }

    /// This node world scale.
    #[inline]
    pub fn world_scale(&self) -> Vec3 {
        let mut data = self.data.borrow_mut();
        data.update();
        data.world_scale
    }

    /// Returns this node's local translation component.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.data().local_transform.translation
    }

    /// Returns this node's translation in world space.
    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.world_pose().translation
    }

    /// Sets this node's local translation, replacing the current one.
    ///
    /// # Example
    /// ```
    /// # use diamond_sphere::scene::SceneNode3d;
    /// # use glamx::Vec3;
    /// let mut scene = SceneNode3d::empty();
    /// let mut group = scene.add_group("cube");
    /// group.set_position(Vec3::new(5.0, 0.0, -10.0));
    /// assert_eq!(group.world_position(), Vec3::new(5.0, 0.0, -10.0));
    /// ```
    #[inline]
    pub fn set_position(&mut self, t: Vec3) -> Self {
        let mut data = self.data_mut();
        data.invalidate();
        data.local_transform.translation = t;
        drop(data);
        self.clone()
    }

    /// Places this node so that its world translation is `t`.
    pub fn set_world_position(&mut self, t: Vec3) -> Self {
        let local = match self.parent() {
            Some(parent) => transform_point(&parent.world_pose().inverse(), t),
            None => t,
        };

        self.set_position(local)
    }

    /// Returns this node's local rotation component.
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.data().local_transform.rotation
    }

    /// Sets this node's local rotation, replacing the current one.
    #[inline]
    pub fn set_rotation(&mut self, r: Quat) -> Self {
        let mut data = self.data_mut();
        data.invalidate();
        data.local_transform.rotation = r;
        drop(data);
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_pose_follows_parent() {
        let mut root = SceneNode3d::named("root");
        let mut parent = root.add_group("parent");
        let mut child = parent.add_group("child");

        child.set_position(Vec3::new(1.0, 0.0, 0.0));
        parent.set_position(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(child.world_position(), Vec3::new(1.0, 2.0, 0.0));

        parent.set_rotation(Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2));
        let p = child.world_position();
        assert!((p - Vec3::new(0.0, 2.0, -1.0)).length() < 1.0e-5);
    }

    #[test]
    fn unparent_keeps_world_position() {
        let mut root = SceneNode3d::named("__root__");
        root.set_position(Vec3::new(0.0, 0.0, 3.0));
        let mut cell = SceneNode3d::mesh(
            "a_cell",
            Vec3::new(1.0, 0.0, 0.0),
            BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.5)),
        );
        root.add_child(cell.clone());
        assert_eq!(cell.world_position(), Vec3::new(1.0, 0.0, 3.0));

        cell.unparent();
        assert!(cell.parent().is_none());
        assert!(root.children().is_empty());
        assert_eq!(cell.position(), Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn set_world_position_under_parent() {
        let mut root = SceneNode3d::named("root");
        root.set_position(Vec3::new(0.0, 1.0, 0.0));
        let mut child = root.add_group("child");

        child.set_world_position(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(child.position(), Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(child.world_position(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn bounding_center_is_in_world_space() {
        let node = SceneNode3d::mesh(
            "m",
            Vec3::new(0.0, 0.0, 1.0),
            BoundingBox::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0)),
        );
        assert_eq!(node.world_bounding_center(), Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(SceneNode3d::named("g").world_bounding_center(), Vec3::ZERO);
    }

    #[test]
    #[should_panic]
    fn cannot_add_a_child_twice() {
        let mut a = SceneNode3d::named("a");
        let mut b = SceneNode3d::named("b");
        let c = a.add_group("c");
        b.add_child(c);
    }
}
