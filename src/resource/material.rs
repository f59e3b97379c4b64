//! Material descriptors attached to scene nodes.
//!
//! The shading itself is done by the renderer; these types only carry the
//! parameters the scene sets up.

use crate::color::{self, Color};

/// Name of the input block holding the base color of node materials.
pub const BASE_COLOR_INPUT: &str = "baseColor";

/// A material attached to a scene node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material3d {
    /// A node-graph material loaded from a shared snippet.
    Node(NodeMaterial),
    /// A classic diffuse/emissive material.
    Standard(StandardMaterial),
}

impl Material3d {
    /// The name of this material.
    pub fn name(&self) -> &str {
        match self {
            Material3d::Node(m) => &m.name,
            Material3d::Standard(m) => &m.name,
        }
    }

    /// The node material, if this is one.
    pub fn as_node(&self) -> Option<&NodeMaterial> {
        match self {
            Material3d::Node(m) => Some(m),
            Material3d::Standard(_) => None,
        }
    }

    /// The standard material, if this is one.
    pub fn as_standard(&self) -> Option<&StandardMaterial> {
        match self {
            Material3d::Standard(m) => Some(m),
            Material3d::Node(_) => None,
        }
    }
}

/// A procedural material whose graph is identified by a snippet id.
///
/// Only the graph inputs the scene writes to are modeled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeMaterial {
    /// The material name.
    pub name: String,
    /// Identifier of the node graph snippet.
    pub snippet_id: String,
    /// Whether back faces are culled.
    pub back_face_culling: bool,
    /// Whether front and back faces are rendered in two separate passes.
    pub separate_culling_pass: bool,
    inputs: Vec<(String, Color)>,
}

impl NodeMaterial {
    /// Creates a node material from its graph snippet id.
    pub fn new(name: &str, snippet_id: &str) -> Self {
        NodeMaterial {
            name: name.to_string(),
            snippet_id: snippet_id.to_string(),
            back_face_culling: true,
            separate_culling_pass: false,
            inputs: Vec::new(),
        }
    }

    /// Copies this material under a new name.
    pub fn clone_named(&self, name: &str) -> Self {
        NodeMaterial {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Sets the value of a color input block.
    pub fn set_input(&mut self, block: &str, value: Color) {
        match self.inputs.iter_mut().find(|(name, _)| name == block) {
            Some(input) => input.1 = value,
            None => self.inputs.push((block.to_string(), value)),
        }
    }

    /// The value of a color input block, if it was set.
    pub fn input(&self, block: &str) -> Option<Color> {
        self.inputs
            .iter()
            .find(|(name, _)| name == block)
            .map(|(_, value)| *value)
    }

    /// The base color input.
    pub fn base_color(&self) -> Option<Color> {
        self.input(BASE_COLOR_INPUT)
    }
}

/// A diffuse/emissive material.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardMaterial {
    /// The material name.
    pub name: String,
    /// The diffuse color.
    pub diffuse_color: Color,
    /// The emissive color.
    pub emissive_color: Color,
    /// Path of the diffuse texture.
    pub diffuse_texture: Option<String>,
    /// Whether the diffuse texture alpha channel is used.
    pub has_alpha: bool,
    /// Whether back faces are culled.
    pub back_face_culling: bool,
    /// Whether lighting is ignored.
    pub disable_lighting: bool,
    /// Global opacity.
    pub alpha: f32,
}

impl StandardMaterial {
    /// Creates a white, opaque, lit material.
    pub fn new(name: &str) -> Self {
        StandardMaterial {
            name: name.to_string(),
            diffuse_color: color::WHITE,
            emissive_color: color::BLACK,
            diffuse_texture: None,
            has_alpha: false,
            back_face_culling: true,
            disable_lighting: false,
            alpha: 1.0,
        }
    }
}
