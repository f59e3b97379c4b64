//! Everything related to the scene graph and the render loop.

pub use self::frame_clock::FrameClock;
pub use self::mesh_exploder::MeshExploder;
pub use self::render_hooks::{FrameInfo, HookHandle, RenderHooks};
pub use self::scene_node3d::{BoundingBox, SceneNode3d, SceneNodeData3d};

mod frame_clock;
mod mesh_exploder;
mod render_hooks;
mod scene_node3d;
