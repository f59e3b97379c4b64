//! The orbit camera, its predefined viewpoints and animated transitions.

pub use self::orbit::OrbitCamera;
pub use self::preset::{CameraPreset, CAMERA_Y};
pub use self::transition::{
    CameraProperties, CameraProperty, CameraTransition, TransitionCoordinator,
    DEFAULT_FRAME_COUNT, DEFAULT_SPEED, NOOP_DISTANCE,
};

mod orbit;
mod preset;
mod transition;
