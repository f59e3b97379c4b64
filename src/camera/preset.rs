use crate::camera::CameraTransition;
use crate::error::SceneError;
use glamx::Vec3;
use std::convert::TryFrom;

/// Height of the point the close-up presets look at.
pub const CAMERA_Y: f32 = 0.8;

/// The predefined viewpoints of the diamond sphere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CameraPreset {
    /// Overview from far away.
    Camera0,
    /// Close-up, looking down into the sphere.
    Camera1,
    /// Close-up, from straight above.
    Camera2,
    /// Wide shot.
    Camera3,
}

impl CameraPreset {
    /// Every preset, by index.
    pub const ALL: [CameraPreset; 4] = [
        CameraPreset::Camera0,
        CameraPreset::Camera1,
        CameraPreset::Camera2,
        CameraPreset::Camera3,
    ];

    /// The transition moving the camera to this viewpoint.
    ///
    /// It does not depend on the current camera state.
    pub fn transition(self) -> CameraTransition {
        let (alpha, beta, radius, target) = match self {
            CameraPreset::Camera0 => (6.33, 1.13, 12.2687, Vec3::new(0.0, CAMERA_Y - 0.1, 0.0)),
            CameraPreset::Camera1 => (-1.69, 0.38, 2.5, Vec3::new(0.0, CAMERA_Y, 0.12)),
            CameraPreset::Camera2 => (0.0, 0.08, 3.0, Vec3::new(0.0, CAMERA_Y, 0.12)),
            CameraPreset::Camera3 => (-0.49, 0.89, 15.0, Vec3::new(0.0, CAMERA_Y, 0.0)),
        };

        CameraTransition::new()
            .with_alpha(alpha)
            .with_beta(beta)
            .with_radius(radius)
            .with_target(target)
    }
}

impl TryFrom<usize> for CameraPreset {
    type Error = SceneError;

    fn try_from(index: usize) -> Result<Self, SceneError> {
        CameraPreset::ALL
            .get(index)
            .copied()
            .ok_or(SceneError::UnknownCameraPreset(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera1_is_a_close_up() {
        let transition = CameraPreset::Camera1.transition();
        assert_eq!(transition.alpha, Some(-1.69));
        assert_eq!(transition.beta, Some(0.38));
        assert_eq!(transition.radius, Some(2.5));
        assert_eq!(transition.target, Some(Vec3::new(0.0, CAMERA_Y, 0.12)));
        assert_eq!(transition.position, None);
    }

    #[test]
    fn presets_by_index() {
        assert_eq!(CameraPreset::try_from(3), Ok(CameraPreset::Camera3));
        assert!(matches!(
            CameraPreset::try_from(4),
            Err(SceneError::UnknownCameraPreset(4))
        ));
    }
}
