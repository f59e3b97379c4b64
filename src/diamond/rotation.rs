use crate::camera::OrbitCamera;
use std::cell::Cell;
use std::rc::Rc;

/// Per-frame increments of the idle camera rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationConfig {
    /// Added to the camera alpha every frame.
    pub alpha_step: f32,
    /// Added to the camera beta every frame.
    pub beta_step: f32,
    /// Whether the rotation runs when the scene is created.
    pub enabled: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        RotationConfig {
            alpha_step: 0.008,
            beta_step: 0.02,
            enabled: true,
        }
    }
}

/// The idle auto-rotation of the camera, which can be switched on and off.
///
/// Clones share the same switch.
#[derive(Clone, Debug)]
pub struct CameraRotation {
    config: RotationConfig,
    enabled: Rc<Cell<bool>>,
}

impl CameraRotation {
    /// Creates the rotation, running if `config.enabled` is set.
    pub fn new(config: RotationConfig) -> Self {
        CameraRotation {
            config,
            enabled: Rc::new(Cell::new(config.enabled)),
        }
    }

    /// Resumes the rotation.
    pub fn start(&self) {
        self.enabled.set(true);
    }

    /// Suspends the rotation.
    pub fn stop(&self) {
        self.enabled.set(false);
    }

    /// Whether the rotation is running.
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Rotates `camera` by one frame's increments, if the rotation is running.
    pub fn step(&self, camera: &mut OrbitCamera) {
        if self.enabled.get() {
            camera.rotate(self.config.alpha_step, self.config.beta_step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glamx::Vec3;

    #[test]
    fn steps_only_while_enabled() {
        let rotation = CameraRotation::new(RotationConfig::default());
        let mut camera = OrbitCamera::new(1.0, 1.0, 10.0, Vec3::ZERO);

        rotation.step(&mut camera);
        assert!((camera.alpha() - 1.008).abs() < 1.0e-6);
        assert!((camera.beta() - 1.02).abs() < 1.0e-6);
        let alpha = camera.alpha();

        rotation.clone().stop();
        assert!(!rotation.is_enabled());
        rotation.step(&mut camera);
        assert_eq!(camera.alpha(), alpha);

        rotation.start();
        rotation.step(&mut camera);
        assert!(camera.alpha() > alpha);
    }
}
