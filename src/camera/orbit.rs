use glamx::{Pose3, Vec3};
use std::f32;

/// An orbit (arc-rotate) camera.
///
/// The camera looks at `target` from spherical coordinates around it:
/// `alpha` is the longitudinal angle (around the vertical axis), `beta` the
/// latitudinal angle measured from the vertical axis, and `radius` the distance.
///
/// Writing `alpha`, `beta` or `radius` moves the camera position accordingly.
/// Writing `position` or `target` directly pins the position and leaves the
/// angles stale until [`rebuild_angles_and_radius`](Self::rebuild_angles_and_radius)
/// is called. While pinned, [`rotate`](Self::rotate) only turns the angles.
///
/// # Example
/// ```
/// # use diamond_sphere::camera::OrbitCamera;
/// # use glamx::Vec3;
/// let mut camera = OrbitCamera::new(0.0, std::f32::consts::FRAC_PI_2, 10.0, Vec3::ZERO);
/// assert!((camera.position() - Vec3::new(10.0, 0.0, 0.0)).length() < 1.0e-4);
///
/// camera.set_position(Vec3::new(0.0, 0.0, 5.0));
/// camera.rebuild_angles_and_radius();
/// assert!((camera.radius() - 5.0).abs() < 1.0e-6);
/// ```
#[derive(Copy, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitCamera {
    alpha: f32,
    beta: f32,
    radius: f32,
    target: Vec3,
    position: Vec3,
    position_pinned: bool,

    lower_beta_limit: Option<f32>,
    upper_beta_limit: Option<f32>,
    lower_radius_limit: Option<f32>,
    upper_radius_limit: Option<f32>,
}

impl OrbitCamera {
    /// Creates an orbit camera without any limit.
    pub fn new(alpha: f32, beta: f32, radius: f32, target: Vec3) -> OrbitCamera {
        let mut res = OrbitCamera {
            alpha,
            beta,
            radius,
            target,
            position: Vec3::ZERO,
            position_pinned: false,
            lower_beta_limit: None,
            upper_beta_limit: None,
            lower_radius_limit: None,
            upper_radius_limit: None,
        };

        res.update_position();

        res
    }

    /// The longitudinal angle, in radians.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Sets the longitudinal angle and moves the camera accordingly.
    #[inline]
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.update_position();
    }

    /// The latitudinal angle, in radians.
    #[inline]
    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// Sets the latitudinal angle and moves the camera accordingly.
    #[inline]
    pub fn set_beta(&mut self, beta: f32) {
        self.beta = beta;
        self.update_position();
    }

    /// The distance to the target.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sets the distance to the target and moves the camera accordingly.
    #[inline]
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.update_position();
    }

    /// The point the camera looks at.
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Sets the point the camera looks at. The position is left unchanged.
    #[inline]
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.position_pinned = true;
    }

    /// The camera position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Sets the camera position. The angles and radius are left unchanged.
    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.position_pinned = true;
    }

    /// Whether the position was written directly since the angles were last
    /// rebuilt.
    #[inline]
    pub fn is_position_pinned(&self) -> bool {
        self.position_pinned
    }

    /// Turns the camera around its target by the given angle increments.
    ///
    /// A pinned position is left in place: only the angles change, and the
    /// next rebuild recomputes them from that position.
    pub fn rotate(&mut self, delta_alpha: f32, delta_beta: f32) {
        self.alpha += delta_alpha;
        self.beta += delta_beta;

        if !self.position_pinned {
            self.update_position();
        }
    }

    /// Sets the limits of `beta`. `None` means unbounded.
    pub fn set_beta_limits(&mut self, lower: Option<f32>, upper: Option<f32>) {
        self.lower_beta_limit = lower;
        self.upper_beta_limit = upper;
    }

    /// Sets the limits of `radius`. `None` means unbounded.
    pub fn set_radius_limits(&mut self, lower: Option<f32>, upper: Option<f32>) {
        self.lower_radius_limit = lower;
        self.upper_radius_limit = upper;
    }

    /// Recomputes `alpha`, `beta` and `radius` from the current position and target.
    ///
    /// `alpha` is kept on the same revolution as its previous value, and the
    /// configured limits are applied.
    pub fn rebuild_angles_and_radius(&mut self) {
        let offset = self.position - self.target;
        self.radius = offset.length();

        if self.radius == 0.0 {
            self.radius = 0.0001;
        }

        let previous_alpha = self.alpha;

        if offset.x == 0.0 && offset.z == 0.0 {
            self.alpha = f32::consts::FRAC_PI_2;
        } else {
            let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();
            self.alpha = (offset.x / horizontal).clamp(-1.0, 1.0).acos();
        }

        if offset.z < 0.0 {
            self.alpha = 2.0 * f32::consts::PI - self.alpha;
        }

        let turns = ((previous_alpha - self.alpha) / (2.0 * f32::consts::PI)).round();
        self.alpha += turns * 2.0 * f32::consts::PI;

        self.beta = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.position_pinned = false;

        self.check_limits();
    }

    fn check_limits(&mut self) {
        let (beta, radius) = (self.beta, self.radius);

        if let Some(lower) = self.lower_beta_limit {
            self.beta = self.beta.max(lower);
        }
        if let Some(upper) = self.upper_beta_limit {
            self.beta = self.beta.min(upper);
        }
        if let Some(lower) = self.lower_radius_limit {
            self.radius = self.radius.max(lower);
        }
        if let Some(upper) = self.upper_radius_limit {
            self.radius = self.radius.min(upper);
        }

        if beta != self.beta || radius != self.radius {
            self.update_position();
        }
    }

    fn update_position(&mut self) {
        self.position_pinned = false;
        let (sina, cosa) = self.alpha.sin_cos();
        let cosb = self.beta.cos();
        let mut sinb = self.beta.sin();

        if sinb == 0.0 {
            sinb = 0.0001;
        }

        self.position = self.target
            + Vec3::new(
                self.radius * cosa * sinb,
                self.radius * cosb,
                self.radius * sina * sinb,
            );
    }

    /// The view transformation (world space to camera space).
    pub fn view_transform(&self) -> Pose3 {
        Pose3::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1.0e-4
    }

    #[test]
    fn rebuild_recovers_spherical_coordinates() {
        let target = Vec3::new(0.0, 0.8, 0.12);
        let camera = OrbitCamera::new(1.2, 0.7, 4.0, target);

        let mut rebuilt = camera;
        rebuilt.set_alpha(0.0);
        rebuilt.set_beta(0.1);
        rebuilt.set_position(camera.position());
        rebuilt.rebuild_angles_and_radius();

        assert!(close(rebuilt.alpha(), 1.2));
        assert!(close(rebuilt.beta(), 0.7));
        assert!(close(rebuilt.radius(), 4.0));
    }

    #[test]
    fn rebuild_keeps_alpha_revolution() {
        let mut camera = OrbitCamera::new(6.33 + 2.0 * f32::consts::PI, 1.13, 12.2687, Vec3::ZERO);
        let position = camera.position();
        camera.set_position(position);
        camera.rebuild_angles_and_radius();

        assert!(close(camera.alpha(), 6.33 + 2.0 * f32::consts::PI));
    }

    #[test]
    fn limits_apply_on_rebuild_only() {
        let mut camera = OrbitCamera::new(0.0, 1.0, 12.0, Vec3::ZERO);
        camera.set_radius_limits(Some(8.0), Some(160.0));

        camera.set_radius(2.5);
        assert_eq!(camera.radius(), 2.5);

        camera.rebuild_angles_and_radius();
        assert!(close(camera.radius(), 8.0));
        assert!(close((camera.position() - camera.target()).length(), 8.0));
    }

    #[test]
    fn rotation_moves_the_camera_unless_pinned() {
        let mut camera = OrbitCamera::new(0.5, 1.0, 5.0, Vec3::ZERO);
        let start = camera.position();

        camera.rotate(0.1, 0.0);
        assert!(close(camera.alpha(), 0.6));
        assert!(camera.position().distance(start) > 0.1);
        assert!(close((camera.position() - camera.target()).length(), 5.0));

        let pinned = Vec3::new(0.0, 3.0, 4.0);
        camera.set_position(pinned);
        camera.rotate(0.1, 0.02);
        assert!(camera.is_position_pinned());
        assert_eq!(camera.position(), pinned);

        camera.rebuild_angles_and_radius();
        assert!(!camera.is_position_pinned());
        assert_eq!(camera.position(), pinned);

        camera.rotate(0.1, 0.0);
        assert!(camera.position() != pinned);
        assert!(close((camera.position() - camera.target()).length(), 5.0));
    }

    #[test]
    fn target_write_leaves_position() {
        let mut camera = OrbitCamera::new(0.5, 1.0, 5.0, Vec3::ZERO);
        let position = camera.position();
        camera.set_target(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(camera.position(), position);

        camera.rebuild_angles_and_radius();
        assert!(close(camera.radius(), (position - Vec3::X).length()));
    }
}
