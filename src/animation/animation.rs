use crate::animation::Easing;
use glamx::Vec3;

/// Tolerance, in animation frames, under which an animation counts as finished.
const FRAME_EPSILON: f64 = 1.0e-6;

/// A value that can be interpolated by an [`Animation`].
pub trait Animatable: Copy + 'static {
    /// Interpolates between `from` and `to` with the (already eased) progress `t`.
    fn interpolate(from: Self, to: Self, t: f32) -> Self;
}

impl Animatable for f32 {
    #[inline]
    fn interpolate(from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * t
    }
}

impl Animatable for f64 {
    #[inline]
    fn interpolate(from: f64, to: f64, t: f32) -> f64 {
        from + (to - from) * t as f64
    }
}

impl Animatable for Vec3 {
    #[inline]
    fn interpolate(from: Vec3, to: Vec3, t: f32) -> Vec3 {
        from.lerp(to, t)
    }
}

/// An eased transition of a value from `from` to `to` over a number of frames.
///
/// Animations are frame-based: advancing by `dt` seconds moves the animation
/// `dt * frame_rate * speed_ratio` frames forward. The animation is finished once
/// `frame_count` frames have elapsed, at which point [`value`](Self::value) is
/// exactly `to`.
///
/// # Example
/// ```
/// # use diamond_sphere::animation::{Animation, Easing};
/// let mut anim = Animation::new(0.0f32, 10.0, 60.0, 60).with_easing(Easing::Linear);
/// anim.advance(0.5);
/// assert_eq!(anim.value(), 5.0);
/// anim.advance(0.5);
/// assert!(anim.is_finished());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Animation<T: Animatable> {
    from: T,
    to: T,
    frame_rate: f64,
    frame_count: f64,
    speed_ratio: f64,
    easing: Easing,
    elapsed_frames: f64,
}

impl<T: Animatable> Animation<T> {
    /// Creates an animation from `from` to `to` lasting `frame_count` frames at
    /// `frame_rate` frames per second.
    ///
    /// The default easing is cubic ease-in-out and the default speed ratio is 1.
    pub fn new(from: T, to: T, frame_rate: f32, frame_count: u32) -> Self {
        Animation {
            from,
            to,
            frame_rate: frame_rate as f64,
            frame_count: frame_count as f64,
            speed_ratio: 1.0,
            easing: Easing::CUBIC_IN_OUT,
            elapsed_frames: 0.0,
        }
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the speed multiplier applied on top of the frame rate.
    pub fn with_speed_ratio(mut self, speed_ratio: f32) -> Self {
        self.speed_ratio = speed_ratio as f64;
        self
    }

    /// The start value.
    #[inline]
    pub fn from(&self) -> T {
        self.from
    }

    /// The end value.
    #[inline]
    pub fn to(&self) -> T {
        self.to
    }

    /// The total number of frames of this animation.
    #[inline]
    pub fn frame_count(&self) -> f64 {
        self.frame_count
    }

    /// The number of frames elapsed so far (capped at the frame count).
    #[inline]
    pub fn elapsed_frames(&self) -> f64 {
        self.elapsed_frames.min(self.frame_count.max(0.0))
    }

    /// Moves the animation forward by `dt` seconds.
    ///
    /// A non-positive effective rate jumps straight to the end.
    pub fn advance(&mut self, dt: f64) {
        let rate = self.frame_rate * self.speed_ratio;

        if rate > 0.0 {
            self.elapsed_frames += dt.max(0.0) * rate;
        } else {
            self.elapsed_frames = self.frame_count.max(0.0);
        }
    }

    /// Whether all the frames of this animation have elapsed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed_frames >= self.frame_count - FRAME_EPSILON
    }

    /// The normalized (non-eased) progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.is_finished() {
            1.0
        } else {
            (self.elapsed_frames / self.frame_count) as f32
        }
    }

    /// The current value.
    pub fn value(&self) -> T {
        if self.is_finished() {
            self.to
        } else {
            T::interpolate(self.from, self.to, self.easing.ease(self.progress()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_exactly() {
        let mut anim = Animation::new(0.24f32, 0.05, 120.0, 120).with_speed_ratio(4.0);

        for _ in 0..119 {
            anim.advance(1.0 / 480.0);
            assert!(!anim.is_finished());
        }

        anim.advance(1.0 / 480.0);
        assert!(anim.is_finished());
        assert_eq!(anim.value(), 0.05);
    }

    #[test]
    fn eased_midpoint() {
        let mut anim = Animation::new(Vec3::ZERO, Vec3::new(2.0, 4.0, -2.0), 60.0, 60);
        anim.advance(0.5);
        assert_eq!(anim.progress(), 0.5);
        assert!((anim.value() - Vec3::new(1.0, 2.0, -1.0)).length() < 1.0e-6);

        anim.advance(0.25);
        let v = anim.value();
        assert!(v.x > 1.5 && v.x < 2.0);
    }

    #[test]
    fn degenerate_animations_finish_on_first_step() {
        let mut zero_frames = Animation::new(1.0f32, 2.0, 60.0, 0);
        zero_frames.advance(1.0 / 60.0);
        assert!(zero_frames.is_finished());
        assert_eq!(zero_frames.value(), 2.0);

        let mut zero_rate = Animation::new(1.0f32, 2.0, 0.0, 60);
        assert!(!zero_rate.is_finished());
        zero_rate.advance(1.0 / 60.0);
        assert!(zero_rate.is_finished());
        assert_eq!(zero_rate.value(), 2.0);
    }
}
