//! The animated explosion ratio of the cells.

use crate::animation::{Animation, AnimationHandle, Animator, Easing};
use std::cell::RefCell;
use std::rc::Rc;

/// Parameters of the explosion animations.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplosionConfig {
    /// Frames per second of the drive animation.
    pub frame_rate: f32,
    /// Length of the drive animation, in frames.
    pub frame_count: u32,
    /// Playback speed multiplier of the drive animation.
    pub speed_ratio: f32,
    /// Ratio of [`hide_structure`](ExplosionController::hide_structure).
    pub hidden_ratio: f32,
    /// Ratio of [`show_structure`](ExplosionController::show_structure).
    pub shown_ratio: f32,
    /// Ratio the cells are laid out with when the scene is created.
    pub initial_ratio: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        ExplosionConfig {
            frame_rate: 120.0,
            frame_count: 120,
            speed_ratio: 4.0,
            hidden_ratio: 0.05,
            shown_ratio: 0.24,
            initial_ratio: 0.05,
        }
    }
}

impl ExplosionConfig {
    /// Sets the playback speed multiplier.
    pub fn with_speed_ratio(mut self, speed_ratio: f32) -> Self {
        self.speed_ratio = speed_ratio;
        self
    }

    /// Sets the ratio the cells start with.
    pub fn with_initial_ratio(mut self, ratio: f32) -> Self {
        self.initial_ratio = ratio;
        self
    }
}

/// Whether the explosion ratio is being animated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExplosionState {
    /// The ratio is settled.
    Idle,
    /// At least one drive animation is in flight.
    Animating,
}

struct ExplosionInfo {
    ratio: f32,
    drives: Vec<AnimationHandle>,
    laid_out: Option<f32>,
}

/// Owns the explosion ratio and drives it with eased animations.
///
/// The ratio persists between drives: each new drive starts from the current
/// value, which makes it the baseline of the next one. A drive started while
/// another is in flight does not cancel it; both write the ratio every frame
/// and the latest one wins.
///
/// # Example
/// ```
/// # use diamond_sphere::animation::Animator;
/// # use diamond_sphere::diamond::{ExplosionConfig, ExplosionController, ExplosionState};
/// let animator = Animator::new();
/// let explosion = ExplosionController::new(animator.clone(), ExplosionConfig::default());
///
/// explosion.show_structure();
/// assert_eq!(explosion.state(), ExplosionState::Animating);
///
/// for _ in 0..120 {
///     animator.advance(1.0 / 480.0);
/// }
/// assert_eq!(explosion.state(), ExplosionState::Idle);
/// assert_eq!(explosion.ratio(), 0.24);
/// ```
#[derive(Clone)]
pub struct ExplosionController {
    info: Rc<RefCell<ExplosionInfo>>,
    animator: Animator,
    config: ExplosionConfig,
}

impl ExplosionController {
    /// Creates an idle controller at the configured initial ratio.
    pub fn new(animator: Animator, config: ExplosionConfig) -> Self {
        let info = ExplosionInfo {
            ratio: config.initial_ratio,
            drives: Vec::new(),
            laid_out: None,
        };

        ExplosionController {
            info: Rc::new(RefCell::new(info)),
            animator,
            config,
        }
    }

    /// The animation parameters.
    pub fn config(&self) -> &ExplosionConfig {
        &self.config
    }

    /// Starts animating the ratio from its current value to `ratio`.
    ///
    /// The ratio is not bounded.
    pub fn set_target(&self, ratio: f32) -> AnimationHandle {
        let from = self.info.borrow().ratio;
        log::debug!("explosion: {} -> {}", from, ratio);

        let animation = Animation::new(from, ratio, self.config.frame_rate, self.config.frame_count)
            .with_easing(Easing::CUBIC_IN_OUT)
            .with_speed_ratio(self.config.speed_ratio);

        let apply = {
            let info = self.info.clone();
            move |value| info.borrow_mut().ratio = value
        };

        let on_complete = {
            let info = self.info.clone();
            let animator = self.animator.clone();
            move || {
                let mut info = info.borrow_mut();
                info.drives.retain(|h| animator.is_running(*h));

                if info.drives.is_empty() {
                    log::debug!("explosion settled at {}", info.ratio);
                }
            }
        };

        let handle = self
            .animator
            .animate(animation, apply, Some(Box::new(on_complete)));
        self.info.borrow_mut().drives.push(handle);
        handle
    }

    /// Collapses the cells to the hidden ratio.
    pub fn hide_structure(&self) -> AnimationHandle {
        self.set_target(self.config.hidden_ratio)
    }

    /// Spreads the cells to the shown ratio.
    pub fn show_structure(&self) -> AnimationHandle {
        self.set_target(self.config.shown_ratio)
    }

    /// The current ratio.
    pub fn ratio(&self) -> f32 {
        self.info.borrow().ratio
    }

    /// Whether a drive animation is in flight.
    pub fn state(&self) -> ExplosionState {
        if self.info.borrow().drives.is_empty() {
            ExplosionState::Idle
        } else {
            ExplosionState::Animating
        }
    }

    /// Whether the layout must follow the ratio every frame.
    pub fn is_dirty(&self) -> bool {
        self.state() == ExplosionState::Animating
    }

    /// Records that the cells were laid out with `ratio`.
    pub fn mark_laid_out(&self, ratio: f32) {
        self.info.borrow_mut().laid_out = Some(ratio);
    }

    /// The ratio the cells must be laid out with this frame, if any.
    ///
    /// This is the current ratio while dirty, and once more after the last drive
    /// completes so that the final value is applied.
    pub fn take_layout_ratio(&self) -> Option<f32> {
        let mut info = self.info.borrow_mut();

        if !info.drives.is_empty() || info.laid_out != Some(info.ratio) {
            info.laid_out = Some(info.ratio);
            Some(info.ratio)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 480.0;

    fn controller(initial: f32) -> (Animator, ExplosionController) {
        let animator = Animator::new();
        let config = ExplosionConfig::default().with_initial_ratio(initial);
        let explosion = ExplosionController::new(animator.clone(), config);
        (animator, explosion)
    }

    #[test]
    fn hide_settles_after_exactly_120_frames() {
        let (animator, explosion) = controller(0.24);
        assert!(!explosion.is_dirty());

        let _ = explosion.hide_structure();
        assert!(explosion.is_dirty());

        for frame in 1..120 {
            animator.advance(DT);
            assert!(explosion.is_dirty(), "settled early, at frame {}", frame);
            assert!(explosion.ratio() > 0.05);
        }

        animator.advance(DT);
        assert!(!explosion.is_dirty());
        assert_eq!(explosion.ratio(), 0.05);
    }

    #[test]
    fn ratio_is_the_next_baseline() {
        let (animator, explosion) = controller(0.05);

        let _ = explosion.show_structure();
        for _ in 0..120 {
            animator.advance(DT);
        }
        assert_eq!(explosion.ratio(), 0.24);

        let _ = explosion.hide_structure();
        animator.advance(DT);
        let ratio = explosion.ratio();
        assert!(ratio < 0.24 && ratio > 0.05);
    }

    #[test]
    fn overlapping_drives_keep_the_flag_until_the_last_one() {
        let (animator, explosion) = controller(0.05);

        let _ = explosion.show_structure();
        for _ in 0..60 {
            animator.advance(DT);
        }
        let _ = explosion.hide_structure();

        for _ in 0..60 {
            animator.advance(DT);
        }
        assert!(explosion.is_dirty());

        for _ in 0..60 {
            animator.advance(DT);
        }
        assert_eq!(explosion.state(), ExplosionState::Idle);
        assert_eq!(explosion.ratio(), 0.05);
    }

    #[test]
    fn layout_follows_the_ratio_then_stops() {
        let (animator, explosion) = controller(0.05);
        explosion.mark_laid_out(0.05);
        assert_eq!(explosion.take_layout_ratio(), None);

        let _ = explosion.set_target(1.0);
        animator.advance(DT);
        assert_eq!(explosion.take_layout_ratio(), Some(explosion.ratio()));

        for _ in 0..119 {
            animator.advance(DT);
        }
        assert_eq!(explosion.take_layout_ratio(), Some(1.0));
        assert_eq!(explosion.take_layout_ratio(), None);
    }

    #[test]
    fn stopped_drive_settles_where_it_is() {
        let (animator, explosion) = controller(0.24);
        explosion.mark_laid_out(0.24);

        let drive = explosion.hide_structure();
        for _ in 0..10 {
            animator.advance(DT);
        }
        let _ = explosion.take_layout_ratio();

        animator.stop(drive);
        let ratio = explosion.ratio();
        assert!(ratio < 0.24 && ratio > 0.05);
        assert_eq!(explosion.state(), ExplosionState::Idle);

        for _ in 0..200 {
            animator.advance(DT);
        }
        assert!(!explosion.is_dirty());
        assert_eq!(explosion.ratio(), ratio);
        assert_eq!(explosion.take_layout_ratio(), None);
    }

    #[test]
    fn out_of_range_ratios_pass_through() {
        let (animator, explosion) = controller(0.0);
        let _ = explosion.set_target(-2.0);

        for _ in 0..120 {
            animator.advance(DT);
        }
        assert_eq!(explosion.ratio(), -2.0);
    }
}
