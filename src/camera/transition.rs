//! Multi-property camera transitions with a single completion callback.

use crate::animation::{Animatable, Animation, Animator, Easing, OnComplete, PendingSet};
use crate::camera::OrbitCamera;
use crate::scene::{HookHandle, RenderHooks};
use glamx::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// Default frame rate of camera transitions, in frames per second.
pub const DEFAULT_SPEED: f32 = 60.0;
/// Default length of camera transitions, in frames.
pub const DEFAULT_FRAME_COUNT: u32 = 60;
/// Distance under which the camera is considered already at the requested place.
pub const NOOP_DISTANCE: f32 = 1.0;

bitflags::bitflags! {
    /// A set of animatable camera properties.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct CameraProperties: u8 {
        /// The camera position.
        const POSITION = 1 << 0;
        /// The point the camera looks at.
        const TARGET = 1 << 1;
        /// The longitudinal angle.
        const ALPHA = 1 << 2;
        /// The latitudinal angle.
        const BETA = 1 << 3;
        /// The distance to the target.
        const RADIUS = 1 << 4;
        /// The spherical coordinates of an orbit camera.
        const ORBIT = Self::ALPHA.bits() | Self::BETA.bits() | Self::RADIUS.bits();
    }
}

/// A single animatable camera property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CameraProperty {
    /// The camera position.
    Position,
    /// The point the camera looks at.
    Target,
    /// The longitudinal angle.
    Alpha,
    /// The latitudinal angle.
    Beta,
    /// The distance to the target.
    Radius,
}

impl CameraProperty {
    /// The order in which the animations of a transition are started.
    pub const ALL: [CameraProperty; 5] = [
        CameraProperty::Target,
        CameraProperty::Position,
        CameraProperty::Alpha,
        CameraProperty::Beta,
        CameraProperty::Radius,
    ];

    /// The flag of this property.
    pub fn flag(self) -> CameraProperties {
        match self {
            CameraProperty::Position => CameraProperties::POSITION,
            CameraProperty::Target => CameraProperties::TARGET,
            CameraProperty::Alpha => CameraProperties::ALPHA,
            CameraProperty::Beta => CameraProperties::BETA,
            CameraProperty::Radius => CameraProperties::RADIUS,
        }
    }
}

/// The end state requested for a camera transition.
///
/// Unset properties are not animated.
///
/// # Example
/// ```
/// # use diamond_sphere::camera::{CameraProperties, CameraTransition};
/// # use glamx::Vec3;
/// let transition = CameraTransition::new()
///     .with_alpha(-1.69)
///     .with_radius(2.5)
///     .with_target(Vec3::new(0.0, 0.8, 0.12));
/// assert_eq!(
///     transition.requested(),
///     CameraProperties::ALPHA | CameraProperties::RADIUS | CameraProperties::TARGET
/// );
/// assert_eq!(transition.frame_count, 60);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraTransition {
    /// The requested camera position.
    pub position: Option<Vec3>,
    /// The requested target.
    pub target: Option<Vec3>,
    /// The requested longitudinal angle.
    pub alpha: Option<f32>,
    /// The requested latitudinal angle.
    pub beta: Option<f32>,
    /// The requested radius.
    pub radius: Option<f32>,
    /// Frames per second of the animations.
    pub speed: f32,
    /// Number of frames of the animations.
    pub frame_count: u32,
}

impl Default for CameraTransition {
    fn default() -> Self {
        CameraTransition {
            position: None,
            target: None,
            alpha: None,
            beta: None,
            radius: None,
            speed: DEFAULT_SPEED,
            frame_count: DEFAULT_FRAME_COUNT,
        }
    }
}

impl CameraTransition {
    /// A transition animating nothing, with the default speed and frame count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Requests a target.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = Some(target);
        self
    }

    /// Requests a longitudinal angle.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Requests a latitudinal angle.
    pub fn with_beta(mut self, beta: f32) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Requests a radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the frames per second of the animations.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the number of frames of the animations.
    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = frame_count;
        self
    }

    /// The set of properties this transition animates.
    pub fn requested(&self) -> CameraProperties {
        let mut res = CameraProperties::empty();
        res.set(CameraProperties::POSITION, self.position.is_some());
        res.set(CameraProperties::TARGET, self.target.is_some());
        res.set(CameraProperties::ALPHA, self.alpha.is_some());
        res.set(CameraProperties::BETA, self.beta.is_some());
        res.set(CameraProperties::RADIUS, self.radius.is_some());
        res
    }

    /// Whether `camera` is already within [`NOOP_DISTANCE`] of the requested
    /// position and target.
    ///
    /// Always `false` if no position is requested. A missing target stands for
    /// the current one.
    pub fn is_noop_for(&self, camera: &OrbitCamera) -> bool {
        match self.position {
            Some(end_position) => {
                let end_target = self.target.unwrap_or_else(|| camera.target());
                camera.position().distance(end_position) < NOOP_DISTANCE
                    && camera.target().distance(end_target) < NOOP_DISTANCE
            }
            None => false,
        }
    }
}

/// The per-frame rebuild of a transition animating only position and target.
struct Rebuild {
    hook: HookHandle,
    camera: Rc<RefCell<OrbitCamera>>,
}

/// Bookkeeping of one transition: the properties still animating, the aggregate
/// callback and the rebuild hook to remove at the end.
struct PendingTransition {
    remaining: PendingSet<CameraProperty>,
    rebuild: Option<Rebuild>,
    on_complete: Option<OnComplete>,
}

impl PendingTransition {
    fn property_finished(pending: &Rc<RefCell<Self>>, hooks: &RenderHooks, property: CameraProperty) {
        let (rebuild, on_complete) = {
            let mut pending = pending.borrow_mut();

            if !pending.remaining.remove(property) {
                log::warn!(
                    "camera transition: ignoring completion of {:?}, which is not pending",
                    property
                );
                return;
            }

            if !pending.remaining.is_empty() {
                return;
            }

            (pending.rebuild.take(), pending.on_complete.take())
        };

        // The final position was written after the last rebuild hook ran.
        if let Some(rebuild) = rebuild {
            let _ = hooks.remove(rebuild.hook);
            rebuild.camera.borrow_mut().rebuild_angles_and_radius();
        }

        log::debug!("camera transition complete");

        if let Some(on_complete) = on_complete {
            on_complete();
        }
    }
}

/// Starts camera transitions and reports their completion.
///
/// Every call to [`transition`](Self::transition) owns its own pending set, so
/// overlapping transitions are independent. Animations of the same property are
/// never cancelled: the most recently started one wins each frame.
#[derive(Clone)]
pub struct TransitionCoordinator {
    animator: Animator,
    hooks: RenderHooks,
}

impl TransitionCoordinator {
    /// Creates a coordinator starting its animations on `animator` and its
    /// rebuild hooks on `hooks`.
    pub fn new(animator: Animator, hooks: RenderHooks) -> Self {
        TransitionCoordinator { animator, hooks }
    }

    /// Moves `camera` to the state requested by `transition`.
    ///
    /// One eased animation is started per requested property, from its current
    /// value. `on_complete` is invoked once, after the last of them finishes.
    /// When no spherical coordinate is requested, a hook rebuilding them from
    /// position/target runs every frame until the transition completes, and
    /// once more on completion.
    ///
    /// Returns `false`, without starting anything nor invoking `on_complete`, if
    /// nothing is requested or if the camera is already there.
    pub fn transition(
        &self,
        camera: &Rc<RefCell<OrbitCamera>>,
        transition: CameraTransition,
        on_complete: Option<OnComplete>,
    ) -> bool {
        let requested = transition.requested();

        if requested.is_empty() {
            log::debug!("camera transition: nothing requested");
            return false;
        }

        if transition.is_noop_for(&camera.borrow()) {
            log::debug!("camera transition: already at the requested position");
            return false;
        }

        let rebuild = if requested.intersects(CameraProperties::ORBIT) {
            None
        } else {
            let hook = {
                let camera = camera.clone();
                self.hooks.add(move |_| camera.borrow_mut().rebuild_angles_and_radius())
            };
            Some(Rebuild {
                hook,
                camera: camera.clone(),
            })
        };

        let mut remaining = PendingSet::new();
        for property in CameraProperty::ALL {
            if requested.contains(property.flag()) {
                let _ = remaining.insert(property);
            }
        }

        let pending = Rc::new(RefCell::new(PendingTransition {
            remaining,
            rebuild,
            on_complete,
        }));

        log::debug!("camera transition: animating {:?}", requested);

        let current = *camera.borrow();
        let (speed, frames) = (transition.speed, transition.frame_count);

        if let Some(target) = transition.target {
            self.start(&pending, CameraProperty::Target, current.target(), target, speed, frames, {
                let camera = camera.clone();
                move |v| camera.borrow_mut().set_target(v)
            });
        }

        if let Some(position) = transition.position {
            self.start(&pending, CameraProperty::Position, current.position(), position, speed, frames, {
                let camera = camera.clone();
                move |v| camera.borrow_mut().set_position(v)
            });
        }

        if let Some(alpha) = transition.alpha {
            self.start(&pending, CameraProperty::Alpha, current.alpha(), alpha, speed, frames, {
                let camera = camera.clone();
                move |v| camera.borrow_mut().set_alpha(v)
            });
        }

        if let Some(beta) = transition.beta {
            self.start(&pending, CameraProperty::Beta, current.beta(), beta, speed, frames, {
                let camera = camera.clone();
                move |v| camera.borrow_mut().set_beta(v)
            });
        }

        if let Some(radius) = transition.radius {
            self.start(&pending, CameraProperty::Radius, current.radius(), radius, speed, frames, {
                let camera = camera.clone();
                move |v| camera.borrow_mut().set_radius(v)
            });
        }

        true
    }

    fn start<T: Animatable>(
        &self,
        pending: &Rc<RefCell<PendingTransition>>,
        property: CameraProperty,
        from: T,
        to: T,
        speed: f32,
        frame_count: u32,
        apply: impl FnMut(T) + 'static,
    ) {
        let pending = pending.clone();
        let hooks = self.hooks.clone();
        let animation = Animation::new(from, to, speed, frame_count).with_easing(Easing::CUBIC_IN_OUT);

        let _ = self.animator.animate(
            animation,
            apply,
            Some(Box::new(move || {
                PendingTransition::property_finished(&pending, &hooks, property)
            })),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const DT: f64 = 1.0 / 60.0;

    struct Fixture {
        animator: Animator,
        hooks: RenderHooks,
        coordinator: TransitionCoordinator,
        camera: Rc<RefCell<OrbitCamera>>,
    }

    impl Fixture {
        fn new() -> Self {
            let animator = Animator::new();
            let hooks = RenderHooks::new();
            let coordinator = TransitionCoordinator::new(animator.clone(), hooks.clone());
            let camera = Rc::new(RefCell::new(OrbitCamera::new(6.33, 1.13, 12.2687, Vec3::ZERO)));

            Fixture {
                animator,
                hooks,
                coordinator,
                camera,
            }
        }

        fn frame(&self) {
            self.animator.advance(DT);
            self.hooks.run(DT);
        }
    }

    fn counter() -> (Rc<Cell<u32>>, OnComplete) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, Box::new(move || c.set(c.get() + 1)))
    }

    #[test]
    fn nearby_position_and_target_is_a_noop() {
        let f = Fixture::new();
        let position = f.camera.borrow().position();
        let (count, on_complete) = counter();

        let started = f.coordinator.transition(
            &f.camera,
            CameraTransition::new()
                .with_position(position + Vec3::new(0.5, 0.0, 0.5))
                .with_target(Vec3::new(0.0, 0.9, 0.0)),
            Some(on_complete),
        );

        assert!(!started);
        assert!(f.animator.is_empty());
        assert!(f.hooks.is_empty());

        for _ in 0..120 {
            f.frame();
        }
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn nearby_position_without_target_is_a_noop() {
        let f = Fixture::new();
        let position = f.camera.borrow().position();

        assert!(!f
            .coordinator
            .transition(&f.camera, CameraTransition::new().with_position(position), None));
        assert!(f.animator.is_empty());
    }

    #[test]
    fn empty_request_registers_nothing() {
        let f = Fixture::new();
        let (count, on_complete) = counter();

        assert!(!f.coordinator.transition(&f.camera, CameraTransition::new(), Some(on_complete)));
        assert!(f.hooks.is_empty());

        f.frame();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn completion_fires_once_after_every_property() {
        let subsets = [
            CameraTransition::new().with_alpha(1.0),
            CameraTransition::new().with_alpha(1.0).with_radius(20.0),
            CameraTransition::new().with_position(Vec3::new(0.0, 5.0, 30.0)),
            CameraTransition::new()
                .with_target(Vec3::new(3.0, 0.0, 0.0))
                .with_position(Vec3::new(0.0, 5.0, 30.0)),
            CameraTransition::new()
                .with_target(Vec3::new(0.0, 0.8, 0.12))
                .with_alpha(-1.69)
                .with_beta(0.38)
                .with_radius(2.5),
        ];

        for transition in subsets {
            let f = Fixture::new();
            let (count, on_complete) = counter();
            let transition = transition.with_frame_count(30);

            assert!(f.coordinator.transition(&f.camera, transition, Some(on_complete)));
            assert_eq!(f.animator.len(), transition.requested().bits().count_ones() as usize);

            for _ in 0..29 {
                f.frame();
                assert_eq!(count.get(), 0);
            }

            f.frame();
            assert_eq!(count.get(), 1);
            assert!(f.animator.is_empty());

            for _ in 0..30 {
                f.frame();
            }
            assert_eq!(count.get(), 1);
        }
    }

    #[test]
    fn rebuild_hook_only_without_spherical_coordinates() {
        let orbit = Fixture::new();
        let _ = orbit
            .coordinator
            .transition(&orbit.camera, CameraTransition::new().with_beta(0.5), None);
        assert!(orbit.hooks.is_empty());

        let f = Fixture::new();
        let hook_seen = Rc::new(Cell::new(false));
        let seen = hook_seen.clone();
        let hooks = f.hooks.clone();
        let end = Vec3::new(10.0, 10.0, 10.0);

        let started = f.coordinator.transition(
            &f.camera,
            CameraTransition::new().with_position(end),
            Some(Box::new(move || seen.set(hooks.is_empty()))),
        );
        assert!(started);
        assert_eq!(f.hooks.len(), 1);

        for _ in 0..60 {
            f.frame();
        }

        assert!(hook_seen.get(), "the rebuild hook must be gone when the callback fires");
        assert!(f.hooks.is_empty());

        let camera = f.camera.borrow();
        assert_eq!(camera.position(), end);
        assert!(!camera.is_position_pinned());
        assert!((camera.radius() - end.length()).abs() < 1.0e-4);
    }

    #[test]
    fn stopped_transition_still_completes() {
        let f = Fixture::new();
        let (count, on_complete) = counter();

        let started = f.coordinator.transition(
            &f.camera,
            CameraTransition::new()
                .with_position(Vec3::new(0.0, 5.0, 30.0))
                .with_target(Vec3::new(1.0, 0.0, 0.0)),
            Some(on_complete),
        );
        assert!(started);

        for _ in 0..10 {
            f.frame();
        }
        let position = f.camera.borrow().position();
        f.animator.stop_all();

        assert_eq!(count.get(), 1);
        assert!(f.hooks.is_empty());
        assert!(f.animator.is_empty());

        for _ in 0..60 {
            f.frame();
        }
        assert_eq!(count.get(), 1);
        assert_eq!(f.camera.borrow().position(), position);
        assert!(!f.camera.borrow().is_position_pinned());
    }

    #[test]
    fn overlapping_transitions_converge_to_the_latest() {
        let f = Fixture::new();
        let (first, first_done) = counter();
        let (second, second_done) = counter();

        let _ = f
            .coordinator
            .transition(&f.camera, CameraTransition::new().with_alpha(3.0), Some(first_done));
        f.frame();
        f.frame();
        let _ = f
            .coordinator
            .transition(&f.camera, CameraTransition::new().with_alpha(-2.0), Some(second_done));

        for _ in 0..120 {
            f.frame();
        }

        assert_eq!(f.camera.borrow().alpha(), -2.0);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn callback_may_chain_another_transition() {
        let f = Fixture::new();
        let done = Rc::new(Cell::new(false));

        let (coordinator, camera, d) = (f.coordinator.clone(), f.camera.clone(), done.clone());
        let _ = f.coordinator.transition(
            &f.camera,
            CameraTransition::new().with_radius(20.0).with_frame_count(10),
            Some(Box::new(move || {
                let _ = coordinator.transition(
                    &camera,
                    CameraTransition::new().with_radius(30.0).with_frame_count(10),
                    Some(Box::new(move || d.set(true))),
                );
            })),
        );

        for _ in 0..20 {
            f.frame();
        }

        assert!(done.get());
        assert_eq!(f.camera.borrow().radius(), 30.0);
    }
}
