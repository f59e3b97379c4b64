use crate::animation::{Animatable, Animation};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Callback invoked once when an animation completes.
pub type OnComplete = Box<dyn FnOnce()>;

/// Identifies an animation started by an [`Animator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

trait RunningAnimation {
    /// Advances and applies the animation. Returns `true` once it is finished.
    fn step(&mut self, dt: f64) -> bool;
    fn take_on_complete(&mut self) -> Option<OnComplete>;
}

struct Running<T: Animatable> {
    animation: Animation<T>,
    apply: Box<dyn FnMut(T)>,
    on_complete: Option<OnComplete>,
}

impl<T: Animatable> RunningAnimation for Running<T> {
    fn step(&mut self, dt: f64) -> bool {
        self.animation.advance(dt);
        (self.apply)(self.animation.value());
        self.animation.is_finished()
    }

    fn take_on_complete(&mut self) -> Option<OnComplete> {
        self.on_complete.take()
    }
}

#[derive(Default)]
struct AnimatorData {
    next_id: u64,
    running: Vec<(AnimationHandle, Box<dyn RunningAnimation>)>,
    live: HashSet<AnimationHandle>,
    cancelled: Vec<AnimationHandle>,
}

/// Drives every running animation once per frame.
///
/// The animator is a cheap, clonable handle: all clones share the same set of
/// animations. Each frame, animations are applied in the order they were started,
/// so when two animations write the same property the most recent one wins. The
/// completion callbacks of the animations finishing during a frame are invoked
/// after every animation has been stepped, without any internal borrow held: they
/// may freely start or stop animations. Stopping an animation also completes it,
/// so whoever waits for its completion is never left waiting.
///
/// # Example
/// ```
/// # use diamond_sphere::animation::{Animation, Animator};
/// # use std::cell::Cell;
/// # use std::rc::Rc;
/// let animator = Animator::new();
/// let value = Rc::new(Cell::new(0.0f32));
/// let done = Rc::new(Cell::new(false));
///
/// let (v, d) = (value.clone(), done.clone());
/// let _ = animator.animate(
///     Animation::new(0.0, 1.0, 60.0, 60),
///     move |x| v.set(x),
///     Some(Box::new(move || d.set(true))),
/// );
///
/// for _ in 0..60 {
///     animator.advance(1.0 / 60.0);
/// }
/// assert_eq!(value.get(), 1.0);
/// assert!(done.get());
/// ```
#[derive(Clone, Default)]
pub struct Animator {
    data: Rc<RefCell<AnimatorData>>,
}

impl Animator {
    /// Creates an animator with no running animation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an animation.
    ///
    /// `apply` receives the animated value each time the animation is stepped.
    /// `on_complete` is invoked once, after the frame on which the animation
    /// finishes. The animation is first stepped on the next call to
    /// [`advance`](Self::advance).
    pub fn animate<T: Animatable>(
        &self,
        animation: Animation<T>,
        apply: impl FnMut(T) + 'static,
        on_complete: Option<OnComplete>,
    ) -> AnimationHandle {
        let mut data = self.data.borrow_mut();
        let handle = AnimationHandle(data.next_id);
        data.next_id += 1;

        let running = Running {
            animation,
            apply: Box::new(apply),
            on_complete,
        };

        data.running.push((handle, Box::new(running)));
        let _ = data.live.insert(handle);
        handle
    }

    /// Stops an animation where it is, then invokes its completion callback.
    ///
    /// The animated value keeps the last value applied. Stopping an animation
    /// that is not running has no effect. When called while the animator is
    /// stepping, the callback runs at the end of that step.
    pub fn stop(&self, handle: AnimationHandle) {
        let on_complete = {
            let mut data = self.data.borrow_mut();

            if !data.live.remove(&handle) {
                return;
            }

            match data.running.iter().position(|(h, _)| *h == handle) {
                Some(i) => {
                    let (_, mut animation) = data.running.remove(i);
                    animation.take_on_complete()
                }
                None => {
                    data.cancelled.push(handle);
                    None
                }
            }
        };

        log::trace!("animation {:?} stopped", handle);

        if let Some(on_complete) = on_complete {
            on_complete();
        }
    }

    /// Stops every running animation, in the order they were started.
    pub fn stop_all(&self) {
        let mut handles: Vec<AnimationHandle> = self.data.borrow().live.iter().copied().collect();
        handles.sort();

        for handle in handles {
            self.stop(handle);
        }
    }

    /// Whether the animation identified by `handle` is still running.
    pub fn is_running(&self, handle: AnimationHandle) -> bool {
        self.data.borrow().live.contains(&handle)
    }

    /// Number of running animations.
    pub fn len(&self) -> usize {
        self.data.borrow().live.len()
    }

    /// Whether no animation is running.
    pub fn is_empty(&self) -> bool {
        self.data.borrow().live.is_empty()
    }

    /// Steps every running animation by `dt` seconds, then invokes the completion
    /// callbacks of those that finished.
    pub fn advance(&self, dt: f64) {
        let mut running = std::mem::take(&mut self.data.borrow_mut().running);

        let mut finished = Vec::new();
        running.retain_mut(|(handle, animation)| {
            if animation.step(dt) {
                finished.push((*handle, animation.take_on_complete()));
                false
            } else {
                true
            }
        });

        {
            let mut data = self.data.borrow_mut();

            // Stopped while stepping: those still running complete now.
            let cancelled = std::mem::take(&mut data.cancelled);
            running.retain_mut(|(handle, animation)| {
                if cancelled.contains(handle) {
                    finished.push((*handle, animation.take_on_complete()));
                    false
                } else {
                    true
                }
            });

            // Animations started by `apply` closures go after the older ones.
            let started = std::mem::take(&mut data.running);
            running.extend(started);
            data.running = running;

            for (handle, _) in &finished {
                let _ = data.live.remove(handle);
            }
        }

        for (handle, on_complete) in finished {
            log::trace!("animation {:?} completed", handle);

            if let Some(on_complete) = on_complete {
                on_complete();
            }
        }
    }
}
