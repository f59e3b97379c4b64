//! Frame-based animations: easing curves, interpolations and the animator driving them.

pub use self::animation::{Animatable, Animation};
pub use self::animator::{AnimationHandle, Animator, OnComplete};
pub use self::easing::{Easing, EasingMode};
pub use self::pending::PendingSet;

mod animation;
mod animator;
mod easing;
mod pending;
