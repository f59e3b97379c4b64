use num::Float;

/// Which part of the animation an easing curve is applied to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EasingMode {
    /// The curve is applied as-is: slow start, fast end.
    EaseIn,
    /// The curve is mirrored: fast start, slow end.
    EaseOut,
    /// The first half eases in, the second half eases out.
    #[default]
    EaseInOut,
}

/// An easing curve mapping a normalized progress in `[0, 1]` to an eased progress.
///
/// # Example
/// ```
/// # use diamond_sphere::animation::Easing;
/// let ease = Easing::CUBIC_IN_OUT;
/// assert_eq!(ease.ease(0.5f32), 0.5);
/// assert!(ease.ease(0.25f32) < 0.25);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// No easing: the progress is returned unchanged.
    #[default]
    Linear,
    /// Cubic curve `t³` applied with the given mode.
    Cubic(EasingMode),
}

impl Easing {
    /// Cubic ease-in-out, the curve used by camera transitions and explosions.
    pub const CUBIC_IN_OUT: Easing = Easing::Cubic(EasingMode::EaseInOut);

    /// Eases the normalized progress `t`.
    ///
    /// `t` is clamped to `[0, 1]` first so the result is always in `[0, 1]`.
    pub fn ease<N: Float>(self, t: N) -> N {
        let t = t.max(N::zero()).min(N::one());

        match self {
            Easing::Linear => t,
            Easing::Cubic(mode) => with_mode(mode, t, |x| x * x * x),
        }
    }
}

fn with_mode<N: Float>(mode: EasingMode, t: N, ease_in: impl Fn(N) -> N) -> N {
    let one = N::one();
    let two = one + one;
    let half = one / two;

    match mode {
        EasingMode::EaseIn => ease_in(t),
        EasingMode::EaseOut => one - ease_in(one - t),
        EasingMode::EaseInOut => {
            if t >= half {
                (one - ease_in((one - t) * two)) * half + half
            } else {
                ease_in(t * two) * half
            }
        }
    }
}
