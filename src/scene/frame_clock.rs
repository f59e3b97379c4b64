use std::time::Duration;
use web_time::Instant;

/// The source of the time step of each frame.
#[derive(Copy, Clone, Debug)]
pub enum FrameClock {
    /// Every frame lasts exactly `1 / fps` seconds.
    Fixed {
        /// The time step, in seconds.
        delta: f64,
    },
    /// Frames last the wall-clock time elapsed since the previous tick.
    Realtime {
        /// Time of the previous tick. `None` before the first one.
        last: Option<Instant>,
        /// Minimum duration of a frame, if the frame rate is limited.
        min_dur_per_frame: Option<Duration>,
    },
}

impl FrameClock {
    /// A clock ticking `fps` times per simulated second, regardless of the wall clock.
    ///
    /// `fps` cannot be 0.
    pub fn fixed(fps: u32) -> Self {
        assert!(fps != 0, "the frame rate cannot be 0");
        FrameClock::Fixed {
            delta: 1.0 / f64::from(fps),
        }
    }

    /// A clock following the wall clock.
    pub fn realtime() -> Self {
        FrameClock::Realtime {
            last: None,
            min_dur_per_frame: None,
        }
    }

    /// Sets the maximum number of frames per second of a realtime clock. Cannot be 0.
    /// `None` means there is no limit. Has no effect on a fixed clock.
    pub fn set_framerate_limit(&mut self, fps: Option<u64>) {
        if let FrameClock::Realtime {
            min_dur_per_frame, ..
        } = self
        {
            *min_dur_per_frame = fps.map(|f| {
                assert!(f != 0);
                Duration::from_millis(1000 / f)
            })
        }
    }

    /// Starts a new frame and returns the duration of the previous one, in seconds.
    ///
    /// The first tick of a realtime clock returns 0. When the frame rate is
    /// limited, this sleeps until the minimum frame duration has elapsed.
    pub fn tick(&mut self) -> f64 {
        match self {
            FrameClock::Fixed { delta } => *delta,
            FrameClock::Realtime {
                last,
                min_dur_per_frame,
            } => {
                let now = match (*last, *min_dur_per_frame) {
                    (Some(prev), Some(dur)) => {
                        let elapsed = prev.elapsed();
                        if elapsed < dur {
                            std::thread::sleep(dur - elapsed);
                        }
                        Instant::now()
                    }
                    _ => Instant::now(),
                };

                let delta = last.map_or(0.0, |prev| now.duration_since(prev).as_secs_f64());
                *last = Some(now);
                delta
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_exact() {
        let mut clock = FrameClock::fixed(60);
        assert_eq!(clock.tick(), 1.0 / 60.0);
        assert_eq!(clock.tick(), 1.0 / 60.0);
    }

    #[test]
    fn realtime_clock_starts_at_zero() {
        let mut clock = FrameClock::realtime();
        assert_eq!(clock.tick(), 0.0);
        assert!(clock.tick() >= 0.0);
    }

    #[test]
    fn framerate_limit_waits() {
        let mut clock = FrameClock::realtime();
        clock.set_framerate_limit(Some(100));
        let _ = clock.tick();
        assert!(clock.tick() >= 0.0099);
    }
}
