//! Time-interpolated attribute values.
//!
//! A [`Tween`] is a value that moves from one state to another over wall-clock
//! time. Nothing is scheduled: the value is evaluated at whatever `Instant`
//! the caller asks about, so starting a transition never blocks.

use crate::util::palette::Rgb;
use std::time::{Duration, Instant};

/// Values that can be interpolated.
pub trait Lerp: Copy {
    /// Interpolate between `self` (t = 0) and `other` (t = 1).
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Rgb {
    fn lerp(self, other: Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| f64::from(a).lerp(f64::from(b), t).round() as u8;
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

/// Cubic in-out easing, monotonic on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// An attribute in transition between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: Instant,
    duration: Duration,
}

impl<T: Lerp> Tween<T> {
    /// A value that is already at rest.
    pub fn fixed(value: T, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            start: now,
            duration: Duration::ZERO,
        }
    }

    /// Fraction of the transition elapsed at `now`, before easing.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Interpolated value at `now`.
    pub fn value_at(&self, now: Instant) -> T {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, ease_cubic_in_out(p))
    }

    /// The value the transition ends on.
    pub fn target(&self) -> T {
        self.to
    }

    /// Whether the transition has finished at `now`.
    pub fn is_settled(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Start a new transition from wherever the value currently is.
    pub fn retarget(&mut self, to: T, now: Instant, duration: Duration) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    /// Apply a coordinate transform to both ends, keeping the timing.
    pub fn transform(&mut self, f: impl Fn(T) -> T) {
        self.from = f(self.from);
        self.to = f(self.to);
    }

    /// Replace the end value, keeping the start value and timing.
    pub fn set_target(&mut self, to: T) {
        self.to = to;
    }
}
