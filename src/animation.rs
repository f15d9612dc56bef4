//! Animation primitives
//!
//! Timing curves, time-based tweens, and the generation handles used to
//! cancel pending animation completions. Everything here takes the current
//! [`Instant`] as an argument instead of reading the clock, so the state
//! machines built on top stay deterministic under test.

use std::time::{Duration, Instant};

// ============================================================================
// Easing
// ============================================================================

/// Timing curve applied to animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier(f32, f32, f32, f32),
    /// Symmetric cubic ease in/out
    EaseInOutCubic,
}

impl Easing {
    /// Material "standard" curve used by the overflow menu.
    pub const STANDARD: Self = Self::CubicBezier(0.4, 0.0, 0.2, 1.0);

    /// Map linear progress in `0..=1` to eased progress.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::EaseInOutCubic => ease_in_out_cubic(t),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// Easing function - ease in out cubic
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

const BEZIER_EPSILON: f32 = 1e-6;

/// Evaluate a cubic bezier timing curve at horizontal position `x`.
///
/// Solves the curve's x polynomial for its parameter with Newton steps and
/// falls back to bisection when the slope is too flat.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample_x = |t: f32| ((ax * t + bx) * t + cx) * t;
    let sample_y = |t: f32| ((ay * t + by) * t + cy) * t;
    let slope_x = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    let mut t = x;
    for _ in 0..8 {
        let err = sample_x(t) - x;
        if err.abs() < BEZIER_EPSILON {
            return sample_y(t);
        }
        let d = slope_x(t);
        if d.abs() < BEZIER_EPSILON {
            break;
        }
        t -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = x;
    while lo < hi {
        let value = sample_x(t);
        if (value - x).abs() < BEZIER_EPSILON {
            break;
        }
        if x > value {
            lo = t;
        } else {
            hi = t;
        }
        let next = (hi - lo) / 2.0 + lo;
        if next == t {
            break;
        }
        t = next;
    }
    sample_y(t)
}

// ============================================================================
// Tween
// ============================================================================

/// A single value animating from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Linear progress in `0..=1` at `now`. Zero durations are immediately complete.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eased value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Instant at which the tween reaches `to`.
    pub fn end(&self) -> Instant {
        self.start + self.duration
    }
}

// ============================================================================
// AnimatedValue
// ============================================================================

/// A value that is either at rest or following a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    rest: f32,
    tween: Option<Tween>,
}

impl AnimatedValue {
    pub const fn new(value: f32) -> Self {
        Self {
            rest: value,
            tween: None,
        }
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        self.tween.map_or(self.rest, |t| t.value_at(now))
    }

    /// Start animating from the value at `now` toward `target`.
    pub fn animate_to(&mut self, target: f32, now: Instant, duration: Duration, easing: Easing) {
        let from = self.value_at(now);
        self.tween = Some(Tween::new(from, target, now, duration, easing));
        self.rest = target;
    }

    /// Stop where the value is at `now`.
    pub fn freeze(&mut self, now: Instant) {
        self.rest = self.value_at(now);
        self.tween = None;
    }

    /// Jump to `value`, dropping any running tween.
    pub fn set(&mut self, value: f32) {
        self.rest = value;
        self.tween = None;
    }

    /// Final value: the tween target when animating, else the resting value.
    pub fn target(&self) -> f32 {
        self.rest
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.is_some_and(|t| !t.is_finished(now))
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// ============================================================================
// Animation handles
// ============================================================================

/// Token identifying one started animation or delayed step.
///
/// Completion callbacks carry the handle they were issued with; a state
/// machine ignores completions whose handle is no longer current, which is
/// how a newer show/hide cycle cancels an older pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing [`AnimationHandle`]s and remembers the
/// current one.
#[derive(Debug, Default, Clone)]
pub(crate) struct HandleSequence {
    next: u64,
    current: Option<AnimationHandle>,
}

impl HandleSequence {
    /// Issue a new handle, superseding the previous one.
    pub(crate) fn issue(&mut self) -> AnimationHandle {
        self.next += 1;
        let handle = AnimationHandle(self.next);
        self.current = Some(handle);
        handle
    }

    /// Drop the current handle without issuing a new one.
    pub(crate) fn cancel(&mut self) {
        self.current = None;
    }

    /// Consume `handle` if it is the current one.
    pub(crate) fn take_if_current(&mut self, handle: AnimationHandle) -> bool {
        if self.current == Some(handle) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn current(&self) -> Option<AnimationHandle> {
        self.current
    }
}

// ============================================================================
// Presentation animation
// ============================================================================

/// How the overlay itself appears when it is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationAnimation {
    /// Slide up from the bottom edge
    #[default]
    Slide,
    /// Fade in
    Fade,
    /// Appear immediately
    None,
}

impl PresentationAnimation {
    /// Duration of the presentation animation.
    pub fn duration(self) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fade => Duration::from_millis(200),
            Self::Slide => Duration::from_millis(300),
        }
    }

    /// Opacity and vertical offset (as a fraction of the overlay height)
    /// at linear `progress`.
    pub fn sample(self, progress: f32) -> (f32, f32) {
        let p = ease_in_out_cubic(progress.clamp(0.0, 1.0));
        match self {
            Self::None => (1.0, 0.0),
            Self::Fade => (p, 0.0),
            Self::Slide => (1.0, 1.0 - p),
        }
    }
}
