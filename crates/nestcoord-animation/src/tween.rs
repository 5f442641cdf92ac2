//! Fixed-duration snap animation.
//!
//! Once input ends without enough velocity to fling, the engine animates the
//! remaining distance to a resting offset with a short eased tween.

/// Default snap duration in milliseconds.
pub const SNAP_DURATION_MS: u64 = 250;

/// Easing curves for the snap tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Material-style standard curve: quick start, gentle landing.
    FastOutSlowIn,
}

impl Easing {
    /// Maps a linear fraction in [0, 1] through the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric t matching the x fraction, with a
    // bisection fallback when the derivative flattens out.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let delta = sample_curve(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Non-inertial interpolated motion from a start offset to a resting offset.
#[derive(Debug, Clone, Copy)]
pub struct SnapAnimation {
    start: f32,
    target: f32,
    duration_nanos: u64,
    easing: Easing,
}

impl SnapAnimation {
    pub fn new(start: f32, target: f32) -> Self {
        Self::with_duration(start, target, SNAP_DURATION_MS, Easing::FastOutSlowIn)
    }

    pub fn with_duration(start: f32, target: f32, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start,
            target,
            duration_nanos: duration_ms.max(1) * 1_000_000,
            easing,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// True when there is no distance to cover; such a snap is skipped.
    pub fn is_noop(&self) -> bool {
        self.start == self.target
    }

    /// Returns the offset `elapsed_nanos` into the animation and whether the
    /// animation has completed.
    pub fn value_at(&self, elapsed_nanos: u64) -> (f32, bool) {
        let linear = (elapsed_nanos as f32 / self.duration_nanos as f32).clamp(0.0, 1.0);
        let progress = self.easing.transform(linear);
        let value = self.start + (self.target - self.start) * progress;
        (value, linear >= 1.0)
    }
}
