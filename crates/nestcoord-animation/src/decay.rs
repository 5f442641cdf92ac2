//! Exponential-decay fling simulation.
//!
//! The friction coefficient is the per-frame velocity multiplier at a 60 fps
//! reference rate, so the default of 0.98 decelerates slowly. Position and
//! velocity have closed forms, which keeps every tick a pure function of
//! elapsed time.

/// Frame rate the friction coefficient is expressed against.
const REFERENCE_FPS: f32 = 60.0;

/// Speed below which a fling is considered settled, in px/sec.
pub const VELOCITY_EPSILON: f32 = 1.0;

/// Velocity decay curve: `v(t) = v0 * friction^(t * 60)`.
#[derive(Debug, Clone, Copy)]
pub struct DecaySpec {
    /// Decay rate `k = 60 * ln(friction)`, negative for friction in (0, 1).
    rate: f32,
}

impl DecaySpec {
    pub const DEFAULT_FRICTION: f32 = 0.98;

    /// Builds a spec for a friction coefficient in (0, 1). Out-of-range
    /// values are clamped instead of rejected.
    pub fn new(friction: f32) -> Self {
        let friction = friction.clamp(1.0e-3, 1.0 - 1.0e-4);
        Self {
            rate: REFERENCE_FPS * friction.ln(),
        }
    }

    pub fn velocity_at(&self, initial_velocity: f32, elapsed_secs: f32) -> f32 {
        initial_velocity * (self.rate * elapsed_secs).exp()
    }

    pub fn position_at(&self, initial_offset: f32, initial_velocity: f32, elapsed_secs: f32) -> f32 {
        initial_offset + initial_velocity * ((self.rate * elapsed_secs).exp() - 1.0) / self.rate
    }

    /// Offset the motion converges to as the velocity decays away.
    pub fn final_position(&self, initial_offset: f32, initial_velocity: f32) -> f32 {
        initial_offset - initial_velocity / self.rate
    }

    /// Time until the speed drops below [`VELOCITY_EPSILON`], in seconds.
    pub fn duration_secs(&self, initial_velocity: f32) -> f32 {
        if initial_velocity.abs() <= VELOCITY_EPSILON {
            return 0.0;
        }
        (VELOCITY_EPSILON / initial_velocity.abs()).ln() / self.rate
    }

    /// Time at which the trajectory from `initial_offset` reaches `bound`,
    /// or `None` when the motion decays away before getting there.
    fn time_to_reach(&self, initial_offset: f32, initial_velocity: f32, bound: f32) -> Option<f32> {
        if initial_velocity == 0.0 {
            return None;
        }
        let arg = 1.0 + self.rate * (bound - initial_offset) / initial_velocity;
        if arg <= 0.0 || arg > 1.0 {
            return None;
        }
        Some(arg.ln() / self.rate)
    }
}

/// One evaluated frame of a fling.
#[derive(Debug, Clone, Copy)]
pub struct FlingFrame {
    pub offset: f32,
    /// Instantaneous velocity; when `hit_bound` is set this is the residual
    /// speed carried into the bound, available for hand-off.
    pub velocity: f32,
    pub finished: bool,
    pub hit_bound: bool,
}

/// A bounded decaying-velocity trajectory.
///
/// Velocity never changes sign, so at most one bound (the one in the
/// direction of travel) can terminate the motion.
#[derive(Debug, Clone, Copy)]
pub struct FlingSimulation {
    spec: DecaySpec,
    start_offset: f32,
    start_velocity: f32,
    lower_bound: f32,
    upper_bound: f32,
}

impl FlingSimulation {
    pub fn new(
        spec: DecaySpec,
        start_offset: f32,
        start_velocity: f32,
        lower_bound: f32,
        upper_bound: f32,
    ) -> Self {
        Self {
            spec,
            start_offset,
            start_velocity,
            lower_bound,
            upper_bound,
        }
    }

    pub fn start_velocity(&self) -> f32 {
        self.start_velocity
    }

    /// Evaluates the trajectory `elapsed_nanos` after the fling started.
    pub fn tick(&self, elapsed_nanos: u64) -> FlingFrame {
        let elapsed_secs = elapsed_nanos as f32 / 1_000_000_000.0;
        let raw_offset = self
            .spec
            .position_at(self.start_offset, self.start_velocity, elapsed_secs);

        let crossed_bound = if self.start_velocity < 0.0 && raw_offset <= self.lower_bound {
            Some(self.lower_bound)
        } else if self.start_velocity > 0.0 && raw_offset >= self.upper_bound {
            Some(self.upper_bound)
        } else {
            None
        };

        if let Some(bound) = crossed_bound {
            let residual = self
                .spec
                .time_to_reach(self.start_offset, self.start_velocity, bound)
                .map(|impact_secs| self.spec.velocity_at(self.start_velocity, impact_secs))
                .unwrap_or(self.start_velocity);
            return FlingFrame {
                offset: bound,
                velocity: residual,
                finished: true,
                hit_bound: true,
            };
        }

        let velocity = self.spec.velocity_at(self.start_velocity, elapsed_secs);
        FlingFrame {
            offset: raw_offset,
            velocity,
            finished: velocity.abs() < VELOCITY_EPSILON,
            hit_bound: false,
        }
    }
}
