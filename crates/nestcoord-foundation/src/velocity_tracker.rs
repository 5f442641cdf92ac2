//! 1D velocity tracking for fling release.
//!
//! Impulse-strategy tracker: velocity is derived from the kinetic energy the
//! gesture imparted across the recent samples, which is far more robust
//! against jittery input than a two-point difference.

/// Ring buffer capacity for motion samples.
const HISTORY_SIZE: usize = 20;

/// Samples older than this are ignored, in milliseconds.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped moving.
const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Accumulates timestamped vertical positions and computes an instantaneous
/// release velocity on demand.
#[derive(Clone)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Velocity in px/sec over the recent sample window, or 0.0 when there
    /// are not enough fresh samples to tell.
    pub fn velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut ages = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut cursor = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[cursor] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (previous.time_ms - sample.time_ms).abs() as f32;
            previous = sample;

            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }

            positions[count] = sample.position;
            ages[count] = -age;

            cursor = if cursor == 0 { HISTORY_SIZE - 1 } else { cursor - 1 };
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &ages[..count]) * 1_000.0
    }

    /// Velocity clamped to `max_velocity` in both directions.
    pub fn velocity_clamped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse velocity in px/ms. Samples are ordered newest first, with ages as
/// non-positive millisecond offsets from the newest sample.
fn impulse_velocity(positions: &[f32], ages: &[f32]) -> f32 {
    debug_assert_eq!(positions.len(), ages.len());
    if positions.len() < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let oldest = positions.len() - 1;
    let mut next_age = ages[oldest];

    for i in (1..=oldest).rev() {
        let current_age = next_age;
        next_age = ages[i - 1];
        if current_age == next_age {
            continue;
        }

        let step_velocity = (positions[i] - positions[i - 1]) / (current_age - next_age);
        let previous_velocity = energy_to_velocity(work);
        work += (step_velocity - previous_velocity) * step_velocity.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// Inverse of `E = v^2 / 2` with the sign of the energy preserved.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
