//! Coordinator configuration.

use crate::CoordinatorError;
use nestcoord_animation::DecaySpec;
use nestcoord_foundation::{DEFAULT_MAX_FLING_VELOCITY, DEFAULT_TOUCH_SLOP};

/// Offsets and thresholds for one header/target pair.
///
/// All offsets are vertical displacements in pixels from the container's
/// layout position. The "init" offsets are the revealed resting state, the
/// "end" offsets the collapsed one; the target interpolates the header
/// between them.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorConfig {
    pub header_init_offset: i32,
    pub header_end_offset: i32,
    pub target_init_offset: i32,
    pub target_end_offset: i32,
    pub touch_slop: f32,
    pub max_fling_velocity: f32,
    /// Per-frame velocity multiplier of the fling, at a 60 fps reference.
    pub friction: f32,
}

impl CoordinatorConfig {
    /// Configuration with the given resting offsets and default thresholds
    /// (end offsets 0, slop 8 px, fling ceiling 8000 px/s, friction 0.98).
    pub fn new(header_init_offset: i32, target_init_offset: i32) -> Self {
        Self {
            header_init_offset,
            header_end_offset: 0,
            target_init_offset,
            target_end_offset: 0,
            touch_slop: DEFAULT_TOUCH_SLOP,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            friction: DecaySpec::DEFAULT_FRICTION,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), CoordinatorError> {
        if self.target_init_offset <= self.target_end_offset {
            return Err(CoordinatorError::InvalidTargetRange {
                init: self.target_init_offset,
                end: self.target_end_offset,
            });
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(CoordinatorError::InvalidFriction(self.friction));
        }
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(CoordinatorError::InvalidTouchSlop(self.touch_slop));
        }
        if !self.max_fling_velocity.is_finite() || self.max_fling_velocity <= 0.0 {
            return Err(CoordinatorError::InvalidMaxFlingVelocity(
                self.max_fling_velocity,
            ));
        }
        Ok(())
    }
}
