//! Construction-time configuration errors.
//!
//! Everything past construction is infallible by design: offsets clamp,
//! unknown pointers are ignored, and declined participation is a boolean.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinatorError {
    #[error("target init offset ({init}) must be greater than target end offset ({end})")]
    InvalidTargetRange { init: i32, end: i32 },

    #[error("friction must be inside (0, 1), got {0}")]
    InvalidFriction(f32),

    #[error("touch slop must be a non-negative finite value, got {0}")]
    InvalidTouchSlop(f32),

    #[error("max fling velocity must be a positive finite value, got {0}")]
    InvalidMaxFlingVelocity(f32),
}
