//! Shared gesture thresholds.
//!
//! Values are in logical pixels. Hosts with density information should scale
//! these before building the coordinator configuration.

/// Minimum pointer travel before a gesture counts as an intentional drag.
///
/// 8.0 matches the common platform touch slop: large enough to ignore finger
/// jitter, small enough that intentional drags feel responsive.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Ceiling applied to release velocities before a fling starts, in logical
/// pixels per second.
pub const DEFAULT_MAX_FLING_VELOCITY: f32 = 8_000.0;
