//! Motion math for NestCoord.
//!
//! Two kinds of settle motion exist after input ends: an inertial fling that
//! decays a release velocity toward a bound ([`decay`]), and a fixed-duration
//! eased snap to a resting offset ([`tween`]). Both are pure functions of
//! elapsed time so the frame driver can evaluate them deterministically.

mod decay;
mod tween;

pub use decay::{DecaySpec, FlingFrame, FlingSimulation, VELOCITY_EPSILON};
pub use tween::{Easing, SnapAnimation, SNAP_DURATION_MS};
