//! Input primitives for NestCoord.
//!
//! This crate holds everything the coordination engine consumes from a host:
//! the pointer event shape, the slop-gated drag session, the velocity
//! tracker that turns motion samples into a release velocity, and the
//! capability traits a header/target pair must implement.

mod drag;
mod element;
mod gesture_constants;
mod pointer;
mod velocity_tracker;

pub use drag::DragSession;
pub use element::{OffsetElement, ScrollChild};
pub use gesture_constants::{DEFAULT_MAX_FLING_VELOCITY, DEFAULT_TOUCH_SLOP};
pub use pointer::{PointerAction, PointerEvent, PointerId, ScrollAxes};
pub use velocity_tracker::VelocityTracker;
