//! NestCoord couples a small "header" element to a larger scrollable
//! "target" panel: dragging or scrolling the target slides both, the header
//! interpolating between its revealed and collapsed offsets, and every
//! gesture settles at one of the two resting states.
//!
//! The [`NestCoordinator`] engine is driven through one of three host
//! integration strategies:
//!
//! * direct pointer dispatch ([`NestCoordinator::should_intercept`] and
//!   [`NestCoordinator::handle_pointer_event`]) when the host owns the raw
//!   event stream,
//! * nested-scroll delegation (the `on_nested_*` methods) when the target is
//!   itself a scrollable that negotiates deltas with its ancestors,
//! * the passive [`CoverFollower`] when the host moves the target by other
//!   means and only needs the header kept in step.
//!
//! Settle animations run on the host's frame pump via
//! [`nestcoord_core::Runtime`].

mod config;
mod cover;
mod engine;
mod error;
mod nested;
mod offset_model;
mod snap;
mod touch;

#[cfg(test)]
mod test_support;

pub use config::CoordinatorConfig;
pub use cover::CoverFollower;
pub use engine::{MotionState, NestCoordinator, TargetHandle};
pub use error::CoordinatorError;
pub use offset_model::{header_offset_for, OffsetDelta, OffsetModel};
pub use snap::SnapTarget;
pub use touch::PointerResponse;
