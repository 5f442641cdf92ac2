//! Frame scheduling runtime for NestCoord.
//!
//! Hosts drive the coordinator by pumping frame timestamps into a [`Runtime`]
//! (typically from a display-refresh callback). Components request work for
//! the next frame through the [`FrameClock`] and keep the returned
//! [`FrameCallbackRegistration`] alive for as long as the callback should
//! stay scheduled.

mod frame_clock;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
