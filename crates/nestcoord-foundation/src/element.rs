//! Capability traits the host's visual elements must implement.
//!
//! The engine never sees a widget hierarchy; it only needs elements that can
//! shift vertically and, for the target, report and continue their own
//! internal scrolling.

/// A visual element whose vertical offset the engine can shift.
///
/// Offsets are applied as deltas so hosts stay free to keep absolute
/// placement in whatever layout system they use.
pub trait OffsetElement {
    fn offset_by(&self, delta_px: i32);
}

/// Capabilities of the scrollable element coupled as "target".
pub trait ScrollChild {
    /// True while the element's own content can still scroll upward, i.e.
    /// it is not at its top. While this holds, downward motion belongs to
    /// the child and the coordinator stays out of the way.
    fn can_scroll_up(&self) -> bool;

    /// Continues a fling inside the element with the given velocity in
    /// px/sec (positive scrolls the content further down the list).
    fn fling(&self, velocity: f32);
}
