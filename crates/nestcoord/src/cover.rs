//! Layout-dependency follower.
//!
//! The third integration strategy: instead of handling input at all, the
//! header is registered as a passive dependent of the target. The host
//! drives the target however it likes and reports every offset change here;
//! the follower keeps the header on the interpolation curve.

use std::rc::Rc;

use crate::offset_model::header_offset_for;
use nestcoord_foundation::OffsetElement;

/// Keeps a header element positioned as a pure function of the target's
/// offset. Holds no gesture or animation state of its own.
pub struct CoverFollower {
    header_init: i32,
    header_end: i32,
    header_current: i32,
    element: Rc<dyn OffsetElement>,
}

impl CoverFollower {
    pub fn new(header_init: i32, header_end: i32, element: Rc<dyn OffsetElement>) -> Self {
        Self {
            header_init,
            header_end,
            header_current: header_init,
            element,
        }
    }

    pub fn header_offset(&self) -> i32 {
        self.header_current
    }

    /// Called whenever the target's offset changes. Re-derives the header
    /// offset from scratch, so missed or repeated notifications cannot
    /// accumulate drift. Returns the new header offset.
    pub fn on_dependency_changed(
        &mut self,
        target_current: i32,
        target_init: i32,
        target_end: i32,
    ) -> i32 {
        let next = header_offset_for(
            target_current,
            target_init,
            target_end,
            self.header_init,
            self.header_end,
        );
        if next != self.header_current {
            self.element.offset_by(next - self.header_current);
            self.header_current = next;
        }
        next
    }
}
