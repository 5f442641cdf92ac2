//! Resting-position decision once input ends.

/// Which resting offset the coupled elements settle at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    /// The revealed resting state.
    ToInit,
    /// The collapsed resting state.
    ToEnd,
}

impl SnapTarget {
    /// Midpoint rule: at or below the midpoint of the two rest offsets the
    /// target collapses, above it the target reopens. Ties go to End.
    pub fn decide(current: i32, init: i32, end: i32) -> SnapTarget {
        if current <= (end + init) / 2 {
            SnapTarget::ToEnd
        } else {
            SnapTarget::ToInit
        }
    }
}
