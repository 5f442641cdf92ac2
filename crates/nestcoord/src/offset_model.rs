//! Coupled offset bookkeeping for the header/target pair.

/// Header offset for a given target offset: piecewise-linear interpolation
/// between `(target_end -> header_end)` and `(target_init -> header_init)`,
/// clamped to the header rest offsets outside that range.
///
/// Both elements reach their init rest positions together and their end rest
/// positions together.
pub fn header_offset_for(
    target_current: i32,
    target_init: i32,
    target_end: i32,
    header_init: i32,
    header_end: i32,
) -> i32 {
    if target_current >= target_init {
        header_init
    } else if target_current <= target_end {
        header_end
    } else {
        let fraction = (target_current - target_end) as f32 / (target_init - target_end) as f32;
        header_end + (fraction * (header_init - header_end) as f32) as i32
    }
}

/// Result of one model move: the clamped offset plus the pixel deltas owed
/// to the two host elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetDelta {
    pub applied: i32,
    pub target_delta: i32,
    pub header_delta: i32,
}

/// Current, init and end offsets for both coupled elements.
///
/// Mutated only through [`OffsetModel::move_target_to`]; input handlers never
/// write offsets directly, which is what keeps the clamp invariant
/// (`target_current >= target_end`) airtight. The model never talks to the
/// host itself: callers forward the returned [`OffsetDelta`] once no engine
/// state is borrowed, so host callbacks are free to read the coordinator.
#[derive(Debug, Clone)]
pub struct OffsetModel {
    header_init: i32,
    header_end: i32,
    header_current: i32,
    target_init: i32,
    target_end: i32,
    target_current: i32,
}

impl OffsetModel {
    pub fn new(header_init: i32, header_end: i32, target_init: i32, target_end: i32) -> Self {
        Self {
            header_init,
            header_end,
            header_current: header_init,
            target_init,
            target_end,
            target_current: target_init,
        }
    }

    pub fn target_current(&self) -> i32 {
        self.target_current
    }

    pub fn header_current(&self) -> i32 {
        self.header_current
    }

    pub fn target_init(&self) -> i32 {
        self.target_init
    }

    pub fn target_end(&self) -> i32 {
        self.target_end
    }

    /// Room left before the target hits its end bound, in pixels.
    pub fn capacity(&self) -> i32 {
        self.target_current - self.target_end
    }

    pub fn at_end(&self) -> bool {
        self.target_current == self.target_end
    }

    /// Moves the target to `new_offset` (clamped to the end bound) and
    /// returns the deltas both elements must be shifted by.
    pub fn move_target_to(&mut self, new_offset: i32) -> OffsetDelta {
        let applied = new_offset.max(self.target_end);
        let target_delta = applied - self.target_current;
        self.target_current = applied;

        let header_target = header_offset_for(
            self.target_current,
            self.target_init,
            self.target_end,
            self.header_init,
            self.header_end,
        );
        let header_delta = header_target - self.header_current;
        self.header_current = header_target;

        OffsetDelta {
            applied,
            target_delta,
            header_delta,
        }
    }

    /// Moves the target by a fractional delta, truncating to whole pixels the
    /// same way the offsets are stored.
    pub fn move_target_by(&mut self, dy: f32) -> OffsetDelta {
        let new_offset = (self.target_current as f32 + dy) as i32;
        self.move_target_to(new_offset)
    }
}
