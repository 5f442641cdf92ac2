//! Pointer event shape consumed by the direct-dispatch adapter.

use rustc_hash::FxHashMap;

pub type PointerId = u64;

/// What happened in a pointer event.
///
/// `PointerDown`/`PointerUp` are secondary-finger transitions: a pointer went
/// down or up while at least one other pointer stayed on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
    PointerDown,
    PointerUp,
}

/// A single vertical pointer event.
///
/// Only the vertical coordinate is carried; horizontal motion is out of
/// scope for this engine. `positions` holds the current y of every pointer
/// on the surface so the engine can retarget when fingers come and go.
#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub action: PointerAction,
    /// Pointer the action refers to (the one that went down/up/moved).
    pub pointer_id: PointerId,
    pub positions: FxHashMap<PointerId, f32>,
    pub time_ms: i64,
}

impl PointerEvent {
    pub fn new(action: PointerAction, pointer_id: PointerId, time_ms: i64) -> Self {
        Self {
            action,
            pointer_id,
            positions: FxHashMap::default(),
            time_ms,
        }
    }

    pub fn with_position(mut self, pointer_id: PointerId, y: f32) -> Self {
        self.positions.insert(pointer_id, y);
        self
    }

    /// Current y of the given pointer, if it is on the surface.
    pub fn y_of(&self, pointer_id: PointerId) -> Option<f32> {
        self.positions.get(&pointer_id).copied()
    }

    /// Any pointer still on the surface other than `exclude`, used to pick a
    /// new active pointer after a secondary-pointer-up.
    pub fn other_pointer(&self, exclude: PointerId) -> Option<PointerId> {
        self.positions.keys().copied().find(|id| *id != exclude)
    }
}

/// Scroll axes a nested child may ask its ancestor to participate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAxes(u8);

impl ScrollAxes {
    pub const NONE: Self = Self(0);
    pub const HORIZONTAL: Self = Self(1);
    pub const VERTICAL: Self = Self(1 << 1);

    pub fn contains(&self, other: ScrollAxes) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for ScrollAxes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
