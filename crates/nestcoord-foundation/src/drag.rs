//! Slop-gated drag session over a raw pointer stream.

use crate::PointerId;

/// Tracks one drag gesture: which pointer drives it, where it started, and
/// whether it has crossed the slop threshold yet.
///
/// The session only does bookkeeping; translating deltas into offsets is the
/// engine's job.
#[derive(Debug, Clone)]
pub struct DragSession {
    touch_slop: f32,
    active_pointer: Option<PointerId>,
    initial_down_y: f32,
    initial_motion_y: f32,
    last_motion_y: f32,
    dragging: bool,
}

impl DragSession {
    pub fn new(touch_slop: f32) -> Self {
        Self {
            touch_slop,
            active_pointer: None,
            initial_down_y: 0.0,
            initial_motion_y: 0.0,
            last_motion_y: 0.0,
            dragging: false,
        }
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_pointer_down(&mut self, pointer_id: PointerId, y: f32) {
        self.active_pointer = Some(pointer_id);
        self.initial_down_y = y;
        self.dragging = false;
    }

    /// Slop gating. Dragging starts once the pointer has travelled more than
    /// the slop from the down position, and only on the permitted side:
    /// downward, or any direction while `past_end_bound` holds (the target
    /// still has room to collapse).
    ///
    /// On the crossing the motion origin snaps to `down + slop` so the first
    /// applied delta does not jump by the slop distance.
    pub fn try_start_drag(&mut self, y: f32, past_end_bound: bool) -> bool {
        if self.dragging {
            return false;
        }
        if y > self.initial_down_y || past_end_bound {
            let travelled = (y - self.initial_down_y).abs();
            if travelled > self.touch_slop {
                self.initial_motion_y = self.initial_down_y + self.touch_slop;
                self.last_motion_y = self.initial_motion_y;
                self.dragging = true;
                log::trace!(
                    "drag started: down_y = {}, motion_y = {}",
                    self.initial_down_y,
                    self.initial_motion_y
                );
                return true;
            }
        }
        false
    }

    /// Signed delta since the last motion position. Only meaningful while
    /// dragging.
    pub fn drag_delta(&mut self, y: f32) -> f32 {
        let delta = y - self.last_motion_y;
        self.last_motion_y = y;
        delta
    }

    /// Moves the gesture onto another pointer without restarting slop
    /// detection; the motion origin jumps to the new pointer's position so
    /// the hand-over does not produce a spurious delta.
    pub fn reassign_active(&mut self, pointer_id: PointerId, y: f32) {
        self.active_pointer = Some(pointer_id);
        self.last_motion_y = y;
    }

    /// Handles a secondary pointer lifting. When the lifted pointer was the
    /// active one the session moves to `fallback`; with no fallback the
    /// session ends.
    pub fn on_secondary_pointer_up(
        &mut self,
        lifted: PointerId,
        fallback: Option<(PointerId, f32)>,
    ) {
        if self.active_pointer != Some(lifted) {
            return;
        }
        match fallback {
            Some((pointer_id, y)) => self.reassign_active(pointer_id, y),
            None => self.finish(),
        }
    }

    /// Ends the gesture (pointer up or cancel).
    pub fn finish(&mut self) {
        self.dragging = false;
        self.active_pointer = None;
    }
}
