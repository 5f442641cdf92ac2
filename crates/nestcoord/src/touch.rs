//! Direct pointer-dispatch adapter.
//!
//! For hosts that hand the coordinator a raw pointer stream. Two entry
//! points mirror the usual parent-first dispatch split: `should_intercept`
//! answers whether the coordinator wants to claim the stream, and
//! `handle_pointer_event` consumes it once claimed.

use crate::engine::{MotionState, NestCoordinator};
use nestcoord_foundation::{PointerAction, PointerEvent, PointerId};

/// Outcome of feeding one pointer event to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerResponse {
    /// Whether the event moved the coupled elements.
    pub handled: bool,
    /// Upward drag remainder the coordinator could not absorb because the
    /// target sat at its end bound. The host's input pipeline should
    /// redeliver this to the underlying scrollable so it keeps scrolling.
    pub unconsumed_dy: f32,
}

impl PointerResponse {
    pub(crate) fn ignored() -> Self {
        Self {
            handled: false,
            unconsumed_dy: 0.0,
        }
    }

    pub(crate) fn consumed() -> Self {
        Self {
            handled: true,
            unconsumed_dy: 0.0,
        }
    }
}

/// Remaining pointer to hand the gesture to after a secondary-pointer-up.
fn fallback_pointer(event: &PointerEvent, lifted: PointerId) -> Option<(PointerId, f32)> {
    event
        .other_pointer(lifted)
        .and_then(|id| event.y_of(id).map(|y| (id, y)))
}

impl NestCoordinator {
    /// Parent-first look at an event: tracks slop progress and reports
    /// whether the coordinator wants to take the stream over. Declines
    /// outright while disabled or while the child can still scroll up.
    pub fn should_intercept(&self, event: &PointerEvent) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.enabled || state.target.can_scroll_up() {
            log::debug!("intercept fast end: enabled = {}", state.enabled);
            return false;
        }

        match event.action {
            PointerAction::Down => {
                let Some(y) = event.y_of(event.pointer_id) else {
                    return false;
                };
                state.drag.on_pointer_down(event.pointer_id, y);
            }
            PointerAction::Move => {
                let Some(active) = state.drag.active_pointer() else {
                    return false;
                };
                let Some(y) = event.y_of(active) else {
                    log::warn!("move event without the active pointer, ignoring");
                    return false;
                };
                let past_end = state.model.capacity() > 0;
                state.drag.try_start_drag(y, past_end);
            }
            PointerAction::PointerUp => {
                let fallback = fallback_pointer(event, event.pointer_id);
                state.drag.on_secondary_pointer_up(event.pointer_id, fallback);
            }
            PointerAction::Up => {
                if state.drag.active_pointer() == Some(event.pointer_id) {
                    state.drag.finish();
                }
            }
            PointerAction::Cancel => {
                state.drag.finish();
            }
            PointerAction::PointerDown => {}
        }
        state.drag.is_dragging()
    }

    /// Consumes one pointer event of a claimed stream.
    ///
    /// Downward drag deltas always pass through to the offsets; upward
    /// deltas clamp at the target's end bound and the excess is returned in
    /// [`PointerResponse::unconsumed_dy`]. Events referencing pointers the
    /// session does not know are ignored without touching gesture state.
    pub fn handle_pointer_event(&self, event: &PointerEvent) -> PointerResponse {
        let mut state = self.state.borrow_mut();
        if !state.enabled || state.target.can_scroll_up() {
            log::debug!("pointer fast end: enabled = {}", state.enabled);
            return PointerResponse::ignored();
        }

        match event.action {
            PointerAction::Down => {
                let Some(y) = event.y_of(event.pointer_id) else {
                    return PointerResponse::ignored();
                };
                state.drag.on_pointer_down(event.pointer_id, y);
                state.velocity.reset();
                state.velocity.add_sample(event.time_ms, y);
                PointerResponse::ignored()
            }
            PointerAction::Move => {
                let Some(active) = state.drag.active_pointer() else {
                    return PointerResponse::ignored();
                };
                let Some(y) = event.y_of(active) else {
                    log::warn!("move event without the active pointer, ignoring");
                    return PointerResponse::ignored();
                };
                state.velocity.add_sample(event.time_ms, y);

                let past_end = state.model.capacity() > 0;
                state.drag.try_start_drag(y, past_end);
                if !state.drag.is_dragging() {
                    return PointerResponse::ignored();
                }

                let dy = state.drag.drag_delta(y);
                if state.motion != MotionState::Dragging {
                    state.begin_interaction();
                }

                let (response, notifications) = if dy >= 0.0 {
                    (PointerResponse::consumed(), state.move_target_by(dy))
                } else {
                    // Upward: clamp at the end bound, report the rest back.
                    let end = state.model.target_end();
                    let current = state.model.target_current() as f32;
                    if current + dy <= end as f32 {
                        let response = PointerResponse {
                            handled: true,
                            unconsumed_dy: (current + dy) - end as f32,
                        };
                        (response, state.apply_target_offset(end))
                    } else {
                        (PointerResponse::consumed(), state.move_target_by(dy))
                    }
                };
                drop(state);
                notifications.dispatch();
                response
            }
            PointerAction::PointerDown => {
                // A newly landed finger takes over the gesture.
                let Some(y) = event.y_of(event.pointer_id) else {
                    return PointerResponse::ignored();
                };
                state.drag.reassign_active(event.pointer_id, y);
                PointerResponse::ignored()
            }
            PointerAction::PointerUp => {
                let fallback = fallback_pointer(event, event.pointer_id);
                state.drag.on_secondary_pointer_up(event.pointer_id, fallback);
                PointerResponse::ignored()
            }
            PointerAction::Up => {
                // An up for a pointer the session is not tracking ends
                // nothing; the active finger is still down.
                match state.drag.active_pointer() {
                    Some(active) if active == event.pointer_id => {}
                    Some(_) => {
                        log::warn!(
                            "up event for untracked pointer {}, ignoring",
                            event.pointer_id
                        );
                        return PointerResponse::ignored();
                    }
                    None => return PointerResponse::ignored(),
                }
                let was_dragging = state.drag.is_dragging();
                state.drag.finish();
                if was_dragging {
                    let max_velocity = state.config.max_fling_velocity;
                    let release_velocity = state.velocity.velocity_clamped(max_velocity);
                    state.finish_drag(release_velocity);
                }
                state.velocity.reset();
                drop(state);
                if was_dragging {
                    Self::request_frame(&self.state);
                }
                PointerResponse::ignored()
            }
            PointerAction::Cancel => {
                // Cancel clears the gesture outright and suppresses any
                // settle that was about to be scheduled.
                state.drag.finish();
                state.velocity.reset();
                state.pending_snap = None;
                if state.motion == MotionState::Dragging {
                    state.motion = MotionState::Idle;
                }
                PointerResponse::ignored()
            }
        }
    }
}
