//! Nested-scroll delegation adapter.
//!
//! For hosts whose scrollable child negotiates with ancestors instead of
//! having its pointer stream stolen: the child offers each scroll delta and
//! fling to the coordinator before (and after) consuming it itself.
//!
//! Sign convention follows the nested-scroll protocol: positive `dy` is the
//! content scrolling down (finger moving up), so consuming `dy` moves the
//! target offset by `-dy`.

use crate::engine::{MotionState, NestCoordinator};
use crate::SnapTarget;
use nestcoord_foundation::ScrollAxes;

impl NestCoordinator {
    /// A child starts a scroll and asks whether this coordinator wants to
    /// participate. Only vertical sessions are accepted.
    pub fn on_nested_scroll_start(&self, axes: ScrollAxes) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.enabled || !axes.contains(ScrollAxes::VERTICAL) {
            return false;
        }
        state.nested_fling_started = false;
        true
    }

    /// Offered a delta before the child consumes it. Returns how much of
    /// `dy` the coordinator took.
    ///
    /// Upward scrolls (`dy > 0`) collapse the pair first: the coordinator
    /// eats the delta until the target reaches its end bound, then lets the
    /// child scroll its own content. While the child can still scroll up the
    /// coordinator stays out of the way entirely, so downward motion reveals
    /// list content before it reopens the pair.
    pub fn on_nested_pre_scroll(&self, dy: f32) -> f32 {
        let mut state = self.state.borrow_mut();
        if !state.enabled || dy <= 0.0 || state.target.can_scroll_up() {
            return 0.0;
        }
        let capacity = state.model.capacity() as f32;
        let consumed = dy.min(capacity);
        if consumed <= 0.0 {
            return 0.0;
        }
        if state.motion != MotionState::Dragging {
            state.begin_interaction();
        }
        let notifications = state.move_target_by(-consumed);
        drop(state);
        notifications.dispatch();
        consumed
    }

    /// Told about a delta the child could not consume itself. A downward
    /// leftover (`dy_unconsumed < 0`, child already at its top) reopens the
    /// pair; there is no cap here because the target's own init offset is
    /// not a hard bound.
    pub fn on_nested_scroll(&self, dy_unconsumed: f32) {
        let mut state = self.state.borrow_mut();
        if !state.enabled || dy_unconsumed >= 0.0 || state.target.can_scroll_up() {
            return;
        }
        if state.motion != MotionState::Dragging {
            state.begin_interaction();
        }
        let notifications = state.move_target_by(-dy_unconsumed);
        drop(state);
        notifications.dispatch();
    }

    /// Offered a fling before the child runs it. Returns true when the
    /// coordinator consumed the fling, in which case the child must not
    /// fling itself.
    pub fn on_nested_pre_fling(&self, velocity_y: f32) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.enabled {
            return false;
        }
        if velocity_y < 0.0 {
            // Downward fling: reopen the pair, unless the child still has
            // content to scroll through first.
            if state.target.can_scroll_up() {
                return false;
            }
            state.pending_snap = Some(SnapTarget::ToInit);
        } else if velocity_y > 0.0 {
            // Upward fling: collapse the pair. At the end bound already
            // there is nothing left to collapse, the child scrolls.
            if state.model.at_end() {
                return false;
            }
            state.pending_snap = Some(SnapTarget::ToEnd);
        } else {
            return false;
        }

        let max_velocity = state.config.max_fling_velocity;
        let engine_velocity = (-velocity_y).clamp(-max_velocity, max_velocity);
        log::debug!("nested pre-fling consumed: {engine_velocity} px/s");
        state.start_fling(engine_velocity);
        state.nested_fling_started = true;
        drop(state);
        Self::request_frame(&self.state);
        true
    }

    /// The nested session ended. When no fling was taken over, the pair is
    /// resting between its two stable offsets and needs a snap.
    pub fn on_nested_scroll_stop(&self) {
        let mut state = self.state.borrow_mut();
        if state.nested_fling_started {
            // The fling's own settle covers the rest position.
            state.nested_fling_started = false;
            return;
        }
        if !state.enabled {
            return;
        }
        state.schedule_snap_decision();
        drop(state);
        Self::request_frame(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coordinator, settle};

    #[test]
    fn only_vertical_sessions_are_accepted() {
        let (coordinator, _, _, _runtime) = coordinator();
        assert!(coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL));
        assert!(coordinator
            .on_nested_scroll_start(ScrollAxes::VERTICAL | ScrollAxes::HORIZONTAL));
        assert!(!coordinator.on_nested_scroll_start(ScrollAxes::HORIZONTAL));
        assert!(!coordinator.on_nested_scroll_start(ScrollAxes::NONE));

        coordinator.set_enabled(false);
        assert!(!coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL));
    }

    #[test]
    fn pre_scroll_splits_the_delta_at_the_end_bound() {
        let (coordinator, _, _, _runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);

        // 100 px of capacity: the first 60 are consumed whole.
        assert_eq!(coordinator.on_nested_pre_scroll(60.0), 60.0);
        assert_eq!(coordinator.target_offset(), 40);

        // The next 60 split: 40 collapse the pair, 20 go to the child.
        assert_eq!(coordinator.on_nested_pre_scroll(60.0), 40.0);
        assert_eq!(coordinator.target_offset(), 0);

        // Fully collapsed, nothing more is taken.
        assert_eq!(coordinator.on_nested_pre_scroll(60.0), 0.0);
        assert_eq!(coordinator.target_offset(), 0);
    }

    #[test]
    fn pre_scroll_ignores_downward_and_scrollable_children() {
        let (coordinator, _, target, _runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);

        assert_eq!(coordinator.on_nested_pre_scroll(-30.0), 0.0);

        target.scrollable_up.set(true);
        assert_eq!(coordinator.on_nested_pre_scroll(30.0), 0.0);
        assert_eq!(coordinator.target_offset(), 100);
    }

    #[test]
    fn unconsumed_downward_scroll_reopens_the_pair() {
        let (coordinator, _, target, _runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);
        coordinator.on_nested_pre_scroll(100.0);
        assert_eq!(coordinator.target_offset(), 0);

        // Child at its top, leftover downward delta reopens.
        coordinator.on_nested_scroll(-35.0);
        assert_eq!(coordinator.target_offset(), 35);

        // While the child can still scroll up, leftovers are its problem.
        target.scrollable_up.set(true);
        coordinator.on_nested_scroll(-35.0);
        assert_eq!(coordinator.target_offset(), 35);
    }

    #[test]
    fn scroll_stop_snaps_to_the_nearest_rest_offset() {
        let (coordinator, _, _, runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);
        coordinator.on_nested_pre_scroll(30.0);
        assert_eq!(coordinator.target_offset(), 70);

        coordinator.on_nested_scroll_stop();
        settle(&coordinator, &runtime);
        // 70 is above the midpoint, so the pair reopened.
        assert_eq!(coordinator.target_offset(), 100);
        assert_eq!(coordinator.header_offset(), 50);
    }

    #[test]
    fn upward_pre_fling_collapses_and_hands_residual_to_child() {
        let (coordinator, _, target, runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);

        assert!(coordinator.on_nested_pre_fling(6_000.0));
        coordinator.on_nested_scroll_stop();
        settle(&coordinator, &runtime);

        assert_eq!(coordinator.target_offset(), 0);
        let handed = target.flung_with.get().expect("residual handed to child");
        assert!(handed > 0.0);
    }

    #[test]
    fn upward_pre_fling_declines_when_already_collapsed() {
        let (coordinator, _, _, _runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);
        coordinator.on_nested_pre_scroll(100.0);
        assert_eq!(coordinator.target_offset(), 0);

        assert!(!coordinator.on_nested_pre_fling(3_000.0));
    }

    #[test]
    fn downward_pre_fling_defers_to_a_scrollable_child() {
        let (coordinator, _, target, _runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);
        target.scrollable_up.set(true);
        assert!(!coordinator.on_nested_pre_fling(-3_000.0));
    }

    #[test]
    fn downward_pre_fling_reopens_the_pair() {
        let (coordinator, _, _, runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);
        coordinator.on_nested_pre_scroll(100.0);
        assert_eq!(coordinator.target_offset(), 0);

        assert!(coordinator.on_nested_pre_fling(-2_000.0));
        coordinator.on_nested_scroll_stop();
        settle(&coordinator, &runtime);
        assert_eq!(coordinator.target_offset(), 100);
    }

    #[test]
    fn fling_takeover_suppresses_the_stop_snap() {
        let (coordinator, _, _, runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);
        coordinator.on_nested_pre_scroll(30.0);

        assert!(coordinator.on_nested_pre_fling(1_500.0));
        // Stop arrives while the fling is still pending its first frame; it
        // must not replace the fling's ToEnd decision with a midpoint snap.
        coordinator.on_nested_scroll_stop();
        settle(&coordinator, &runtime);
        assert_eq!(coordinator.target_offset(), 0);
    }

    #[test]
    fn element_callbacks_can_read_the_coordinator() {
        use crate::{CoordinatorConfig, NestCoordinator};
        use crate::test_support::StubTarget;
        use nestcoord_core::Runtime;
        use nestcoord_foundation::OffsetElement;
        use std::cell::{Cell, RefCell};
        use std::rc::Rc;

        // A header that syncs an overlay by reading the coordinator from
        // inside its reposition callback.
        struct ReentrantHeader {
            coordinator: RefCell<Option<Rc<NestCoordinator>>>,
            observed_offset: Cell<Option<i32>>,
        }

        impl OffsetElement for ReentrantHeader {
            fn offset_by(&self, _delta_px: i32) {
                if let Some(coordinator) = self.coordinator.borrow().as_ref() {
                    self.observed_offset.set(Some(coordinator.target_offset()));
                }
            }
        }

        let runtime = Runtime::new();
        let header = Rc::new(ReentrantHeader {
            coordinator: RefCell::new(None),
            observed_offset: Cell::new(None),
        });
        let coordinator = Rc::new(
            NestCoordinator::new(
                CoordinatorConfig::new(50, 100),
                header.clone(),
                StubTarget::new(),
                &runtime.handle(),
            )
            .unwrap(),
        );
        *header.coordinator.borrow_mut() = Some(Rc::clone(&coordinator));

        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);
        assert_eq!(coordinator.on_nested_pre_scroll(30.0), 30.0);

        // The callback ran after the engine released its state and saw the
        // already-updated offset.
        assert_eq!(header.observed_offset.get(), Some(70));
    }

    #[test]
    fn zero_velocity_pre_fling_is_declined() {
        let (coordinator, _, _, _runtime) = coordinator();
        coordinator.on_nested_scroll_start(ScrollAxes::VERTICAL);
        assert!(!coordinator.on_nested_pre_fling(0.0));
    }
}
