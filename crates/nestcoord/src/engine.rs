//! The coordination engine shared by all three input adapters.
//!
//! One engine instance owns the offset bookkeeping, the gesture state and
//! the settle animations for a single header/target pair. Input adapters
//! (direct pointer dispatch in `touch`, nested-scroll delegation in
//! `nested`) translate their native event shapes into the internal calls
//! here; the per-frame driver below is the only code that mutates visual
//! state outside an input callback.

use std::cell::RefCell;
use std::rc::Rc;

use nestcoord_animation::{DecaySpec, FlingSimulation, SnapAnimation};
use nestcoord_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};
use nestcoord_foundation::{DragSession, OffsetElement, ScrollChild, VelocityTracker};

use crate::offset_model::OffsetDelta;
use crate::{CoordinatorConfig, CoordinatorError, OffsetModel, SnapTarget};

/// Everything the engine needs from the element coupled as "target".
pub trait TargetHandle: OffsetElement + ScrollChild {}

impl<T: OffsetElement + ScrollChild> TargetHandle for T {}

/// Host calls owed after an engine mutation.
///
/// The engine state sits behind a `RefCell`, and host elements are allowed
/// to read the coordinator from inside their callbacks (an overlay syncing
/// to `target_offset()`, say). So nothing under the borrow ever calls out:
/// mutations collect their element deltas and hand-off velocity here, and
/// the adapter dispatches once the borrow is released.
#[must_use]
pub(crate) struct HostNotifications {
    header: Rc<dyn OffsetElement>,
    target: Rc<dyn TargetHandle>,
    header_delta: i32,
    target_delta: i32,
    child_fling: Option<f32>,
}

impl HostNotifications {
    pub(crate) fn dispatch(self) {
        if self.target_delta != 0 {
            self.target.offset_by(self.target_delta);
        }
        if self.header_delta != 0 {
            self.header.offset_by(self.header_delta);
        }
        if let Some(velocity) = self.child_fling {
            self.target.fling(velocity);
        }
    }
}

/// Where the engine currently is in its motion lifecycle.
///
/// `Idle` is both the initial state and the terminal state between gestures.
/// Only one of `Flinging`/`Snapping` is ever active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Dragging,
    Flinging,
    Snapping,
}

struct ActiveFling {
    simulation: FlingSimulation,
    start_nanos: Option<u64>,
}

struct ActiveSnap {
    animation: SnapAnimation,
    start_nanos: Option<u64>,
}

pub(crate) struct EngineState {
    pub(crate) config: CoordinatorConfig,
    pub(crate) model: OffsetModel,
    pub(crate) header: Rc<dyn OffsetElement>,
    pub(crate) target: Rc<dyn TargetHandle>,
    pub(crate) drag: DragSession,
    pub(crate) velocity: VelocityTracker,
    decay: DecaySpec,
    pub(crate) motion: MotionState,
    fling: Option<ActiveFling>,
    snap: Option<ActiveSnap>,
    pub(crate) pending_snap: Option<SnapTarget>,
    /// Latched when a nested pre-fling started a fling, so the scroll-stop
    /// callback does not schedule a second settle.
    pub(crate) nested_fling_started: bool,
    pub(crate) enabled: bool,
    clock: FrameClock,
    frame_registration: Option<FrameCallbackRegistration>,
}

impl EngineState {
    /// Applies an absolute target offset through the model.
    pub(crate) fn apply_target_offset(&mut self, offset: i32) -> HostNotifications {
        let delta = self.model.move_target_to(offset);
        self.notifications(delta)
    }

    /// Applies a signed target delta through the model.
    pub(crate) fn move_target_by(&mut self, dy: f32) -> HostNotifications {
        let delta = self.model.move_target_by(dy);
        self.notifications(delta)
    }

    fn notifications(&self, delta: OffsetDelta) -> HostNotifications {
        HostNotifications {
            header: Rc::clone(&self.header),
            target: Rc::clone(&self.target),
            header_delta: delta.header_delta,
            target_delta: delta.target_delta,
            child_fling: None,
        }
    }

    /// A fresh input delta takes over from whatever settle motion is in
    /// flight: the fling or snap stops and the engine is dragging again.
    pub(crate) fn begin_interaction(&mut self) {
        if self.motion == MotionState::Flinging || self.motion == MotionState::Snapping {
            log::debug!("input takes over from {:?}", self.motion);
        }
        self.fling = None;
        self.snap = None;
        self.pending_snap = None;
        self.frame_registration = None;
        self.motion = MotionState::Dragging;
    }

    /// Starts an inertial settle from the current offset, bounded below at
    /// the end offset and unbounded above. Velocity is in offset units per
    /// second and must already be clamped by the caller.
    pub(crate) fn start_fling(&mut self, velocity: f32) {
        self.fling = Some(ActiveFling {
            simulation: FlingSimulation::new(
                self.decay,
                self.model.target_current() as f32,
                velocity,
                self.model.target_end() as f32,
                f32::INFINITY,
            ),
            start_nanos: None,
        });
        self.snap = None;
        self.motion = MotionState::Flinging;
    }

    /// Ends a drag with the measured release velocity: fling when there is
    /// one, otherwise go straight to the snap decision (never entering the
    /// flinging state).
    pub(crate) fn finish_drag(&mut self, release_velocity: f32) {
        log::debug!("touch up: release velocity = {release_velocity} px/s");
        if release_velocity > 0.0 {
            self.pending_snap = Some(SnapTarget::ToInit);
            self.start_fling(release_velocity);
        } else if release_velocity < 0.0 {
            self.pending_snap = Some(SnapTarget::ToEnd);
            self.start_fling(release_velocity);
        } else {
            self.pending_snap = Some(SnapTarget::decide(
                self.model.target_current(),
                self.model.target_init(),
                self.model.target_end(),
            ));
            self.motion = MotionState::Idle;
        }
    }

    pub(crate) fn schedule_snap_decision(&mut self) {
        if self.motion == MotionState::Dragging {
            self.motion = MotionState::Idle;
        }
        self.pending_snap = Some(SnapTarget::decide(
            self.model.target_current(),
            self.model.target_init(),
            self.model.target_end(),
        ));
    }

    /// Resolves the pending snap into a running animation. Returns whether
    /// more frames are needed.
    fn begin_pending_snap(&mut self, now_nanos: u64) -> bool {
        let Some(snap_target) = self.pending_snap.take() else {
            self.motion = MotionState::Idle;
            return false;
        };
        let destination = match snap_target {
            SnapTarget::ToInit => self.model.target_init(),
            SnapTarget::ToEnd => self.model.target_end(),
        };
        let animation =
            SnapAnimation::new(self.model.target_current() as f32, destination as f32);
        if animation.is_noop() {
            self.motion = MotionState::Idle;
            return false;
        }
        log::trace!("snapping from {} to {destination}", self.model.target_current());
        self.snap = Some(ActiveSnap {
            animation,
            start_nanos: Some(now_nanos),
        });
        self.motion = MotionState::Snapping;
        true
    }

    /// One animation tick. Returns whether another frame is needed and the
    /// host calls this tick produced.
    fn advance_frame(&mut self, now_nanos: u64) -> (bool, Option<HostNotifications>) {
        match self.motion {
            MotionState::Flinging => {
                let Some(active) = self.fling.as_mut() else {
                    self.motion = MotionState::Idle;
                    return (false, None);
                };
                let start = *active.start_nanos.get_or_insert(now_nanos);
                let frame = active.simulation.tick(now_nanos.saturating_sub(start));
                let mut notifications = self.apply_target_offset(frame.offset.round() as i32);

                if !frame.finished {
                    return (true, Some(notifications));
                }
                self.fling = None;

                // A fling that carried velocity into the end bound hands the
                // remainder to the child so motion continues seamlessly
                // inside the list. The sign flips from offset space into the
                // child's content-scroll convention.
                if frame.hit_bound
                    && frame.velocity < 0.0
                    && self.model.at_end()
                    && self.pending_snap == Some(SnapTarget::ToEnd)
                {
                    log::debug!(
                        "end bound reached with {} px/s residual, delegating to child",
                        frame.velocity
                    );
                    self.pending_snap = None;
                    self.motion = MotionState::Idle;
                    notifications.child_fling = Some(-frame.velocity);
                    return (false, Some(notifications));
                }
                (self.begin_pending_snap(now_nanos), Some(notifications))
            }
            MotionState::Snapping => {
                let Some(active) = self.snap.as_mut() else {
                    self.motion = MotionState::Idle;
                    return (false, None);
                };
                let start = *active.start_nanos.get_or_insert(now_nanos);
                let (value, finished) = active.animation.value_at(now_nanos.saturating_sub(start));
                let notifications = self.apply_target_offset(value.round() as i32);
                if finished {
                    self.snap = None;
                    self.motion = MotionState::Idle;
                    (false, Some(notifications))
                } else {
                    (true, Some(notifications))
                }
            }
            MotionState::Idle => (self.begin_pending_snap(now_nanos), None),
            // Frames are never needed mid-drag; deltas arrive with input.
            MotionState::Dragging => (false, None),
        }
    }
}

/// Coordinates a small header element with a larger scrollable target so
/// both settle together at one of two resting offsets.
///
/// All three input strategies drive this one engine: raw pointer dispatch
/// (`should_intercept` / `handle_pointer_event`), nested-scroll delegation
/// (`on_nested_*`), and the layout-dependency follower in
/// [`crate::CoverFollower`].
pub struct NestCoordinator {
    pub(crate) state: Rc<RefCell<EngineState>>,
}

impl NestCoordinator {
    /// Builds a coordinator for one header/target pair. Fails only on an
    /// invalid configuration.
    pub fn new(
        config: CoordinatorConfig,
        header: Rc<dyn OffsetElement>,
        target: Rc<dyn TargetHandle>,
        runtime: &RuntimeHandle,
    ) -> Result<Self, CoordinatorError> {
        config.validate()?;
        let state = EngineState {
            model: OffsetModel::new(
                config.header_init_offset,
                config.header_end_offset,
                config.target_init_offset,
                config.target_end_offset,
            ),
            header,
            target,
            drag: DragSession::new(config.touch_slop),
            velocity: VelocityTracker::new(),
            decay: DecaySpec::new(config.friction),
            motion: MotionState::Idle,
            fling: None,
            snap: None,
            pending_snap: None,
            nested_fling_started: false,
            enabled: true,
            clock: runtime.frame_clock(),
            frame_registration: None,
            config,
        };
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
        })
    }

    /// Disabled coordinators decline every form of participation but keep
    /// their offsets.
    pub fn set_enabled(&self, enabled: bool) {
        self.state.borrow_mut().enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    pub fn target_offset(&self) -> i32 {
        self.state.borrow().model.target_current()
    }

    pub fn header_offset(&self) -> i32 {
        self.state.borrow().model.header_current()
    }

    pub fn motion_state(&self) -> MotionState {
        self.state.borrow().motion
    }

    /// True while a settle (fling or snap) is running or scheduled.
    pub fn is_settling(&self) -> bool {
        let state = self.state.borrow();
        matches!(state.motion, MotionState::Flinging | MotionState::Snapping)
            || state.pending_snap.is_some()
    }

    /// Requests an animation frame if none is outstanding.
    pub(crate) fn request_frame(state_rc: &Rc<RefCell<EngineState>>) {
        let clock = {
            let state = state_rc.borrow();
            if state.frame_registration.is_some() {
                return;
            }
            state.clock.clone()
        };
        let weak = Rc::downgrade(state_rc);
        let registration = clock.with_frame_nanos(move |frame_time_nanos| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, frame_time_nanos);
            }
        });
        state_rc.borrow_mut().frame_registration = Some(registration);
    }

    fn on_frame(state_rc: &Rc<RefCell<EngineState>>, frame_time_nanos: u64) {
        let (keep_going, notifications) = {
            let mut state = state_rc.borrow_mut();
            state.frame_registration = None;
            state.advance_frame(frame_time_nanos)
        };
        if let Some(notifications) = notifications {
            notifications.dispatch();
        }
        if keep_going {
            Self::request_frame(state_rc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coordinator, settle, StubElement, StubTarget};
    use nestcoord_core::Runtime;

    #[test]
    fn starts_idle_at_init_offsets() {
        let (coordinator, _, _, _runtime) = coordinator();
        assert_eq!(coordinator.motion_state(), MotionState::Idle);
        assert_eq!(coordinator.target_offset(), 100);
        assert_eq!(coordinator.header_offset(), 50);
    }

    #[test]
    fn zero_velocity_release_skips_the_flinging_state() {
        let (coordinator, _, _, runtime) = coordinator();
        {
            let mut state = coordinator.state.borrow_mut();
            state.apply_target_offset(40).dispatch();
            state.finish_drag(0.0);
            assert_ne!(state.motion, MotionState::Flinging);
        }
        NestCoordinator::request_frame(&coordinator.state);
        settle(&coordinator, &runtime);
        // 40 <= midpoint 50, so the pair collapsed.
        assert_eq!(coordinator.target_offset(), 0);
        assert_eq!(coordinator.header_offset(), 0);
    }

    #[test]
    fn downward_release_flings_then_rests_at_init() {
        let (coordinator, header, _, runtime) = coordinator();
        {
            let mut state = coordinator.state.borrow_mut();
            state.apply_target_offset(30).dispatch();
            state.finish_drag(2_000.0);
            assert_eq!(state.motion, MotionState::Flinging);
        }
        NestCoordinator::request_frame(&coordinator.state);
        settle(&coordinator, &runtime);
        assert_eq!(coordinator.target_offset(), 100);
        assert_eq!(coordinator.header_offset(), 50);
        // Header element is back at its layout position.
        assert_eq!(header.position.get(), 0);
    }

    #[test]
    fn upward_release_collapses_and_hands_residual_to_child() {
        let (coordinator, _, target, runtime) = coordinator();
        {
            let mut state = coordinator.state.borrow_mut();
            state.finish_drag(-6_000.0);
        }
        NestCoordinator::request_frame(&coordinator.state);
        settle(&coordinator, &runtime);
        assert_eq!(coordinator.target_offset(), 0);
        // 6000 px/s across 100 px of travel leaves plenty of residual.
        let handed = target.flung_with.get().expect("residual handed to child");
        assert!(handed > 0.0, "child fling uses content-scroll sign");
    }

    #[test]
    fn slow_upward_release_snaps_without_child_handoff() {
        let (coordinator, _, target, runtime) = coordinator();
        {
            let mut state = coordinator.state.borrow_mut();
            // Slow enough to decay before reaching the end bound.
            state.finish_drag(-30.0);
        }
        NestCoordinator::request_frame(&coordinator.state);
        settle(&coordinator, &runtime);
        assert_eq!(coordinator.target_offset(), 0);
        assert_eq!(target.flung_with.get(), None);
    }

    #[test]
    fn new_interaction_stops_an_active_fling() {
        let (coordinator, _, _, runtime) = coordinator();
        {
            let mut state = coordinator.state.borrow_mut();
            state.finish_drag(3_000.0);
        }
        NestCoordinator::request_frame(&coordinator.state);
        let handle = runtime.handle();
        handle.drain_frame_callbacks(0);
        handle.drain_frame_callbacks(16_000_000);
        assert_eq!(coordinator.motion_state(), MotionState::Flinging);

        coordinator.state.borrow_mut().begin_interaction();
        assert_eq!(coordinator.motion_state(), MotionState::Dragging);
        // The cancelled registration must not fire again.
        handle.drain_frame_callbacks(32_000_000);
        assert_eq!(coordinator.motion_state(), MotionState::Dragging);
    }

    #[test]
    fn child_fling_handoff_can_read_the_coordinator() {
        use std::cell::{Cell, RefCell};

        // A child that syncs with the coordinator from inside its fling
        // callback, the way a real list would before continuing the motion.
        struct ReentrantTarget {
            coordinator: RefCell<Option<Rc<NestCoordinator>>>,
            observed_offset: Cell<Option<i32>>,
        }

        impl OffsetElement for ReentrantTarget {
            fn offset_by(&self, _delta_px: i32) {}
        }

        impl ScrollChild for ReentrantTarget {
            fn can_scroll_up(&self) -> bool {
                false
            }

            fn fling(&self, _velocity: f32) {
                if let Some(coordinator) = self.coordinator.borrow().as_ref() {
                    self.observed_offset.set(Some(coordinator.target_offset()));
                }
            }
        }

        let runtime = Runtime::new();
        let target = Rc::new(ReentrantTarget {
            coordinator: RefCell::new(None),
            observed_offset: Cell::new(None),
        });
        let coordinator = Rc::new(
            NestCoordinator::new(
                CoordinatorConfig::new(50, 100),
                StubElement::new(),
                target.clone(),
                &runtime.handle(),
            )
            .unwrap(),
        );
        *target.coordinator.borrow_mut() = Some(Rc::clone(&coordinator));

        coordinator.state.borrow_mut().finish_drag(-6_000.0);
        NestCoordinator::request_frame(&coordinator.state);
        settle(&coordinator, &runtime);

        // The hand-off ran after the engine released its state, so the
        // callback saw the collapsed offset instead of panicking.
        assert_eq!(target.observed_offset.get(), Some(0));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let runtime = Runtime::new();
        let header = StubElement::new();
        let target = StubTarget::new();
        let mut config = CoordinatorConfig::new(50, 0);
        config.target_end_offset = 0;
        let result = NestCoordinator::new(config, header, target, &runtime.handle());
        assert!(matches!(
            result,
            Err(CoordinatorError::InvalidTargetRange { .. })
        ));
    }
}
