//! Shared stubs for engine and adapter tests.

use crate::{CoordinatorConfig, MotionState, NestCoordinator};
use nestcoord_core::Runtime;
use nestcoord_foundation::{OffsetElement, ScrollChild};
use std::cell::Cell;
use std::rc::Rc;

pub(crate) struct StubElement {
    pub position: Cell<i32>,
}

impl StubElement {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            position: Cell::new(0),
        })
    }
}

impl OffsetElement for StubElement {
    fn offset_by(&self, delta_px: i32) {
        self.position.set(self.position.get() + delta_px);
    }
}

pub(crate) struct StubTarget {
    pub position: Cell<i32>,
    pub scrollable_up: Cell<bool>,
    pub flung_with: Cell<Option<f32>>,
}

impl StubTarget {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            position: Cell::new(0),
            scrollable_up: Cell::new(false),
            flung_with: Cell::new(None),
        })
    }
}

impl OffsetElement for StubTarget {
    fn offset_by(&self, delta_px: i32) {
        self.position.set(self.position.get() + delta_px);
    }
}

impl ScrollChild for StubTarget {
    fn can_scroll_up(&self) -> bool {
        self.scrollable_up.get()
    }

    fn fling(&self, velocity: f32) {
        self.flung_with.set(Some(velocity));
    }
}

/// Coordinator over stub elements with header 50/0 and target 100/0.
pub(crate) fn coordinator() -> (NestCoordinator, Rc<StubElement>, Rc<StubTarget>, Runtime) {
    let runtime = Runtime::new();
    let header = StubElement::new();
    let target = StubTarget::new();
    let coordinator = NestCoordinator::new(
        CoordinatorConfig::new(50, 100),
        header.clone(),
        target.clone(),
        &runtime.handle(),
    )
    .unwrap();
    (coordinator, header, target, runtime)
}

/// Pumps frames at 16 ms until the coordinator stops requesting them.
pub(crate) fn settle(coordinator: &NestCoordinator, runtime: &Runtime) {
    let handle = runtime.handle();
    let mut now = 0u64;
    // Generous frame budget; every settle finishes well within it.
    for _ in 0..600 {
        if !handle.has_frame_callbacks() {
            break;
        }
        handle.drain_frame_callbacks(now);
        now += 16_000_000;
    }
    assert_eq!(coordinator.motion_state(), MotionState::Idle);
}
