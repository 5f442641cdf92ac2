//! Single-threaded frame callback registry.

use crate::FrameClock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Identifies a registered frame callback so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameCallbackId(u64);

type FrameCallback = Box<dyn FnMut(u64)>;

struct RuntimeInner {
    next_id: u64,
    callbacks: FxHashMap<u64, FrameCallback>,
    /// Registration order, so callbacks within one frame run deterministically.
    order: SmallVec<[u64; 8]>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: FxHashMap::default(),
            order: SmallVec::new(),
        }
    }
}

/// Owner of the frame callback registry.
///
/// All state transitions in the engine happen on the thread that owns the
/// runtime; nothing here is `Send`.
pub struct Runtime {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RuntimeInner::new())),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheap clonable handle to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl RuntimeHandle {
    /// Registers a callback for the next frame. Returns `None` only if the
    /// callback could not be stored (never happens today; the `Option` keeps
    /// the registration API honest about inactive handles).
    pub fn register_frame_callback(
        &self,
        callback: impl FnMut(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.callbacks.insert(id, Box::new(callback));
        inner.order.push(id);
        Some(FrameCallbackId(id))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut inner = self.inner.borrow_mut();
        if inner.callbacks.remove(&id.0).is_some() {
            inner.order.retain(|pending| *pending != id.0);
        }
    }

    /// True while at least one callback is waiting for a frame.
    ///
    /// Hosts poll this to decide whether another repaint must be requested.
    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.borrow().callbacks.is_empty()
    }

    /// Delivers one frame to every callback registered before this call.
    ///
    /// Callbacks registered while draining are deferred to the next frame,
    /// which keeps per-frame work bounded and ordering strict: input
    /// callbacks finish fully before the tick they schedule is considered.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let (ids, mut callbacks) = {
            let mut inner = self.inner.borrow_mut();
            let ids = std::mem::take(&mut inner.order);
            let callbacks = std::mem::take(&mut inner.callbacks);
            (ids, callbacks)
        };
        for id in ids {
            if let Some(mut callback) = callbacks.remove(&id) {
                callback(frame_time_nanos);
            }
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
