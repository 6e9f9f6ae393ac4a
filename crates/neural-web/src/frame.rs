//! The `requestAnimationFrame` chain.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::MountError;

/// Source of frame callbacks. `Window` in the browser.
pub trait FrameScheduler {
    /// Host-side handle owning the frame callback.
    type Callback;

    fn wrap(&self, f: Box<dyn FnMut(f64)>) -> Self::Callback;

    /// Schedule `callback` for the next frame and return its request id.
    fn request(&self, callback: &Self::Callback) -> Result<i32, MountError>;

    fn cancel(&self, id: i32);
}

impl FrameScheduler for Window {
    type Callback = Closure<dyn FnMut(f64)>;

    fn wrap(&self, f: Box<dyn FnMut(f64)>) -> Self::Callback {
        Closure::wrap(f)
    }

    fn request(&self, callback: &Self::Callback) -> Result<i32, MountError> {
        self.request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| MountError::Schedule(format!("{:?}", e)))
    }

    fn cancel(&self, id: i32) {
        let _ = self.cancel_animation_frame(id);
    }
}

/// A self-rescheduling frame chain.
///
/// Holds the callback and the pending request id. Dropping the loop cancels
/// the pending request before the callback is released, so the host never
/// calls into a freed callback.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<S::Callback>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
    /// Start the chain. `on_frame` runs once per frame and returns whether
    /// another frame should be requested.
    pub fn start(
        scheduler: S,
        mut on_frame: impl FnMut(f64) -> bool + 'static,
    ) -> Result<Rc<Self>, MountError> {
        let frame = Rc::new(Self {
            scheduler,
            pending: Cell::new(None),
            callback: RefCell::new(None),
        });

        // Weak, so the callback never keeps its own loop alive.
        let weak: Weak<Self> = Rc::downgrade(&frame);
        let callback = frame.scheduler.wrap(Box::new(move |now_ms: f64| {
            let Some(frame) = weak.upgrade() else {
                return;
            };
            frame.pending.set(None);
            if on_frame(now_ms) {
                if let Err(e) = frame.schedule() {
                    log::warn!("neural canvas stalled: {}", e);
                }
            }
        }));
        *frame.callback.borrow_mut() = Some(callback);
        frame.schedule()?;
        Ok(frame)
    }
}

impl<S: FrameScheduler> FrameLoop<S> {
    fn schedule(&self) -> Result<(), MountError> {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let id = self.scheduler.request(callback)?;
        self.pending.set(Some(id));
        Ok(())
    }

    /// Cancel the pending frame and release the callback. Idempotent.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        self.callback.borrow_mut().take();
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
