//! Browser implementations of the platform ports

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameId, FrameScheduler};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` scheduler. The driver installs the frame callback
/// once; clones share it.
#[derive(Clone, Default)]
pub struct AnimationFrameScheduler {
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the function called with the frame timestamp (ms)
    pub fn set_callback(&self, callback: impl FnMut(f64) + 'static) {
        *self.callback.borrow_mut() = Some(Closure::new(callback));
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> FrameId {
        let Some(window) = web_sys::window() else {
            return 0;
        };
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::warn!("Frame requested before a callback was installed");
            return 0;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                0
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}
