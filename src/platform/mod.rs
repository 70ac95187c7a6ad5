//! Platform abstraction layer
//!
//! Ports the session depends on:
//! - Speech (text-to-speech for the target word)
//! - Frame scheduling (requestAnimationFrame on web)

use std::cell::RefCell;
use std::rc::Rc;

/// Fire-and-forget text-to-speech
pub trait Speech {
    /// Pronounce `text`, cancelling any utterance still in flight
    fn speak(&mut self, text: &str, rate: f32);
    /// Stop any utterance in flight
    fn cancel(&mut self) {}
}

/// Speech that does nothing (native builds, browsers without synthesis)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeech;

impl Speech for NullSpeech {
    fn speak(&mut self, text: &str, _rate: f32) {
        log::debug!("(silent) {}", text);
    }
}

/// Speech that records what it was asked to say (tests, headless runs)
#[derive(Debug, Default, Clone)]
pub struct RecordingSpeech {
    spoken: Rc<RefCell<Vec<String>>>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything spoken so far, oldest first
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.borrow().clone()
    }
}

impl Speech for RecordingSpeech {
    fn speak(&mut self, text: &str, _rate: f32) {
        self.spoken.borrow_mut().push(text.to_string());
    }
}

/// Handle of a scheduled frame callback
pub type FrameId = i32;

/// Schedules the next frame callback
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
}

#[derive(Debug, Default)]
struct ManualFrames {
    next_id: FrameId,
    pending: Option<FrameId>,
    requested: u32,
    cancelled: u32,
}

/// Scheduler driven by hand: the owner polls `take_pending` and calls the
/// session's `on_frame` itself. Clones share the same queue.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    frames: Rc<RefCell<ManualFrames>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently pending frame, if any
    pub fn pending(&self) -> Option<FrameId> {
        self.frames.borrow().pending
    }

    /// Take the pending frame so it can be delivered
    pub fn take_pending(&self) -> Option<FrameId> {
        self.frames.borrow_mut().pending.take()
    }

    /// Total frames requested so far
    pub fn requested(&self) -> u32 {
        self.frames.borrow().requested
    }

    /// Total frames cancelled so far
    pub fn cancelled(&self) -> u32 {
        self.frames.borrow().cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameId {
        let mut frames = self.frames.borrow_mut();
        frames.next_id += 1;
        let id = frames.next_id;
        frames.pending = Some(id);
        frames.requested += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let mut frames = self.frames.borrow_mut();
        if frames.pending == Some(id) {
            frames.pending = None;
            frames.cancelled += 1;
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub mod web;
