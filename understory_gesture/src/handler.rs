// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The callback sink the engine delivers gestures to.
//!
//! A handler declares which kinds it takes through [`GestureHandler::kinds`];
//! the engine reads that once when a session starts and never evaluates the
//! other kinds. Every per-kind method defaults to [`GestureHandler::on_gesture`],
//! which in turn defaults to doing nothing, so a handler can either override the
//! methods it cares about or funnel everything through one place.

use core::fmt;

use crate::data::GestureData;
use crate::kind::{GestureKind, GestureKinds};
use crate::session::GestureSession;

/// Receiver of recognized gestures for one view.
pub trait GestureHandler {
    /// Kinds this handler takes.
    fn kinds(&self) -> GestureKinds;

    /// Fallback for every per-kind method that is not overridden.
    fn on_gesture(&mut self, data: &GestureData) {
        let _ = data;
    }

    /// A tap ended.
    fn on_tap(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// A long press was recognized.
    fn on_long_press(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// A swipe in any direction ended.
    fn on_swipe(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// An upward swipe ended.
    fn on_swipe_up(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// A downward swipe ended.
    fn on_swipe_down(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// A leftward swipe ended.
    fn on_swipe_left(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// A rightward swipe ended.
    fn on_swipe_right(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// Pan began, changed, ended, or was cancelled.
    fn on_pan(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// Pinch began, changed, ended, or was cancelled.
    fn on_pinch(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// Rotation began, changed, ended, or was cancelled.
    fn on_rotate(&mut self, data: &GestureData) {
        self.on_gesture(data);
    }

    /// Called after the engine finished processing each input, with the
    /// session as it stands (or `None` once it has been retired).
    ///
    /// Useful for drawing touch overlays and debugging recognition.
    fn on_update(&mut self, session: Option<&GestureSession>) {
        let _ = session;
    }
}

/// Route `data` to the method for its kind.
pub(crate) fn deliver<H: GestureHandler + ?Sized>(handler: &mut H, data: &GestureData) {
    match data.kind {
        GestureKind::Tap => handler.on_tap(data),
        GestureKind::LongPress => handler.on_long_press(data),
        GestureKind::Swipe => handler.on_swipe(data),
        GestureKind::SwipeUp => handler.on_swipe_up(data),
        GestureKind::SwipeDown => handler.on_swipe_down(data),
        GestureKind::SwipeLeft => handler.on_swipe_left(data),
        GestureKind::SwipeRight => handler.on_swipe_right(data),
        GestureKind::Pan => handler.on_pan(data),
        GestureKind::Pinch => handler.on_pinch(data),
        GestureKind::Rotate => handler.on_rotate(data),
    }
}

impl<H: GestureHandler + ?Sized> GestureHandler for &mut H {
    fn kinds(&self) -> GestureKinds {
        (**self).kinds()
    }

    fn on_gesture(&mut self, data: &GestureData) {
        (**self).on_gesture(data);
    }

    fn on_tap(&mut self, data: &GestureData) {
        (**self).on_tap(data);
    }

    fn on_long_press(&mut self, data: &GestureData) {
        (**self).on_long_press(data);
    }

    fn on_swipe(&mut self, data: &GestureData) {
        (**self).on_swipe(data);
    }

    fn on_swipe_up(&mut self, data: &GestureData) {
        (**self).on_swipe_up(data);
    }

    fn on_swipe_down(&mut self, data: &GestureData) {
        (**self).on_swipe_down(data);
    }

    fn on_swipe_left(&mut self, data: &GestureData) {
        (**self).on_swipe_left(data);
    }

    fn on_swipe_right(&mut self, data: &GestureData) {
        (**self).on_swipe_right(data);
    }

    fn on_pan(&mut self, data: &GestureData) {
        (**self).on_pan(data);
    }

    fn on_pinch(&mut self, data: &GestureData) {
        (**self).on_pinch(data);
    }

    fn on_rotate(&mut self, data: &GestureData) {
        (**self).on_rotate(data);
    }

    fn on_update(&mut self, session: Option<&GestureSession>) {
        (**self).on_update(session);
    }
}

/// A handler that sends every gesture of the declared kinds to one closure.
///
/// ```
/// use understory_gesture::{FnHandler, GestureData, GestureEngine, GestureKinds, TouchId};
/// use kurbo::Point;
///
/// let mut taps = 0;
/// let mut engine = GestureEngine::new(FnHandler::new(GestureKinds::TAP, |_: &GestureData| {
///     taps += 1;
/// }));
/// engine.on_begin(TouchId(1), Point::new(5.0, 5.0), 0).unwrap();
/// engine.on_end(TouchId(1), 80).unwrap();
/// drop(engine);
/// assert_eq!(taps, 1);
/// ```
pub struct FnHandler<F> {
    kinds: GestureKinds,
    f: F,
}

impl<F: FnMut(&GestureData)> FnHandler<F> {
    /// Deliver gestures of `kinds` to `f`.
    pub const fn new(kinds: GestureKinds, f: F) -> Self {
        Self { kinds, f }
    }

    /// Unwrap the closure.
    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F: FnMut(&GestureData)> GestureHandler for FnHandler<F> {
    fn kinds(&self) -> GestureKinds {
        self.kinds
    }

    fn on_gesture(&mut self, data: &GestureData) {
        (self.f)(data);
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("kinds", &self.kinds)
            .finish_non_exhaustive()
    }
}
