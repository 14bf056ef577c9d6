// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture disambiguation engine.
//!
//! [`GestureEngine`] owns a handler and at most one [`GestureSession`]. The host
//! feeds it touch input through [`on_begin`](GestureEngine::on_begin),
//! [`on_move`](GestureEngine::on_move), and [`on_end`](GestureEngine::on_end)
//! (plus [`tick`](GestureEngine::tick) when time passes without input), and the
//! engine calls the handler synchronously for every candidate that changes phase.
//!
//! ## Recognition rules
//!
//! - Tap, long press, and the swipes are *discrete*: each fires once, with
//!   state `Ended`, and confirming one fails every other candidate.
//! - Pan, pinch, and rotate are *continuous*: `Began`, `Changed`…, `Ended`.
//!   They are only evaluated once no discrete candidate is possible, and they
//!   can be active at the same time.
//! - A touch that moves farther than the movement threshold rules out tap and
//!   long press; a contact longer than the tap threshold rules out tap and
//!   swipes; a second touch rules out swipes.
//! - Pinch and rotate follow the first two touches in arrival order. When fewer
//!   than two remain they end, and then either re-arm or retire according to
//!   [`RearmPolicy`](crate::RearmPolicy).
//! - When the last touch lifts: a possible tap fires; otherwise a possible long
//!   press past its threshold fires; otherwise, if something moved, the swipe is
//!   classified by the dominant axis of the net translation and delivered per
//!   [`SwipePolicy`]. Active continuous gestures end.

use kurbo::Point;

use crate::config::{GestureConfig, SwipePolicy};
use crate::data::{GestureState, SwipeDirection};
use crate::error::GestureError;
use crate::handler::{GestureHandler, deliver};
use crate::kind::GestureKind;
use crate::phase::Phase;
use crate::session::GestureSession;
use crate::touch::TouchId;

/// Kinds that exclude each other and gate the continuous ones.
const DISCRETE: [GestureKind; 7] = [
    GestureKind::Tap,
    GestureKind::LongPress,
    GestureKind::Swipe,
    GestureKind::SwipeUp,
    GestureKind::SwipeDown,
    GestureKind::SwipeLeft,
    GestureKind::SwipeRight,
];

/// Incremental recognizer for one view.
///
/// Events must arrive in temporal order; timestamps are host milliseconds.
#[derive(Debug)]
pub struct GestureEngine<H> {
    config: GestureConfig,
    handler: H,
    session: Option<GestureSession>,
}

impl<H: GestureHandler> GestureEngine<H> {
    /// An engine with default thresholds delivering to `handler`.
    pub fn new(handler: H) -> Self {
        Self::with_config(handler, GestureConfig::default())
    }

    /// An engine with the given thresholds and policies.
    pub fn with_config(handler: H, config: GestureConfig) -> Self {
        Self {
            config,
            handler,
            session: None,
        }
    }

    /// Current thresholds and policies.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the thresholds and policies; applies from the next input on.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// The handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The handler, mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Give back the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// The live session, if a contact is in progress.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// `true` when no contact is in progress.
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// A touch went down at `location`.
    ///
    /// Starts a session if none is live. Fails if `id` is already down.
    pub fn on_begin(
        &mut self,
        id: TouchId,
        location: Point,
        time: u64,
    ) -> Result<(), GestureError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(%id, x = location.x, y = location.y, time, "touch began");
        let result = self.begin(id, location, time);
        self.settle(result)
    }

    /// A touch that is down moved to `location`.
    pub fn on_move(
        &mut self,
        id: TouchId,
        location: Point,
        time: u64,
    ) -> Result<(), GestureError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(%id, x = location.x, y = location.y, time, "touch moved");
        let result = self.move_touch(id, location, time);
        self.settle(result)
    }

    /// A touch that is down lifted.
    ///
    /// When it was the last one, terminal gestures fire and the session retires.
    pub fn on_end(&mut self, id: TouchId, time: u64) -> Result<(), GestureError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(%id, time, "touch ended");
        let result = self.end(id, time);
        self.settle(result)
    }

    /// Time passed without touch input.
    ///
    /// Applies the tap and swipe time-outs and recognizes a long press on a
    /// contact that has not moved, which some hosts never report motion for.
    pub fn tick(&mut self, time: u64) {
        let Self {
            config,
            handler,
            session,
        } = self;
        if let Some(s) = session.as_mut() {
            s.set_time(time);
            if !s.is_out_of_business() {
                apply_clock(s, handler, config);
            }
        }
        self.handler.on_update(self.session.as_ref());
    }

    /// The host cancelled the contact.
    ///
    /// Active continuous gestures receive [`GestureState::Cancelled`]; everything
    /// else is dropped silently along with the session.
    pub fn cancel(&mut self) {
        if let Some(s) = self.session.take() {
            for kind in GestureKind::CONTINUOUS {
                if s.phase(kind).is_active() {
                    let data = s.data(kind, GestureState::Cancelled);
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%data, "gesture");
                    deliver(&mut self.handler, &data);
                }
            }
            #[cfg(feature = "tracing")]
            tracing::debug!("session cancelled");
        }
        self.handler.on_update(None);
    }

    /// Drop the session on a contract violation and report the new state.
    fn settle(&mut self, result: Result<(), GestureError>) -> Result<(), GestureError> {
        if let Err(_err) = &result {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "dropping gesture session");
            self.session = None;
        }
        self.handler.on_update(self.session.as_ref());
        result
    }

    fn begin(&mut self, id: TouchId, location: Point, time: u64) -> Result<(), GestureError> {
        let kinds = self.handler.kinds();
        let s = self.session.get_or_insert_with(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(?kinds, time, "session started");
            GestureSession::new(kinds, time)
        });
        s.add_touch(id, location, time)?;
        if s.touch_count() > 1 {
            fail(s, &GestureKind::SWIPES);
        }
        Ok(())
    }

    fn move_touch(&mut self, id: TouchId, location: Point, time: u64) -> Result<(), GestureError> {
        let Self {
            config,
            handler,
            session,
        } = self;
        let s = session.as_mut().ok_or(GestureError::UnknownTouch(id))?;
        let distance = s.move_touch(id, location, time)?;
        if s.is_out_of_business() {
            return Ok(());
        }
        if distance > config.movement_threshold {
            s.moved = true;
            fail(s, &[GestureKind::Tap, GestureKind::LongPress]);
        }
        if apply_clock(s, handler, config) {
            return Ok(());
        }
        if !s.candidates.none_possible(&DISCRETE) {
            return Ok(());
        }
        transition(s, handler, GestureKind::Pan, Phase::advance);
        if s.touch_count() >= 2 {
            transition(s, handler, GestureKind::Pinch, Phase::advance);
            transition(s, handler, GestureKind::Rotate, Phase::advance);
        }
        Ok(())
    }

    fn end(&mut self, id: TouchId, time: u64) -> Result<(), GestureError> {
        let Self {
            config,
            handler,
            session,
        } = self;
        let s = session.as_mut().ok_or(GestureError::UnknownTouch(id))?;
        s.remove_touch(id)?;
        s.stamp(time);
        let drained = s.touch_count() == 0;

        if !s.is_out_of_business() {
            if s.touch_count() < 2 {
                for kind in [GestureKind::Pinch, GestureKind::Rotate] {
                    if transition(s, handler, kind, finish_active) {
                        let _ = s.candidates.step(kind, |p| p.rearm(config.rearm_policy));
                    }
                }
            }
            s.rebase();
            if drained {
                drain(s, handler, config);
            }
        }

        if drained {
            #[cfg(feature = "tracing")]
            tracing::debug!(duration_ms = s.duration_ms(), "session retired");
            *session = None;
        }
        Ok(())
    }
}

/// `finish`, but only for a candidate that has begun.
fn finish_active(phase: Phase) -> Option<Phase> {
    if phase.is_active() {
        phase.finish()
    } else {
        None
    }
}

/// Step `kind` and deliver the event for the new phase, if any.
///
/// Returns whether the phase changed.
fn transition<H: GestureHandler>(
    s: &mut GestureSession,
    handler: &mut H,
    kind: GestureKind,
    step: impl FnOnce(Phase) -> Option<Phase>,
) -> bool {
    let Some(phase) = s.candidates.step(kind, step) else {
        return false;
    };
    let state = match phase {
        Phase::Began => GestureState::Began,
        Phase::Changed => GestureState::Changed,
        Phase::Ended => GestureState::Ended,
        Phase::NotApplicable | Phase::Possible | Phase::Failed => return true,
    };
    let data = s.data(kind, state);
    #[cfg(feature = "tracing")]
    tracing::debug!(%data, "gesture");
    deliver(handler, &data);
    true
}

/// Rule out every possible kind in `kinds`.
fn fail(s: &mut GestureSession, kinds: &[GestureKind]) {
    #[cfg(feature = "tracing")]
    for &kind in kinds {
        if s.phase(kind).is_possible() {
            tracing::debug!(%kind, "candidate failed");
        }
    }
    s.candidates.fail_all(kinds);
}

/// Deliver a discrete gesture and fail everything else that is still possible.
fn confirm<H: GestureHandler>(s: &mut GestureSession, handler: &mut H, kind: GestureKind) {
    transition(s, handler, kind, Phase::finish);
    fail(s, &GestureKind::ALL);
}

/// Apply the time-based rules. Returns `true` if a long press fired.
fn apply_clock<H: GestureHandler>(
    s: &mut GestureSession,
    handler: &mut H,
    config: &GestureConfig,
) -> bool {
    if s.duration_ms() > config.tap_duration_ms {
        fail(s, &[GestureKind::Tap]);
        fail(s, &GestureKind::SWIPES);
    }
    if s.candidates.is_possible(GestureKind::LongPress)
        && s.duration_ms() > config.long_press_duration_ms
    {
        confirm(s, handler, GestureKind::LongPress);
        return true;
    }
    false
}

/// The last touch lifted: deliver terminal gestures.
fn drain<H: GestureHandler>(s: &mut GestureSession, handler: &mut H, config: &GestureConfig) {
    if apply_clock(s, handler, config) {
        return;
    }
    if s.candidates.is_possible(GestureKind::Tap) {
        confirm(s, handler, GestureKind::Tap);
        return;
    }
    if s.moved && !s.candidates.none_possible(&GestureKind::SWIPES) {
        let direction = SwipeDirection::from_translation(s.translation());
        s.swipe_direction = Some(direction);
        let directional = direction.kind();
        transition(s, handler, directional, Phase::finish);
        let generic = match config.swipe_policy {
            SwipePolicy::Both => true,
            SwipePolicy::PreferDirectional => !s.kinds.has(directional),
        };
        if generic {
            transition(s, handler, GestureKind::Swipe, Phase::finish);
        }
        fail(s, &GestureKind::ALL);
        return;
    }
    for kind in GestureKind::CONTINUOUS {
        transition(s, handler, kind, finish_active);
    }
    fail(s, &GestureKind::ALL);
}
