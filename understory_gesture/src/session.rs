// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-contact state: the touches that are down and the geometry derived from them.
//!
//! A [`GestureSession`] lives from the first touch down to the last touch up.
//! It keeps every baseline (pan origin, pinch origin distance, rotation origin
//! angle) in a form that stays continuous when touches join or leave: whenever
//! the set of touches changes, the derived value (centroid, pair distance, pair
//! angle) jumps, and the jump is folded into the baseline instead of the
//! reported translation, scale, or rotation.

use hashbrown::HashMap;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::data::{GestureData, GestureDetail, GestureState, SwipeDirection};
use crate::error::GestureError;
use crate::kind::{GestureKind, GestureKinds};
use crate::phase::{Candidates, Phase};
use crate::touch::{Touch, TouchId, centroid, heading_degrees, unwrap_degrees};

/// Pair distances at or below this are treated as coincident touches.
const MIN_PAIR_DISTANCE: f64 = 1e-9;

/// Pan baseline and latest values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct PanState {
    /// Centroid the translation is measured from.
    pub(crate) origin: Point,
    pub(crate) translation: Vec2,
    pub(crate) velocity: Vec2,
}

/// Pinch baseline and latest values; only present with two or more touches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PinchState {
    pub(crate) origin_distance: f64,
    pub(crate) distance: f64,
    pub(crate) scale: f64,
    pub(crate) prev_scale: f64,
}

impl PinchState {
    fn new(distance: f64) -> Self {
        Self {
            origin_distance: distance,
            distance,
            scale: 1.0,
            prev_scale: 1.0,
        }
    }

    /// Make `distance` correspond to the current scale.
    ///
    /// A collapsed scale cannot be carried over and restarts at 1.
    fn rebaseline(&mut self, distance: f64) {
        if self.scale > MIN_PAIR_DISTANCE {
            self.origin_distance = distance / self.scale;
        } else {
            self.origin_distance = distance;
            self.scale = 1.0;
        }
    }
}

/// Rotation baseline and latest values, in degrees; only present with two or
/// more touches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RotationState {
    pub(crate) origin_angle: f64,
    /// Unwrapped heading of the first two touches.
    pub(crate) angle: f64,
    pub(crate) rotation: f64,
    pub(crate) prev_rotation: f64,
}

/// One continuous multi-touch contact.
#[derive(Clone, Debug)]
pub struct GestureSession {
    touches: HashMap<TouchId, Touch>,
    /// Arrival order of the touches in `touches`.
    order: SmallVec<[TouchId; 4]>,
    max_touches: usize,
    start_time: u64,
    last_time: u64,
    duration: u64,
    centroid: Point,
    prev_centroid: Point,
    /// Kinds the handler declared when the session started.
    pub(crate) kinds: GestureKinds,
    pub(crate) candidates: Candidates,
    /// Some touch went past the movement threshold.
    pub(crate) moved: bool,
    pub(crate) pan: PanState,
    pub(crate) pinch: Option<PinchState>,
    pub(crate) rotation: Option<RotationState>,
    pub(crate) swipe_direction: Option<SwipeDirection>,
}

impl GestureSession {
    pub(crate) fn new(kinds: GestureKinds, time: u64) -> Self {
        Self {
            touches: HashMap::new(),
            order: SmallVec::new(),
            max_touches: 0,
            start_time: time,
            last_time: time,
            duration: 0,
            centroid: Point::ZERO,
            prev_centroid: Point::ZERO,
            kinds,
            candidates: Candidates::new(kinds),
            moved: false,
            pan: PanState::default(),
            pinch: None,
            rotation: None,
            swipe_direction: None,
        }
    }

    /// Touches that are down, in arrival order.
    pub fn touches(&self) -> impl Iterator<Item = &Touch> + '_ {
        self.order.iter().filter_map(|id| self.touches.get(id))
    }

    /// The touch with `id`, if it is down.
    pub fn touch(&self, id: TouchId) -> Option<&Touch> {
        self.touches.get(&id)
    }

    /// Number of touches that are down.
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Most touches down at the same time during this session.
    pub fn max_touches(&self) -> usize {
        self.max_touches
    }

    /// Host time of the first touch.
    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// Milliseconds between the first touch and the latest input.
    pub fn duration_ms(&self) -> u64 {
        self.duration
    }

    /// Centroid of the touches as of the latest input.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Centroid before the latest move.
    pub fn prev_centroid(&self) -> Point {
        self.prev_centroid
    }

    /// Phase of `kind` in this session.
    pub fn phase(&self, kind: GestureKind) -> Phase {
        self.candidates.get(kind)
    }

    /// Phases of every kind.
    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    /// Centroid translation since the start of the contact.
    pub fn translation(&self) -> Vec2 {
        self.pan.translation
    }

    /// Centroid velocity in units per second.
    pub fn velocity(&self) -> Vec2 {
        self.pan.velocity
    }

    /// Scale of the first two touches, while there are at least two.
    pub fn scale(&self) -> Option<f64> {
        self.pinch.map(|p| p.scale)
    }

    /// Scale before the latest move.
    pub fn prev_scale(&self) -> Option<f64> {
        self.pinch.map(|p| p.prev_scale)
    }

    /// Current distance between the first two touches.
    pub fn pair_distance(&self) -> Option<f64> {
        self.pinch.map(|p| p.distance)
    }

    /// Rotation of the first two touches in degrees, while there are at least two.
    pub fn rotation(&self) -> Option<f64> {
        self.rotation.map(|r| r.rotation)
    }

    /// Rotation before the latest move.
    pub fn prev_rotation(&self) -> Option<f64> {
        self.rotation.map(|r| r.prev_rotation)
    }

    /// Kinds the handler declared when this session started.
    pub fn kinds(&self) -> GestureKinds {
        self.kinds
    }

    /// Direction of the recognized swipe, once classified.
    pub fn swipe_direction(&self) -> Option<SwipeDirection> {
        self.swipe_direction
    }

    /// No candidate can deliver anything more in this session.
    pub fn is_out_of_business(&self) -> bool {
        !self.candidates.any_live()
    }

    /// Update the clock from a host timestamp.
    pub(crate) fn set_time(&mut self, time: u64) {
        self.duration = time.saturating_sub(self.start_time);
    }

    /// Update the clock from the timestamp of a touch event.
    ///
    /// Velocity is measured from the last touch event, so this also moves
    /// that mark; [`Self::set_time`] alone does not.
    pub(crate) fn stamp(&mut self, time: u64) {
        self.set_time(time);
        self.last_time = time;
    }

    /// Register a new touch and re-base the derived geometry.
    pub(crate) fn add_touch(
        &mut self,
        id: TouchId,
        location: Point,
        time: u64,
    ) -> Result<(), GestureError> {
        if self.touches.contains_key(&id) {
            return Err(GestureError::DuplicateTouch(id));
        }
        self.stamp(time);
        let first = self.touches.is_empty();
        self.touches.insert(id, Touch::new(id, location));
        self.order.push(id);
        self.max_touches = self.max_touches.max(self.touches.len());
        if first {
            self.centroid = location;
            self.prev_centroid = location;
            self.pan.origin = location;
        }
        self.rebase();
        Ok(())
    }

    /// Drop a touch. Geometry is left as it was until [`Self::rebase`].
    pub(crate) fn remove_touch(&mut self, id: TouchId) -> Result<Touch, GestureError> {
        let touch = self
            .touches
            .remove(&id)
            .ok_or(GestureError::UnknownTouch(id))?;
        self.order.retain(|t| *t != id);
        Ok(touch)
    }

    /// Move a touch and update every derived value.
    ///
    /// Returns the touch's distance from its start location.
    pub(crate) fn move_touch(
        &mut self,
        id: TouchId,
        location: Point,
        time: u64,
    ) -> Result<f64, GestureError> {
        let touch = self
            .touches
            .get_mut(&id)
            .ok_or(GestureError::UnknownTouch(id))?;
        touch.move_to(location);
        let distance = touch.distance_from_start();

        self.set_time(time);
        self.prev_centroid = self.centroid;
        if let Some(c) = centroid(self.touches.values().map(|t| t.location)) {
            self.centroid = c;
        }
        self.pan.translation = self.centroid - self.pan.origin;
        let elapsed = time.saturating_sub(self.last_time);
        if elapsed > 0 {
            let per_second = 1000.0 / elapsed as f64;
            self.pan.velocity = (self.centroid - self.prev_centroid) * per_second;
        }
        self.last_time = time;

        if let Some((a, b)) = self.first_pair() {
            let d = a.distance(b);
            let raw = heading_degrees(a, b);
            if let Some(pinch) = &mut self.pinch {
                pinch.distance = d;
                pinch.prev_scale = pinch.scale;
                if pinch.origin_distance > MIN_PAIR_DISTANCE {
                    pinch.scale = d / pinch.origin_distance;
                } else if d > MIN_PAIR_DISTANCE {
                    pinch.rebaseline(d);
                }
            }
            if let Some(rot) = &mut self.rotation {
                rot.angle = unwrap_degrees(rot.angle, raw);
                rot.prev_rotation = rot.rotation;
                rot.rotation = rot.angle - rot.origin_angle;
            }
        }
        Ok(distance)
    }

    /// Recompute centroid and pair geometry after the touch set changed and
    /// fold the jumps into the baselines.
    ///
    /// With fewer than two touches the pinch and rotation state is dropped;
    /// a returning second touch starts them over at scale 1 and 0°.
    pub(crate) fn rebase(&mut self) {
        let Some(c) = centroid(self.touches.values().map(|t| t.location)) else {
            return;
        };
        self.pan.origin += c - self.centroid;
        self.centroid = c;
        self.prev_centroid = c;
        self.pan.translation = self.centroid - self.pan.origin;

        let Some((a, b)) = self.first_pair() else {
            self.pinch = None;
            self.rotation = None;
            return;
        };
        let d = a.distance(b);
        let raw = heading_degrees(a, b);
        self.pinch = Some(match self.pinch {
            Some(mut p) => {
                if d > MIN_PAIR_DISTANCE {
                    p.rebaseline(d);
                }
                p.distance = d;
                p
            }
            None => PinchState::new(d),
        });
        self.rotation = Some(match self.rotation {
            Some(r) => RotationState {
                origin_angle: raw - r.rotation,
                angle: raw,
                ..r
            },
            None => RotationState {
                origin_angle: raw,
                angle: raw,
                rotation: 0.0,
                prev_rotation: 0.0,
            },
        });
    }

    /// Locations of the first two touches in arrival order.
    fn first_pair(&self) -> Option<(Point, Point)> {
        let mut it = self.touches().map(|t| t.location);
        Some((it.next()?, it.next()?))
    }

    /// Build the record handed to the handler for `kind`.
    pub(crate) fn data(&self, kind: GestureKind, state: GestureState) -> GestureData {
        let touch_count = if self.touches.is_empty() {
            self.max_touches
        } else {
            self.touches.len()
        };
        GestureData {
            kind,
            state,
            location: self.centroid,
            touch_count,
            detail: self.detail(kind),
        }
    }

    fn detail(&self, kind: GestureKind) -> GestureDetail {
        match kind {
            GestureKind::Tap | GestureKind::LongPress => GestureDetail::None,
            GestureKind::Swipe
            | GestureKind::SwipeUp
            | GestureKind::SwipeDown
            | GestureKind::SwipeLeft
            | GestureKind::SwipeRight => self
                .swipe_direction
                .map_or(GestureDetail::None, |direction| GestureDetail::Swipe {
                    direction,
                }),
            GestureKind::Pan => GestureDetail::Pan {
                translation: self.pan.translation,
                velocity: self.pan.velocity,
            },
            GestureKind::Pinch => GestureDetail::Pinch {
                scale: self.pinch.map_or(1.0, |p| p.scale),
            },
            GestureKind::Rotate => GestureDetail::Rotate {
                degrees: self.rotation.map_or(0.0, |r| r.rotation),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn session() -> GestureSession {
        GestureSession::new(GestureKinds::all(), 0)
    }

    #[test]
    fn touches_keep_arrival_order() {
        let mut s = session();
        for (i, x) in [30.0, 10.0, 20.0].into_iter().enumerate() {
            s.add_touch(TouchId(100 - i as u64), Point::new(x, 0.0), 0).unwrap();
        }
        let ids: alloc::vec::Vec<_> = s.touches().map(|t| t.id).collect();
        assert_eq!(ids, [TouchId(100), TouchId(99), TouchId(98)]);
        assert_eq!(s.max_touches(), 3);

        s.remove_touch(TouchId(99)).unwrap();
        let ids: alloc::vec::Vec<_> = s.touches().map(|t| t.id).collect();
        assert_eq!(ids, [TouchId(100), TouchId(98)]);
        assert_eq!(s.max_touches(), 3);
    }

    #[test]
    fn duplicate_and_unknown_touches_are_errors() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::ZERO, 0).unwrap();
        assert_eq!(
            s.add_touch(TouchId(1), Point::ZERO, 0),
            Err(GestureError::DuplicateTouch(TouchId(1)))
        );
        assert_eq!(
            s.move_touch(TouchId(2), Point::ZERO, 5),
            Err(GestureError::UnknownTouch(TouchId(2)))
        );
        assert_eq!(
            s.remove_touch(TouchId(2)).map(|_| ()),
            Err(GestureError::UnknownTouch(TouchId(2)))
        );
    }

    #[test]
    fn translation_survives_a_joining_touch() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.move_touch(TouchId(1), Point::new(40.0, 0.0), 10).unwrap();
        assert_eq!(s.translation(), Vec2::new(40.0, 0.0));

        s.add_touch(TouchId(2), Point::new(140.0, 100.0), 10).unwrap();
        assert_eq!(s.centroid(), Point::new(90.0, 50.0));
        assert_eq!(s.translation(), Vec2::new(40.0, 0.0));

        // Moving the new touch moves the centroid by half as much.
        s.move_touch(TouchId(2), Point::new(160.0, 100.0), 20).unwrap();
        assert_eq!(s.translation(), Vec2::new(50.0, 0.0));
    }

    #[test]
    fn scale_and_rotation_start_with_the_second_touch() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        assert_eq!(s.scale(), None);
        s.add_touch(TouchId(2), Point::new(100.0, 0.0), 0).unwrap();
        assert_eq!(s.scale(), Some(1.0));
        assert_eq!(s.rotation(), Some(0.0));

        s.move_touch(TouchId(2), Point::new(0.0, 200.0), 10).unwrap();
        assert!(approx(s.scale().unwrap(), 2.0));
        assert!(approx(s.rotation().unwrap(), 90.0));
    }

    #[test]
    fn third_touch_leaves_scale_and_rotation_alone() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.add_touch(TouchId(2), Point::new(100.0, 0.0), 0).unwrap();
        s.move_touch(TouchId(2), Point::new(150.0, 0.0), 10).unwrap();
        s.add_touch(TouchId(3), Point::new(50.0, 50.0), 10).unwrap();

        assert!(approx(s.scale().unwrap(), 1.5));
        assert!(approx(s.rotation().unwrap(), 0.0));
    }

    #[test]
    fn pair_change_is_folded_into_baselines() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.add_touch(TouchId(2), Point::new(100.0, 0.0), 0).unwrap();
        s.add_touch(TouchId(3), Point::new(0.0, 50.0), 0).unwrap();
        s.move_touch(TouchId(2), Point::new(0.0, 200.0), 10).unwrap();
        let before = (s.scale().unwrap(), s.rotation().unwrap());

        // The first pair becomes (1, 3): distance 50 at 90°.
        s.remove_touch(TouchId(2)).unwrap();
        s.rebase();
        assert!(approx(s.scale().unwrap(), before.0));
        assert!(approx(s.rotation().unwrap(), before.1));

        // And further motion is measured against the new pair.
        s.move_touch(TouchId(3), Point::new(0.0, 100.0), 20).unwrap();
        assert!(approx(s.scale().unwrap(), before.0 * 2.0));
    }

    #[test]
    fn dropping_below_two_touches_clears_pair_state() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.add_touch(TouchId(2), Point::new(100.0, 0.0), 0).unwrap();
        s.move_touch(TouchId(2), Point::new(200.0, 0.0), 10).unwrap();
        s.remove_touch(TouchId(2)).unwrap();
        s.rebase();
        assert_eq!(s.scale(), None);
        assert_eq!(s.rotation(), None);

        s.add_touch(TouchId(3), Point::new(50.0, 0.0), 10).unwrap();
        assert_eq!(s.scale(), Some(1.0));
    }

    #[test]
    fn rotation_is_continuous_across_the_seam() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.add_touch(TouchId(2), Point::new(-100.0, 10.0), 0).unwrap();
        // Heading goes from just under 180° to just over -180°.
        s.move_touch(TouchId(2), Point::new(-100.0, -10.0), 10).unwrap();
        let r = s.rotation().unwrap();
        assert!(r > 0.0 && r < 20.0, "rotation jumped to {r}");
    }

    #[test]
    fn velocity_is_per_second() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.move_touch(TouchId(1), Point::new(10.0, 0.0), 100).unwrap();
        assert!(approx(s.velocity().x, 100.0));
        // Same timestamp: the last velocity is kept.
        s.move_touch(TouchId(1), Point::new(30.0, 0.0), 100).unwrap();
        assert!(approx(s.velocity().x, 100.0));
    }

    #[test]
    fn velocity_counts_from_a_joining_touch() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.move_touch(TouchId(1), Point::new(10.0, 0.0), 10).unwrap();
        s.add_touch(TouchId(2), Point::new(100.0, 0.0), 1000).unwrap();
        assert_eq!(s.duration_ms(), 1000);

        // Half a unit of centroid motion in 1ms.
        s.move_touch(TouchId(1), Point::new(11.0, 0.0), 1001).unwrap();
        assert!(approx(s.velocity().x, 500.0), "velocity {:?}", s.velocity());
    }

    #[test]
    fn collapsed_scale_restarts_on_pair_change() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.add_touch(TouchId(2), Point::new(100.0, 0.0), 0).unwrap();
        s.add_touch(TouchId(3), Point::new(50.0, 0.0), 0).unwrap();
        s.move_touch(TouchId(2), Point::new(0.0, 0.0), 10).unwrap();
        assert_eq!(s.scale(), Some(0.0));

        // The first pair becomes (2, 3), 50 units apart.
        s.remove_touch(TouchId(1)).unwrap();
        s.rebase();
        assert_eq!(s.scale(), Some(1.0));

        s.move_touch(TouchId(3), Point::new(100.0, 0.0), 20).unwrap();
        assert!(approx(s.scale().unwrap(), 2.0));
    }

    #[test]
    fn terminal_data_reports_max_touches() {
        let mut s = session();
        s.add_touch(TouchId(1), Point::new(0.0, 0.0), 0).unwrap();
        s.add_touch(TouchId(2), Point::new(10.0, 0.0), 0).unwrap();
        s.remove_touch(TouchId(1)).unwrap();
        s.remove_touch(TouchId(2)).unwrap();
        let d = s.data(GestureKind::Tap, GestureState::Ended);
        assert_eq!(d.touch_count, 2);
        assert_eq!(d.location, Point::new(5.0, 0.0));
    }
}
