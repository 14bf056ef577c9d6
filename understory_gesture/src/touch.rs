// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch records and the small amount of geometry the engine derives from them.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// Identifier for one finger contact.
///
/// The host assigns identifiers; they only need to be stable for the life of a
/// contact and distinct among the touches that are down at the same time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TouchId(pub u64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One active finger contact.
#[derive(Clone, Debug, PartialEq)]
pub struct Touch {
    /// Host identifier of the contact.
    pub id: TouchId,
    /// Most recently reported location.
    pub location: Point,
    /// Location before the most recent move.
    pub prev_location: Point,
    /// First reported location.
    pub start_location: Point,
}

impl Touch {
    /// A new touch at `location`; current, previous, and start all coincide.
    pub const fn new(id: TouchId, location: Point) -> Self {
        Self {
            id,
            location,
            prev_location: location,
            start_location: location,
        }
    }

    /// Record a new location, keeping the old one as `prev_location`.
    pub fn move_to(&mut self, location: Point) {
        self.prev_location = self.location;
        self.location = location;
    }

    /// Straight-line distance between the current and the start location.
    pub fn distance_from_start(&self) -> f64 {
        self.location.distance(self.start_location)
    }

    /// Displacement between the start and the current location.
    pub fn translation(&self) -> Vec2 {
        self.location - self.start_location
    }
}

/// Average of `points`, or `None` if there are none.
pub(crate) fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
    let mut sum = Vec2::ZERO;
    let mut count = 0_u32;
    for p in points {
        sum += p.to_vec2();
        count += 1;
    }
    (count > 0).then(|| (sum / f64::from(count)).to_point())
}

/// Heading of the vector `a -> b` in degrees, in `(-180, 180]`.
pub(crate) fn heading_degrees(a: Point, b: Point) -> f64 {
    (b - a).atan2().to_degrees()
}

/// Continue `previous` (an unwrapped angle in degrees) with the raw heading `raw`.
///
/// Raw headings jump by 360° when the pair crosses the ±180° line. When the
/// previous heading sits in the outer half (|angle| > 90°) and the sign flips,
/// the jump is taken back out so the result tracks continuous motion.
pub(crate) fn unwrap_degrees(previous: f64, raw: f64) -> f64 {
    let wrapped = wrap_degrees(previous);
    let mut delta = raw - wrapped;
    if wrapped.abs() > 90.0 && wrapped.signum() != raw.signum() {
        if wrapped > 0.0 {
            delta += 360.0;
        } else {
            delta -= 360.0;
        }
    }
    previous + delta
}

/// Fold an unwrapped angle back into `(-180, 180]`.
fn wrap_degrees(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}
