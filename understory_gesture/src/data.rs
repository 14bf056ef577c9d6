// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records delivered to handlers.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::kind::GestureKind;

/// State carried by a delivered gesture event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// First event of a continuous gesture.
    Began,
    /// Subsequent event of a continuous gesture.
    Changed,
    /// Terminal event. Discrete gestures only ever report this.
    Ended,
    /// The host cancelled the contact while the gesture was active.
    Cancelled,
}

impl GestureState {
    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Began => "began",
            Self::Changed => "changed",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Dominant direction of a swipe, in a y-down coordinate space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl SwipeDirection {
    /// Classify a displacement by its dominant axis; horizontal wins ties.
    pub fn from_translation(translation: Vec2) -> Self {
        if translation.x.abs() >= translation.y.abs() {
            if translation.x < 0.0 { Self::Left } else { Self::Right }
        } else if translation.y < 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// The directional swipe kind for this direction.
    pub const fn kind(self) -> GestureKind {
        match self {
            Self::Up => GestureKind::SwipeUp,
            Self::Down => GestureKind::SwipeDown,
            Self::Left => GestureKind::SwipeLeft,
            Self::Right => GestureKind::SwipeRight,
        }
    }
}

/// Kind-specific part of a [`GestureData`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureDetail {
    /// Tap and long press carry nothing extra.
    None,
    /// Swipe direction.
    Swipe {
        /// Dominant direction of the net translation.
        direction: SwipeDirection,
    },
    /// Pan translation.
    Pan {
        /// Centroid translation since the gesture started, continuous across
        /// touches joining and leaving.
        translation: Vec2,
        /// Centroid velocity in units per second between the last two events.
        velocity: Vec2,
    },
    /// Pinch scale.
    Pinch {
        /// Distance between the first two touches relative to gesture start.
        scale: f64,
    },
    /// Rotation angle.
    Rotate {
        /// Degrees turned since gesture start; positive is clockwise on a
        /// y-down surface.
        degrees: f64,
    },
}

/// Everything a handler learns about one gesture event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureData {
    /// Which gesture this is.
    pub kind: GestureKind,
    /// Where in its lifecycle the gesture is.
    pub state: GestureState,
    /// Centroid of the touches.
    pub location: Point,
    /// Touches down; for terminal events after the last lift, the most
    /// touches seen during the contact.
    pub touch_count: usize,
    /// Kind-specific values.
    pub detail: GestureDetail,
}

impl GestureData {
    /// `state == Began`.
    pub fn began(&self) -> bool {
        self.state == GestureState::Began
    }

    /// `state == Changed`.
    pub fn changed(&self) -> bool {
        self.state == GestureState::Changed
    }

    /// `state == Ended`.
    pub fn ended(&self) -> bool {
        self.state == GestureState::Ended
    }

    /// `state == Cancelled`.
    pub fn cancelled(&self) -> bool {
        self.state == GestureState::Cancelled
    }

    /// Swipe direction, if this is a swipe.
    pub fn direction(&self) -> Option<SwipeDirection> {
        match self.detail {
            GestureDetail::Swipe { direction } => Some(direction),
            _ => None,
        }
    }

    /// Pan translation, if this is a pan.
    pub fn translation(&self) -> Option<Vec2> {
        match self.detail {
            GestureDetail::Pan { translation, .. } => Some(translation),
            _ => None,
        }
    }

    /// Pan velocity, if this is a pan.
    pub fn velocity(&self) -> Option<Vec2> {
        match self.detail {
            GestureDetail::Pan { velocity, .. } => Some(velocity),
            _ => None,
        }
    }

    /// Pinch scale, if this is a pinch.
    pub fn scale(&self) -> Option<f64> {
        match self.detail {
            GestureDetail::Pinch { scale } => Some(scale),
            _ => None,
        }
    }

    /// Rotation in degrees, if this is a rotation.
    pub fn rotation(&self) -> Option<f64> {
        match self.detail {
            GestureDetail::Rotate { degrees } => Some(degrees),
            _ => None,
        }
    }
}

impl fmt::Display for GestureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at ({:.1}, {:.1}), {} touch(es)",
            self.kind,
            self.state.name(),
            self.location.x,
            self.location.y,
            self.touch_count
        )?;
        match self.detail {
            GestureDetail::None => Ok(()),
            GestureDetail::Swipe { direction } => write!(f, ", direction {direction:?}"),
            GestureDetail::Pan {
                translation,
                velocity,
            } => write!(
                f,
                ", translation ({:.1}, {:.1}), velocity ({:.1}, {:.1})",
                translation.x, translation.y, velocity.x, velocity.y
            ),
            GestureDetail::Pinch { scale } => write!(f, ", scale {scale:.3}"),
            GestureDetail::Rotate { degrees } => write!(f, ", rotation {degrees:.1}°"),
        }
    }
}
