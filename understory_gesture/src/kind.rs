// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture kinds and the capability set a handler declares.

use core::fmt;

/// One gesture the engine can recognize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Short, stationary contact.
    Tap,
    /// Stationary contact held past the long-press threshold.
    LongPress,
    /// Quick flick in any direction.
    Swipe,
    /// Quick flick upwards (towards negative y).
    SwipeUp,
    /// Quick flick downwards (towards positive y).
    SwipeDown,
    /// Quick flick towards negative x.
    SwipeLeft,
    /// Quick flick towards positive x.
    SwipeRight,
    /// Continuous translation of the touch centroid.
    Pan,
    /// Continuous change of the distance between the first two touches.
    Pinch,
    /// Continuous change of the angle between the first two touches.
    Rotate,
}

impl GestureKind {
    /// Number of gesture kinds.
    pub const COUNT: usize = 10;

    /// Every kind, in candidate-table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Tap,
        Self::LongPress,
        Self::Swipe,
        Self::SwipeUp,
        Self::SwipeDown,
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::Pan,
        Self::Pinch,
        Self::Rotate,
    ];

    /// The swipe family: generic plus the four directional variants.
    pub const SWIPES: [Self; 5] = [
        Self::Swipe,
        Self::SwipeUp,
        Self::SwipeDown,
        Self::SwipeLeft,
        Self::SwipeRight,
    ];

    /// Continuous gestures that report began, changed, and ended.
    pub const CONTINUOUS: [Self; 3] = [Self::Pan, Self::Pinch, Self::Rotate];

    /// Slot of this kind in a candidate table.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// The capability flag for this kind.
    pub const fn flag(self) -> GestureKinds {
        match self {
            Self::Tap => GestureKinds::TAP,
            Self::LongPress => GestureKinds::LONG_PRESS,
            Self::Swipe => GestureKinds::SWIPE,
            Self::SwipeUp => GestureKinds::SWIPE_UP,
            Self::SwipeDown => GestureKinds::SWIPE_DOWN,
            Self::SwipeLeft => GestureKinds::SWIPE_LEFT,
            Self::SwipeRight => GestureKinds::SWIPE_RIGHT,
            Self::Pan => GestureKinds::PAN,
            Self::Pinch => GestureKinds::PINCH,
            Self::Rotate => GestureKinds::ROTATE,
        }
    }

    /// Whether this kind reports a began/changed/ended sequence.
    pub const fn is_continuous(self) -> bool {
        matches!(self, Self::Pan | Self::Pinch | Self::Rotate)
    }

    /// Whether this kind belongs to the swipe family.
    pub const fn is_swipe(self) -> bool {
        matches!(
            self,
            Self::Swipe | Self::SwipeUp | Self::SwipeDown | Self::SwipeLeft | Self::SwipeRight
        )
    }

    /// Short snake-case name, matching the handler method suffix.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::LongPress => "long_press",
            Self::Swipe => "swipe",
            Self::SwipeUp => "swipe_up",
            Self::SwipeDown => "swipe_down",
            Self::SwipeLeft => "swipe_left",
            Self::SwipeRight => "swipe_right",
            Self::Pan => "pan",
            Self::Pinch => "pinch",
            Self::Rotate => "rotate",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// Set of gesture kinds a handler wants to receive.
    ///
    /// Kinds outside the set are never evaluated for a session.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GestureKinds: u16 {
        /// [`GestureKind::Tap`].
        const TAP         = 1 << 0;
        /// [`GestureKind::LongPress`].
        const LONG_PRESS  = 1 << 1;
        /// [`GestureKind::Swipe`].
        const SWIPE       = 1 << 2;
        /// [`GestureKind::SwipeUp`].
        const SWIPE_UP    = 1 << 3;
        /// [`GestureKind::SwipeDown`].
        const SWIPE_DOWN  = 1 << 4;
        /// [`GestureKind::SwipeLeft`].
        const SWIPE_LEFT  = 1 << 5;
        /// [`GestureKind::SwipeRight`].
        const SWIPE_RIGHT = 1 << 6;
        /// [`GestureKind::Pan`].
        const PAN         = 1 << 7;
        /// [`GestureKind::Pinch`].
        const PINCH       = 1 << 8;
        /// [`GestureKind::Rotate`].
        const ROTATE      = 1 << 9;

        /// The generic swipe and all four directions.
        const ALL_SWIPES = Self::SWIPE.bits()
            | Self::SWIPE_UP.bits()
            | Self::SWIPE_DOWN.bits()
            | Self::SWIPE_LEFT.bits()
            | Self::SWIPE_RIGHT.bits();
        /// Pan, pinch, and rotate.
        const TRANSFORM = Self::PAN.bits() | Self::PINCH.bits() | Self::ROTATE.bits();
    }
}

impl GestureKinds {
    /// Whether `kind` is part of this set.
    pub const fn has(self, kind: GestureKind) -> bool {
        self.contains(kind.flag())
    }
}

impl Default for GestureKinds {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<GestureKind> for GestureKinds {
    fn from(kind: GestureKind) -> Self {
        kind.flag()
    }
}

impl FromIterator<GestureKind> for GestureKinds {
    fn from_iter<I: IntoIterator<Item = GestureKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, kind| acc | kind.flag())
    }
}
