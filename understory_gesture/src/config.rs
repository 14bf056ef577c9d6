// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognition thresholds and policies.

/// How a recognized swipe is reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwipePolicy {
    /// Deliver the directional variant and the generic swipe, each if declared.
    #[default]
    Both,
    /// Deliver the directional variant; the generic swipe is only delivered
    /// when the handler does not take that direction.
    PreferDirectional,
}

/// What happens to pinch and rotate after they soft-end because fewer than
/// two touches remain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RearmPolicy {
    /// Return the candidate to possible, so a returning second finger starts
    /// a new began/changed/ended cycle within the same contact.
    #[default]
    Rearm,
    /// Keep the candidate ended for the rest of the contact.
    Retire,
}

/// Thresholds and policies for a [`GestureEngine`](crate::GestureEngine).
///
/// Durations are in milliseconds on the host's clock; distances are in the
/// coordinate space of the touch locations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// A contact longer than this is never a tap or a swipe.
    pub tap_duration_ms: u64,
    /// A stationary contact longer than this is a long press.
    pub long_press_duration_ms: u64,
    /// A touch farther than this from its start is moving: no tap, no long press.
    pub movement_threshold: f64,
    /// Reporting of directional versus generic swipes.
    pub swipe_policy: SwipePolicy,
    /// Re-arming of pinch and rotate after a soft end.
    pub rearm_policy: RearmPolicy,
}

impl GestureConfig {
    /// Default tap threshold: 300ms.
    pub const DEFAULT_TAP_DURATION_MS: u64 = 300;
    /// Default long-press threshold: 500ms.
    pub const DEFAULT_LONG_PRESS_DURATION_MS: u64 = 500;
    /// Default movement threshold: 15 units.
    pub const DEFAULT_MOVEMENT_THRESHOLD: f64 = 15.0;

    /// Default thresholds and policies.
    pub const fn new() -> Self {
        Self {
            tap_duration_ms: Self::DEFAULT_TAP_DURATION_MS,
            long_press_duration_ms: Self::DEFAULT_LONG_PRESS_DURATION_MS,
            movement_threshold: Self::DEFAULT_MOVEMENT_THRESHOLD,
            swipe_policy: SwipePolicy::Both,
            rearm_policy: RearmPolicy::Rearm,
        }
    }

    /// Set the tap (and swipe) duration threshold.
    #[must_use]
    pub const fn with_tap_duration_ms(mut self, ms: u64) -> Self {
        self.tap_duration_ms = ms;
        self
    }

    /// Set the long-press duration threshold.
    #[must_use]
    pub const fn with_long_press_duration_ms(mut self, ms: u64) -> Self {
        self.long_press_duration_ms = ms;
        self
    }

    /// Set the movement threshold.
    #[must_use]
    pub const fn with_movement_threshold(mut self, distance: f64) -> Self {
        self.movement_threshold = distance;
        self
    }

    /// Set the swipe reporting policy.
    #[must_use]
    pub const fn with_swipe_policy(mut self, policy: SwipePolicy) -> Self {
        self.swipe_policy = policy;
        self
    }

    /// Set the re-arm policy for pinch and rotate.
    #[must_use]
    pub const fn with_rearm_policy(mut self, policy: RearmPolicy) -> Self {
        self.rearm_policy = policy;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GestureConfig::default();
        assert_eq!(c.tap_duration_ms, 300);
        assert_eq!(c.long_press_duration_ms, 500);
        assert_eq!(c.movement_threshold, 15.0);
        assert_eq!(c.swipe_policy, SwipePolicy::Both);
        assert_eq!(c.rearm_policy, RearmPolicy::Rearm);
    }

    #[test]
    fn builders_override_one_field_each() {
        let c = GestureConfig::new()
            .with_tap_duration_ms(200)
            .with_movement_threshold(8.0)
            .with_rearm_policy(RearmPolicy::Retire);
        assert_eq!(c.tap_duration_ms, 200);
        assert_eq!(c.long_press_duration_ms, 500);
        assert_eq!(c.movement_threshold, 8.0);
        assert_eq!(c.rearm_policy, RearmPolicy::Retire);
    }
}
