// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-candidate phase and its transition table.
//!
//! Every gesture kind has one [`Phase`] per session. The transitions are:
//!
//! | from            | `advance` | `finish` | `fail`   | `rearm` (policy `Rearm`) |
//! |-----------------|-----------|----------|----------|--------------------------|
//! | `NotApplicable` | –         | –        | –        | –                        |
//! | `Possible`      | `Began`   | `Ended`  | `Failed` | –                        |
//! | `Began`         | `Changed` | `Ended`  | –        | –                        |
//! | `Changed`       | `Changed` | `Ended`  | –        | –                        |
//! | `Ended`         | –         | –        | –        | `Possible`               |
//! | `Failed`        | –         | –        | –        | –                        |
//!
//! A dash means the phase is left as it is and the transition reports `None`.
//! Everything is monotonic except `rearm`, which only applies to continuous
//! gestures after a soft end.

use crate::config::RearmPolicy;
use crate::kind::{GestureKind, GestureKinds};

/// Lifecycle of one gesture candidate within a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The handler does not take this kind; it is never evaluated.
    #[default]
    NotApplicable,
    /// Still eligible.
    Possible,
    /// Confirmed; the first event was delivered.
    Began,
    /// Confirmed and continuing.
    Changed,
    /// Confirmed; the terminal event was delivered.
    Ended,
    /// Ruled out for this session.
    Failed,
}

impl Phase {
    /// `Possible`.
    pub const fn is_possible(self) -> bool {
        matches!(self, Self::Possible)
    }

    /// `Began` or `Changed`.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    /// Still able to deliver events: `Possible`, `Began`, or `Changed`.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Possible | Self::Began | Self::Changed)
    }

    /// Move a live candidate one step along began → changed.
    #[must_use]
    pub const fn advance(self) -> Option<Self> {
        match self {
            Self::Possible => Some(Self::Began),
            Self::Began | Self::Changed => Some(Self::Changed),
            _ => None,
        }
    }

    /// Deliver the terminal event of a live candidate.
    #[must_use]
    pub const fn finish(self) -> Option<Self> {
        match self {
            Self::Possible | Self::Began | Self::Changed => Some(Self::Ended),
            _ => None,
        }
    }

    /// Rule out a candidate that has not been confirmed.
    #[must_use]
    pub const fn fail(self) -> Option<Self> {
        match self {
            Self::Possible => Some(Self::Failed),
            _ => None,
        }
    }

    /// Return a soft-ended candidate to `Possible`, if the policy allows it.
    #[must_use]
    pub const fn rearm(self, policy: RearmPolicy) -> Option<Self> {
        match (self, policy) {
            (Self::Ended, RearmPolicy::Rearm) => Some(Self::Possible),
            _ => None,
        }
    }
}

/// Phase of every gesture kind for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidates([Phase; GestureKind::COUNT]);

impl Candidates {
    /// Kinds in `kinds` start `Possible`; the rest are `NotApplicable`.
    pub fn new(kinds: GestureKinds) -> Self {
        let mut phases = [Phase::NotApplicable; GestureKind::COUNT];
        for kind in GestureKind::ALL {
            if kinds.has(kind) {
                phases[kind.index()] = Phase::Possible;
            }
        }
        Self(phases)
    }

    /// Current phase of `kind`.
    pub fn get(&self, kind: GestureKind) -> Phase {
        self.0[kind.index()]
    }

    /// Whether `kind` is still `Possible`.
    pub fn is_possible(&self, kind: GestureKind) -> bool {
        self.get(kind).is_possible()
    }

    /// `true` if no kind in `kinds` is `Possible`.
    pub fn none_possible(&self, kinds: &[GestureKind]) -> bool {
        kinds.iter().all(|&k| !self.is_possible(k))
    }

    /// `true` if any kind can still deliver events.
    pub fn any_live(&self) -> bool {
        self.0.iter().any(|p| p.is_live())
    }

    /// Iterate over `(kind, phase)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (GestureKind, Phase)> + '_ {
        GestureKind::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Apply `step` to the phase of `kind`, returning the new phase if it changed.
    pub(crate) fn step(
        &mut self,
        kind: GestureKind,
        step: impl FnOnce(Phase) -> Option<Phase>,
    ) -> Option<Phase> {
        let slot = &mut self.0[kind.index()];
        let next = step(*slot)?;
        *slot = next;
        Some(next)
    }

    /// Fail every `Possible` kind in `kinds`.
    pub(crate) fn fail_all(&mut self, kinds: &[GestureKind]) {
        for &kind in kinds {
            let _ = self.step(kind, Phase::fail);
        }
    }
}
