// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-touch gesture disambiguation.
//!
//! This crate turns a stream of raw touch events (touch down, touch moved,
//! touch up, each with a host timestamp in milliseconds) into high-level
//! gestures: tap, long press, swipe (generic and per direction), pan, pinch,
//! and rotate. It is decoupled from any windowing system or event loop: the
//! host translates its platform events into calls on a [`GestureEngine`] and
//! receives recognized gestures synchronously through a [`GestureHandler`].
//!
//! # Typical usage
//!
//! - Implement [`GestureHandler`] for your view. Declare the kinds you care
//!   about in [`GestureHandler::kinds`] and override the matching `on_*`
//!   methods (or just [`GestureHandler::on_gesture`]).
//! - Wrap it in a [`GestureEngine`], optionally with a tuned [`GestureConfig`].
//! - Forward touch input to [`GestureEngine::on_begin`],
//!   [`GestureEngine::on_move`], and [`GestureEngine::on_end`]. If your host
//!   does not report motion for a finger held still, call
//!   [`GestureEngine::tick`] from a timer so long presses are recognized on time.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureData, GestureEngine, GestureHandler, GestureKinds, SwipeDirection, TouchId,
//! };
//!
//! #[derive(Default)]
//! struct View {
//!     swipes: Vec<SwipeDirection>,
//! }
//!
//! impl GestureHandler for View {
//!     fn kinds(&self) -> GestureKinds {
//!         GestureKinds::TAP | GestureKinds::SWIPE
//!     }
//!
//!     fn on_swipe(&mut self, data: &GestureData) {
//!         self.swipes.extend(data.direction());
//!     }
//! }
//!
//! let mut engine = GestureEngine::new(View::default());
//! engine.on_begin(TouchId(7), Point::new(0.0, 0.0), 1_000).unwrap();
//! engine.on_move(TouchId(7), Point::new(60.0, 2.0), 1_050).unwrap();
//! engine.on_end(TouchId(7), 1_100).unwrap();
//!
//! assert_eq!(engine.handler().swipes, [SwipeDirection::Right]);
//! ```
//!
//! # Key types
//!
//! - [`GestureEngine`] – owns the handler and the live [`GestureSession`], and
//!   applies the recognition rules documented in its module.
//! - [`GestureKind`] / [`GestureKinds`] – the gesture vocabulary, as a single
//!   kind or a set of kinds.
//! - [`Phase`] / [`Candidates`] – per-kind lifecycle inside a session.
//! - [`GestureData`] – what a handler receives: kind, [`GestureState`],
//!   centroid, touch count, and a kind-specific [`GestureDetail`].
//! - [`GestureConfig`] – thresholds plus the [`SwipePolicy`] and
//!   [`RearmPolicy`] choices.
//!
//! ## Coordinates
//!
//! Locations are [`kurbo::Point`]s in whatever space the host uses; the engine
//! assumes y grows downwards when naming swipe directions and rotation sense.
//!
//! ## Features
//!
//! - `std` (default): use the standard library's float functions.
//! - `libm`: use `libm` for float functions in `no_std` builds.
//! - `tracing`: emit `tracing` events for session lifecycle, candidate
//!   failures, and delivered gestures.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod data;
mod engine;
mod error;
mod handler;
mod kind;
mod phase;
mod session;
mod touch;

pub use config::{GestureConfig, RearmPolicy, SwipePolicy};
pub use data::{GestureData, GestureDetail, GestureState, SwipeDirection};
pub use engine::GestureEngine;
pub use error::GestureError;
pub use handler::{FnHandler, GestureHandler};
pub use kind::{GestureKind, GestureKinds};
pub use phase::{Candidates, Phase};
pub use session::GestureSession;
pub use touch::{Touch, TouchId};
