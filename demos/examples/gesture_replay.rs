// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay scripted touch streams through a `GestureEngine`.
//!
//! Each script is a list of timestamped touch events, the way a host would
//! forward them from its platform. Recognized gestures are printed as they are
//! delivered, and the engine's own `tracing` events show why candidates fail.
//!
//! Run:
//! - `cargo run -p understory_examples --example gesture_replay`

use kurbo::{Point, Vec2};
use understory_gesture::{
    GestureConfig, GestureData, GestureEngine, GestureHandler, GestureKinds, GestureSession,
    RearmPolicy, TouchId,
};

/// One raw input from the host.
#[derive(Clone, Copy, Debug)]
enum Input {
    Begin(u64, Point, u64),
    Move(u64, Point, u64),
    End(u64, u64),
    Tick(u64),
}

/// Prints everything it is told, and tracks the widest touch overlay seen.
#[derive(Debug, Default)]
struct Printer {
    most_touches: usize,
}

impl GestureHandler for Printer {
    fn kinds(&self) -> GestureKinds {
        GestureKinds::all()
    }

    fn on_gesture(&mut self, data: &GestureData) {
        println!("  {data}");
    }

    fn on_tap(&mut self, data: &GestureData) {
        println!("  tap! {data}");
    }

    fn on_update(&mut self, session: Option<&GestureSession>) {
        if let Some(s) = session {
            self.most_touches = self.most_touches.max(s.touch_count());
        }
    }
}

fn replay(name: &str, config: GestureConfig, script: &[Input]) {
    println!("{name}:");
    let mut engine = GestureEngine::with_config(Printer::default(), config);
    for input in script {
        let result = match *input {
            Input::Begin(id, at, t) => engine.on_begin(TouchId(id), at, t),
            Input::Move(id, at, t) => engine.on_move(TouchId(id), at, t),
            Input::End(id, t) => engine.on_end(TouchId(id), t),
            Input::Tick(t) => {
                engine.tick(t);
                Ok(())
            }
        };
        if let Err(err) = result {
            println!("  rejected {input:?}: {err}");
        }
    }
    tracing::info!(
        script = name,
        most_touches = engine.handler().most_touches,
        "replay finished"
    );
}

/// Two fingers spreading apart and turning a quarter turn about their midpoint.
fn pinch_and_turn() -> Vec<Input> {
    let center = Point::new(200.0, 200.0);
    let mut script = vec![
        Input::Begin(1, center - Vec2::new(50.0, 0.0), 0),
        Input::Begin(2, center + Vec2::new(50.0, 0.0), 5),
    ];
    for i in 1..=10_u32 {
        let theta = f64::from(9 * i).to_radians();
        let radius = 50.0 + 5.0 * f64::from(i);
        let offset = Vec2::new(radius * theta.cos(), radius * theta.sin());
        let t = 10 + u64::from(i) * 16;
        script.push(Input::Move(1, center - offset, t));
        script.push(Input::Move(2, center + offset, t));
    }
    script.push(Input::End(2, 200));
    script.push(Input::Move(1, Point::new(100.0, 210.0), 216));
    // A second finger comes back: pinch and rotate start over unless retired.
    script.push(Input::Begin(3, Point::new(300.0, 210.0), 230));
    script.push(Input::Move(3, Point::new(400.0, 210.0), 246));
    script.push(Input::End(3, 260));
    script.push(Input::End(1, 270));
    script
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let defaults = GestureConfig::default();

    replay(
        "tap",
        defaults,
        &[
            Input::Begin(1, Point::new(100.0, 100.0), 0),
            Input::Move(1, Point::new(100.0, 101.0), 50),
            Input::End(1, 150),
        ],
    );

    replay(
        "swipe",
        defaults,
        &[
            Input::Begin(1, Point::new(0.0, 0.0), 0),
            Input::Move(1, Point::new(60.0, 2.0), 50),
            Input::End(1, 100),
        ],
    );

    replay(
        "long press",
        defaults,
        &[
            Input::Begin(1, Point::new(40.0, 40.0), 0),
            Input::Tick(250),
            Input::Tick(510),
            Input::End(1, 900),
        ],
    );

    replay(
        "slow drag",
        defaults,
        &[
            Input::Begin(1, Point::new(0.0, 0.0), 0),
            Input::Move(1, Point::new(20.0, 0.0), 120),
            Input::Move(1, Point::new(40.0, 10.0), 320),
            Input::Move(1, Point::new(80.0, 20.0), 400),
            Input::End(1, 420),
        ],
    );

    let script = pinch_and_turn();
    replay("pinch and turn", defaults, &script);
    replay(
        "pinch and turn, no re-arm",
        defaults.with_rearm_policy(RearmPolicy::Retire),
        &script,
    );

    replay(
        "bad input",
        defaults,
        &[
            Input::Begin(1, Point::ZERO, 0),
            Input::Begin(1, Point::ZERO, 10),
            Input::End(1, 20),
        ],
    );
}
