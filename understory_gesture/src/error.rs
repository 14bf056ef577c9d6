// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract violations reported by the engine.

use crate::touch::TouchId;

/// An input the engine cannot make sense of.
///
/// These are violations by the event source. The engine drops the live
/// session when it reports one; the next touch down starts afresh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    /// A move or end for a touch that is not down.
    #[error("touch {0} is not down")]
    UnknownTouch(TouchId),
    /// A begin for a touch that is already down.
    #[error("touch {0} is already down")]
    DuplicateTouch(TouchId),
}
