//! Lifecycle events the host environment delivers to the session.
//!
//! The host runs one callback at a time, so events are handled strictly
//! in arrival order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The environment finished loading. Fires once per session.
    Ready,
    /// Wall-clock time passed.
    Advance { elapsed_ms: u64 },
    /// The game is starting a new playthrough.
    NewLife,
}
