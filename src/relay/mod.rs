// Relay connection plumbing: the timing source abstraction, the WebSocket
// client, and the collector loop that feeds the dashboard channel.

pub mod collector;
pub mod source;

pub use collector::{ReconnectPolicy, collect_events};
pub use source::{RelaySource, ScriptedSource, TimingSource};

use serde::{Deserialize, Serialize};

use crate::timing::TimingEvent;

/// Address the timing relay listens on when no override is configured.
pub const DEFAULT_RELAY_URL: &str = "ws://localhost:8765";

/// Whether the dashboard currently holds a live link to the relay.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// One message on the dashboard channel.
///
/// The collector thread owns the sending half. The UI drains the receiving
/// half once per frame and applies each event to the session state, so
/// connection flips and timing events stay in the order they were observed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum DashboardEvent {
    Connection(ConnectionState),
    Timing(TimingEvent),
}
