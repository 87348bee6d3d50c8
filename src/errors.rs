// Error types for lapboard

use crate::relay::DashboardEvent;
use snafu::Snafu;
use std::{io, sync::mpsc::SendError};

#[derive(Debug, Snafu)]
pub enum LapboardError {
    // Errors for the relay connection
    #[snafu(display("Invalid relay endpoint URL: {url}"))]
    InvalidRelayUrl { url: String },
    #[snafu(display("Could not connect to the timing relay"))]
    RelayConnectionError {
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[snafu(display("Error reading from the timing relay"))]
    RelayReadError {
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[snafu(display("The relay connection is not established, call connect() first"))]
    RelayNotConnected,
    #[snafu(display("Could not start the async runtime for the relay connection"))]
    RelayRuntimeError { source: io::Error },

    // Errors for scripted (offline) timing sources
    #[snafu(display("The scripted timing source has no more lines"))]
    ScriptExhausted,
    #[snafu(display("Error reading scripted timing lines"))]
    ScriptReadError { source: io::Error },

    // Errors while broadcasting dashboard events
    #[snafu(display("Error broadcasting dashboard event"))]
    EventBroadcastError {
        source: Box<SendError<DashboardEvent>>,
    },

    // Errors for the event-log writer
    #[snafu(display("Error writing event log file"))]
    WriterError { source: io::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}

impl From<SendError<DashboardEvent>> for LapboardError {
    fn from(value: SendError<DashboardEvent>) -> Self {
        LapboardError::EventBroadcastError {
            source: Box::new(value),
        }
    }
}
