pub mod demo;
pub mod history;
pub mod session;
pub mod tracker;

use serde::{Deserialize, Serialize};

pub use demo::DemoDriver;
pub use history::RunHistory;
pub use session::DashboardState;
pub use tracker::{RunDisplay, RunTracker};

/// A typed timing event, either parsed off the relay wire or synthesized by
/// the demo driver. Both paths feed the same run tracker.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum TimingEvent {
    /// A run left the start gate.
    Started { run_number: u32 },
    /// A run crossed the finish gate with the device-measured elapsed time.
    Finished { run_number: u32, elapsed_s: f64 },
}

/// One completed timed attempt. Immutable once created; the history store
/// never mutates or drops records for the lifetime of the process.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    /// Run number as supplied by the timing device. Not required to be
    /// unique or monotonic.
    pub number: u32,
    /// Measured elapsed time in seconds. Always finite and non-negative.
    pub elapsed_s: f64,
    /// Wall-clock completion time, formatted for display.
    pub completed_at: String,
}

/// Wall-clock label recorded on a finished run and shown in the history
/// table.
pub(crate) fn wall_clock_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
