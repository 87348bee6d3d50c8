// Session state: one value owning everything the dashboard shows, fed by
// the event channel and the demo buttons.

use std::time::Instant;

use crate::relay::{ConnectionState, DashboardEvent};

use super::{DemoDriver, Run, RunDisplay, RunHistory, RunTracker, TimingEvent, wall_clock_label};

/// Everything a dashboard window needs to render, in one place.
///
/// All mutation funnels through `apply_event` and the two demo methods, and
/// happens on the UI thread. The collector thread never touches this value;
/// it only sends events down the channel, so there is nothing here to lock.
pub struct DashboardState {
    connection: ConnectionState,
    tracker: RunTracker,
    history: RunHistory,
    demo: DemoDriver,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            tracker: RunTracker::new(),
            history: RunHistory::new(),
            demo: DemoDriver::new(),
        }
    }

    /// Apply one channel event, stamped with the moment it is applied.
    pub fn apply_event(&mut self, event: DashboardEvent, now: Instant) {
        match event {
            DashboardEvent::Connection(state) => self.connection = state,
            DashboardEvent::Timing(event) => self.apply_timing(event, now),
        }
    }

    /// Demo START button: synthesizes a start event and applies it exactly
    /// like one received from the relay.
    pub fn demo_start(&mut self, now: Instant) {
        let event = self.demo.start(now);
        self.apply_timing(event, now);
    }

    /// Demo FINISH button. Does nothing when no demo run is on course.
    pub fn demo_finish(&mut self, now: Instant) {
        if let Some(event) = self.demo.finish(now) {
            self.apply_timing(event, now);
        }
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn run_display(&self, now: Instant) -> RunDisplay {
        self.tracker.display(now)
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    fn apply_timing(&mut self, event: TimingEvent, now: Instant) {
        match event {
            TimingEvent::Started { run_number } => self.tracker.start(run_number, now),
            TimingEvent::Finished {
                run_number,
                elapsed_s,
            } => {
                self.tracker.finish(run_number, elapsed_s, now);
                self.history.record(Run {
                    number: run_number,
                    elapsed_s,
                    completed_at: wall_clock_label(),
                });
            }
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState::new()
    }
}
