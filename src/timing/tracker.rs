// Tracks the run currently on course and projects it into the big readout
// at the top of the dashboard.

use std::time::{Duration, Instant};

use log::debug;

/// How long a finished run's time stays on the readout before it reverts to
/// waiting. Purely cosmetic; the run is already in the history by then.
const RESULT_HOLD_MS: u64 = 3000;

/// What the readout should show right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunDisplay {
    /// No run on course.
    Waiting,
    /// A run is on course; `elapsed_s` is the locally measured time so far.
    Running { number: u32, elapsed_s: f64 },
    /// A run just finished; `elapsed_s` is the device-measured time.
    Finished { number: u32, elapsed_s: f64 },
}

enum TrackerState {
    Idle,
    Running { number: u32, started_at: Instant },
    Finished {
        number: u32,
        elapsed_s: f64,
        finished_at: Instant,
    },
}

/// State machine for the run currently on course.
///
/// The tracker owns no timers. Callers hand it the current `Instant` with
/// every transition and every `display` call, which keeps the live elapsed
/// readout and the timed revert to waiting purely a function of its inputs.
pub struct RunTracker {
    state: TrackerState,
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            state: TrackerState::Idle,
        }
    }

    /// A run left the start gate. Replaces whatever the readout was showing,
    /// including a previous run still on course or a held result.
    pub fn start(&mut self, run_number: u32, now: Instant) {
        if let TrackerState::Running { number, .. } = self.state {
            debug!("run {} started while run {} was on course", run_number, number);
        }
        self.state = TrackerState::Running {
            number: run_number,
            started_at: now,
        };
    }

    /// A run crossed the finish gate. The device is the authority on both
    /// the run number and the elapsed time, so this is accepted from any
    /// state: the start line may have arrived before the dashboard connected.
    pub fn finish(&mut self, run_number: u32, elapsed_s: f64, now: Instant) {
        match self.state {
            TrackerState::Running { number, .. } if number != run_number => {
                debug!("run {} finished while run {} was on course", run_number, number);
            }
            TrackerState::Running { .. } => {}
            _ => debug!("run {} finished without a matching start", run_number),
        }
        self.state = TrackerState::Finished {
            number: run_number,
            elapsed_s,
            finished_at: now,
        };
    }

    /// Project the readout for the given moment. Held results expire after
    /// `RESULT_HOLD_MS` without any transition having happened.
    pub fn display(&self, now: Instant) -> RunDisplay {
        match self.state {
            TrackerState::Idle => RunDisplay::Waiting,
            TrackerState::Running { number, started_at } => RunDisplay::Running {
                number,
                elapsed_s: now.duration_since(started_at).as_secs_f64(),
            },
            TrackerState::Finished {
                number,
                elapsed_s,
                finished_at,
            } => {
                if now.duration_since(finished_at) >= Duration::from_millis(RESULT_HOLD_MS) {
                    RunDisplay::Waiting
                } else {
                    RunDisplay::Finished { number, elapsed_s }
                }
            }
        }
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        RunTracker::new()
    }
}
