// Session history: every completed run in newest-first order, plus the
// session statistics derived from it.

use std::collections::VecDeque;

use super::Run;

/// Completed runs for the current session, newest first.
///
/// Runs are only ever prepended. Nothing is dropped or reordered for the
/// lifetime of the process, so row identity in the table is stable and the
/// best time can only improve.
pub struct RunHistory {
    runs: VecDeque<Run>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self {
            runs: VecDeque::new(),
        }
    }

    /// Record a completed run as the newest entry.
    pub fn record(&mut self, run: Run) {
        self.runs.push_front(run);
    }

    /// Runs in display order, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Fastest elapsed time of the session, if any run has finished.
    pub fn best_time_s(&self) -> Option<f64> {
        self.runs.iter().map(|run| run.elapsed_s).reduce(f64::min)
    }

    /// Whether `elapsed_s` equals the session best. Ties all count as best,
    /// so every row holding the record gets highlighted.
    pub fn is_best_time(&self, elapsed_s: f64) -> bool {
        self.best_time_s() == Some(elapsed_s)
    }
}

impl Default for RunHistory {
    fn default() -> Self {
        RunHistory::new()
    }
}
