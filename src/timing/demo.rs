// Demo driver: synthesizes timing events from the on-screen buttons so the
// dashboard can be exercised without the relay hardware.

use std::{collections::BTreeMap, time::Instant};

use super::TimingEvent;

/// Hands out sequential run numbers and measures elapsed times locally.
///
/// Several demo runs can be on course at once; finishes resolve in start
/// order, so the oldest pending run is always the next one to cross the
/// line. Numbering is independent of whatever a real relay would send.
pub struct DemoDriver {
    run_counter: u32,
    pending: BTreeMap<u32, Instant>,
}

impl DemoDriver {
    pub fn new() -> Self {
        Self {
            run_counter: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Send the next run onto the course.
    pub fn start(&mut self, now: Instant) -> TimingEvent {
        self.run_counter += 1;
        self.pending.insert(self.run_counter, now);
        TimingEvent::Started {
            run_number: self.run_counter,
        }
    }

    /// Finish the oldest pending run, or `None` when nothing is on course.
    pub fn finish(&mut self, now: Instant) -> Option<TimingEvent> {
        let (run_number, started_at) = self.pending.pop_first()?;
        Some(TimingEvent::Finished {
            run_number,
            elapsed_s: now.duration_since(started_at).as_secs_f64(),
        })
    }
}

impl Default for DemoDriver {
    fn default() -> Self {
        DemoDriver::new()
    }
}
