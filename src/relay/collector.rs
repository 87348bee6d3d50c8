// Collector loop: drives a timing source, parses its lines, and feeds the
// dashboard channel, reconnecting with a bounded flat delay when the link
// drops.

use std::{sync::mpsc::Sender, thread, time::Duration};

use log::{info, warn};

use crate::errors::LapboardError;
use crate::protocol;

use super::{ConnectionState, DashboardEvent, source::TimingSource};

const RECONNECT_MAX_ATTEMPTS: u32 = 5;
const RECONNECT_DELAY_MS: u64 = 3000;

/// Bounded flat-delay reconnect schedule.
///
/// Every failed attempt consumes one unit of budget; a successful connection
/// makes the full budget available again. There is no backoff: the relay sits
/// a few meters away on a bench, it is either powered or it is not.
#[derive(Clone, Debug)]
pub struct ReconnectPolicy {
    max_attempts: u32,
    delay: Duration,
    attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        ReconnectPolicy::new(
            RECONNECT_MAX_ATTEMPTS,
            Duration::from_millis(RECONNECT_DELAY_MS),
        )
    }
}

impl ReconnectPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            attempts: 0,
        }
    }

    /// Pause to take before the next connection attempt, or `None` once the
    /// budget is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;
        Some(self.delay)
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

/// Read timing lines from `source` until the reconnect budget is spent,
/// translating them into dashboard events.
///
/// Every event goes to `event_sender`; when `writer_sender` is set, a copy
/// goes there too for the session log. Connection flips are reported as
/// `DashboardEvent::Connection` so the UI always reflects the link state.
///
/// Returns `Ok(())` when the collector gives up after exhausting its
/// reconnect budget, which leaves the dashboard disconnected but alive.
///
/// # Errors
///
/// Returns an error if the relay URL can never be reached as written, or if
/// the receiving side of a channel hung up.
pub fn collect_events(
    mut source: impl TimingSource,
    event_sender: Sender<DashboardEvent>,
    writer_sender: Option<Sender<DashboardEvent>>,
    mut policy: ReconnectPolicy,
) -> Result<(), LapboardError> {
    loop {
        match source.connect() {
            Ok(()) => {
                policy.reset();
                broadcast(
                    DashboardEvent::Connection(ConnectionState::Connected),
                    &event_sender,
                    &writer_sender,
                )?;

                // read until the link drops
                loop {
                    match source.next_line() {
                        Ok(line) => {
                            if let Some(event) = protocol::parse_line(&line) {
                                broadcast(
                                    DashboardEvent::Timing(event),
                                    &event_sender,
                                    &writer_sender,
                                )?;
                            }
                        }
                        Err(e) => {
                            warn!("relay link lost: {}", e);
                            break;
                        }
                    }
                }
                broadcast(
                    DashboardEvent::Connection(ConnectionState::Disconnected),
                    &event_sender,
                    &writer_sender,
                )?;
            }
            Err(e @ LapboardError::InvalidRelayUrl { .. }) => {
                broadcast(
                    DashboardEvent::Connection(ConnectionState::Disconnected),
                    &event_sender,
                    &writer_sender,
                )?;
                return Err(e);
            }
            Err(e) => {
                warn!("could not connect to relay: {}", e);
                broadcast(
                    DashboardEvent::Connection(ConnectionState::Disconnected),
                    &event_sender,
                    &writer_sender,
                )?;
            }
        }

        match policy.next_delay() {
            Some(delay) => {
                info!(
                    "reconnecting to relay in {:?} (attempt {} of {})",
                    delay, policy.attempts, policy.max_attempts
                );
                thread::sleep(delay);
            }
            None => {
                warn!(
                    "giving up on the relay after {} failed attempts",
                    policy.max_attempts
                );
                return Ok(());
            }
        }
    }
}

fn broadcast(
    event: DashboardEvent,
    event_sender: &Sender<DashboardEvent>,
    writer_sender: &Option<Sender<DashboardEvent>>,
) -> Result<(), LapboardError> {
    event_sender.send(event)?;
    if let Some(writer_sender) = writer_sender {
        writer_sender.send(event)?;
    }
    Ok(())
}
