// Parser for the timing-relay wire protocol.
//
// The device speaks a two-message text format, one event per line:
//   START:<n>       a run left the start gate
//   RESULT:<n>:<t>  run <n> finished in <t> seconds

use log::{debug, warn};

use crate::timing::TimingEvent;

/// Parse one relay line into a timing event.
///
/// Anything that is not a well-formed `START`/`RESULT` line is dropped with
/// a diagnostic log: unknown prefixes, missing fields, unparseable numbers,
/// and elapsed times that are negative or non-finite. Dropping is silent as
/// far as the session is concerned — no event, no state change.
pub fn parse_line(line: &str) -> Option<TimingEvent> {
    let fields: Vec<&str> = line.split(':').collect();
    match fields.as_slice() {
        ["START", number] => {
            let run_number = parse_run_number(number)?;
            Some(TimingEvent::Started { run_number })
        }
        ["RESULT", number, elapsed] => {
            let run_number = parse_run_number(number)?;
            let elapsed_s = parse_elapsed_s(elapsed)?;
            Some(TimingEvent::Finished {
                run_number,
                elapsed_s,
            })
        }
        _ => {
            debug!("ignoring unrecognized relay message: {:?}", line);
            None
        }
    }
}

fn parse_run_number(field: &str) -> Option<u32> {
    match field.trim().parse() {
        Ok(number) => Some(number),
        Err(_) => {
            warn!("malformed run number in relay message: {:?}", field);
            None
        }
    }
}

fn parse_elapsed_s(field: &str) -> Option<f64> {
    let elapsed_s: f64 = match field.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("malformed elapsed time in relay message: {:?}", field);
            return None;
        }
    };
    // The history store relies on finite non-negative times for the min fold
    // and the best-time equality marker.
    if !elapsed_s.is_finite() || elapsed_s < 0.0 {
        warn!("elapsed time out of range in relay message: {:?}", field);
        return None;
    }
    Some(elapsed_s)
}
