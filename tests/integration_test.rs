// End-to-end tests for the dashboard pipeline: a scripted timing source is
// driven through the collector on a real thread, and the resulting event
// stream is applied to the session state the way the UI thread does.

use std::{
    io::Write,
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use lapboard::relay::{
    ConnectionState, DashboardEvent, ReconnectPolicy, ScriptedSource, collect_events,
};
use lapboard::timing::{DashboardState, RunDisplay};

/// Run a scripted session through the collector and return every event the
/// dashboard channel saw, in order. A zero-attempt policy makes the collector
/// play the script exactly once.
fn collect_scripted_session(source: ScriptedSource) -> Vec<DashboardEvent> {
    let (event_tx, event_rx) = mpsc::channel();
    let collector = thread::spawn(move || {
        collect_events(source, event_tx, None, ReconnectPolicy::new(0, Duration::ZERO))
    });
    let events: Vec<DashboardEvent> = event_rx.iter().collect();
    collector.join().unwrap().unwrap();
    events
}

#[test]
fn test_scripted_session_reaches_the_dashboard() {
    let source = ScriptedSource::from_lines(&[
        "START:1",
        "not a timing line",
        "RESULT:1:2.345",
    ]);
    let events = collect_scripted_session(source);

    // link state brackets the timing events; the junk line left no trace
    assert_eq!(
        events.first(),
        Some(&DashboardEvent::Connection(ConnectionState::Connected))
    );
    assert_eq!(
        events.last(),
        Some(&DashboardEvent::Connection(ConnectionState::Disconnected))
    );
    assert_eq!(events.len(), 4);

    let t0 = Instant::now();
    let mut state = DashboardState::new();
    for event in events {
        state.apply_event(event, t0);
    }

    assert_eq!(state.history().len(), 1);
    assert_eq!(state.history().best_time_s(), Some(2.345));
    let run = state.history().iter().next().unwrap();
    assert_eq!(run.number, 1);
    assert_eq!(run.elapsed_s, 2.345);
}

#[test]
fn test_start_result_scenario_drives_the_readout() {
    let t0 = Instant::now();
    let mut state = DashboardState::new();

    state.apply_event(
        DashboardEvent::Timing(lapboard::timing::TimingEvent::Started { run_number: 1 }),
        t0,
    );

    // the live clock starts at zero and counts up
    assert_eq!(
        state.run_display(t0),
        RunDisplay::Running {
            number: 1,
            elapsed_s: 0.0,
        }
    );
    let mut previous = 0.0;
    for sample_ms in [50, 100, 150, 700, 2300] {
        let display = state.run_display(t0 + Duration::from_millis(sample_ms));
        match display {
            RunDisplay::Running { number: 1, elapsed_s } => {
                assert!(elapsed_s >= previous);
                previous = elapsed_s;
            }
            other => panic!("expected a running readout, got {:?}", other),
        }
    }

    let t1 = t0 + Duration::from_millis(2345);
    state.apply_event(
        DashboardEvent::Timing(lapboard::timing::TimingEvent::Finished {
            run_number: 1,
            elapsed_s: 2.345,
        }),
        t1,
    );

    // the device-measured result is held, frozen, for three seconds
    assert_eq!(
        state.run_display(t1 + Duration::from_millis(1000)),
        RunDisplay::Finished {
            number: 1,
            elapsed_s: 2.345,
        }
    );
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.history().best_time_s(), Some(2.345));

    // then the readout reverts to waiting while the history keeps the run
    assert_eq!(
        state.run_display(t1 + Duration::from_millis(3000)),
        RunDisplay::Waiting
    );
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.history().best_time_s(), Some(2.345));
}

#[test]
fn test_replaced_run_is_never_recorded() {
    let t0 = Instant::now();
    let mut state = DashboardState::new();

    state.apply_event(
        DashboardEvent::Timing(lapboard::timing::TimingEvent::Started { run_number: 1 }),
        t0,
    );
    state.apply_event(
        DashboardEvent::Timing(lapboard::timing::TimingEvent::Started { run_number: 2 }),
        t0 + Duration::from_secs(1),
    );
    state.apply_event(
        DashboardEvent::Timing(lapboard::timing::TimingEvent::Finished {
            run_number: 2,
            elapsed_s: 4.0,
        }),
        t0 + Duration::from_secs(5),
    );

    // run 1 was silently replaced and leaves no history entry
    let numbers: Vec<u32> = state.history().iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![2]);
}

#[test]
fn test_demo_finishes_pair_with_oldest_started_run() {
    let t0 = Instant::now();
    let mut state = DashboardState::new();

    state.demo_start(t0);
    state.demo_start(t0 + Duration::from_millis(400));
    state.demo_finish(t0 + Duration::from_millis(1000));
    state.demo_finish(t0 + Duration::from_millis(1400));

    // first finish click pairs with run 1, second with run 2, each timed
    // from its own start
    let recorded: Vec<(u32, f64)> = state
        .history()
        .iter()
        .map(|r| (r.number, r.elapsed_s))
        .collect();
    assert_eq!(recorded, vec![(2, 1.0), (1, 1.0)]);

    // a third click has nothing left to finish
    state.demo_finish(t0 + Duration::from_millis(2000));
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_reconnect_attempts_are_bounded_and_spaced() {
    // an exhausted script refuses every connection attempt
    let source = ScriptedSource::from_lines(&[]);
    let delay = Duration::from_millis(25);

    let (event_tx, event_rx) = mpsc::channel();
    let started = Instant::now();
    let collector =
        thread::spawn(move || collect_events(source, event_tx, None, ReconnectPolicy::new(5, delay)));
    let events: Vec<DashboardEvent> = event_rx.iter().collect();
    let elapsed = started.elapsed();
    collector.join().unwrap().unwrap();

    // the initial failure plus five retries, then the collector gives up
    assert_eq!(
        events,
        vec![DashboardEvent::Connection(ConnectionState::Disconnected); 6]
    );
    // each retry waited out the full flat delay
    assert!(elapsed >= delay * 5);
}

#[test]
fn test_recorded_session_file_replays_into_history() {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    writeln!(script, "START:1").unwrap();
    writeln!(script, "RESULT:1:2.345").unwrap();
    writeln!(script, "START:2").unwrap();
    writeln!(script, "RESULT:2:2.101").unwrap();
    writeln!(script, "RESULT:3:2.345").unwrap();
    script.flush().unwrap();

    let source = ScriptedSource::from_file(script.path()).unwrap();
    let events = collect_scripted_session(source);

    let t0 = Instant::now();
    let mut state = DashboardState::new();
    for event in events {
        state.apply_event(event, t0);
    }

    // run 3 had no START line and is still recorded
    assert_eq!(state.history().len(), 3);
    assert_eq!(state.history().best_time_s(), Some(2.101));

    // only the actual minimum carries the best marker
    let best_rows: Vec<u32> = state
        .history()
        .iter()
        .filter(|r| state.history().is_best_time(r.elapsed_s))
        .map(|r| r.number)
        .collect();
    assert_eq!(best_rows, vec![2]);
}
