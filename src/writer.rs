use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    sync::mpsc::Receiver,
};

use log::error;

use lapboard::{LapboardError, relay::DashboardEvent};

/// Drain the writer channel into a JSON Lines session log, one dashboard
/// event per line. Runs until the sending side hangs up.
pub fn write_events(
    file: &PathBuf,
    event_receiver: Receiver<DashboardEvent>,
) -> Result<(), LapboardError> {
    let log_file = File::create(file).map_err(|e| LapboardError::WriterError { source: e })?;
    let mut log_writer = BufWriter::new(log_file);
    for event in &event_receiver {
        let _ = writeln!(
            log_writer,
            "{}",
            serde_json::to_string(&event).expect("dashboard events always serialize")
        )
        .map_err(|e| {
            error!("could not write event to session log: {}", e);
        });
    }
    log_writer
        .flush()
        .map_err(|e| LapboardError::WriterError { source: e })?;
    Ok(())
}
