mod ui;
mod writer;

use std::{path::PathBuf, sync::mpsc, thread};

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::error;

use lapboard::LapboardError;
use lapboard::relay::{DashboardEvent, ReconnectPolicy, RelaySource, collect_events};
use ui::live::{LiveTimingApp, config::AppConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to the timing relay and show the live dashboard
    Live {
        /// Relay WebSocket endpoint; overrides the config file
        #[arg(short, long)]
        url: Option<String>,

        /// Append every received event to a JSON-lines session log
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the dashboard without a relay; the demo buttons drive the runs
    Demo,
}

fn live(url: Option<String>, output: Option<PathBuf>) -> Result<(), LapboardError> {
    let app_config = AppConfig::from_local_file().unwrap_or_default();
    let relay_url = url.unwrap_or_else(|| app_config.relay_url.clone());
    let source = RelaySource::new(&relay_url)?;

    let (event_tx, event_rx) = mpsc::channel::<DashboardEvent>();

    // if we need to write a session log we create a second channel and have
    // the collector send to both the dashboard and writer channels
    if let Some(output_file) = output {
        let (writer_tx, writer_rx) = mpsc::channel::<DashboardEvent>();
        thread::spawn(move || {
            if let Err(e) = collect_events(
                source,
                event_tx,
                Some(writer_tx),
                ReconnectPolicy::default(),
            ) {
                error!("relay collector stopped: {}", e);
            }
        });
        thread::spawn(move || {
            if let Err(e) = writer::write_events(&output_file, writer_rx) {
                error!("session log writer stopped: {}", e);
            }
        });
    } else {
        thread::spawn(move || {
            if let Err(e) = collect_events(source, event_tx, None, ReconnectPolicy::default()) {
                error!("relay collector stopped: {}", e);
            }
        });
    }

    run_dashboard(event_rx, app_config)
}

fn demo() -> Result<(), LapboardError> {
    let app_config = AppConfig::from_local_file().unwrap_or_default();

    // no collector; the sender is dropped so the channel drains to nothing
    // and the demo buttons are the only event source
    let (_event_tx, event_rx) = mpsc::channel::<DashboardEvent>();
    run_dashboard(event_rx, app_config)
}

fn run_dashboard(
    event_rx: mpsc::Receiver<DashboardEvent>,
    app_config: AppConfig,
) -> Result<(), LapboardError> {
    let window_position = app_config.window_position.clone();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_inner_size(Vec2::new(420., 540.))
        .with_position(window_position);

    eframe::run_native(
        "Lapboard",
        native_options,
        Box::new(|cc| Ok(Box::new(LiveTimingApp::new(event_rx, app_config, cc)))),
    )
    .expect("could not start app");
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");
    match cli.command {
        Commands::Live { url, output } => {
            live(url, output).expect("Error while running the live dashboard")
        }
        Commands::Demo => demo().expect("Error while running the demo dashboard"),
    };
}
