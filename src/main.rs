//! CLI entry point for the bike-share traffic tool.
//!
//! Loads station metadata and a trip log, then answers time-of-day filter
//! changes with per-station traffic markers. Subcommands cover a single
//! snapshot, a stepped sweep across the day, and an interactive slider fed
//! from stdin.

mod infra;
mod services;

use crate::infra::dataset::client::SourceDataset;
use crate::services::dataset_api::load_state;
use anyhow::Result;
use bike_traffic::{
    config::DatasetConfig,
    model::TimeFilter,
    output::{JsonLinesSink, append_record, print_json, print_pretty, write_json},
    stats::TrafficSummary,
    traffic::{FilterHandler, MarkerFrame, TrafficState},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_traffic")]
#[command(about = "Time-of-day traffic for bike-share stations", long_about = None)]
struct Cli {
    /// Station JSON URL or path (overrides STATIONS_URL)
    #[arg(long, global = true)]
    stations: Option<String>,

    /// Trip CSV URL or path, optionally .gz (overrides TRIPS_URL)
    #[arg(long, global = true)]
    trips: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute station markers for one time filter
    Snapshot {
        /// -1 or "any" for all trips, else a minute of day or HH:MM
        #[arg(short, long, default_value = "any", allow_hyphen_values = true)]
        time: TimeFilter,

        /// JSON file to write markers to (logged when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Step the filter across the day and append a summary row per step
    Sweep {
        /// Minutes between steps
        #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(1..1440))]
        step: u16,

        /// CSV file to append summaries to
        #[arg(short, long, default_value = "sweep.csv")]
        output: String,
    },
    /// Read filter values from stdin, one per line, and stream markers as JSON lines
    Slider,
    /// List stations with their unfiltered traffic
    Stations,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bike_traffic.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_traffic.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = DatasetConfig::from_env()?.with_overrides(cli.stations, cli.trips);
    let dataset = SourceDataset::new(config)?;

    let state = match load_state(&dataset).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Dataset load failed, nothing to render");
            return Err(e);
        }
    };

    match cli.command {
        Commands::Snapshot { time, output } => snapshot(state, time, output.as_deref())?,
        Commands::Sweep { step, output } => sweep(state, step, &output)?,
        Commands::Slider => slider(state).await?,
        Commands::Stations => {
            for station in state.stations() {
                info!(
                    short_name = %station.short_name,
                    name = station.name.as_deref().unwrap_or(""),
                    departures = station.traffic.departures(),
                    arrivals = station.traffic.arrivals(),
                    total = station.traffic.total(),
                    "Station"
                );
            }
            let summary = TrafficSummary::from_state(&state);
            print_pretty(&summary);
            info!(
                stations = summary.stations,
                active = summary.active_stations,
                active_pct = summary.active_pct(),
                busiest = summary.busiest_station.as_deref().unwrap_or(""),
                "Station list summary"
            );
        }
    }

    Ok(())
}

/// Renders one frame for `filter`, to a JSON file or the log.
fn snapshot(state: TrafficState, filter: TimeFilter, output: Option<&str>) -> Result<()> {
    let mut handler = FilterHandler::new(state, |frame: &MarkerFrame| -> Result<()> {
        match output {
            Some(path) => {
                write_json(path, frame)?;
                info!(path, markers = frame.markers.len(), label = %frame.label, "Markers written");
                Ok(())
            }
            None => print_json(frame),
        }
    });
    handler.on_filter_changed(filter)
}

/// Plays the slider from "any time" across the day in `step` minute moves.
#[tracing::instrument(skip(state))]
fn sweep(mut state: TrafficState, step: u16, output: &str) -> Result<()> {
    let filters = std::iter::once(-1).chain((0..1440).step_by(step as usize));

    let mut rows = 0;
    for value in filters {
        let filter = TimeFilter::try_from(value)?;
        state.set_filter(filter);
        append_record(output, &TrafficSummary::from_state(&state))?;
        rows += 1;
    }

    info!(rows, output, "Sweep complete");
    Ok(())
}

/// Feeds stdin lines to the filter handler until EOF.
async fn slider(state: TrafficState) -> Result<()> {
    let mut handler = FilterHandler::new(state, JsonLinesSink::new(std::io::stdout()));
    handler.render_current()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        handler.on_slider_input(&line)?;
    }

    info!("Slider input closed");
    Ok(())
}
