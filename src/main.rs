//! CLI entry point for pgn-downloader.

use anyhow::{Context, Result};
use clap::Parser;
use pgn_downloader::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use pgn_downloader::{
    FilterSpec, HttpClient, ProgressReporter, Server, SilentProgress, build_source,
    download_to_path, parse_bound,
};
use tracing::{debug, info};

mod app_config;
mod cli;
mod progress;

use app_config::{FileConfig, VerbositySetting};
use cli::Args;
use progress::SpinnerProgress;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let config = app_config::load_default_file_config()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(&args, &config)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, ?config, "CLI arguments parsed");

    // Date expressions are resolved before any network traffic.
    let spec = build_filter(&args)?;
    let server = args.server.or(config.server).unwrap_or(Server::ChessCom);
    let output = args.output_path();

    let client = HttpClient::new_with_timeouts(
        args.connect_timeout
            .or(config.connect_timeout_secs)
            .unwrap_or(CONNECT_TIMEOUT_SECS),
        args.read_timeout
            .or(config.read_timeout_secs)
            .unwrap_or(READ_TIMEOUT_SECS),
    )?;
    let source = build_source(server, client);

    info!(
        server = %server,
        username = %args.username,
        output = %output.display(),
        "Downloading games"
    );

    let progress: Box<dyn ProgressReporter> = if show_progress(&args, &config) {
        Box::new(SpinnerProgress::new())
    } else {
        Box::new(SilentProgress)
    };

    let stats = download_to_path(
        source.as_ref(),
        &args.username,
        &spec,
        &output,
        progress.as_ref(),
    )
    .await
    .with_context(|| format!("Failed to download games of '{}' from {server}", args.username))?;

    info!(
        games = stats.games,
        bytes = stats.bytes,
        batches = stats.batches_fetched,
        skipped = stats.batches_skipped,
        rejected = stats.records_rejected,
        output = %output.display(),
        "Download complete"
    );

    Ok(())
}

/// Priority: `RUST_LOG` (checked by the caller) > quiet flag > verbose flag >
/// config verbosity > info.
fn default_log_level(args: &Args, config: &FileConfig) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => config
            .verbosity
            .map_or("info", VerbositySetting::log_level),
        1 => "debug",
        _ => "trace",
    }
}

fn show_progress(args: &Args, config: &FileConfig) -> bool {
    if args.no_progress || args.quiet {
        return false;
    }
    if args.verbose == 0 && config.verbosity == Some(VerbositySetting::Quiet) {
        return false;
    }
    config.progress.unwrap_or(true)
}

fn build_filter(args: &Args) -> Result<FilterSpec> {
    let lower = parse_bound(args.since.as_deref(), false).context("Invalid --since")?;
    let upper = parse_bound(args.until.as_deref(), true).context("Invalid --until")?;

    let mut spec = FilterSpec::new()
        .with_modes(args.modes.iter().map(String::as_str))
        .with_window(lower, upper);
    if let Some(color) = args.color {
        spec = spec.with_color(color, args.username.as_str());
    }
    Ok(spec)
}
