//! # Channel Digest
//!
//! Watches a list of video channels and publishes a dated HTML digest of
//! what they have posted.
//!
//! ## Usage
//!
//! ```sh
//! channel_digest -i youtubers.csv -o reports
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Loading**: Read enabled channels from the CSV channel list
//! 2. **Fetching**: Download each channel's listing page (bounded concurrency)
//! 3. **Extraction**: Scan each page's raw text for entries by literal markers
//! 4. **Aggregation**: Newest entry per channel, plus older entries deduplicated by title
//! 5. **Output**: Write the HTML report (and optionally a JSON snapshot)

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod channels;
mod cli;
mod config;
mod models;
mod outputs;
mod scrapers;
mod utils;

use aggregate::aggregate_channels;
use cli::Cli;
use config::AppConfig;
use outputs::{html, json};
use scrapers::fetcher::{HttpFetcher, PageFetcher};
use utils::{ensure_writable_dir, report_file_name};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("channel_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match AppConfig::load(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return Err(e);
        }
    };
    let fetcher = match HttpFetcher::new(&config.fetch) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return Err(e.into());
        }
    };

    run(&args, &config, &fetcher).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Load the channel list, aggregate every channel and write the outputs.
///
/// Returns the report path, or `None` when the run ended without a report
/// (missing channel list, unwritable report dir, failed write). Those cases
/// are logged here and are not errors.
async fn run<F: PageFetcher>(
    args: &Cli,
    config: &AppConfig,
    fetcher: &F,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    // ---- Channel list ----
    let channels = match channels::load_channels(&args.input) {
        Ok(channels) => channels,
        Err(e) => {
            error!(path = %args.input.display(), error = %e, "Cannot read channel list; no report written");
            return Ok(None);
        }
    };
    if channels.is_empty() {
        warn!(path = %args.input.display(), "Channel list has no enabled channels");
    }

    // Early check: ensure the report dir is writable before hitting the network
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Report directory is not writable (fix perms or choose a different path)"
        );
        return Ok(None);
    }

    // ---- Fetch, extract, aggregate ----
    let concurrency = args.concurrency.unwrap_or(config.fetch.concurrency);
    let result = aggregate_channels(fetcher, &channels, &config.markers, concurrency).await;
    info!(
        channels = channels.len(),
        new = result.latest_per_channel.len(),
        old = result.older_deduped.len(),
        "Aggregation complete"
    );

    // ---- HTML report ----
    let today = Local::now().date_naive();
    let report_path = args
        .output_dir
        .join(report_file_name(&config.report.file_prefix, today, "html"));
    let written = match html::write_report(&result, &config.report, &report_path).await {
        Ok(path) => {
            info!(path = %path.display(), "Report written");
            Some(path)
        }
        Err(e) => {
            error!(path = %report_path.display(), error = %e, "Failed writing report");
            None
        }
    };

    // ---- JSON snapshot ----
    if let Some(json_dir) = &args.json_output_dir {
        let file_name = report_file_name(&config.report.file_prefix, today, "json");
        if let Err(e) = json::write_run(&result, json_dir, &file_name).await {
            error!(error = %e, "Failed to write JSON snapshot");
        }
    }

    Ok(written)
}
