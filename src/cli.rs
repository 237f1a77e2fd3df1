//! Command-line interface definitions for Channel Digest.
//!
//! All options have defaults, so running the binary with no arguments reads
//! `youtubers.csv` from the working directory and writes the report there.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./youtubers.csv in, ./youtubers_<date>.html out
/// channel_digest
///
/// # Custom list and report directory, plus a JSON snapshot
/// channel_digest -i lists/music.csv -o reports -j reports/json
///
/// # Fetch one page at a time
/// channel_digest --concurrency 1
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Channel list (CSV: address,name,enabled)
    #[arg(short, long, env = "CHANNEL_LIST", default_value = "youtubers.csv")]
    pub input: PathBuf,

    /// Directory the HTML report is written to
    #[arg(short, long, env = "REPORT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write a JSON snapshot of the run into this directory
    #[arg(short, long)]
    pub json_output_dir: Option<PathBuf>,

    /// Maximum number of pages fetched at once (overrides the config file)
    #[arg(long)]
    pub concurrency: Option<usize>,
}
