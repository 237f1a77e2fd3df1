//! Small helpers for file naming, log output and output directory checks.

use chrono::NaiveDate;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Dated output file name, e.g. `youtubers_2026-10-18.html`.
pub fn report_file_name(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", prefix, date.format("%Y-%m-%d"), extension)
}

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` characters are cut and get a
/// `"…(+N bytes)"` suffix.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
