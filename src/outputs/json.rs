//! JSON snapshot of a run.
//!
//! Optional companion to the HTML report for scripts that want the same
//! data without scraping the report back out:
//!
//! ```text
//! json_output_dir/
//! └── youtubers_2026-10-18.json
//! ```

use crate::models::RunResult;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `result` into `{json_output_dir}/{file_name}`.
///
/// Creates `json_output_dir` if it does not exist yet.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_run(
    result: &RunResult,
    json_output_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(result)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = json_output_dir.join(file_name);
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON snapshot");
    Ok(path)
}
