//! HTML report rendering.
//!
//! The report is a minimal standalone document with two tables, newest
//! entries first, then the older roll-up:
//!
//! ```text
//! <html><head><meta charset='UTF-8'></head><body>
//! <h2>New Videos</h2>
//! <table border="1"> ... </table>
//! <h2>Old Videos</h2>
//! <table border="1"> ... </table>
//! </body></html>
//! ```
//!
//! All free text (names, labels, titles, links) is escaped before it is
//! embedded.

use crate::config::ReportConfig;
use crate::models::{Entry, RunResult};
use quick_xml::escape::escape;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Render one titled table. Rows are numbered from 1.
pub fn render_table(entries: &[Entry], table_name: &str) -> String {
    let mut html = format!("<h2>{}</h2>\n<table border=\"1\">\n", escape(table_name));
    html.push_str("<tr><th>#</th><th>Name</th><th>Published Time</th><th>Title</th></tr>\n");
    for (i, entry) in entries.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><a href=\"{}\">{}</a></td></tr>\n",
            i + 1,
            escape(entry.source_name.as_str()),
            escape(entry.publish_label.as_str()),
            escape(entry.link.as_str()),
            escape(entry.title.as_str()),
        ));
    }
    html.push_str("</table>\n");
    html
}

/// Render the full report document.
pub fn render_report(result: &RunResult, report: &ReportConfig) -> String {
    let mut html = String::from("<html><head><meta charset='UTF-8'></head><body>\n");
    html.push_str(&render_table(&result.latest_per_channel, &report.new_section));
    html.push_str(&render_table(&result.older_deduped, &report.old_section));
    html.push_str("</body></html>\n");
    html
}

/// Write the rendered report to `path`, creating its directory if needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(
    result: &RunResult,
    report: &ReportConfig,
    path: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create report dir");
            return Err(e.into());
        }
    }

    let html = render_report(result, report);
    fs::write(path, html).await?;
    info!(
        new = result.latest_per_channel.len(),
        old = result.older_deduped.len(),
        "Wrote HTML report"
    );
    Ok(path.to_path_buf())
}
