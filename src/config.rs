//! Run configuration loaded from an optional YAML file.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock setup for scanning video channel pages:
//!
//! ```yaml
//! markers:
//!   section_begin: '"title":"Videos"'
//!   link: '/watch?v='
//!   link_id_len: 11
//!   host_prefix: 'https://www.youtube.com'
//! report:
//!   file_prefix: youtubers
//! fetch:
//!   timeout_secs: 30
//!   concurrency: 4
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub markers: ScanMarkers,
    pub report: ReportConfig,
    pub fetch: FetchConfig,
}

/// Literal markers the extractor scans for, plus the rules applied to the
/// values it pulls out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanMarkers {
    /// Start of the listing region. Scanning starts here when present.
    pub section_begin: String,
    /// Precedes every entry identifier.
    pub link: String,
    /// Precedes an entry title; the title runs to the next `"`.
    pub title: String,
    /// Precedes a publish label; the label runs to the next `"`.
    pub publish_time: String,
    /// Width of the identifier following `link`, in characters.
    pub link_id_len: usize,
    /// Prepended to `link` + identifier to form the absolute address.
    pub host_prefix: String,
    /// Stripped from the front of publish labels.
    pub label_prefix: String,
    /// Raw label used when no publish marker is found.
    pub unknown_label: String,
    /// Titles are cut at the first occurrence of this character.
    pub title_stop: char,
}

impl Default for ScanMarkers {
    fn default() -> Self {
        Self {
            section_begin: r#""title":"Videos""#.to_string(),
            link: "/watch?v=".to_string(),
            title: r#""title":{"runs":[{"text":""#.to_string(),
            publish_time: r#""publishedTimeText":{"simpleText":""#.to_string(),
            link_id_len: 11,
            host_prefix: "https://www.youtube.com".to_string(),
            label_prefix: "Vor ".to_string(),
            unknown_label: "Vor Unbekannt".to_string(),
            title_stop: '#',
        }
    }
}

/// Report naming and section headings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report files are named `{file_prefix}_{YYYY-MM-DD}.html`.
    pub file_prefix: String,
    pub new_section: String,
    pub old_section: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "youtubers".to_string(),
            new_section: "New Videos".to_string(),
            old_section: "Old Videos".to_string(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// Maximum number of pages in flight. `1` fetches strictly in sequence.
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            concurrency: 4,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, Box<dyn Error>> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_yaml::from_str(text)?;
        if config.markers.link.is_empty() || config.markers.title.is_empty() {
            return Err("markers.link and markers.title must not be empty".into());
        }
        Ok(config)
    }

    /// Load the configuration at `path`, or the defaults when `path` is `None`.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let text = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
