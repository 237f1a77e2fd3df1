//! Data models for monitored channels and the entries scanned from them.
//!
//! - [`Channel`]: One row of the channel list
//! - [`Entry`]: One item discovered on a channel's listing page
//! - [`RunResult`]: The two report sections produced by a single run

use serde::Serialize;

/// A monitored source loaded from the channel list.
///
/// Only enabled channels are fetched. Channels are read once per run and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// The listing page to fetch.
    pub address: String,
    /// Display name attached to every entry this channel produces.
    pub name: String,
    /// Whether the channel takes part in the run.
    pub enabled: bool,
}

/// A single item discovered on a channel's listing page.
///
/// Entries are immutable once built by the extractor. The constructor
/// applies the storage rules for `publish_label` and `title`, so every
/// `Entry` in circulation already satisfies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Absolute address of the item (host prefix + relative path).
    pub link: String,
    /// Name of the channel that produced the entry.
    pub source_name: String,
    /// Relative publish time, e.g. `"3 Tagen"`.
    pub publish_label: String,
    /// Title, cut at the first stop character.
    pub title: String,
}

impl Entry {
    /// Build an entry from raw scanned values.
    ///
    /// * `label_prefix` is stripped once from the front of `raw_label`
    /// * `raw_title` is cut at the first `title_stop` character
    pub fn new(
        link: String,
        source_name: &str,
        raw_label: &str,
        label_prefix: &str,
        raw_title: &str,
        title_stop: char,
    ) -> Self {
        let publish_label = raw_label
            .strip_prefix(label_prefix)
            .unwrap_or(raw_label)
            .to_string();
        let title = match raw_title.find(title_stop) {
            Some(pos) => raw_title[..pos].to_string(),
            None => raw_title.to_string(),
        };
        Self {
            link,
            source_name: source_name.to_string(),
            publish_label,
            title,
        }
    }
}

/// The two report sections of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Newest entry of every channel that yielded at least one, in channel order.
    pub latest_per_channel: Vec<Entry>,
    /// Every other entry, deduplicated by title across all channels.
    pub older_deduped: Vec<Entry>,
}
