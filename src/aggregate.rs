//! Turning many channel pages into the two report sections.
//!
//! Pages are fetched concurrently (bounded by `concurrency`) but results are
//! consumed in channel-list order, so the report does not depend on which
//! server answered first. The title dedup set lives only for the duration
//! of one [`collect_run`] call.

use crate::config::ScanMarkers;
use crate::models::{Channel, Entry, RunResult};
use crate::scrapers::extractor::extract_entries;
use crate::scrapers::fetcher::PageFetcher;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use tracing::{info, instrument, warn};

/// Fetch and scan every enabled channel, then build the run's sections.
///
/// A channel whose page cannot be fetched contributes nothing; the failure
/// is logged and the other channels are unaffected.
#[instrument(level = "info", skip_all, fields(channels = channels.len(), concurrency = concurrency))]
pub async fn aggregate_channels<F: PageFetcher>(
    fetcher: &F,
    channels: &[Channel],
    markers: &ScanMarkers,
    concurrency: usize,
) -> RunResult {
    let pages: Vec<Vec<Entry>> = stream::iter(channels.iter().filter(|c| c.enabled))
        .map(|channel| async move {
            match fetcher.fetch(&channel.address).await {
                Ok(text) => {
                    let entries: Vec<Entry> =
                        extract_entries(&text, &channel.name, markers).collect();
                    info!(channel = %channel.name, count = entries.len(), "Scanned channel page");
                    entries
                }
                Err(e) => {
                    warn!(channel = %channel.name, address = %channel.address, error = %e, "Fetch failed; skipping channel");
                    Vec::new()
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    collect_run(pages)
}

/// Split per-channel entry lists into newest-per-channel and deduplicated older entries.
///
/// `pages` must be in channel order. The first entry of each non-empty list
/// is that channel's newest; all remaining entries are pooled and kept only
/// at the first occurrence of each title.
pub fn collect_run<I>(pages: I) -> RunResult
where
    I: IntoIterator<Item = Vec<Entry>>,
{
    let mut latest_per_channel = Vec::new();
    let mut older = Vec::new();

    for entries in pages {
        let mut entries = entries.into_iter();
        let Some(first) = entries.next() else {
            continue;
        };
        info!(
            channel = %first.source_name,
            title = %truncate_for_log(&first.title, 120),
            "Newest entry"
        );
        latest_per_channel.push(first);
        older.extend(entries);
    }

    let older_deduped: Vec<Entry> = older
        .into_iter()
        .unique_by(|e| e.title.clone())
        .collect();

    RunResult {
        latest_per_channel,
        older_deduped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::outputs::html::render_report;
    use crate::scrapers::fetcher::FetchError;
    use pretty_assertions::assert_eq;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves canned pages; unknown addresses fail with 404.
    #[derive(Default)]
    struct StubFetcher {
        pages: HashMap<String, String>,
        delays: HashMap<String, u64>,
        requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn with_page(mut self, address: &str, text: String) -> Self {
            self.pages.insert(address.to_string(), text);
            self
        }

        fn with_delay(mut self, address: &str, millis: u64) -> Self {
            self.delays.insert(address.to_string(), millis);
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch(&self, address: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(address.to_string());
            if let Some(ms) = self.delays.get(address) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.pages
                .get(address)
                .cloned()
                .ok_or(FetchError::HttpStatus(404))
        }
    }

    fn channel(address: &str, name: &str, enabled: bool) -> Channel {
        Channel {
            address: address.to_string(),
            name: name.to_string(),
            enabled,
        }
    }

    /// Listing page with each `(id, title)` rendered in compact and detailed form.
    fn page(items: &[(&str, &str)]) -> String {
        let mut text = String::from(r#"{"title":"Videos","items":["#);
        for (id, title) in items {
            text.push_str(&format!(
                r#"{{"url":"/watch?v={id}"}},"title":{{"runs":[{{"text":"{title}"}}]}},"publishedTimeText":{{"simpleText":"Vor 1 Tag"}},{{"url":"/watch?v={id}"}},"#
            ));
        }
        text.push_str("]}");
        text
    }

    fn entry(channel: &str, id: &str, title: &str) -> Entry {
        Entry {
            link: format!("https://www.youtube.com/watch?v={id}"),
            source_name: channel.to_string(),
            publish_label: "1 Tag".to_string(),
            title: title.to_string(),
        }
    }

    fn titles(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let fetcher = StubFetcher::default().with_page(
            "https://a.example",
            page(&[
                ("a1aaaaaaaaa", "First"),
                ("a2aaaaaaaaa", "Repeat"),
                ("a3aaaaaaaaa", "Repeat"),
            ]),
        );
        let channels = vec![
            channel("https://a.example", "A", true),
            channel("https://b.example", "B", true),
            channel("https://c.example", "C", false),
        ];

        let result =
            aggregate_channels(&fetcher, &channels, &ScanMarkers::default(), 1).await;

        assert_eq!(result.latest_per_channel, vec![entry("A", "a1aaaaaaaaa", "First")]);
        assert_eq!(result.older_deduped, vec![entry("A", "a2aaaaaaaaa", "Repeat")]);
        assert_eq!(fetcher.requested(), vec!["https://a.example", "https://b.example"]);

        let html = render_report(&result, &ReportConfig::default());
        assert_eq!(html.matches("<table").count(), 2);
        let (new_table, old_table) = html.split_once("<h2>Old Videos</h2>").unwrap();
        assert!(new_table.contains("<h2>New Videos</h2>"));
        assert_eq!(new_table.matches("<tr>").count(), 2);
        assert_eq!(old_table.matches("<tr>").count(), 2);
    }

    #[tokio::test]
    async fn test_empty_page_contributes_nothing() {
        let fetcher = StubFetcher::default()
            .with_page("https://a.example", "<html>nothing</html>".to_string())
            .with_page("https://b.example", page(&[("bbbbbbbbbbb", "Only")]));
        let channels = vec![
            channel("https://a.example", "A", true),
            channel("https://b.example", "B", true),
        ];

        let result =
            aggregate_channels(&fetcher, &channels, &ScanMarkers::default(), 2).await;

        assert_eq!(titles(&result.latest_per_channel), ["Only"]);
        assert!(result.older_deduped.is_empty());
    }

    #[tokio::test]
    async fn test_results_follow_channel_order_not_completion_order() {
        let fetcher = StubFetcher::default()
            .with_page("https://slow.example", page(&[("s1sssssssss", "Slow new"), ("s2sssssssss", "Slow old")]))
            .with_page("https://fast.example", page(&[("f1fffffffff", "Fast new"), ("f2fffffffff", "Fast old")]))
            .with_delay("https://slow.example", 50);
        let channels = vec![
            channel("https://slow.example", "Slow", true),
            channel("https://fast.example", "Fast", true),
        ];

        let result =
            aggregate_channels(&fetcher, &channels, &ScanMarkers::default(), 4).await;

        assert_eq!(titles(&result.latest_per_channel), ["Slow new", "Fast new"]);
        assert_eq!(titles(&result.older_deduped), ["Slow old", "Fast old"]);
    }

    #[tokio::test]
    async fn test_no_channels() {
        let fetcher = StubFetcher::default();
        let result = aggregate_channels(&fetcher, &[], &ScanMarkers::default(), 4).await;
        assert_eq!(result, RunResult::default());
        assert!(fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn test_zero_concurrency_treated_as_sequential() {
        let fetcher = StubFetcher::default().with_page("https://a.example", page(&[("a1aaaaaaaaa", "New")]));
        let channels = vec![channel("https://a.example", "A", true)];
        let result = aggregate_channels(&fetcher, &channels, &ScanMarkers::default(), 0).await;
        assert_eq!(titles(&result.latest_per_channel), ["New"]);
    }

    #[test]
    fn test_dedup_spans_channels_first_wins() {
        let result = collect_run(vec![
            vec![entry("A", "a0", "A new"), entry("A", "a1", "x"), entry("A", "a2", "y")],
            vec![entry("B", "b0", "B new"), entry("B", "b1", "y"), entry("B", "b2", "z")],
        ]);
        assert_eq!(titles(&result.latest_per_channel), ["A new", "B new"]);
        assert_eq!(
            result.older_deduped,
            vec![entry("A", "a1", "x"), entry("A", "a2", "y"), entry("B", "b2", "z")]
        );
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let result = collect_run(vec![vec![
            entry("A", "a0", "new"),
            entry("A", "a1", "Title"),
            entry("A", "a2", "title"),
        ]]);
        assert_eq!(titles(&result.older_deduped), ["Title", "title"]);
    }

    #[test]
    fn test_latest_titles_do_not_suppress_older() {
        let result = collect_run(vec![
            vec![entry("A", "a0", "Shared")],
            vec![entry("B", "b0", "B new"), entry("B", "b1", "Shared")],
        ]);
        assert_eq!(titles(&result.latest_per_channel), ["Shared", "B new"]);
        assert_eq!(titles(&result.older_deduped), ["Shared"]);
    }

    #[test]
    fn test_older_titles_unique() {
        let pages: Vec<Vec<Entry>> = (0..5)
            .map(|c| {
                (0..6)
                    .map(|i| entry(&format!("C{c}"), &format!("{c}{i}"), &format!("t{}", (c + i) % 4)))
                    .collect()
            })
            .collect();
        let result = collect_run(pages);
        let unique: HashSet<&str> = titles(&result.older_deduped).into_iter().collect();
        assert_eq!(unique.len(), result.older_deduped.len());
        assert_eq!(result.latest_per_channel.len(), 5);
    }

    #[test]
    fn test_runs_are_independent() {
        let pages = || vec![vec![entry("A", "a0", "new"), entry("A", "a1", "old")]];
        assert_eq!(collect_run(pages()), collect_run(pages()));
        assert_eq!(collect_run(pages()).older_deduped.len(), 1);
    }
}
