//! Marker-based entry extraction from raw listing page text.
//!
//! The page is never parsed as a document. Instead the scanner walks a
//! shrinking window over the raw text and pulls fields out by literal
//! markers:
//!
//! ```text
//! ... "title":"Videos" ... /watch?v=XXXXXXXXXXX ... "title":{"runs":[{"text":"Title" ...
//!     "publishedTimeText":{"simpleText":"Vor 3 Tagen" ... /watch?v=XXXXXXXXXXX ...
//! ```
//!
//! Each entry shows up twice in the listing markup (a compact summary form and
//! a detailed form). The scanner remembers every identifier it has consumed
//! and steps over repeats, so each entry is produced once no matter how the
//! two forms are ordered.

use crate::config::ScanMarkers;
use crate::models::Entry;
use std::collections::HashSet;
use std::iter::FusedIterator;

/// Lazily scans entries out of one page.
///
/// Created by [`extract_entries`]. The scan position only moves forward;
/// call [`extract_entries`] again to rescan the same text from the start.
#[derive(Debug)]
pub struct EntryScanner<'a> {
    window: &'a str,
    source_name: &'a str,
    markers: &'a ScanMarkers,
    consumed: HashSet<&'a str>,
}

/// Start scanning `text` for entries produced by channel `source_name`.
///
/// Scanning begins at the listing section marker, or at the start of the
/// text when the marker is missing. Empty or marker-free text yields an
/// empty sequence.
pub fn extract_entries<'a>(
    text: &'a str,
    source_name: &'a str,
    markers: &'a ScanMarkers,
) -> EntryScanner<'a> {
    let window = match text.find(&markers.section_begin) {
        Some(pos) => &text[pos..],
        None => text,
    };
    EntryScanner {
        window,
        source_name,
        markers,
        consumed: HashSet::new(),
    }
}

impl Iterator for EntryScanner<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        let m = self.markers;
        loop {
            let window = self.window;
            let link_pos = window.find(&m.link)?;
            let title_pos = window.find(&m.title)?;

            let id_start = link_pos + m.link.len();
            let id = take_chars(&window[id_start..], m.link_id_len);
            let link_end = id_start + id.len();
            self.window = &window[link_end..];

            if !self.consumed.insert(id) {
                continue;
            }

            let title = value_until_quote(window, title_pos + m.title.len());
            let raw_label = match window.find(&m.publish_time) {
                Some(pos) => value_until_quote(window, pos + m.publish_time.len()),
                None => m.unknown_label.as_str(),
            };
            let link = format!("{}{}", m.host_prefix, &window[link_pos..link_end]);

            return Some(Entry::new(
                link,
                self.source_name,
                raw_label,
                &m.label_prefix,
                title,
                m.title_stop,
            ));
        }
    }
}

impl FusedIterator for EntryScanner<'_> {}

/// Longest prefix of `s` holding at most `n` characters.
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Text from `start` up to the next `"`, or to the end when there is none.
fn value_until_quote(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    match rest.find('"') {
        Some(end) => &rest[..end],
        None => rest,
    }
}
