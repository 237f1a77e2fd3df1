//! Channel page scraping.
//!
//! Scraping is split into two phases:
//!
//! 1. **Fetching** ([`fetcher`]): download a channel's listing page as raw text
//! 2. **Extraction** ([`extractor`]): scan the raw text for entries by literal markers
//!
//! Fetch failures are returned to the caller, which logs them and skips the
//! channel. Extraction never fails; text it cannot make sense of simply
//! yields fewer entries.

pub mod extractor;
pub mod fetcher;
