//! Loading the channel list.
//!
//! The list is a headerless CSV file, one channel per row:
//!
//! ```text
//! https://www.youtube.com/@somechannel/videos,Some Channel,1
//! https://www.youtube.com/@paused/videos,Paused Channel,0
//! ```
//!
//! Rows with fewer than three fields, or whose third field is not exactly
//! `1`, are skipped without comment. Extra fields are ignored.

use crate::models::Channel;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Why the channel list could not be loaded.
#[derive(Debug, Error)]
pub enum ChannelListError {
    /// No file at the given path.
    #[error("{} file not found.", .0.display())]
    Missing(PathBuf),
    /// The file exists but could not be read as CSV.
    #[error("could not read channel list: {0}")]
    Read(#[from] csv::Error),
}

/// Read the enabled channels from the list at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_channels(path: &Path) -> Result<Vec<Channel>, ChannelListError> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ChannelListError::Missing(path.to_path_buf()));
        }
        Err(e) => return Err(ChannelListError::Read(e.into())),
    };
    let channels = parse_channels(file)?;
    info!(count = channels.len(), "Loaded enabled channels");
    Ok(channels)
}

/// Parse enabled channels from CSV records, keeping file order.
pub fn parse_channels<R: io::Read>(reader: R) -> Result<Vec<Channel>, ChannelListError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut channels = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() < 3 || &record[2] != "1" {
            debug!(line = line + 1, "Skipping channel row");
            continue;
        }
        channels.push(Channel {
            address: record[0].to_string(),
            name: record[1].to_string(),
            enabled: true,
        });
    }
    Ok(channels)
}
