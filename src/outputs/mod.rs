//! Writing a run's results to disk.
//!
//! # Submodules
//!
//! - [`html`]: The dated HTML report (always written)
//! - [`json`]: A JSON snapshot of the same data (written on request)
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── youtubers_2026-10-18.html
//!
//! json_output_dir/
//! └── youtubers_2026-10-18.json
//! ```

pub mod html;
pub mod json;
