//! Raw extractors: call the metadata provider, assemble full entity
//! lists, and persist one JSON array per run-date partition under
//! `<root>/raw/{channels,videos}/run_date=YYYY-MM-DD/`.
//!
//! Partitions are immutable by convention: a new run date means a new
//! directory, and nothing here ever deletes an old one.

mod channels;
mod videos;

pub use channels::fetch_channels;
pub use videos::fetch_videos_for_channels;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::errors::Error;

/// Writes the raw items as a pretty-printed JSON array, creating the
/// partition directory if needed.
fn write_raw_items<T: Serialize>(path: &Path, items: &[T]) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, items)?;
    Ok(())
}
