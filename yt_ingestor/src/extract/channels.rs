use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::info;

use shared_utils::config::ConfigError;
use shared_utils::layout::{DataLayout, Dataset};

use crate::errors::Error;
use crate::extract::write_raw_items;
use crate::providers::MetadataProvider;

/// Fetches channel details for the given channel ids and saves the raw
/// JSON under the run-date partition for `run_date`.
///
/// Returns the path of the written file. An empty id list is a
/// configuration error, raised before any request is made.
pub async fn fetch_channels(
    provider: &dyn MetadataProvider,
    layout: &DataLayout,
    channel_ids: &[String],
    run_date: NaiveDate,
) -> Result<PathBuf, Error> {
    if channel_ids.is_empty() {
        return Err(ConfigError::EmptyChannelList.into());
    }

    let items = provider.list_channels(channel_ids).await?;

    let output_path = layout.raw_file(Dataset::Channels, run_date);
    write_raw_items(&output_path, &items)?;

    info!(
        count = items.len(),
        path = %output_path.display(),
        "saved raw channels"
    );
    Ok(output_path)
}
