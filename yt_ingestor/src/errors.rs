use thiserror::Error;

use crate::providers::errors::ProviderError;
use shared_utils::config::ConfigError;

/// The unified error type for the `yt_ingestor` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the metadata provider (API error, bad response).
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// An error related to configuration (missing key, empty channel list).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Raw items could not be serialized to JSON.
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}
