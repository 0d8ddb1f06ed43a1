use thiserror::Error;

use shared_utils::config::ConfigError;

/// Errors that can occur within a `MetadataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (network failure, decode failure).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-success status with this body.
    #[error("API error: {0}")]
    Api(String),
}

/// Errors that can occur while constructing a provider.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// The API credential is missing from the environment.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Http(#[from] reqwest::Error),
}
