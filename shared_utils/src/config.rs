use thiserror::Error;

/// Environment variable holding the YouTube Data API key.
///
/// Its absence is fatal at client-construction time; nothing else in the
/// pipeline touches the network, so later stages never need it.
pub const API_KEY_VAR: &str = "YT_API_KEY";

/// Errors related to pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The caller supplied no channel ids to track.
    #[error("channel id list is empty; supply at least one channel id")]
    EmptyChannelList,
}

/// Reads an environment variable, returning a structured error if it's missing.
pub fn get_env_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads the YouTube Data API key from [`API_KEY_VAR`].
pub fn api_key() -> Result<String, ConfigError> {
    get_env_var(API_KEY_VAR)
}
