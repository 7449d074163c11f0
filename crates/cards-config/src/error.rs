//! Error types for card configuration

use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading a card configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse JSON
    #[error("failed to parse card configuration JSON: {source}")]
    ParseJson {
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse YAML
    #[error("failed to parse card configuration YAML: {source}")]
    ParseYaml {
        #[source]
        source: serde_yaml::Error,
    },

    /// Neither a device nor an integration was given
    #[error("card configuration needs either 'device_id' or 'integration'")]
    MissingTarget,

    /// Both a device and an integration were given
    #[error("card configuration has both 'device_id' ({device_id}) and 'integration' ({integration})")]
    ConflictingTarget {
        device_id: String,
        integration: String,
    },
}
