//! Error types for the card engine

use thiserror::Error;

/// A collaborator the engine depends on failed to answer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The config entry lookup for a domain failed
    #[error("failed to fetch config entries for '{domain}': {message}")]
    ConfigEntries { domain: String, message: String },

    /// A template subscription could not be established
    #[error("failed to subscribe to template: {message}")]
    Subscribe { message: String },
}
