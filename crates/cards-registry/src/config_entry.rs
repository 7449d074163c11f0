//! Config entry records as returned by the host's `config_entries/get` call

use serde::{Deserialize, Serialize};

/// The part of a config entry the cards consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntrySummary {
    /// Unique identifier
    pub entry_id: String,

    /// Integration domain (e.g., "hue", "zwave_js")
    pub domain: String,

    /// Human-readable display name
    #[serde(default)]
    pub title: String,
}

impl ConfigEntrySummary {
    pub fn new(entry_id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            domain: domain.into(),
            title: String::new(),
        }
    }
}
