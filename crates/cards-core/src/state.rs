//! State type representing an entity's current state

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The state of an entity as the host reports it
///
/// Only the parts the cards read are modelled; anything else in the host
/// payload is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    /// The entity this state belongs to
    pub entity_id: String,

    /// The state value (e.g., "on", "off", "23.5", "unavailable")
    pub state: String,

    /// Additional attributes associated with the state
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,

    /// When the state value last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<DateTime<Utc>>,

    /// When the state was last written, even if unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl State {
    /// Create a state without attributes or timestamps
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: HashMap::new(),
            last_changed: None,
            last_updated: None,
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Check if the state value represents an unavailable entity
    pub fn is_unavailable(&self) -> bool {
        self.state == crate::STATE_UNAVAILABLE
    }

    /// Get an attribute value by key
    pub fn attribute<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// The `friendly_name` attribute, if it is a string
    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(|v| v.as_str())
    }

    /// The `device_class` attribute, if it is a string
    pub fn device_class(&self) -> Option<&str> {
        self.attributes.get("device_class").and_then(|v| v.as_str())
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        // Timestamps are not compared
        self.entity_id == other.entity_id
            && self.state == other.state
            && self.attributes == other.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_attributes() {
        let state = State::new("binary_sensor.leak", "on")
            .with_attribute("friendly_name", json!("Leak"))
            .with_attribute("device_class", json!("problem"))
            .with_attribute("battery", json!(80));

        assert_eq!(state.friendly_name(), Some("Leak"));
        assert_eq!(state.device_class(), Some("problem"));
        assert_eq!(state.attribute::<u32>("battery"), Some(80));
        assert_eq!(state.attribute::<String>("battery"), None);
    }

    #[test]
    fn test_non_string_friendly_name_is_ignored() {
        let state = State::new("sensor.x", "1").with_attribute("friendly_name", json!(12));
        assert_eq!(state.friendly_name(), None);
    }

    #[test]
    fn test_deserialize_host_payload() {
        let state: State = serde_json::from_value(json!({
            "entity_id": "light.kitchen",
            "state": "on",
            "attributes": {"friendly_name": "Kitchen"},
            "last_changed": "2024-01-01T00:00:00Z",
            "context": {"id": "ignored"}
        }))
        .unwrap();

        assert_eq!(state.state, "on");
        assert!(state.last_changed.is_some());
        assert!(state.last_updated.is_none());
        assert!(!state.is_unavailable());
    }
}
